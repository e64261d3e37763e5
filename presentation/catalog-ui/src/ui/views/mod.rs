pub mod confirm_dialog;
pub mod product_list;
