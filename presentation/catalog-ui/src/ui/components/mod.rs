pub mod input;
pub mod product_form;
