pub mod image_probe;
pub mod products_page;
