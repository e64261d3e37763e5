pub mod local_storage;
pub mod storage {
    pub mod file;
    pub mod key_value;
    pub mod memory;
}
pub mod product {
    pub mod entity;
    pub mod id_generator;
    pub mod repository;
}
