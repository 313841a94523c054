pub mod memory;
pub mod models;
