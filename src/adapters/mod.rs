// Adapters layer: concrete storage backends behind the `Storage` port.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
