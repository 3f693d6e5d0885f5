//! Write collaborator implementations

pub mod memory;
pub mod stream;

pub use memory::MemoryWriter;
pub use stream::{ConsoleWriter, StreamWriter};

// Re-export the trait next to its implementations
pub use crate::core::{OutputRecord, RecordWriter};
