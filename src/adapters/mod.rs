//! Adapters implementing the engine's ports: in-memory record storage and
//! snapshot persistence formats.

pub mod csv_repository;
pub mod memory_store;
pub mod msgpack_repository;

pub use csv_repository::CsvRepository;
pub use memory_store::MemoryStore;
pub use msgpack_repository::MsgpackRepository;
