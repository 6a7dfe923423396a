pub mod memory;
pub mod repo;
pub mod sqlite;

#[cfg(test)]
pub mod failing;

#[cfg(test)]
pub use failing::FailingStorage;
pub use memory::MemoryStorage;
pub use repo::*;
pub use sqlite::SqliteStorage;
