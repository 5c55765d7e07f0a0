pub mod builders;
pub mod connection;
pub mod listings;
pub mod matches;
pub mod memory;
pub mod repository;
pub mod saved_searches;
pub mod shortlists;
pub mod sqlite_store;

pub use builders::BuilderDirectory;
pub use listings::ListingStore;
pub use memory::MemoryStore;
pub use repository::AccountStore;
pub use sqlite_store::SqliteStore;
