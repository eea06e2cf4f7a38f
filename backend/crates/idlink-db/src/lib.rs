pub mod connection;
pub mod error;
pub mod identity_store;
pub mod repositories;

pub use connection::pool::{MIGRATOR, create_pool, run_migrations};
pub use error::{DbError, Result};
pub use identity_store::IdentityStore;
pub use repositories::identity_repository::IdentityRepository;
