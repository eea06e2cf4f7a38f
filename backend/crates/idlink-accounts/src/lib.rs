//! Identity resolution, account linking and the auth use cases built on them.
//!
//! Nothing here is global: `AccountService` receives its resolver, linker,
//! token service and hasher at construction and every request is
//! authenticated independently from its bearer token.

pub mod error;
pub mod linker;
pub mod models;
pub mod resolver;
pub mod service;

pub use error::{AccountError, Result};
pub use linker::{AccountLinker, LinkOutcome};
pub use models::auth_session::AuthSession;
pub use models::identity_stats::IdentityStats;
pub use models::profile_update::ProfileUpdate;
pub use models::signup_request::SignupRequest;
pub use resolver::IdentityResolver;
pub use service::AccountService;
