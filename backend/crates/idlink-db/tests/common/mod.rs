#![allow(dead_code)]

mod fixtures;
mod test_db;

pub use fixtures::{create_local_identity, create_provider_identity};
pub use test_db::create_test_pool;
