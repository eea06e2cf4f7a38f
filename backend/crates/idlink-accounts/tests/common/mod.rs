#![allow(dead_code)]

mod email_blind_store;
mod harness;

pub use email_blind_store::EmailBlindStore;
pub use harness::{TEST_SECRET, TestHarness, github_profile, google_profile, signup_request};
