pub mod auth;
pub mod envelope;
pub mod error;
pub mod extractors;
pub mod identity_dto;
pub mod oauth;
pub mod user;
pub mod validation;
