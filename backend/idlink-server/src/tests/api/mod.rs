mod error;
mod extractors;
mod oauth;
mod validation;
