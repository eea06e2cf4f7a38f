pub mod auth;
pub mod auth_data;
pub mod signin_request;
pub mod signup_request;
