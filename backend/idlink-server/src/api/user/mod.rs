pub mod change_password_request;
pub mod stats_data;
pub mod update_profile_request;
pub mod user;
