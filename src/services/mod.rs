pub mod auth;
pub mod messaging;
