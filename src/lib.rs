//! Bearer credential forwarding to a remote authorization service.
//!
//! An inbound request's `Authorization` credential is sent over a
//! request/response message channel (`validate-authorization`) and the
//! handler only runs once the remote verdict is back.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

pub use error::AppError;
pub use services::auth::{AuthForwarder, ForwardError, VALIDATE_AUTHORIZATION, forward};
pub use services::messaging::{MessagingClient, MessagingError};
pub use state::AppState;
