pub mod client;
pub mod envelope;
pub mod valkey;

pub use client::{MessagingClient, MessagingError, MessagingResult};
pub use valkey::ValkeyMessagingClient;
