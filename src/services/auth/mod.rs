pub mod credential;
pub mod forwarder;
pub mod packet;

pub use credential::{Credential, extract_credential};
pub use forwarder::{AuthForwarder, ForwardError, HeaderSource, VALIDATE_AUTHORIZATION, forward};
pub use packet::{ValidationOptions, ValidationPacket, ValidationResult};
