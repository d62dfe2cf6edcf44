mod core;
mod types;

pub use self::core::ValidationExtractor;
pub use self::types::Validation;
