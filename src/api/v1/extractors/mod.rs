/*!
 * Extractors for handlers behind the authorization guard
 *
 * Public API:
 * - Validation
 * - ValidationExtractor
 */
mod validation;

pub use validation::{Validation, ValidationExtractor};
