/*
 * Responsibility
 * - The verdict as seen by handlers
 * - The guard stores it in request extensions; handlers only receive this type
 */
use crate::services::auth::ValidationResult;

/// Remote verdict for the current request (opaque JSON).
#[derive(Debug, Clone)]
pub struct Validation(pub ValidationResult);
