/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - The forwarder (and the messaging client inside it) is injected here,
 *   never looked up from the handler side
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::services::auth::AuthForwarder;

#[derive(Clone, Debug)]
pub struct AppState {
    pub forwarder: Arc<AuthForwarder>,
}

impl AppState {
    pub fn new(forwarder: Arc<AuthForwarder>) -> Self {
        Self { forwarder }
    }
}
