/*
 * Responsibility
 * - Public entry points of the middleware layer
 */
pub mod auth;
pub mod http;
