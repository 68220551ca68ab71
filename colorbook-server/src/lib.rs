//! HTTP transport for the colorbook catalog.
//!
//! Route handlers parse and validate request parameters, call into the
//! services from `colorbook-core`, and wrap results in the standard
//! `{success, data, error, message}` envelope. All failure mapping to HTTP
//! status codes happens in [`errors`].

pub mod auth;
pub mod errors;
pub mod handlers;
pub mod infra;
pub mod net;
pub mod routes;

#[cfg(test)]
mod tests;

pub use infra::app_state::AppState;
pub use routes::create_router;
