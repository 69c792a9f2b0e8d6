//! HTTP middleware stack for the dashboard.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions, in-memory store)
//! 4. Session expiry (backend 401 -> flush + login redirect)
//! 5. [`auth::RequireAdminAuth`] extractor on protected handlers

pub mod auth;
pub mod expiry;
pub mod session;

pub use auth::{CurrentAdmin, RequireAdminAuth};
pub use expiry::redirect_on_expiry;
pub use session::{create_session_layer, push_flash, take_flash};
