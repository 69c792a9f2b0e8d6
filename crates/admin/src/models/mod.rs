//! Dashboard-local models.
//!
//! Backend DTOs live in `lca_tv_core::models`; only session-held state is
//! defined here.

pub mod session;

pub use session::{Flash, FlashKind, keys as session_keys};
