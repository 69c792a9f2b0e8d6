//! Viewer-local models.
//!
//! Backend DTOs live in `lca_tv_core::models`; this module holds what the
//! viewer keeps in the cookie session and the static screen content.

pub mod profile;
pub mod session;

pub use profile::ProfileView;
pub use session::{Flash, FlashKind, Preference, PreferenceSection, Preferences, keys as session_keys};
