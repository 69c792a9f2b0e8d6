//! LCA TV Core - Shared types library.
//!
//! This crate provides common types used across all LCA TV client components:
//! - `client` - Typed REST client, session context and query cache
//! - `admin` - Advertising dashboard (clients, ad spaces, orders, analytics)
//! - `viewer` - Viewer content app (live, journal, émissions, ticker)
//! - `cli` - Command-line access to the same backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, phones, money and statuses
//! - [`models`] - DTOs mirrored from the backend REST API
//! - [`format`] - French display formatting (currency, dates, durations)
//! - [`validation`] - Client-side form validation
//! - [`pricing`] - Order cost estimates and invoice previews
//! - [`emissions`] - Grouping of videos into shows
//! - [`ticker`] - Breaking-news ticker state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod emissions;
pub mod format;
pub mod models;
pub mod pricing;
pub mod ticker;
pub mod types;
pub mod validation;

pub use types::*;
