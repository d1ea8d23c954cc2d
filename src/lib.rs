//! cafestock-core
//!
//! Data-integrity and purchase-order workflow core for a café point-of-sale
//! backend. Two cooperating pieces: a sanitizing write path that guarantees
//! the document store never receives unrepresentable values, and a small
//! state machine driving a purchase order from draft to ordered with an
//! at-most-once transition under concurrent callers.
//!
//! Persistence and identity are injected collaborators; this crate owns no
//! transport, UI, or authentication.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod commands;
pub mod config;
pub mod document;
pub mod errors;
pub mod events;
pub mod identity;
pub mod logging;
pub mod models;
pub mod sanitize;
pub mod services;
pub mod store;
pub mod writer;

pub use document::{Document, Sentinel, Value};
pub use errors::{ServiceError, WriteError};
pub use sanitize::{scrub, scrub_document, MissingPolicy};
pub use services::PurchaseOrderService;
pub use writer::SanitizingWriter;
