//! Declarative validation for incoming HTTP requests.
//!
//! This crate checks a request against a per-location schema before the
//! handler runs:
//! - **Schemas**: Required fields and custom validators, declared per
//!   request location (query, body, params, files)
//! - **Aggregated reports**: Every covered location is verified; failures
//!   are collected into one response payload instead of stopping at the
//!   first bad field
//! - **Upload cleanup**: Stored uploads are removed when a request is
//!   rejected, so failed multipart submissions do not leak files
//!
//! # Core Types
//!
//! - [`Schema`]: Per-location rules, built from [`SubSchema`] and [`FieldRule`]
//! - [`RequestParts`]: Read-only view of a request; [`RequestAdapter`] is the owned implementation
//! - [`ValidationGate`]: Checks requests and produces an [`Outcome`]
//! - [`FieldReport`]: Per-location error maps handed to formatters
//! - [`ErrorFormatter`]: Shapes the rejection body; [`DefaultFormatter`] is the stock envelope
//!
//! # Examples
//!
//! ```
//! use request_gate::{FieldRule, RequestAdapter, Schema, SubSchema, ValidationGate};
//!
//! let schema: Schema = Schema::new().body(
//!     SubSchema::new()
//!         .field("name", FieldRule::required())
//!         .field("email", FieldRule::required()),
//! );
//! let gate = ValidationGate::new(schema);
//!
//! let mut request = RequestAdapter::new();
//! request.add_body_field("name", "Ada");
//!
//! let outcome = gate.check(&request).expect("no cleanup configured");
//! let rejection = outcome.into_rejection().expect("email is missing");
//! assert_eq!(rejection.status, 400);
//! assert_eq!(
//!     rejection.body["fields"]["body"]["email"],
//!     serde_json::json!("email is required"),
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod error;
mod format;
mod gate;
mod location;
mod report;
mod request;
mod respond;
mod schema;
mod store;
mod verify;

pub use adapter::RequestAdapter;
pub use error::GateError;
pub use format::{DefaultFormatter, ErrorFormatter, DEFAULT_ERROR_TEXT};
pub use gate::{Outcome, Rejection, ValidationGate};
pub use location::Location;
pub use report::{ErrorMap, FieldReport};
pub use request::{RequestParts, UploadedFile};
pub use respond::{handle, Respond};
pub use schema::{FieldRule, Schema, SubSchema, ValidatorFn};
pub use store::{DiskStore, FileStore};
