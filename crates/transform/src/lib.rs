//! Nested-write transform for nestwrite
//!
//! Turns the nested object a form produces into the payload an ORM-style
//! nested-write API expects. Relations are recognised purely by shape:
//! - `{id}` alone: link an existing row (connect)
//! - object with an id: update that row
//! - object without an id: create a row
//! - list of objects: split into create and `{where, data}` update buckets
//!
//! Audit fields and nulls are dropped. Key names are configurable through
//! [`WriteConventions`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod clean;
pub mod conventions;
pub mod report;
pub mod transform;

pub use classify::{classify, FieldShape};
pub use conventions::{OperationKeys, WriteConventions, DEFAULT_AUDIT_FIELDS, DEFAULT_ID_KEY};
pub use report::{FieldOutcome, FieldReport, TransformReport};
pub use transform::{transform, transform_with, Transformer};
