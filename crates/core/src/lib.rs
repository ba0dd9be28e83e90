//! Core types for nestwrite
//!
//! This crate defines the vocabulary every other crate speaks:
//! - [`Payload`]: the JSON object a form submits
//! - [`JsonPath`]: accessor paths used by table metadata
//! - [`Error`] / [`Result`]: errors from the layers around the transform

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod json;

pub use error::{Error, Result};
pub use json::{
    is_object, payload_from_str, payload_from_value, value_kind, JsonPath, PathParseError,
    PathSegment, Payload,
};
