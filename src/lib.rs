//! nestwrite: nested-write payloads from form state
//!
//! Forms submit nested objects; ORM nested-write APIs want `connect`,
//! `create` and `update` operations. [`transform`] bridges the two using
//! nothing but the shape of the data, and the schema types describe how
//! each entity is rendered and where its mutations are sent.
//!
//! ```
//! use serde_json::json;
//!
//! let payload = json!({
//!     "name": "Widget",
//!     "salaryRule": {"id": "sr1"},
//!     "tags": [{"id": "t1", "label": "x"}, {"label": "y"}],
//!     "createdAt": "2024-01-01"
//! });
//! let out = nestwrite::transform(payload.as_object().unwrap());
//! assert_eq!(out["salaryRule"], json!({"id": "sr1"}));
//! assert_eq!(out["tags"]["create"], json!([{"label": "y"}]));
//! assert!(!out.contains_key("createdAt"));
//! ```

#![warn(missing_docs)]

pub mod types;

pub use nestwrite_transform::{classify, transform, transform_with};
pub use types::*;
