//! Transform Conformance Suite
//!
//! End-to-end checks of the public facade:
//!
//! - **shaping**: the documented input/output pairs of the transform
//! - **conventions**: non-default audit fields, id key and operation keys
//! - **submission**: schema metadata plus transform, as a form submit would use them
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test transform_conformance
//! ```

mod test_utils;

mod conventions;
mod shaping;
mod submission;
