//! Layout descriptor mini-language
//!
//! The descriptor string is the wire contract with the storage engine and
//! must be bit-exact. This module renders field tokens, parses descriptors
//! back into typed fields and computes byte offsets.

mod descriptor;
mod token;

pub use descriptor::{FieldLayout, LayoutDescriptor};
pub use token::{render_token, BulkField};
