//! A small recursive-descent JSON parser built on the workspace's
//! ordered containers: objects are [`copse_tree::TreeMap`]s keyed by
//! string (members therefore serialize in ascending key order) and
//! arrays are [`copse_containers::List`]s.
//!
//! Malformed input is reported as a [`JsonError`] carrying the byte
//! offset of the problem; the parser never panics on bad input.

mod error;
mod parser;
mod value;

pub use error::JsonError;
pub use parser::parse;
pub use value::{JsonArray, JsonObject, JsonValue};
