//! JSON helpers: field paths and structural partial matching.

mod matcher;
mod path;

pub use matcher::{JsonMismatch, json_like};
pub use path::{JsonPath, PathSegment};
