//! Key codec
//!
//! Builds primary keys and sort keys from semantic fields, and resume keys
//! from the last item returned on a given index.

mod codec;

pub use codec::{build_key, build_resume_key, build_sort_key, IndexKind, SEPARATOR};

#[cfg(test)]
mod tests;
