//! Combining partial search results.
//!
//! A logical search may be executed as several independent partitions
//! (per filter, per backing index). Each produces a [`PartialResult`];
//! [`reduce`] folds them into the single result the caller sees.
//!
//! - `count` is summed
//! - `items` are concatenated in partition order
//! - facet maps are unioned with counts summed per key
//! - flags are OR-ed
//! - `invalid_keys` is always empty in the reduced result

pub mod partial;
pub mod reduce;

pub use partial::{AccessState, PartialResult, PublicationType};
pub use reduce::reduce;
