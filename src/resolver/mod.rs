//! Predicate resolution.
//!
//! The parser hands the literal text of every KEY token to a
//! [`PredicateResolver`]; what a key means is owned by the resolver, not
//! by the grammar. A ready-made `key:value` resolver is provided for
//! callers that do not need their own.

pub mod key_value;
pub mod resolver;

pub use key_value::{KeyValueResolver, SearchPair};
pub use resolver::PredicateResolver;
