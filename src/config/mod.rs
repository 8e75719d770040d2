//! Parser configuration.
//!
//! The KEY pattern and the predicate resolver are passed in explicitly;
//! nothing is read from global state. [`QueryConfig`] is the serialisable
//! form, [`QueryParser`] the compiled, reusable one.

pub mod config;

pub use config::{QueryConfig, QueryParser};
