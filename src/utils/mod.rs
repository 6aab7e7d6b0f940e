//! Utility functions shared across layers.
//!
//! - [`key_validator`] - Lookup key validation predicates

pub mod key_validator;
