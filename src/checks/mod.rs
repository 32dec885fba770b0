//! Lint rule catalogue.

pub mod builtin;

pub use builtin::Rule;
