//! # Core data model for sieve analysis.
//!
//! A sieve analysis compares pathogen sequences recovered from vaccine and placebo
//! recipients against the vaccine insert. This crate holds the types every other
//! crate in the workspace shares: the reference and breakthrough sequences, the
//! treatment dictionary, position annotations, the position-indexed matrices and
//! the error taxonomy.
//!
pub mod errors;
pub mod index;
pub mod models;
pub mod transpose;
pub mod utils;

// re-expose core functions
pub use errors::*;
pub use index::*;
pub use models::*;
pub use transpose::*;
pub use utils::*;
