//! # Readers for sieve analysis inputs.
//!
//! Every reader works on the full text of one input file and returns either the
//! parsed structure or the first [sieve_core::SieveError] it runs into:
//!
//! - reference and breakthrough FASTA files ([fasta])
//! - the p-value column ([pvalues])
//! - the treatment lookup table ([treatment])
//! - the per-position mismatch table ([mismatch])
//! - the position annotation table ([annotation])
//!
pub mod annotation;
pub mod consts;
pub mod fasta;
pub mod mismatch;
pub mod pvalues;
pub mod treatment;

mod tables;

// re-expose readers
pub use annotation::*;
pub use fasta::*;
pub use mismatch::*;
pub use pvalues::*;
pub use treatment::*;
