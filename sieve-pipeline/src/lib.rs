//! # Staged ingestion of sieve analysis inputs.
//!
//! [Pipeline] fetches the six input files through an [InputFetcher], runs the
//! loading, merging, indexing and transposition stages in dependency order and
//! publishes a [sieve_core::SequenceCorpus]. Progress is broadcast as
//! [PipelineState] values and a run can be abandoned with a [CancelToken].
//!
//! ```no_run
//! use sieve_pipeline::{FsFetcher, Pipeline, PipelineConfig, CancelToken};
//!
//! # async fn demo() -> sieve_core::Result<()> {
//! let pipeline = Pipeline::new(FsFetcher::new("data"), PipelineConfig::default());
//! let corpus = pipeline.run(&CancelToken::never()).await?;
//! println!("{}", corpus);
//! # Ok(())
//! # }
//! ```
pub mod cancel;
pub mod config;
pub mod consts;
pub mod consumer;
pub mod fetch;
pub mod orchestrator;
pub mod state;

pub use cancel::{CancelHandle, CancelToken, cancel_pair};
pub use config::{ConfigError, ConfigResult, InputFiles, PipelineConfig};
pub use consumer::CorpusConsumer;
pub use fetch::{FsFetcher, InputFetcher, MemoryFetcher};
pub use orchestrator::Pipeline;
pub use state::PipelineState;
