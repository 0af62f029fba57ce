use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, arg, value_parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use sieve_core::errors::Stage;
use sieve_core::models::SequenceCorpus;
use sieve_pipeline::{
    CorpusConsumer, FsFetcher, Pipeline, PipelineConfig, PipelineState, cancel_pair,
};

pub const DATA_DIR_ARG: &str = "data-dir";
pub const CONFIG_ARG: &str = "config";
pub const TIMEOUT_ARG: &str = "timeout";

/// Attach the arguments every pipeline-running subcommand shares.
pub fn with_pipeline_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new(DATA_DIR_ARG)
            .short('d')
            .long(DATA_DIR_ARG)
            .help("Directory holding the input files")
            .required(true),
    )
    .arg(arg!(-c --config <config> "TOML file overriding input file names and the fetch timeout"))
    .arg(
        Arg::new(TIMEOUT_ARG)
            .short('t')
            .long(TIMEOUT_ARG)
            .help("Seconds to wait for any single input before failing")
            .value_parser(value_parser!(f64)),
    )
}

///
/// Resolve the pipeline configuration: the TOML file if given, else defaults,
/// with `--timeout` taking precedence over the file.
///
pub fn build_config(matches: &ArgMatches) -> Result<PipelineConfig> {
    let config = match matches.get_one::<String>(CONFIG_ARG) {
        Some(path) => PipelineConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config file {}", path))?,
        None => PipelineConfig::default(),
    };

    match matches.get_one::<f64>(TIMEOUT_ARG) {
        Some(secs) => Ok(config.with_timeout(*secs)?),
        None => Ok(config),
    }
}

fn stage_progress() -> Result<ProgressBar> {
    let pb = ProgressBar::new(Stage::ALL.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?,
    );
    Ok(pb)
}

///
/// Run the pipeline over the data directory on a single-threaded runtime.
/// Ctrl-C cancels the run; the consumer sees the corpus only if it publishes.
///
pub fn run_pipeline<C>(matches: &ArgMatches, consumer: &mut C) -> Result<SequenceCorpus>
where
    C: CorpusConsumer + ?Sized,
{
    let data_dir = matches
        .get_one::<String>(DATA_DIR_ARG)
        .context("A path to the data directory is required.")?;
    let config = build_config(matches)?;

    info!("Reading inputs from {}", data_dir);
    let pipeline = Pipeline::new(FsFetcher::new(data_dir), config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let pb = stage_progress()?;

    let result = runtime.block_on(async {
        let (handle, token) = cancel_pair();
        let mut states = pipeline.subscribe();

        let run = pipeline.run_and_publish(&token, consumer);
        tokio::pin!(run);

        loop {
            tokio::select! {
                result = &mut run => break result,
                Ok(()) = tokio::signal::ctrl_c(), if !token.is_cancelled() => {
                    warn!("Interrupted, cancelling pipeline");
                    handle.cancel();
                }
                Ok(()) = states.changed() => {
                    if let PipelineState::Running(stage) = *states.borrow_and_update() {
                        pb.set_position(stage.ordinal() as u64);
                        pb.set_message(stage.name());
                    }
                }
            }
        }
    });

    match &result {
        Ok(_) => pb.finish_with_message("Published"),
        Err(err) => pb.abandon_with_message(format!("Failed at {}", err.stage())),
    }

    Ok(result?)
}
