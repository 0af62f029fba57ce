use clap::Command;

use crate::common::with_pipeline_args;

pub const LOAD_CMD: &str = "load";

pub fn create_load_cli() -> Command {
    with_pipeline_args(
        Command::new(LOAD_CMD)
            .about("Run the ingestion pipeline and print a summary of the assembled corpus."),
    )
}
