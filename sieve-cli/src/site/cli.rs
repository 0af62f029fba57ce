use clap::{Arg, ArgAction, Command, value_parser};

use crate::common::with_pipeline_args;

pub const SITE_CMD: &str = "site";
pub const POSITIONS_ARG: &str = "positions";
pub const FIG3_ARG: &str = "fig3";

/// 0-based positions of the sites highlighted in figure 3 of the RV144 sieve analysis.
pub const FIG3_SITES: [usize; 12] = [8, 21, 186, 198, 307, 358, 387, 399, 420, 330, 468, 480];

pub fn create_site_cli() -> Command {
    with_pipeline_args(
        Command::new(SITE_CMD)
            .about("Run the ingestion pipeline and print mismatch tallies for the given positions.")
            .arg_required_else_help(true)
            .arg(
                Arg::new(POSITIONS_ARG)
                    .help("0-based positions in the reference")
                    .num_args(1..)
                    .value_parser(value_parser!(usize))
                    .required_unless_present(FIG3_ARG)
                    .conflicts_with(FIG3_ARG),
            )
            .arg(
                Arg::new(FIG3_ARG)
                    .long(FIG3_ARG)
                    .help("Report the figure 3 sites instead of explicit positions")
                    .action(ArgAction::SetTrue),
            ),
    )
}
