use anyhow::Result;
use clap::ArgMatches;

use sieve_core::models::{GroupTally, SequenceCorpus, SiteSummary, TreatmentGroup};

use super::cli::{FIG3_ARG, FIG3_SITES, POSITIONS_ARG};
use crate::common::run_pipeline;

fn format_tally(tally: &GroupTally) -> String {
    let residues: String = tally
        .mismatches
        .iter()
        .map(|(residue, count)| format!(" {}:{}", *residue as char, count))
        .collect();

    format!(
        "{}/{} ({:.3}){}",
        tally.total_mismatches(),
        tally.group_size,
        tally.mismatch_fraction(),
        residues
    )
}

/// Positions named on the command line, or the figure 3 preset.
fn selected_positions(matches: &ArgMatches) -> Vec<usize> {
    if matches.get_flag(FIG3_ARG) {
        return FIG3_SITES.to_vec();
    }
    matches
        .get_many::<usize>(POSITIONS_ARG)
        .map(|values| values.copied().collect())
        .unwrap_or_default()
}

fn print_site(site: &SiteSummary) {
    println!("Env {}", site);
    println!("  p-value\t{}", site.p_value);
    if let Some(conservation) = site.conservation {
        println!("  conservation\t{}", conservation);
    }
    for group in [TreatmentGroup::Vaccine, TreatmentGroup::Placebo] {
        println!("  {}\t{}", group, format_tally(site.tally(group)));
    }
}

pub fn run_site(matches: &ArgMatches) -> Result<()> {
    let positions = selected_positions(matches);

    let corpus = run_pipeline(matches, &mut |_: &SequenceCorpus| {})?;

    for position in positions {
        print_site(&corpus.site(position)?);
    }

    Ok(())
}
