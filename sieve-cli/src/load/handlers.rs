use anyhow::Result;
use clap::ArgMatches;

use sieve_core::models::SequenceCorpus;

use crate::common::run_pipeline;

pub fn run_load(matches: &ArgMatches) -> Result<()> {
    let mut print_summary = |corpus: &SequenceCorpus| {
        let reference = corpus.reference();
        println!("reference\t{}", reference.id());
        println!("length\t{}", corpus.width());
        println!("vaccine\t{}", corpus.num_vaccine());
        println!("placebo\t{}", corpus.num_placebo());
        println!("annotated\t{}", corpus.annotations().len());

        let most_significant = corpus
            .p_values()
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1));
        if let Some((position, p_value)) = most_significant {
            println!("min_pvalue\t{}\t{}", position, p_value);
        }
    };

    run_pipeline(matches, &mut print_summary)?;

    Ok(())
}
