mod common;
mod load;
mod site;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "sieve";
    pub const BIN_NAME: &str = "sieve";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Assemble sieve analysis corpora from reference, treatment and breakthrough sequence files.")
        .subcommand_required(true)
        .subcommand(load::cli::create_load_cli())
        .subcommand(site::cli::create_site_cli())
}

fn main() -> Result<()> {
    env_logger::init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // LOAD
        //
        Some((load::cli::LOAD_CMD, matches)) => {
            load::handlers::run_load(matches)?;
        }

        //
        // SITE
        //
        Some((site::cli::SITE_CMD, matches)) => {
            site::handlers::run_site(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parser_is_valid() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_site_positions() {
        let matches = build_parser()
            .try_get_matches_from(["sieve", "site", "-d", "data", "3", "10"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, site::cli::SITE_CMD);

        let positions: Vec<usize> = sub
            .get_many::<usize>(site::cli::POSITIONS_ARG)
            .unwrap()
            .copied()
            .collect();
        assert_eq!(positions, vec![3, 10]);
    }

    #[rstest]
    fn test_site_requires_positions() {
        let result = build_parser().try_get_matches_from(["sieve", "site", "-d", "data"]);
        assert!(result.is_err());
    }
}
