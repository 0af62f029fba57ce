use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::*;

use sieve_core::models::TreatmentGroup;
use sieve_pipeline::{CancelToken, FsFetcher, Pipeline, PipelineConfig, PipelineState};

#[fixture]
fn path_to_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

#[rstest]
#[tokio::test]
async fn test_corpus_from_data_dir(path_to_data: PathBuf) {
    let pipeline = Pipeline::new(FsFetcher::new(path_to_data), PipelineConfig::default());
    let corpus = pipeline.run(&CancelToken::never()).await.unwrap();

    assert_eq!(pipeline.state(), PipelineState::Published);
    assert_eq!(corpus.reference().id(), "92TH023");
    assert_eq!(corpus.width(), 4);
    assert_eq!(corpus.num_vaccine(), 1);
    assert_eq!(corpus.num_placebo(), 2);

    // reference row first, then records in file order
    assert_eq!(corpus.raw_by_record().len(), 4);
    assert_eq!(corpus.raw_by_position()[3], b"LLIL".to_vec());
    assert_eq!(corpus.placebo_by_position()[3], b"IL".to_vec());

    let s2 = corpus.record("S2").unwrap();
    assert_eq!(s2.group, TreatmentGroup::Placebo);
    assert_eq!(s2.mismatch, Some(vec![0, 0, 0, 1]));

    // S4 is in the treatment table only
    assert!(corpus.record("S4").is_none());
}

#[rstest]
#[tokio::test]
async fn test_site_tallies_from_data_dir(path_to_data: PathBuf) {
    let pipeline = Pipeline::new(FsFetcher::new(path_to_data), PipelineConfig::default());
    let corpus = pipeline.run(&CancelToken::never()).await.unwrap();

    let site = corpus.site(2).unwrap();
    assert_eq!(site.reference_label.as_deref(), Some("2a"));
    assert_eq!(site.p_value, 0.012);
    assert_eq!(site.vaccine.total_mismatches(), 1);
    assert_eq!(site.placebo.total_mismatches(), 0);
    assert_eq!(site.mismatched_residues(), vec![b'A']);
    assert_eq!(site.to_string(), "2a (V) Mismatches");

    let sites: Vec<_> = corpus.sites().collect();
    assert_eq!(sites.len(), 4);
    assert_eq!(sites[3].placebo.group_size, 2);
    assert_eq!(sites[3].placebo.mismatches.get(&b'I'), Some(&1));
}
