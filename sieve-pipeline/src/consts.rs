pub const DEFAULT_REFERENCE_FILE: &str = "env.aa.92TH023.fasta";
pub const DEFAULT_PVALUES_FILE: &str = "pvalues.csv";
pub const DEFAULT_TREATMENT_FILE: &str = "rv144_trt_lookup.csv";
pub const DEFAULT_MISMATCH_FILE: &str = "rv144.env.mismatch.distance.csv";
pub const DEFAULT_BREAKTHROUGH_FILE: &str = "rv144.env.aa.fasta";
pub const DEFAULT_ANNOTATIONS_FILE: &str = "env.map.csv";
