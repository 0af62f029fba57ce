pub const SAMPLE_ID_COL: &str = "sampleID";
pub const TREATMENT_COL: &str = "treatment";
pub const PVALUE_COL: &str = "pvalue";
pub const POS_INDEX_COL: &str = "posIndex";
pub const HXB2_POS_COL: &str = "hxb2Pos";
pub const HXB2_AA_COL: &str = "hxb2aa";
pub const CONSERVATION_COL: &str = "conservation";
