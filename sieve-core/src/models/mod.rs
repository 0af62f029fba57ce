pub mod annotation;
pub mod corpus;
pub mod dictionary;
pub mod group;
pub mod sequence;
pub mod site;

// re-export for cleaner imports
pub use self::annotation::{PositionAnnotation, PositionAnnotationMap};
pub use self::corpus::{CorpusParts, SequenceCorpus};
pub use self::dictionary::{TreatmentDictionary, TreatmentEntry};
pub use self::group::TreatmentGroup;
pub use self::sequence::{FastaRecord, ReferenceSequence, SequenceRecord};
pub use self::site::{GroupTally, SiteSummary};
