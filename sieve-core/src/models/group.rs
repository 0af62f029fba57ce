use std::fmt::{self, Display};

///
/// Study arm a trial participant was assigned to.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreatmentGroup {
    Vaccine,
    Placebo,
}

impl TreatmentGroup {
    ///
    /// Classify a free-text treatment label. Anything starting with `p` or `P`
    /// is placebo; everything else (including an empty label) is vaccine.
    ///
    pub fn classify(treatment: &str) -> Self {
        match treatment.chars().next() {
            Some(c) if c.eq_ignore_ascii_case(&'p') => TreatmentGroup::Placebo,
            _ => TreatmentGroup::Vaccine,
        }
    }

    pub fn is_vaccine(&self) -> bool {
        matches!(self, TreatmentGroup::Vaccine)
    }
}

impl Display for TreatmentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreatmentGroup::Vaccine => write!(f, "vaccine"),
            TreatmentGroup::Placebo => write!(f, "placebo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("Placebo", TreatmentGroup::Placebo)]
    #[case("placebo", TreatmentGroup::Placebo)]
    #[case("PLA", TreatmentGroup::Placebo)]
    #[case("Vaccine", TreatmentGroup::Vaccine)]
    #[case("ALVAC+AIDSVAX", TreatmentGroup::Vaccine)]
    #[case("", TreatmentGroup::Vaccine)]
    fn test_classify(#[case] treatment: &str, #[case] expected: TreatmentGroup) {
        assert_eq!(TreatmentGroup::classify(treatment), expected);
    }
}
