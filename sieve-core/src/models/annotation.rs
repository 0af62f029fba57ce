use std::collections::BTreeMap;

use crate::errors::{Result, SieveError, Stage};

///
/// Reference coordinate information for one position of the reference sequence.
///
#[derive(Debug, Clone, PartialEq)]
pub struct PositionAnnotation {
    /// Position name in the external (HXB2) coordinate system, e.g. `"160"` or `"160a"`.
    pub reference_label: String,
    /// Amino acid of the external reference at this position.
    pub reference_aa: u8,
    /// Conservation score in `[0, 1]`.
    pub conservation: f64,
}

///
/// Position index (0-based, `< L`) -> [PositionAnnotation]. Positions are kept
/// in ascending order. Positions without an entry are allowed.
///
#[derive(Debug, Clone, Default)]
pub struct PositionAnnotationMap {
    annotations: BTreeMap<usize, PositionAnnotation>,
}

impl PositionAnnotationMap {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Add the annotation for one position.
    ///
    /// A repeated position is accepted when it carries the same values as the first
    /// occurrence and rejected with a duplicate position error otherwise.
    ///
    /// # Arguments
    /// - position: 0-based position index
    /// - annotation: values for that position
    /// - width: number of positions in the reference
    ///
    pub fn insert(&mut self, position: usize, annotation: PositionAnnotation, width: usize) -> Result<()> {
        if position >= width {
            return Err(SieveError::dimension(
                Stage::BuildAnnotationMap,
                format!("position index {}", position),
                width,
                position + 1,
            ));
        }

        match self.annotations.get(&position) {
            Some(existing) if *existing != annotation => Err(SieveError::DuplicatePosition {
                stage: Stage::BuildAnnotationMap,
                position,
            }),
            Some(_) => Ok(()),
            None => {
                self.annotations.insert(position, annotation);
                Ok(())
            }
        }
    }

    pub fn get(&self, position: usize) -> Option<&PositionAnnotation> {
        self.annotations.get(&position)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Number of positions in `0..width` without an annotation.
    pub fn missing_positions(&self, width: usize) -> usize {
        width - self.annotations.range(..width).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PositionAnnotation)> {
        self.annotations.iter().map(|(position, annotation)| (*position, annotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn annotation(label: &str, aa: u8, conservation: f64) -> PositionAnnotation {
        PositionAnnotation {
            reference_label: label.to_string(),
            reference_aa: aa,
            conservation,
        }
    }

    #[rstest]
    fn test_insert_and_lookup() {
        let mut map = PositionAnnotationMap::new();
        map.insert(2, annotation("3", b'V', 0.9), 3).unwrap();
        map.insert(0, annotation("1", b'M', 1.0), 3).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(2).unwrap().reference_label, "3");
        assert_eq!(map.get(1), None);
        assert_eq!(map.missing_positions(3), 1);
        assert_eq!(map.iter().map(|(p, _)| p).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[rstest]
    fn test_identical_repeat_is_idempotent() {
        let mut map = PositionAnnotationMap::new();
        map.insert(1, annotation("2", b'K', 0.5), 3).unwrap();
        assert!(map.insert(1, annotation("2", b'K', 0.5), 3).is_ok());
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    fn test_conflicting_repeat_is_rejected() {
        let mut map = PositionAnnotationMap::new();
        map.insert(1, annotation("2", b'K', 0.5), 3).unwrap();
        let err = map.insert(1, annotation("2", b'R', 0.5), 3).unwrap_err();
        assert_eq!(
            err,
            SieveError::DuplicatePosition {
                stage: Stage::BuildAnnotationMap,
                position: 1
            }
        );
    }

    #[rstest]
    fn test_position_out_of_range() {
        let mut map = PositionAnnotationMap::new();
        let err = map.insert(3, annotation("4", b'K', 0.5), 3).unwrap_err();
        assert!(matches!(err, SieveError::DimensionMismatch { .. }));
    }
}
