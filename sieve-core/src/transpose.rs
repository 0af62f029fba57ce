use crate::errors::{Result, SieveError, Stage};

/// Row-major matrix. Record-major when rows are sequences, position-major when rows are positions.
pub type Matrix<T> = Vec<Vec<T>>;

///
/// Transpose a rectangular matrix so that `output[p][r] == input[r][p]`.
///
/// Fails with a dimension mismatch when the input has no rows, or when any row
/// differs in length from the first one.
///
pub fn transpose<T: Clone>(matrix: &[Vec<T>]) -> Result<Matrix<T>> {
    let first = matrix
        .first()
        .ok_or_else(|| SieveError::dimension(Stage::TransposeAll, "matrix rows", 1, 0))?;
    let width = first.len();

    if let Some(ragged) = matrix.iter().find(|row| row.len() != width) {
        return Err(SieveError::dimension(
            Stage::TransposeAll,
            "matrix row length",
            width,
            ragged.len(),
        ));
    }

    let transposed = (0..width)
        .map(|col| matrix.iter().map(|row| row[col].clone()).collect())
        .collect();

    Ok(transposed)
}

///
/// Transpose a record-major matrix whose rows must all be `width` long.
///
/// Unlike [transpose], an empty matrix is accepted and yields `width` empty rows,
/// so a treatment group without any records still has one row per position.
///
pub fn transpose_to_width<T: Clone>(matrix: &[Vec<T>], width: usize) -> Result<Matrix<T>> {
    if matrix.is_empty() {
        return Ok(vec![Vec::new(); width]);
    }

    let transposed = transpose(matrix)?;
    if transposed.len() != width {
        return Err(SieveError::dimension(
            Stage::TransposeAll,
            "matrix row length",
            width,
            transposed.len(),
        ));
    }

    Ok(transposed)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn residues() -> Matrix<u8> {
        vec![b"MKV".to_vec(), b"MKA".to_vec()]
    }

    #[rstest]
    fn test_transpose_swaps_axes(residues: Matrix<u8>) {
        let by_position = transpose(&residues).unwrap();
        assert_eq!(by_position.len(), 3);
        assert_eq!(by_position[2], vec![b'V', b'A']);
        assert_eq!(by_position[0], vec![b'M', b'M']);
    }

    #[rstest]
    #[case(vec![vec![1]])]
    #[case(vec![vec![1, 2, 3]])]
    #[case(vec![vec![1], vec![2], vec![3]])]
    #[case(vec![vec![1, 2], vec![3, 4], vec![5, 6]])]
    fn test_transpose_round_trip(#[case] matrix: Matrix<i32>) {
        let back = transpose(&transpose(&matrix).unwrap()).unwrap();
        assert_eq!(back, matrix);
    }

    #[rstest]
    fn test_transpose_rejects_empty() {
        let empty: Matrix<u8> = Vec::new();
        let err = transpose(&empty).unwrap_err();
        assert!(matches!(err, SieveError::DimensionMismatch { .. }));
    }

    #[rstest]
    fn test_transpose_rejects_ragged() {
        let ragged = vec![b"MKV".to_vec(), b"MK".to_vec()];
        let err = transpose(&ragged).unwrap_err();
        assert!(matches!(
            err,
            SieveError::DimensionMismatch {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[rstest]
    fn test_transpose_to_width_empty_group() {
        let empty: Matrix<u8> = Vec::new();
        let by_position = transpose_to_width(&empty, 4).unwrap();
        assert_eq!(by_position.len(), 4);
        assert!(by_position.iter().all(|row| row.is_empty()));
    }

    #[rstest]
    fn test_transpose_to_width_checks_width(residues: Matrix<u8>) {
        assert!(transpose_to_width(&residues, 3).is_ok());
        assert!(transpose_to_width(&residues, 4).is_err());
    }
}
