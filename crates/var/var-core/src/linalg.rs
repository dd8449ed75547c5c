//! Matrix helpers shared by estimation and forecasting

use nalgebra::{Cholesky, DMatrix};
use var_spi::{Result, VarError};

/// Copy row-major observations into a `T x k` matrix after validating them.
pub(crate) fn observations(data: &[Vec<f64>]) -> Result<DMatrix<f64>> {
    let first = data.first().ok_or(VarError::InsufficientData {
        required: 1,
        actual: 0,
    })?;
    let k = first.len();
    if k == 0 {
        return Err(VarError::invalid_parameter("data", "observations have no series"));
    }
    for (t, row) in data.iter().enumerate() {
        if row.len() != k {
            return Err(VarError::DimensionMismatch {
                expected: k,
                actual: row.len(),
            });
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(VarError::invalid_parameter(
                "data",
                format!("non-finite value in observation {}", t),
            ));
        }
    }
    Ok(DMatrix::from_fn(data.len(), k, |i, j| data[i][j]))
}

/// Natural log of the determinant of a symmetric positive definite matrix.
///
/// `None` when the Cholesky factorisation fails.
pub(crate) fn logdet_spd(m: &DMatrix<f64>) -> Option<f64> {
    let chol = Cholesky::new(m.clone())?;
    let l = chol.l();
    let ld = 2.0 * (0..l.nrows()).map(|i| l[(i, i)].ln()).sum::<f64>();
    ld.is_finite().then_some(ld)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_observations_shape() {
        let m = observations(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m[(2, 1)], 6.0);
    }

    #[test]
    fn test_observations_rejects_ragged() {
        let err = observations(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, VarError::DimensionMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_observations_rejects_empty_and_nan() {
        assert!(matches!(
            observations(&[]).unwrap_err(),
            VarError::InsufficientData { .. }
        ));
        assert!(observations(&[vec![]]).is_err());
        assert!(observations(&[vec![f64::INFINITY]]).is_err());
    }

    #[test]
    fn test_logdet_spd() {
        let m = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        assert_relative_eq!(logdet_spd(&m).unwrap(), 11.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_logdet_singular() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        assert!(logdet_spd(&m).is_none());
    }
}
