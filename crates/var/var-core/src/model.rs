//! Fitted VAR(p) model
//!
//! Holds the OLS estimates of
//!
//! ```text
//! y_t = c + A_1 y_{t-1} + ... + A_p y_{t-p} + u_t
//! ```
//!
//! and derives forecasts, their mean squared error matrices and the
//! stability of the process from them.

use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, info};
use var_spi::{CriteriaRow, Result, VarError, VarForecast};

use crate::estimation::{min_observations, ols, Estimate};
use crate::linalg::observations;

/// A VAR(p) estimated with a constant term.
#[derive(Debug, Clone)]
pub struct VarModel {
    lags: usize,
    neqs: usize,
    intercept: DVector<f64>,
    /// `coefs[i]` is `A_{i+1}`, `k x k`
    coefs: Vec<DMatrix<f64>>,
    resid: DMatrix<f64>,
    sigma_u: DMatrix<f64>,
    sigma_u_mle: DMatrix<f64>,
    criteria: Option<CriteriaRow>,
}

impl VarModel {
    /// Estimate VAR(`lags`) on all observations.
    ///
    /// `data` is row-major (`data[t][j]`). Requires more observations than
    /// `lags * (k + 1) + 1`.
    pub fn fit(data: &[Vec<f64>], lags: usize) -> Result<Self> {
        let obs = observations(data)?;
        let required = min_observations(obs.ncols(), lags);
        if obs.nrows() < required {
            return Err(VarError::InsufficientData {
                required,
                actual: obs.nrows(),
            });
        }

        let est = ols(&obs, 0, lags)?;
        let model = Self::from_estimate(&est);
        info!(
            lags,
            neqs = model.neqs,
            nobs = model.nobs(),
            "fitted VAR model"
        );
        Ok(model)
    }

    fn from_estimate(est: &Estimate) -> Self {
        let k = est.neqs();
        let intercept = DVector::from_fn(k, |r, _| est.coefs[(0, r)]);
        let coefs = (0..est.lags)
            .map(|i| DMatrix::from_fn(k, k, |r, c| est.coefs[(1 + i * k + c, r)]))
            .collect();

        Self {
            lags: est.lags,
            neqs: k,
            intercept,
            coefs,
            resid: est.resid.clone(),
            sigma_u: est.sigma_u(),
            sigma_u_mle: est.sigma_u_mle(),
            criteria: est.criteria(),
        }
    }

    /// Build a model from known parameters, e.g. for scenario forecasts.
    ///
    /// `coefs[i]` is `A_{i+1}` in row-major layout; `sigma_u` defaults to
    /// the identity when `None`.
    pub fn from_parameters(
        intercept: &[f64],
        coefs: &[Vec<Vec<f64>>],
        sigma_u: Option<&[Vec<f64>]>,
    ) -> Result<Self> {
        let k = intercept.len();
        if k == 0 {
            return Err(VarError::invalid_parameter("intercept", "must not be empty"));
        }
        let to_matrix = |rows: &[Vec<f64>]| -> Result<DMatrix<f64>> {
            if rows.len() != k || rows.iter().any(|r| r.len() != k) {
                return Err(VarError::DimensionMismatch {
                    expected: k,
                    actual: rows.first().map(|r| r.len()).unwrap_or(0),
                });
            }
            Ok(DMatrix::from_fn(k, k, |r, c| rows[r][c]))
        };

        let coefs = coefs
            .iter()
            .map(|a| to_matrix(a))
            .collect::<Result<Vec<_>>>()?;
        let sigma_u = match sigma_u {
            Some(rows) => to_matrix(rows)?,
            None => DMatrix::identity(k, k),
        };

        Ok(Self {
            lags: coefs.len(),
            neqs: k,
            intercept: DVector::from_column_slice(intercept),
            coefs,
            resid: DMatrix::zeros(0, k),
            sigma_u_mle: sigma_u.clone(),
            sigma_u,
            criteria: None,
        })
    }

    /// Lag order `p`.
    pub fn lags(&self) -> usize {
        self.lags
    }

    /// Number of series `k`.
    pub fn neqs(&self) -> usize {
        self.neqs
    }

    /// Observations used in estimation (excludes the `p` presample rows).
    pub fn nobs(&self) -> usize {
        self.resid.nrows()
    }

    pub fn intercept(&self) -> Vec<f64> {
        self.intercept.iter().copied().collect()
    }

    /// `A_lag` in row-major layout, `lag` starting at 1.
    pub fn coefficient_matrix(&self, lag: usize) -> Option<Vec<Vec<f64>>> {
        let a = self.coefs.get(lag.checked_sub(1)?)?;
        Some(matrix_rows(a))
    }

    /// Residuals, one row per estimation observation.
    pub fn residuals(&self) -> Vec<Vec<f64>> {
        matrix_rows(&self.resid)
    }

    /// Residual covariance adjusted for degrees of freedom.
    pub fn sigma_u(&self) -> Vec<Vec<f64>> {
        matrix_rows(&self.sigma_u)
    }

    /// Maximum likelihood residual covariance.
    pub fn sigma_u_mle(&self) -> Vec<Vec<f64>> {
        matrix_rows(&self.sigma_u_mle)
    }

    /// Information criteria on the model's own estimation sample.
    pub fn info_criteria(&self) -> Option<CriteriaRow> {
        self.criteria
    }

    /// Recursive point forecasts `steps` periods past `history`.
    ///
    /// Only the last `p` rows of `history` are used; with `p = 0` every step
    /// equals the intercept.
    pub fn forecast(&self, history: &[Vec<f64>], steps: usize) -> Result<Vec<Vec<f64>>> {
        let prior = self.presample(history)?;
        let mut out: Vec<DVector<f64>> = Vec::with_capacity(steps);

        for h in 0..steps {
            let mut next = self.intercept.clone();
            for (i, a) in self.coefs.iter().enumerate() {
                let lag = i + 1;
                let prev = if h >= lag {
                    &out[h - lag]
                } else {
                    &prior[prior.len() - (lag - h)]
                };
                next += a * prev;
            }
            out.push(next);
        }

        Ok(out.iter().map(|v| v.iter().copied().collect()).collect())
    }

    /// Moving-average weights `Phi_0 .. Phi_{n-1}`.
    ///
    /// `Phi_0 = I`, `Phi_i = sum_{j=1}^{min(i,p)} Phi_{i-j} A_j`.
    fn ma_weights(&self, n: usize) -> Vec<DMatrix<f64>> {
        let k = self.neqs;
        let mut phis: Vec<DMatrix<f64>> = Vec::with_capacity(n);
        for i in 0..n {
            let phi = if i == 0 {
                DMatrix::identity(k, k)
            } else {
                let mut acc = DMatrix::zeros(k, k);
                for j in 1..=i.min(self.lags) {
                    acc += &phis[i - j] * &self.coefs[j - 1];
                }
                acc
            };
            phis.push(phi);
        }
        phis
    }

    /// Moving-average weights in row-major layout.
    pub fn ma_rep(&self, n: usize) -> Vec<Vec<Vec<f64>>> {
        self.ma_weights(n).iter().map(matrix_rows).collect()
    }

    /// Forecast error covariance for horizons `1..=steps`.
    fn mse_matrices(&self, steps: usize) -> Vec<DMatrix<f64>> {
        let phis = self.ma_weights(steps);
        let mut acc = DMatrix::zeros(self.neqs, self.neqs);
        phis.iter()
            .map(|phi| {
                acc += phi * &self.sigma_u * phi.transpose();
                acc.clone()
            })
            .collect()
    }

    /// Point forecasts with symmetric normal intervals of coverage `level`.
    pub fn forecast_interval(
        &self,
        history: &[Vec<f64>],
        steps: usize,
        level: f64,
    ) -> Result<VarForecast> {
        if !(level > 0.0 && level < 1.0) {
            return Err(VarError::invalid_parameter(
                "level",
                format!("must be in (0, 1), got {}", level),
            ));
        }
        let point = self.forecast(history, steps)?;
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| VarError::NumericalError(format!("normal distribution: {}", e)))?;
        let z = normal.inverse_cdf(0.5 + level / 2.0);

        let mut lower = Vec::with_capacity(steps);
        let mut upper = Vec::with_capacity(steps);
        for (row, mse) in point.iter().zip(self.mse_matrices(steps)) {
            let half: Vec<f64> = (0..self.neqs)
                .map(|j| z * mse[(j, j)].max(0.0).sqrt())
                .collect();
            lower.push(row.iter().zip(&half).map(|(f, h)| f - h).collect());
            upper.push(row.iter().zip(&half).map(|(f, h)| f + h).collect());
        }

        Ok(VarForecast {
            point,
            lower,
            upper,
            level,
        })
    }

    /// Whether every eigenvalue of the companion matrix lies inside the unit circle.
    pub fn is_stable(&self) -> bool {
        if self.lags == 0 {
            return true;
        }
        let k = self.neqs;
        let kp = k * self.lags;
        let mut companion = DMatrix::zeros(kp, kp);
        for (i, a) in self.coefs.iter().enumerate() {
            companion.view_mut((0, i * k), (k, k)).copy_from(a);
        }
        for i in k..kp {
            companion[(i, i - k)] = 1.0;
        }

        let eigenvalues = companion.complex_eigenvalues();
        let max_modulus = eigenvalues.iter().map(|z| z.norm()).fold(0.0, f64::max);
        debug!(max_modulus, "companion matrix spectral radius");
        max_modulus < 1.0
    }

    fn presample(&self, history: &[Vec<f64>]) -> Result<Vec<DVector<f64>>> {
        if history.len() < self.lags {
            return Err(VarError::InsufficientData {
                required: self.lags,
                actual: history.len(),
            });
        }
        history[history.len() - self.lags..]
            .iter()
            .map(|row| {
                if row.len() != self.neqs {
                    return Err(VarError::DimensionMismatch {
                        expected: self.neqs,
                        actual: row.len(),
                    });
                }
                Ok(DVector::from_column_slice(row))
            })
            .collect()
    }
}

fn matrix_rows(m: &DMatrix<f64>) -> Vec<Vec<f64>> {
    (0..m.nrows())
        .map(|r| m.row(r).iter().copied().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::simulate;
    use approx::assert_relative_eq;

    fn known_var1() -> VarModel {
        VarModel::from_parameters(
            &[1.0, 0.5],
            &[vec![vec![0.5, 0.1], vec![0.0, 0.3]]],
            Some(&[vec![1.0, 0.2], vec![0.2, 0.5]]),
        )
        .unwrap()
    }

    #[test]
    fn test_forecast_recursion_var1() {
        let model = known_var1();
        let fc = model.forecast(&[vec![9.0, 9.0], vec![2.0, 4.0]], 2).unwrap();
        // step 1: [1 + 0.5*2 + 0.1*4, 0.5 + 0.3*4]
        assert_relative_eq!(fc[0][0], 2.4, epsilon = 1e-12);
        assert_relative_eq!(fc[0][1], 1.7, epsilon = 1e-12);
        // step 2 feeds step 1 back in
        assert_relative_eq!(fc[1][0], 1.0 + 0.5 * 2.4 + 0.1 * 1.7, epsilon = 1e-12);
        assert_relative_eq!(fc[1][1], 0.5 + 0.3 * 1.7, epsilon = 1e-12);
    }

    #[test]
    fn test_forecast_recursion_var2_uses_history_then_forecasts() {
        let model = VarModel::from_parameters(&[0.0], &[vec![vec![0.5]], vec![vec![0.25]]], None)
            .unwrap();
        let fc = model.forecast(&[vec![4.0], vec![8.0]], 3).unwrap();
        assert_relative_eq!(fc[0][0], 0.5 * 8.0 + 0.25 * 4.0);
        assert_relative_eq!(fc[1][0], 0.5 * fc[0][0] + 0.25 * 8.0);
        assert_relative_eq!(fc[2][0], 0.5 * fc[1][0] + 0.25 * fc[0][0]);
    }

    #[test]
    fn test_forecast_lag_zero_is_intercept() {
        let model = VarModel::from_parameters(&[3.0, -1.0], &[], None).unwrap();
        let fc = model.forecast(&[], 4).unwrap();
        assert_eq!(fc, vec![vec![3.0, -1.0]; 4]);
    }

    #[test]
    fn test_forecast_needs_presample() {
        let model = VarModel::from_parameters(&[0.0], &[vec![vec![0.5]], vec![vec![0.1]]], None)
            .unwrap();
        assert_eq!(
            model.forecast(&[vec![1.0]], 1).unwrap_err(),
            VarError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
        assert!(matches!(
            model.forecast(&[vec![1.0, 2.0], vec![1.0, 2.0]], 1).unwrap_err(),
            VarError::DimensionMismatch { .. }
        ));
    }

    #[test]
    fn test_ma_weights() {
        let model = known_var1();
        let phis = model.ma_rep(3);
        assert_eq!(phis[0], vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(phis[1], vec![vec![0.5, 0.1], vec![0.0, 0.3]]);
        // A^2
        assert_relative_eq!(phis[2][0][0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(phis[2][0][1], 0.05 + 0.03, epsilon = 1e-12);
        assert_relative_eq!(phis[2][1][1], 0.09, epsilon = 1e-12);
    }

    #[test]
    fn test_forecast_interval_widths() {
        let model = known_var1();
        let history = vec![vec![2.0, 4.0]];
        let fc = model.forecast_interval(&history, 3, 0.95).unwrap();
        let z = 1.959963984540054;

        // one step ahead error covariance is sigma_u
        assert_relative_eq!(fc.upper[0][0] - fc.point[0][0], z * 1.0, epsilon = 1e-9);
        assert_relative_eq!(fc.point[0][1] - fc.lower[0][1], z * 0.5_f64.sqrt(), epsilon = 1e-9);

        // widths grow with the horizon
        for h in 1..3 {
            for j in 0..2 {
                assert!(fc.upper[h][j] - fc.lower[h][j] > fc.upper[h - 1][j] - fc.lower[h - 1][j]);
            }
        }
    }

    #[test]
    fn test_forecast_interval_rejects_bad_level() {
        let model = known_var1();
        assert!(model.forecast_interval(&[vec![0.0, 0.0]], 1, 1.5).is_err());
    }

    #[test]
    fn test_stability() {
        assert!(known_var1().is_stable());
        let explosive = VarModel::from_parameters(&[0.0], &[vec![vec![1.05]]], None).unwrap();
        assert!(!explosive.is_stable());
        let constant = VarModel::from_parameters(&[1.0], &[], None).unwrap();
        assert!(constant.is_stable());
    }

    #[test]
    fn test_fit_recovers_simulated_coefficients() {
        let a1 = vec![vec![0.5, 0.1], vec![0.2, 0.3]];
        let data = simulate(&[1.0, -0.5], &[a1.clone()], 2000, 0.5, 7);
        let model = VarModel::fit(&data, 1).unwrap();

        assert_eq!(model.lags(), 1);
        assert_eq!(model.nobs(), 1999);
        let est = model.coefficient_matrix(1).unwrap();
        for r in 0..2 {
            for c in 0..2 {
                assert!(
                    (est[r][c] - a1[r][c]).abs() < 0.08,
                    "A[{}][{}] = {} vs {}",
                    r,
                    c,
                    est[r][c],
                    a1[r][c]
                );
            }
        }
        assert!(model.is_stable());
        assert!(model.coefficient_matrix(2).is_none());
        assert!(model.coefficient_matrix(0).is_none());
    }

    #[test]
    fn test_fit_sigma_relationship() {
        let data = simulate(&[0.0, 0.0], &[vec![vec![0.4, 0.0], vec![0.0, 0.4]]], 200, 1.0, 11);
        let model = VarModel::fit(&data, 2).unwrap();
        let n = model.nobs() as f64;
        let df_resid = n - (2.0 * 2.0 + 1.0);
        let s = model.sigma_u();
        let s_mle = model.sigma_u_mle();
        assert_relative_eq!(s[0][1] * df_resid, s_mle[0][1] * n, epsilon = 1e-9);
        assert_eq!(model.residuals().len(), 198);
        assert_eq!(model.info_criteria().unwrap().lag, 2);
    }

    #[test]
    fn test_fit_insufficient_data() {
        let data = vec![vec![1.0, 2.0]; 5];
        assert_eq!(
            VarModel::fit(&data, 2).unwrap_err(),
            VarError::InsufficientData {
                required: 8,
                actual: 5
            }
        );
    }
}
