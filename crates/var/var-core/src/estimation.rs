//! Least-squares estimation of a VAR(p) with a constant

use nalgebra::DMatrix;
use var_spi::{CriteriaRow, Result, VarError};

use crate::linalg::logdet_spd;

/// OLS estimate of one VAR(p) on `obs[offset..]`.
#[derive(Debug, Clone)]
pub(crate) struct Estimate {
    /// `(1 + k*p) x k`; row 0 is the intercept, column `r` is equation `r`
    pub coefs: DMatrix<f64>,
    /// `n x k` residuals
    pub resid: DMatrix<f64>,
    pub lags: usize,
}

impl Estimate {
    pub fn nobs(&self) -> usize {
        self.resid.nrows()
    }

    pub fn neqs(&self) -> usize {
        self.resid.ncols()
    }

    /// Parameters per equation.
    pub fn df_model(&self) -> usize {
        self.neqs() * self.lags + 1
    }

    pub fn df_resid(&self) -> usize {
        self.nobs() - self.df_model()
    }

    fn cross_resid(&self) -> DMatrix<f64> {
        self.resid.transpose() * &self.resid
    }

    /// Residual covariance with divisor `n`.
    pub fn sigma_u_mle(&self) -> DMatrix<f64> {
        self.cross_resid() / self.nobs() as f64
    }

    /// Residual covariance with divisor `n - df_model`.
    pub fn sigma_u(&self) -> DMatrix<f64> {
        self.cross_resid() / self.df_resid() as f64
    }

    /// AIC, BIC, HQIC and FPE; `None` when the residual covariance is singular.
    pub fn criteria(&self) -> Option<CriteriaRow> {
        let ld = logdet_spd(&self.sigma_u_mle())?;
        let n = self.nobs() as f64;
        let k = self.neqs() as f64;
        let free = (self.lags * self.neqs() * self.neqs() + self.neqs()) as f64;
        let df_model = self.df_model() as f64;

        Some(CriteriaRow {
            lag: self.lags,
            aic: ld + 2.0 / n * free,
            bic: ld + n.ln() / n * free,
            hqic: ld + 2.0 * n.ln().ln() / n * free,
            fpe: ((n + df_model) / (n - df_model)).powf(k) * ld.exp(),
        })
    }
}

/// Observations required to estimate a VAR(p) with `k` series.
pub(crate) fn min_observations(k: usize, p: usize) -> usize {
    // n - (k*p + 1) >= 1 with n = T - p
    p * (k + 1) + 2
}

/// Response matrix `Y` and regressor matrix `Z = [1, y_{t-1}', ..., y_{t-p}']`.
pub(crate) fn design(obs: &DMatrix<f64>, offset: usize, p: usize) -> (DMatrix<f64>, DMatrix<f64>) {
    let k = obs.ncols();
    let start = offset + p;
    let n = obs.nrows().saturating_sub(start);

    let y = DMatrix::from_fn(n, k, |i, j| obs[(start + i, j)]);
    let z = DMatrix::from_fn(n, 1 + k * p, |i, c| {
        if c == 0 {
            1.0
        } else {
            let lag = (c - 1) / k + 1;
            let series = (c - 1) % k;
            obs[(start + i - lag, series)]
        }
    });
    (y, z)
}

/// Estimate VAR(p) on the sample that skips the first `offset` observations.
pub(crate) fn ols(obs: &DMatrix<f64>, offset: usize, p: usize) -> Result<Estimate> {
    let k = obs.ncols();
    let available = obs.nrows().saturating_sub(offset);
    let required = min_observations(k, p);
    if available < required {
        return Err(VarError::InsufficientData {
            required: required + offset,
            actual: obs.nrows(),
        });
    }

    let (y, z) = design(obs, offset, p);
    let svd = z.clone().svd(true, true);
    let max_sv = svd.singular_values.max();
    let eps = max_sv * f64::EPSILON * z.nrows().max(z.ncols()) as f64;
    let coefs = svd
        .solve(&y, eps)
        .map_err(|e| VarError::NumericalError(format!("least squares failed: {}", e)))?;
    let resid = &y - &z * &coefs;

    Ok(Estimate {
        coefs,
        resid,
        lags: p,
    })
}
