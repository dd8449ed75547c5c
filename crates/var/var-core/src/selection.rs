//! Lag-order selection by information criteria

use tracing::{debug, info, warn};
use var_spi::{LagOrderSelection, Result, VarError};

use crate::estimation::ols;
use crate::linalg::observations;

/// Compare VAR(0) through VAR(`max_lags`) and report each criterion's choice.
///
/// Every candidate is estimated on the same sample, the observations after
/// the first `max_lags`, so the criteria are comparable. When the data cannot
/// support `max_lags` the bound is lowered to the largest order that still
/// leaves residual degrees of freedom. Orders whose residual covariance is
/// singular are left out of the table.
pub fn select_order(data: &[Vec<f64>], max_lags: usize) -> Result<LagOrderSelection> {
    let obs = observations(data)?;
    let (t, k) = obs.shape();
    if t < 2 {
        return Err(VarError::InsufficientData {
            required: 2,
            actual: t,
        });
    }

    let feasible = feasible_max_lags(t, k);
    let max_lags = if max_lags > feasible {
        warn!(
            requested = max_lags,
            used = feasible,
            nobs = t,
            "too few observations for requested max lags"
        );
        feasible
    } else {
        max_lags
    };

    let mut table = Vec::with_capacity(max_lags + 1);
    for p in 0..=max_lags {
        let est = ols(&obs, max_lags - p, p)?;
        match est.criteria() {
            Some(row) => {
                debug!(
                    lag = p,
                    aic = row.aic,
                    bic = row.bic,
                    hqic = row.hqic,
                    fpe = row.fpe,
                    "lag order criteria"
                );
                table.push(row);
            }
            None => debug!(lag = p, "residual covariance singular, skipping lag"),
        }
    }

    let nobs = t - max_lags;
    let selection = LagOrderSelection::from_table(max_lags, nobs, table).ok_or_else(|| {
        VarError::NumericalError("residual covariance is singular for every lag order".to_string())
    })?;

    info!(
        max_lags,
        aic = selection.aic,
        bic = selection.bic,
        hqic = selection.hqic,
        fpe = selection.fpe,
        "selected lag orders"
    );
    Ok(selection)
}

/// Largest `m` with `T - m - (k*m + 1) >= 1`.
fn feasible_max_lags(t: usize, k: usize) -> usize {
    t.saturating_sub(2) / (k + 1)
}
