//! Lag-order selection results

use serde::{Deserialize, Serialize};

use super::criterion::InformationCriterion;

/// Criteria values for one candidate lag order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaRow {
    pub lag: usize,
    pub aic: f64,
    pub bic: f64,
    pub hqic: f64,
    pub fpe: f64,
}

impl CriteriaRow {
    pub fn value(&self, criterion: InformationCriterion) -> f64 {
        match criterion {
            InformationCriterion::Aic => self.aic,
            InformationCriterion::Bic => self.bic,
            InformationCriterion::Hqic => self.hqic,
            InformationCriterion::Fpe => self.fpe,
        }
    }
}

/// Outcome of comparing VAR(0)..VAR(max_lags) on a common sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagOrderSelection {
    /// Largest lag order actually compared
    pub max_lags: usize,
    /// Observations in the common estimation sample
    pub nobs: usize,
    /// One row per lag order whose criteria were defined
    pub table: Vec<CriteriaRow>,
    pub aic: usize,
    pub bic: usize,
    pub hqic: usize,
    pub fpe: usize,
}

impl LagOrderSelection {
    /// Build from a criteria table, choosing the arg-min of each criterion.
    ///
    /// Ties resolve to the smaller lag. Returns `None` for an empty table.
    pub fn from_table(max_lags: usize, nobs: usize, table: Vec<CriteriaRow>) -> Option<Self> {
        let pick = |criterion: InformationCriterion| {
            table
                .iter()
                .filter(|row| !row.value(criterion).is_nan())
                .fold(None::<&CriteriaRow>, |best, row| match best {
                    Some(b) if b.value(criterion) <= row.value(criterion) => Some(b),
                    _ => Some(row),
                })
                .map(|row| row.lag)
        };

        Some(Self {
            aic: pick(InformationCriterion::Aic)?,
            bic: pick(InformationCriterion::Bic)?,
            hqic: pick(InformationCriterion::Hqic)?,
            fpe: pick(InformationCriterion::Fpe)?,
            max_lags,
            nobs,
            table,
        })
    }

    /// Lag order chosen by `criterion`.
    pub fn selected(&self, criterion: InformationCriterion) -> usize {
        match criterion {
            InformationCriterion::Aic => self.aic,
            InformationCriterion::Bic => self.bic,
            InformationCriterion::Hqic => self.hqic,
            InformationCriterion::Fpe => self.fpe,
        }
    }

    /// Criteria row for a given lag, if it was evaluated.
    pub fn row(&self, lag: usize) -> Option<&CriteriaRow> {
        self.table.iter().find(|row| row.lag == lag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(lag: usize, aic: f64, bic: f64, hqic: f64, fpe: f64) -> CriteriaRow {
        CriteriaRow {
            lag,
            aic,
            bic,
            hqic,
            fpe,
        }
    }

    #[test]
    fn test_from_table_picks_argmin_per_criterion() {
        let table = vec![
            row(0, 5.0, 5.0, 5.0, 5.0),
            row(1, 3.0, 2.0, 2.5, 3.5),
            row(2, 2.0, 2.5, 2.6, 3.0),
        ];
        let sel = LagOrderSelection::from_table(2, 100, table).unwrap();
        assert_eq!(sel.aic, 2);
        assert_eq!(sel.bic, 1);
        assert_eq!(sel.hqic, 1);
        assert_eq!(sel.fpe, 2);
        assert_eq!(sel.selected(InformationCriterion::Bic), 1);
        assert_eq!(sel.row(1).unwrap().aic, 3.0);
        assert!(sel.row(7).is_none());
    }

    #[test]
    fn test_ties_prefer_smaller_lag() {
        let table = vec![row(0, 1.0, 1.0, 1.0, 1.0), row(1, 1.0, 1.0, 1.0, 1.0)];
        let sel = LagOrderSelection::from_table(1, 10, table).unwrap();
        assert_eq!(sel.aic, 0);
        assert_eq!(sel.fpe, 0);
    }

    #[test]
    fn test_nan_rows_are_ignored() {
        let table = vec![row(0, f64::NAN, 1.0, 1.0, 1.0), row(1, 4.0, 2.0, 2.0, 2.0)];
        let sel = LagOrderSelection::from_table(1, 10, table).unwrap();
        assert_eq!(sel.aic, 1);
        assert_eq!(sel.bic, 0);
    }

    #[test]
    fn test_empty_table() {
        assert!(LagOrderSelection::from_table(3, 10, vec![]).is_none());
    }
}
