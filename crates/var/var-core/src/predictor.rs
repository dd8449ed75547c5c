//! [`MultivariatePredictor`] adapter over lag selection and fitting

use tracing::debug;
use var_spi::{InformationCriterion, MultivariatePredictor, Result, VarError};

use crate::model::VarModel;
use crate::selection::select_order;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LagChoice {
    Fixed(usize),
    Auto {
        max_lags: usize,
        criterion: InformationCriterion,
    },
}

/// VAR predictor that remembers its training sample for forecasting.
///
/// # Example
///
/// ```rust
/// use var_core::{MultivariatePredictor, VarPredictor};
///
/// let data: Vec<Vec<f64>> = (0..40)
///     .map(|t| vec![(t % 7) as f64, ((t * 3) % 11) as f64])
///     .collect();
/// let mut model = VarPredictor::with_lags(1);
/// model.fit(&data).unwrap();
/// assert_eq!(model.forecast(5).unwrap().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct VarPredictor {
    choice: LagChoice,
    model: Option<VarModel>,
    history: Vec<Vec<f64>>,
}

impl VarPredictor {
    /// Fit with a fixed lag order.
    pub fn with_lags(lags: usize) -> Self {
        Self {
            choice: LagChoice::Fixed(lags),
            model: None,
            history: Vec::new(),
        }
    }

    /// Pick the lag order by `criterion` over `0..=max_lags` when fitting.
    pub fn auto(max_lags: usize, criterion: InformationCriterion) -> Self {
        Self {
            choice: LagChoice::Auto {
                max_lags,
                criterion,
            },
            model: None,
            history: Vec::new(),
        }
    }

    /// The fitted model, if any.
    pub fn model(&self) -> Option<&VarModel> {
        self.model.as_ref()
    }
}

impl MultivariatePredictor for VarPredictor {
    fn fit(&mut self, data: &[Vec<f64>]) -> Result<()> {
        let lags = match self.choice {
            LagChoice::Fixed(lags) => lags,
            LagChoice::Auto {
                max_lags,
                criterion,
            } => {
                let selection = select_order(data, max_lags)?;
                let lags = selection.selected(criterion);
                debug!(%criterion, lags, "lag order chosen for predictor");
                lags
            }
        };

        let model = VarModel::fit(data, lags)?;
        self.history = data[data.len() - lags..].to_vec();
        self.model = Some(model);
        Ok(())
    }

    fn forecast(&self, steps: usize) -> Result<Vec<Vec<f64>>> {
        let model = self.model.as_ref().ok_or(VarError::NotFitted)?;
        model.forecast(&self.history, steps)
    }

    fn is_fitted(&self) -> bool {
        self.model.is_some()
    }
}
