//! Trait for multivariate time series predictors

use crate::error::Result;

/// Common trait for models fitted on several series at once.
///
/// `data` is row-major: `data[t][j]` is series `j` at time `t`.
pub trait MultivariatePredictor {
    /// Fit the model to historical observations
    fn fit(&mut self, data: &[Vec<f64>]) -> Result<()>;

    /// Forecast `steps` periods past the fitted sample, one row per step
    fn forecast(&self, steps: usize) -> Result<Vec<Vec<f64>>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VarError;

    /// Mock implementation: repeat the last observation
    struct NaivePredictor {
        last: Option<Vec<f64>>,
    }

    impl MultivariatePredictor for NaivePredictor {
        fn fit(&mut self, data: &[Vec<f64>]) -> Result<()> {
            let last = data.last().ok_or(VarError::InsufficientData {
                required: 1,
                actual: 0,
            })?;
            self.last = Some(last.clone());
            Ok(())
        }

        fn forecast(&self, steps: usize) -> Result<Vec<Vec<f64>>> {
            let last = self.last.as_ref().ok_or(VarError::NotFitted)?;
            Ok(vec![last.clone(); steps])
        }

        fn is_fitted(&self) -> bool {
            self.last.is_some()
        }
    }

    #[test]
    fn test_mock_predictor_lifecycle() {
        let mut model = NaivePredictor { last: None };
        assert!(!model.is_fitted());
        assert_eq!(model.forecast(1).unwrap_err(), VarError::NotFitted);

        model.fit(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.forecast(2).unwrap(), vec![vec![3.0, 4.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_mock_predictor_rejects_empty() {
        let mut model = NaivePredictor { last: None };
        assert!(model.fit(&[]).is_err());
    }

    #[test]
    fn test_trait_object() {
        let model: Box<dyn MultivariatePredictor> = Box::new(NaivePredictor {
            last: Some(vec![1.0]),
        });
        assert_eq!(model.forecast(1).unwrap(), vec![vec![1.0]]);
    }
}
