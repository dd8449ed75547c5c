//! Contract module containing trait definitions for multivariate models

mod multivariate_predictor;

pub use multivariate_predictor::MultivariatePredictor;
