//! VAR Core
//!
//! Vector autoregression with a constant term, estimated equation by
//! equation with ordinary least squares.
//!
//! - [`select_order`] compares VAR(0)..VAR(max_lags) on a common sample using
//!   AIC, BIC, HQIC and FPE.
//! - [`VarModel::fit`] estimates a VAR(p); the fitted model forecasts
//!   recursively, builds MSE-based forecast intervals and checks stability.
//! - [`VarPredictor`] wraps both behind the [`MultivariatePredictor`] contract.
//!
//! ## Example
//!
//! ```rust
//! use rand::prelude::*;
//! use rand_distr::Normal;
//! use var_core::{select_order, VarModel};
//! use var_spi::InformationCriterion;
//!
//! // AR(1)-style pair with seeded Gaussian shocks
//! let mut rng = StdRng::seed_from_u64(42);
//! let shock = Normal::new(0.0, 0.3).unwrap();
//! let mut noise = move || shock.sample(&mut rng);
//! let mut data = vec![vec![0.0, 0.0]];
//! for t in 1..80 {
//!     let prev = data[t - 1].clone();
//!     data.push(vec![0.5 * prev[0] + noise(), 0.2 * prev[0] + 0.3 * prev[1] + noise()]);
//! }
//!
//! let selection = select_order(&data, 4).unwrap();
//! let p = selection.selected(InformationCriterion::Aic);
//! let model = VarModel::fit(&data, p).unwrap();
//! let forecast = model.forecast(&data, 3).unwrap();
//! assert_eq!(forecast.len(), 3);
//! ```

mod estimation;
mod linalg;
#[cfg(test)]
mod test_support;
pub mod model;
pub mod predictor;
pub mod selection;

pub use model::VarModel;
pub use predictor::VarPredictor;
pub use selection::select_order;

pub use var_spi::MultivariatePredictor;
