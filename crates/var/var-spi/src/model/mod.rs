//! Model module containing data structures

mod criterion;
mod forecast;
mod lag_order;

pub use criterion::InformationCriterion;
pub use forecast::VarForecast;
pub use lag_order::{CriteriaRow, LagOrderSelection};
