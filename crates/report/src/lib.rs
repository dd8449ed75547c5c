//! # Report
//!
//! Runs the full forecast for one dataset and turns the result into the
//! artifacts users see: a serializable [`ForecastReport`], a CSV download and
//! an actual-vs-predicted SVG chart.
//!
//! ```rust,no_run
//! use data_facade::{load_csv_path, ColumnAliases};
//! use report::{render_svg, run_forecast, to_csv, ChartOptions};
//! use var_facade::VarConfig;
//!
//! let frame = load_csv_path("data/tar1.csv".as_ref(), &ColumnAliases::builtin()).unwrap();
//! let report = run_forecast(&frame, &VarConfig::default(), "integrated").unwrap();
//! println!("lag order: {}", report.lag_order);
//! let csv = to_csv(&report, false).unwrap();
//! let svg = render_svg(&report, &ChartOptions::default()).unwrap();
//! # let _ = (csv, svg);
//! ```

pub mod chart;
pub mod error;
pub mod export;
pub mod pipeline;

pub use chart::{render_svg, ChartOptions};
pub use error::{ReportError, Result};
pub use export::{to_csv, DATE_FORMAT};
pub use pipeline::{run_forecast, ForecastPoint, ForecastReport};
