pub mod engine;
pub mod outcome;

pub use engine::{canonical, classify, gauge_fraction, Classifier};
pub use outcome::{FetchOutcome, ForecastRow, PollutantRow, StationReport};
