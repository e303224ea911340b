//! Domain types for MarketPulse

pub mod observation;
pub mod series;

pub use observation::{AugmentedObservation, PriceObservation};
pub use series::{Series, SeriesError};
