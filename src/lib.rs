//! Closing-price analytics: a linear-regression projection and an
//! SMA(5)/SMA(20) crossover signal over a chronological price series,
//! plus a bounded window for live updates.

pub mod engine;
pub mod loader;
pub mod model;
pub mod realtime;

pub use engine::{calculate_sma, get_prediction, linear_regression};
pub use model::{Prediction, Price, PricePoint, Signal, Trend};
pub use realtime::PriceWindow;
