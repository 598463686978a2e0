use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type Price = f64;

/// One observation of a closing price. The timestamp is a display label;
/// the engine only reads `close` and relies on the caller keeping points
/// ordered oldest first.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub close: Price,
}

impl PricePoint {
    pub fn new(timestamp: NaiveDateTime, close: Price) -> Self {
        Self { timestamp, close }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    #[display(fmt = "BUY")]
    Buy,
    #[display(fmt = "SELL")]
    Sell,
    #[display(fmt = "NEUTRAL")]
    Neutral,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    #[display(fmt = "UP")]
    Up,
    #[display(fmt = "DOWN")]
    Down,
}

/// Result of one engine run. Immutable once built; `predicted_price` is
/// rounded to two decimals for display, `last_price` is left untouched.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub predicted_price: Price,
    pub signal: Signal,
    pub trend: Trend,
    pub confidence: i32,
    pub last_price: Price,
}
