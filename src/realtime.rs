use itertools::Itertools;
use tracing::debug;

use crate::engine::{self, LONG_SMA_PERIOD};
use crate::model::{Prediction, Price, PricePoint};

pub const DEFAULT_WINDOW_CAPACITY: usize = 50;

/// Bounded tick history for live price updates. Holds at most `capacity`
/// points, evicting the oldest first, and recomputes the whole SMA(20)
/// series from scratch on every push. No running sum is kept, so the
/// summation order always matches a cold computation over the window.
#[derive(Debug, Clone)]
pub struct PriceWindow {
    capacity: usize,
    points: Vec<PricePoint>,
    sma20: Vec<Option<Price>>,
}

impl Default for PriceWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceWindow {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WINDOW_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            points: Vec::with_capacity(capacity),
            sma20: Vec::new(),
        }
    }

    /// Appends a tick, truncating the front once the window is full.
    pub fn push(&mut self, point: PricePoint) {
        self.points.push(point);
        if self.points.len() > self.capacity {
            self.points.remove(0);
        }

        let closes = self.points.iter().map(|p| p.close).collect_vec();
        self.sma20 = engine::calculate_sma(&closes, LONG_SMA_PERIOD);

        debug!(len = self.points.len(), close = point.close, "window updated");
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// SMA(20) series over the current window, parallel to [`points`](Self::points).
    pub fn sma20(&self) -> &[Option<Price>] {
        &self.sma20
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_close(&self) -> Option<Price> {
        self.points.last().map(|p| p.close)
    }

    /// Runs the engine over the current window contents.
    pub fn prediction(&self) -> Option<Prediction> {
        engine::get_prediction(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use itertools::Itertools;

    use super::*;
    use crate::engine::calculate_sma;
    use crate::model::Signal;

    fn tick(i: i64, close: Price) -> PricePoint {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();

        PricePoint::new(start + Duration::seconds(2 * i), close)
    }

    #[test]
    fn unittest_window_evicts_oldest_beyond_capacity() {
        let mut window = PriceWindow::new();

        for i in 0..51 {
            window.push(tick(i, 100.0 + i as f64));
        }

        assert_eq!(window.len(), 50);
        // The very first tick (close 100.0) is gone.
        assert_eq!(window.points()[0].close, 101.0);
        assert_eq!(window.last_close(), Some(150.0));
    }

    #[test]
    fn unittest_window_sma_matches_cold_recompute() {
        let mut window = PriceWindow::new();

        for i in 0..51 {
            window.push(tick(i, 150.0 + (i as f64 * 0.7).sin() * 3.0));
        }

        let closes = window.points().iter().map(|p| p.close).collect_vec();
        let expected = calculate_sma(&closes, LONG_SMA_PERIOD);

        assert_eq!(window.sma20().len(), window.len());
        for (got, want) in window.sma20().iter().zip(expected.iter()) {
            match (got, want) {
                (Some(g), Some(w)) => assert_eq!(g.to_bits(), w.to_bits()),
                (None, None) => {}
                other => panic!("sma mismatch: {other:?}"),
            }
        }
    }

    #[test]
    fn unittest_window_sma_parallel_before_full() {
        let mut window = PriceWindow::new();

        for i in 0..10 {
            window.push(tick(i, 99.5));
        }

        assert_eq!(window.sma20().len(), 10);
        assert!(window.sma20().iter().all(|v| v.is_none()));
    }

    #[test]
    fn unittest_window_prediction_passthrough() {
        let mut window = PriceWindow::new();
        assert!(window.prediction().is_none());

        for i in 0..25 {
            window.push(tick(i, 100.0 + i as f64));
        }

        let prediction = window.prediction().unwrap();
        assert_eq!(prediction.signal, Signal::Buy);
        assert_eq!(prediction.last_price, 124.0);
    }

    #[test]
    fn unittest_window_custom_capacity() {
        let mut window = PriceWindow::with_capacity(5);

        for i in 0..8 {
            window.push(tick(i, i as f64));
        }

        assert_eq!(window.len(), 5);
        assert_eq!(window.points()[0].close, 3.0);
    }
}
