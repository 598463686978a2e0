use itertools::Itertools;
use tracing::debug;

use crate::model::{Prediction, Price, PricePoint, Signal, Trend};

pub const SHORT_SMA_PERIOD: usize = 5;
pub const LONG_SMA_PERIOD: usize = 20;

/// `get_prediction` refuses series shorter than this; regression and the
/// short SMA need a few points before the output means anything.
pub const MIN_PREDICTION_POINTS: usize = 5;

/// Least-squares fit over `(i, values[i])`, evaluated one step past the last
/// index. Callers must pass at least two points; below that the denominator
/// is zero and the result is NaN.
pub fn linear_regression(values: &[Price]) -> Price {
    let n = values.len() as f64;

    let (sum_x, sum_y, sum_xy, sum_xx) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0, 0.0, 0.0), |(sx, sy, sxy, sxx), (i, &y)| {
            let x = i as f64;
            (sx + x, sy + y, sxy + x * y, sxx + x * x)
        });

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    slope * n + intercept
}

/// Simple moving average, parallel to the input: `None` until a full window
/// exists, then the mean of the `period` closes ending at each index. Each
/// window is summed from scratch, newest close first.
pub fn calculate_sma(closes: &[Price], period: usize) -> Vec<Option<Price>> {
    if period == 0 {
        return vec![None; closes.len()];
    }

    let mut sma = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        if i < period - 1 {
            sma.push(None);
            continue;
        }

        let mut sum = 0.0;
        for j in 0..period {
            sum += closes[i - j];
        }
        sma.push(Some(sum / period as f64));
    }

    sma
}

/// Runs the full engine over a chronological series: regression projection,
/// SMA(5)/SMA(20) crossover signal, confidence, trend. Returns `None` when
/// fewer than [`MIN_PREDICTION_POINTS`] points are supplied.
///
/// An incomplete long window is not an error; the signal falls back to
/// `Neutral` at confidence 50.
pub fn get_prediction(series: &[PricePoint]) -> Option<Prediction> {
    if series.len() < MIN_PREDICTION_POINTS {
        return None;
    }

    let closes = series.iter().map(|p| p.close).collect_vec();
    let last_price = closes[closes.len() - 1];

    let predicted = linear_regression(&closes);

    let last_sma20 = calculate_sma(&closes, LONG_SMA_PERIOD)
        .last()
        .copied()
        .flatten();
    let last_sma5 = calculate_sma(&closes, SHORT_SMA_PERIOD)
        .last()
        .copied()
        .flatten();

    // Confidence scales with the relative gap between the two averages,
    // capped at 85 before rounding. There is deliberately no lower clamp.
    let (signal, confidence) = match (last_sma5, last_sma20) {
        (Some(sma5), Some(sma20)) if sma5 > sma20 => {
            (Signal::Buy, (60.0 + (sma5 / sma20 - 1.0) * 1000.0).min(85.0))
        }
        (Some(sma5), Some(sma20)) if sma5 < sma20 => {
            (Signal::Sell, (60.0 + (sma20 / sma5 - 1.0) * 1000.0).min(85.0))
        }
        _ => (Signal::Neutral, 50.0),
    };

    // Strictly greater; an exactly flat projection reads as Down.
    let trend = if predicted > last_price {
        Trend::Up
    } else {
        Trend::Down
    };

    debug!(%signal, %trend, predicted, last_price, "derived prediction");

    Some(Prediction {
        predicted_price: (predicted * 100.0).round() / 100.0,
        signal,
        trend,
        confidence: confidence.round() as i32,
        last_price,
    })
}
