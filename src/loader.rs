use std::{fs::File, io::BufReader, path::Path};

use chrono::{DateTime, Duration, Local};
use rand::Rng;
use serde::Deserialize;

use crate::model::{Price, PricePoint};

/// Candle document shape produced by the quote-fetch layer: a status flag
/// plus parallel arrays of unix timestamps and closing prices.
#[derive(Debug, Deserialize)]
pub struct CandleDocument {
    pub s: String,
    pub t: Vec<i64>,
    pub c: Vec<Price>,
}

pub trait PriceHistoryLoader {
    fn load(path: impl AsRef<Path>) -> eyre::Result<Vec<PricePoint>>;
}

pub struct CandleFileLoader {}

impl PriceHistoryLoader for CandleFileLoader {
    fn load(path: impl AsRef<Path>) -> eyre::Result<Vec<PricePoint>> {
        let file = File::open(path)?;
        let document: CandleDocument = serde_json::from_reader(BufReader::new(file))?;

        candle_points(document)
    }
}

fn candle_points(document: CandleDocument) -> eyre::Result<Vec<PricePoint>> {
    if document.s != "ok" {
        eyre::bail!("candle document status is {:?}", document.s);
    }
    if document.t.len() != document.c.len() {
        eyre::bail!(
            "candle arrays disagree: {} timestamps, {} closes",
            document.t.len(),
            document.c.len()
        );
    }

    let mut points = Vec::with_capacity(document.c.len());
    for (&secs, &close) in document.t.iter().zip(document.c.iter()) {
        let timestamp = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| eyre::eyre!("timestamp {secs} out of range"))?
            .naive_utc();
        points.push(PricePoint::new(timestamp, close));
    }

    Ok(points)
}

/// Demo fallback when no candle history is on hand: a 31-point daily random
/// walk starting somewhere in the 150..250 range, oldest first.
pub fn mock_history() -> Vec<PricePoint> {
    let mut rng = rand::thread_rng();
    let mut price: Price = 150.0 + rng.gen::<f64>() * 100.0;
    let now = Local::now().naive_local();

    let mut history = Vec::with_capacity(31);
    for day in (0..=30i64).rev() {
        price += (rng.gen::<f64>() - 0.5) * 5.0;
        history.push(PricePoint::new(now - Duration::days(day), price));
    }

    history
}
