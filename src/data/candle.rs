//! Validated OHLCV candle data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    /// Create a new candle
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }

    /// Get typical price (HLC/3)
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Get median price (HL/2)
    pub fn median_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Check if candle is bullish
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if candle is bearish
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Get body size (absolute difference between open and close)
    pub fn body_size(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Get upper wick size
    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    /// Get lower wick size
    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// Get total range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// A symbol's validated candles, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Create from a vector of candles
    pub fn from_vec(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    /// Get number of candles
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get candle at index
    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Get last candle
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Get all candles
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Get open prices as vector
    pub fn opens(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.open).collect()
    }

    /// Get high prices as vector
    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    /// Get low prices as vector
    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }

    /// Get close prices as vector
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Get volumes as vector
    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::from_vec(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Candle::new(ts, open, high, low, close, 1000.0)
    }

    #[test]
    fn test_candle_anatomy() {
        // Bullish bar: open 10, close 12, high 13, low 9.
        let c = candle(10.0, 13.0, 9.0, 12.0);
        assert!(c.is_bullish());
        assert!(!c.is_bearish());
        assert_eq!(c.body_size(), 2.0);
        assert_eq!(c.upper_wick(), 1.0);
        assert_eq!(c.lower_wick(), 1.0);
        assert_eq!(c.range(), 4.0);
        assert!((c.typical_price() - 34.0 / 3.0).abs() < 1e-12);
        assert_eq!(c.median_price(), 11.0);
    }

    #[test]
    fn test_series_column_extractors() {
        let series = CandleSeries::from_vec(vec![
            candle(1.0, 2.0, 0.5, 1.5),
            candle(1.5, 2.5, 1.0, 2.0),
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![1.5, 2.0]);
        assert_eq!(series.highs(), vec![2.0, 2.5]);
        assert_eq!(series.last().map(|c| c.close), Some(2.0));
    }
}
