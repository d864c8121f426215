//! Data model module
//!
//! Raw boundary input, validated candles, and the per-evaluation frame.

pub mod candle;
pub mod frame;
pub mod raw;

pub use candle::*;
pub use frame::*;
pub use raw::*;
