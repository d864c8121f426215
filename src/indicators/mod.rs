//! Technical indicators module
//!
//! Pure series → series transforms. Every function returns a column
//! aligned 1:1 with its input; warm-up slots are `None`, and degenerate
//! denominators produce documented sentinel values instead of NaN so that
//! no undefined number ever reaches a boolean entry condition.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ichimoku;
pub mod keltner;
pub mod ma;
pub mod macd;
pub mod oscillators;
pub mod patterns;
pub mod pivots;
pub mod psar;
pub mod rsi;
pub mod series;
pub mod supertrend;
pub mod volume;
pub mod vwap;

pub use adx::*;
pub use atr::*;
pub use bollinger::*;
pub use ichimoku::*;
pub use keltner::*;
pub use ma::*;
pub use macd::*;
pub use oscillators::*;
pub use patterns::*;
pub use pivots::*;
pub use psar::*;
pub use rsi::*;
pub use series::*;
pub use supertrend::*;
pub use volume::*;
pub use vwap::*;
