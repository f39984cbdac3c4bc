pub mod adx;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod stochastic;
