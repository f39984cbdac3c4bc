use super::rolling::Ema;

/// MACD line, signal line, and histogram for a single period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Moving Average Convergence Divergence. All three EMAs seed from their first
/// input, so the output is defined from the first close onward.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    last: Option<MacdOutput>,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        assert!(
            fast_period < slow_period,
            "MACD fast period must be shorter than slow period"
        );
        Self {
            fast: Ema::new(fast_period),
            slow: Ema::new(slow_period),
            signal: Ema::new(signal_period),
            last: None,
        }
    }

    pub fn push(&mut self, close: f64) -> MacdOutput {
        let macd = self.fast.push(close) - self.slow.push(close);
        let signal = self.signal.push(macd);
        let out = MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        };
        self.last = Some(out);
        out
    }

    pub fn value(&self) -> Option<MacdOutput> {
        self.last
    }
}
