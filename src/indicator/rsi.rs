use std::collections::VecDeque;

/// Relative Strength Index over a trailing window of close-to-close deltas.
///
/// Gains and losses are simple trailing means (not Wilder smoothing). The
/// leading delta is zero-filled, so a window is complete after `period`
/// closes. A window with zero average loss saturates at 100; an all-flat
/// window (no gains, no losses) has no defined value.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev: Option<f64>,
    gains: VecDeque<f64>,
    losses: VecDeque<f64>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "RSI period must be > 1");
        Self {
            period,
            prev: None,
            gains: VecDeque::with_capacity(period + 1),
            losses: VecDeque::with_capacity(period + 1),
        }
    }

    pub fn push(&mut self, close: f64) -> Option<f64> {
        let (gain, loss) = match self.prev.replace(close) {
            Some(prev) => {
                let delta = close - prev;
                (delta.max(0.0), (-delta).max(0.0))
            }
            // Zero-filled leading delta.
            None => (0.0, 0.0),
        };

        self.gains.push_back(gain);
        self.losses.push_back(loss);
        if self.gains.len() > self.period {
            self.gains.pop_front();
            self.losses.pop_front();
        }

        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if self.gains.len() < self.period {
            return None;
        }
        let avg_gain = self.gains.iter().sum::<f64>() / self.period as f64;
        let avg_loss = self.losses.iter().sum::<f64>() / self.period as f64;

        if avg_loss <= f64::EPSILON {
            if avg_gain <= f64::EPSILON {
                // 0/0: a perfectly flat window has no momentum reading.
                return None;
            }
            return Some(100.0);
        }

        let rs = avg_gain / avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }

    pub fn is_ready(&self) -> bool {
        self.gains.len() >= self.period
    }

    pub fn period(&self) -> usize {
        self.period
    }
}
