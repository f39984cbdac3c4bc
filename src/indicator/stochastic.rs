use std::collections::VecDeque;

/// Stochastic oscillator with smoothed %K and %D.
///
/// Raw %K compares the close to the trailing high/low range; %K is the
/// trailing `smooth`-mean of raw %K and %D the trailing `smooth`-mean of %K.
/// An undefined raw %K (zero range, or range window not yet full) propagates
/// through both smoothing windows as an undefined reading.
#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    smooth: usize,
    highs: VecDeque<f64>,
    lows: VecDeque<f64>,
    raw_window: VecDeque<Option<f64>>,
    k_window: VecDeque<Option<f64>>,
    k: Option<f64>,
    d: Option<f64>,
}

impl Stochastic {
    pub fn new(period: usize, smooth: usize) -> Self {
        assert!(period > 1, "stochastic period must be > 1");
        assert!(smooth > 0, "stochastic smoothing must be > 0");
        Self {
            period,
            smooth,
            highs: VecDeque::with_capacity(period + 1),
            lows: VecDeque::with_capacity(period + 1),
            raw_window: VecDeque::with_capacity(smooth + 1),
            k_window: VecDeque::with_capacity(smooth + 1),
            k: None,
            d: None,
        }
    }

    pub fn push(&mut self, high: f64, low: f64, close: f64) {
        self.highs.push_back(high);
        self.lows.push_back(low);
        if self.highs.len() > self.period {
            self.highs.pop_front();
            self.lows.pop_front();
        }

        let raw = if self.highs.len() == self.period {
            let highest = self.highs.iter().fold(f64::MIN, |acc, v| acc.max(*v));
            let lowest = self.lows.iter().fold(f64::MAX, |acc, v| acc.min(*v));
            let range = highest - lowest;
            if range > 0.0 {
                Some(((close - lowest) / range) * 100.0)
            } else {
                None
            }
        } else {
            None
        };

        self.k = Self::window_mean(&mut self.raw_window, raw, self.smooth);
        self.d = Self::window_mean(&mut self.k_window, self.k, self.smooth);
    }

    fn window_mean(
        window: &mut VecDeque<Option<f64>>,
        next: Option<f64>,
        len: usize,
    ) -> Option<f64> {
        window.push_back(next);
        if window.len() > len {
            window.pop_front();
        }
        if window.len() < len || window.iter().any(|v| v.is_none()) {
            return None;
        }
        Some(window.iter().map(|v| v.unwrap_or(0.0)).sum::<f64>() / len as f64)
    }

    pub fn percent_k(&self) -> Option<f64> {
        self.k
    }

    pub fn percent_d(&self) -> Option<f64> {
        self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_accounts_for_both_smoothing_passes() {
        let mut stoch = Stochastic::new(14, 3);
        for i in 0..20 {
            let p = 100.0 + i as f64;
            stoch.push(p + 1.0, p - 1.0, p);
            // %K needs 14 + 2 observations, %D two more.
            if i < 15 {
                assert_eq!(stoch.percent_k(), None, "at i={}", i);
            }
            if i < 17 {
                assert_eq!(stoch.percent_d(), None, "at i={}", i);
            }
        }
        assert!(stoch.percent_k().is_some());
        assert!(stoch.percent_d().is_some());
    }

    #[test]
    fn zero_range_window_has_no_reading() {
        let mut stoch = Stochastic::new(14, 3);
        for _ in 0..30 {
            stoch.push(100.0, 100.0, 100.0);
        }
        assert_eq!(stoch.percent_k(), None);
        assert_eq!(stoch.percent_d(), None);
    }

    #[test]
    fn close_at_window_high_reads_one_hundred() {
        let mut stoch = Stochastic::new(14, 3);
        for i in 0..30 {
            let p = 100.0 + i as f64;
            // Close pinned to the window high every period.
            stoch.push(p, p - 2.0, p);
        }
        assert!((stoch.percent_k().unwrap() - 100.0).abs() < 1e-9);
        assert!((stoch.percent_d().unwrap() - 100.0).abs() < 1e-9);
    }
}
