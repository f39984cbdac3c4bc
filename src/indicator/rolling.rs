//! Rolling-window building blocks shared by the indicator set.

/// Simple Moving Average over a trailing window, ring buffer for O(1) push.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    buffer: Vec<f64>,
    head: usize,
    count: usize,
    sum: f64,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "SMA period must be > 0");
        Self {
            period,
            buffer: vec![0.0; period],
            head: 0,
            count: 0,
            sum: 0.0,
        }
    }

    /// Push a new value, return the current SMA once the window is full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.count >= self.period {
            self.sum -= self.buffer[self.head];
        }
        self.buffer[self.head] = value;
        self.sum += value;
        self.head = (self.head + 1) % self.period;
        if self.count < self.period {
            self.count += 1;
        }
        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if self.count >= self.period {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }

    pub fn is_ready(&self) -> bool {
        self.count >= self.period
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// Exponential Moving Average seeded from the first observation, so a value is
/// defined from the very first push. Matches the recursive form
/// `ema = prev + multiplier * (value - prev)` with `multiplier = 2/(period+1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
    ema: Option<f64>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        Self {
            period,
            multiplier: 2.0 / (period as f64 + 1.0),
            ema: None,
        }
    }

    pub fn push(&mut self, value: f64) -> f64 {
        let next = match self.ema {
            Some(prev) => (value - prev) * self.multiplier + prev,
            None => value,
        };
        self.ema = Some(next);
        next
    }

    pub fn value(&self) -> Option<f64> {
        self.ema
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    #[test]
    fn sma_undefined_until_window_fills() {
        let mut sma = Sma::new(4);
        for v in [2.0, 4.0, 6.0] {
            assert_eq!(sma.push(v), None);
        }
        assert!(!sma.is_ready());

        let v = sma.push(8.0).unwrap();
        assert!((v - 5.0).abs() < f64::EPSILON);
        assert!(sma.is_ready());
    }

    #[test]
    fn sma_evicts_oldest_value() {
        let mut sma = Sma::new(3);
        for v in [1.0, 2.0, 3.0] {
            sma.push(v);
        }
        // Window becomes [2, 3, 7].
        let v = sma.push(7.0).unwrap();
        assert!((v - 4.0).abs() < f64::EPSILON);
        // Window becomes [3, 7, 2].
        let v = sma.push(2.0).unwrap();
        assert!((v - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sma_matches_windowed_mean_on_long_oscillating_input() {
        let mut sma = Sma::new(24);
        let mut window: VecDeque<f64> = VecDeque::new();

        for i in 0..2_000u32 {
            let value = 50.0 + (i as f64 * 0.13).sin() * 20.0;
            sma.push(value);
            window.push_back(value);
            if window.len() > 24 {
                window.pop_front();
            }

            if let Some(avg) = sma.value() {
                let expected = window.iter().sum::<f64>() / window.len() as f64;
                assert!(
                    (avg - expected).abs() < 1e-9,
                    "drift at i={}: ring={} expected={}",
                    i,
                    avg,
                    expected
                );
            }
        }
    }

    #[test]
    #[should_panic(expected = "SMA period must be > 0")]
    fn sma_zero_period_panics() {
        Sma::new(0);
    }

    #[test]
    fn ema_seeds_from_first_value() {
        let mut ema = Ema::new(3);
        assert_eq!(ema.value(), None);
        let v = ema.push(10.0);
        assert!((v - 10.0).abs() < f64::EPSILON);

        // multiplier = 0.5: 10 + 0.5 * (20 - 10) = 15
        let v = ema.push(20.0);
        assert!((v - 15.0).abs() < f64::EPSILON);
        assert!((ema.value().unwrap() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ema_flat_input_stays_flat() {
        let mut ema = Ema::new(12);
        for _ in 0..60 {
            ema.push(42.0);
        }
        assert!((ema.value().unwrap() - 42.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "EMA period must be > 0")]
    fn ema_zero_period_panics() {
        Ema::new(0);
    }
}
