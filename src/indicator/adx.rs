use std::collections::VecDeque;

/// Average Directional Index from trailing-mean smoothed true range and
/// directional movement.
///
/// DX is undefined when the smoothed true range is zero or when DI+ and DI-
/// cancel to a zero sum; an undefined DX anywhere in the trailing ADX window
/// makes the ADX reading undefined as well.
#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    prev: Option<(f64, f64, f64)>, // (high, low, close)
    tr: VecDeque<f64>,
    dm_plus: VecDeque<f64>,
    dm_minus: VecDeque<f64>,
    dx: VecDeque<Option<f64>>,
    adx: Option<f64>,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "ADX period must be > 1");
        Self {
            period,
            prev: None,
            tr: VecDeque::with_capacity(period + 1),
            dm_plus: VecDeque::with_capacity(period + 1),
            dm_minus: VecDeque::with_capacity(period + 1),
            dx: VecDeque::with_capacity(period + 1),
            adx: None,
        }
    }

    pub fn push(&mut self, high: f64, low: f64, close: f64) -> Option<f64> {
        let (tr, dm_plus, dm_minus) = match self.prev.replace((high, low, close)) {
            None => (high - low, 0.0, 0.0),
            Some((prev_high, prev_low, prev_close)) => {
                let tr = (high - low)
                    .max((high - prev_close).abs())
                    .max((low - prev_close).abs());
                let up_move = high - prev_high;
                let down_move = (low - prev_low).abs();
                let dm_plus = if up_move > down_move && up_move > 0.0 {
                    up_move
                } else {
                    0.0
                };
                let dm_minus = if down_move > up_move && down_move > 0.0 {
                    down_move
                } else {
                    0.0
                };
                (tr, dm_plus, dm_minus)
            }
        };

        Self::push_capped(&mut self.tr, tr, self.period);
        Self::push_capped(&mut self.dm_plus, dm_plus, self.period);
        Self::push_capped(&mut self.dm_minus, dm_minus, self.period);

        if self.tr.len() == self.period {
            let dx = self.directional_index();
            self.dx.push_back(dx);
            if self.dx.len() > self.period {
                self.dx.pop_front();
            }
            self.adx = if self.dx.len() == self.period && self.dx.iter().all(|v| v.is_some()) {
                let sum: f64 = self.dx.iter().map(|v| v.unwrap_or(0.0)).sum();
                Some(sum / self.period as f64)
            } else {
                None
            };
        }

        self.adx
    }

    fn directional_index(&self) -> Option<f64> {
        let period = self.period as f64;
        let tr_smooth = self.tr.iter().sum::<f64>() / period;
        if tr_smooth <= 0.0 {
            return None;
        }
        let di_plus = 100.0 * (self.dm_plus.iter().sum::<f64>() / period) / tr_smooth;
        let di_minus = 100.0 * (self.dm_minus.iter().sum::<f64>() / period) / tr_smooth;
        let di_sum = di_plus + di_minus;
        if di_sum <= 0.0 {
            return None;
        }
        Some(100.0 * (di_plus - di_minus).abs() / di_sum)
    }

    pub fn value(&self) -> Option<f64> {
        self.adx
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Adx {
    fn push_capped(window: &mut VecDeque<f64>, value: f64, cap: usize) {
        window.push_back(value);
        if window.len() > cap {
            window.pop_front();
        }
    }
}
