use std::collections::VecDeque;

use chrono::{DateTime, Local};

/// Number of readings kept for the trend chart.
pub const TREND_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSample {
    pub at: DateTime<Local>,
    pub temperature_c: f64,
}

/// Bounded FIFO of recent temperatures for the selected city.
#[derive(Debug, Clone, Default)]
pub struct TrendBuffer {
    samples: VecDeque<TrendSample>,
}

impl TrendBuffer {
    pub fn new() -> Self {
        Self { samples: VecDeque::with_capacity(TREND_CAPACITY) }
    }

    /// Append a sample, evicting the oldest one once full.
    pub fn push(&mut self, sample: TrendSample) {
        if self.samples.len() == TREND_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TrendSample> {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(temperature_c: f64) -> TrendSample {
        TrendSample { at: Local::now(), temperature_c }
    }

    #[test]
    fn keeps_last_ten_in_order() {
        let mut buffer = TrendBuffer::new();
        for i in 0..15 {
            buffer.push(sample(i as f64));
            assert!(buffer.len() <= TREND_CAPACITY);
        }

        let temps: Vec<f64> = buffer.iter().map(|s| s.temperature_c).collect();
        let expected: Vec<f64> = (5..15).map(|i| i as f64).collect();
        assert_eq!(temps, expected);
    }

    #[test]
    fn eleventh_push_evicts_oldest() {
        let mut buffer = TrendBuffer::new();
        for i in 0..10 {
            buffer.push(sample(i as f64));
        }
        assert_eq!(buffer.iter().next().unwrap().temperature_c, 0.0);

        buffer.push(sample(10.0));
        assert_eq!(buffer.len(), TREND_CAPACITY);
        assert_eq!(buffer.iter().next().unwrap().temperature_c, 1.0);
        assert_eq!(buffer.iter().last().unwrap().temperature_c, 10.0);
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = TrendBuffer::new();
        buffer.push(sample(20.0));
        buffer.push(sample(21.0));

        buffer.clear();
        assert!(buffer.is_empty());

        buffer.push(sample(22.0));
        assert_eq!(buffer.len(), 1);
    }
}
