use std::collections::HashMap;
use std::time::Duration;

use circular_buffer::CircularBuffer;

const TIMING_WINDOW_SIZE: usize = 30;

/// Rolling run-time window for every scheduled system.
#[derive(Default, Debug)]
pub struct SystemTimings {
    timings: HashMap<&'static str, CircularBuffer<TIMING_WINDOW_SIZE, Duration>>,
}

impl SystemTimings {
    pub fn add_timing(&mut self, name: &'static str, duration: Duration) {
        // A full buffer drops its oldest sample
        self.timings.entry(name).or_insert_with(CircularBuffer::new).push_back(duration);
    }

    /// Mean and standard deviation of the recorded window of one system.
    pub fn get_stats(&self, name: &str) -> Option<(Duration, Duration)> {
        let window = self.timings.get(name)?;
        mean_and_deviation(window.iter().copied())
    }

    /// Systems ordered from most to least expensive on average.
    pub fn most_expensive(&self) -> Vec<(&'static str, Duration)> {
        let mut ranked: Vec<_> = self
            .timings
            .iter()
            .filter_map(|(name, window)| mean_and_deviation(window.iter().copied()).map(|(mean, _)| (*name, mean)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn format_summary(&self, top: usize) -> String {
        self.most_expensive()
            .into_iter()
            .take(top)
            .map(|(name, mean)| format!("{name}: {:.3}ms", mean.as_secs_f64() * 1000.0))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn mean_and_deviation(samples: impl Iterator<Item = Duration>) -> Option<(Duration, Duration)> {
    let durations: Vec<f64> = samples.map(|d| d.as_secs_f64()).collect();
    if durations.is_empty() {
        return None;
    }

    let count = durations.len() as f64;
    let mean = durations.iter().sum::<f64>() / count;
    let variance = durations.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;

    Some((Duration::from_secs_f64(mean), Duration::from_secs_f64(variance.sqrt())))
}
