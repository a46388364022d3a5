// Bounded usage history for the chart

use std::collections::VecDeque;

use crate::models::SystemStats;

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub time: String,
    pub cpu: f64,
    pub gpu: f64,
    pub ram: f64,
}

/// FIFO window of the most recent usage samples, process-lifetime state of
/// the dashboard loop.
#[derive(Debug)]
pub struct HistoryWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl HistoryWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Absent values chart as zero; this coercion is for the chart only and
    /// never feeds card visibility.
    pub fn push(&mut self, time: String, stats: &SystemStats) {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample {
            time,
            cpu: stats.cpu.unwrap_or(0.0),
            gpu: stats.gpu_usage.unwrap_or(0.0),
            ram: stats.ram.unwrap_or(0.0),
        });
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
