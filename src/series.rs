// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Views derived from a `Dataset` for one problem size and algorithm.

use crate::dataset::{Dataset, Filter};
use crate::measurement::{Algorithm, Mode};

/// `(threads, value)` pairs, ascending by thread count.
pub type Points = Vec<(u32, f64)>;

/// Execution times for one (size, algorithm).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeries {
    sequential: Option<f64>,
    parallel: Points,
}

impl TimeSeries {
    /// The sequential baseline is the first matching sequential row. Parallel
    /// rows are stably sorted by thread count.
    pub fn new(dataset: &Dataset, size: u64, algorithm: Algorithm) -> Self {
        let filter = Filter::new().size(size).algorithm(algorithm);

        let sequential = dataset
            .query(&filter.mode(Mode::Sequential))
            .next()
            .map(|m| m.time_ms);

        let mut parallel: Points = dataset
            .query(&filter.mode(Mode::Parallel))
            .map(|m| (m.threads, m.time_ms))
            .collect();
        parallel.sort_by_key(|(threads, _)| *threads);

        Self {
            sequential,
            parallel,
        }
    }

    /// sequential time in milliseconds, if a baseline was recorded
    pub fn sequential(&self) -> Option<f64> {
        self.sequential
    }

    /// parallel times in milliseconds by thread count
    pub fn parallel(&self) -> &[(u32, f64)] {
        &self.parallel
    }

    /// Sequential time divided by each parallel time. Empty without a
    /// baseline or without parallel runs.
    pub fn speedup(&self) -> Points {
        match self.sequential {
            Some(seq) if !self.parallel.is_empty() => self
                .parallel
                .iter()
                .map(|&(threads, time)| (threads, seq / time))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Speedup per thread; zero threads yields zero rather than dividing.
pub fn efficiency(speedup: &[(u32, f64)]) -> Points {
    speedup
        .iter()
        .map(|&(threads, s)| {
            let e = if threads > 0 { s / threads as f64 } else { 0.0 };
            (threads, e)
        })
        .collect()
}
