// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::chart::{Chart, Format};
use crate::dataset::Dataset;
use crate::measurement::Algorithm;
use crate::series::{efficiency, TimeSeries};

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

const THREADS: &str = "Threads (T)";
const TIME: &str = "Time (ms)";

/// The five report figures, in output order.
#[derive(Clone, Copy, Debug, EnumIter, Eq, PartialEq, Hash)]
pub enum Figure {
    /// parallel time per algorithm at the focused size, plus sequential
    /// baselines
    ExecutionTime,
    /// mergesort parallel time, one line per size
    MergesortScaling,
    /// quicksort parallel time, one line per size
    QuicksortScaling,
    Speedup,
    Efficiency,
}

impl Figure {
    pub fn number(self) -> u8 {
        match self {
            Figure::ExecutionTime => 1,
            Figure::MergesortScaling => 2,
            Figure::QuicksortScaling => 3,
            Figure::Speedup => 4,
            Figure::Efficiency => 5,
        }
    }

    /// whether the figure only shows the focused size
    pub fn is_focused(self) -> bool {
        !matches!(self, Figure::MergesortScaling | Figure::QuicksortScaling)
    }

    fn purpose(self) -> &'static str {
        match self {
            Figure::ExecutionTime => "execution_time_with_threads",
            Figure::MergesortScaling => "mergesort_time_vs_threads",
            Figure::QuicksortScaling => "quicksort_time_vs_threads",
            Figure::Speedup => "speedup_vs_threads",
            Figure::Efficiency => "efficiency_vs_threads",
        }
    }

    /// eg: `figure4_speedup_vs_threads_N1000000.png`
    pub fn file_name(self, focus: u64, format: Format) -> String {
        let mut name = format!("figure{}_{}", self.number(), self.purpose());
        if self.is_focused() {
            name.push_str(&format!("_N{}", focus));
        }
        format!("{}.{}", name, format.extension())
    }

    pub fn title(self, focus: u64) -> String {
        let n = self.number();
        match self {
            Figure::ExecutionTime => {
                format!("Figure {}: Execution time with Threads (N={})", n, focus)
            }
            Figure::MergesortScaling => {
                format!("Figure {}: Merge sort (execution time vs threads)", n)
            }
            Figure::QuicksortScaling => {
                format!("Figure {}: Quick Sort (execution time vs threads)", n)
            }
            Figure::Speedup => format!("Figure {}: Speedup vs Threads (N={})", n, focus),
            Figure::Efficiency => {
                format!("Figure {}: Parallel Efficiency vs Threads (N={})", n, focus)
            }
        }
    }

    pub fn y_desc(self) -> &'static str {
        match self {
            Figure::ExecutionTime | Figure::MergesortScaling | Figure::QuicksortScaling => TIME,
            Figure::Speedup => "Speedup (SEQ time / PAR time)",
            Figure::Efficiency => "Parallel efficiency (speedup/T)",
        }
    }

    /// Build the chart for this figure. Algorithms or sizes without data
    /// contribute no series.
    pub fn chart(self, dataset: &Dataset, focus: u64) -> Chart {
        let mut chart = Chart::new(self.title(focus));
        chart.x_desc(THREADS).y_desc(self.y_desc());

        match self {
            Figure::ExecutionTime => {
                for algorithm in Algorithm::iter() {
                    let series = TimeSeries::new(dataset, focus, algorithm);
                    chart.line(
                        format!("{}-PAR", algorithm.code()),
                        xy(series.parallel()),
                    );
                    if let Some(sequential) = series.sequential() {
                        chart.marker(format!("{}-SEQ", algorithm.code()), (1.0, sequential));
                    }
                }
            }
            Figure::MergesortScaling | Figure::QuicksortScaling => {
                let algorithm = if self == Figure::MergesortScaling {
                    Algorithm::Mergesort
                } else {
                    Algorithm::Quicksort
                };
                for size in dataset.sizes() {
                    let series = TimeSeries::new(dataset, size, algorithm);
                    chart.line(format!("N={}", size), xy(series.parallel()));
                }
            }
            Figure::Speedup => {
                for algorithm in Algorithm::iter() {
                    let speedup = TimeSeries::new(dataset, focus, algorithm).speedup();
                    chart.line(algorithm.code(), xy(&speedup));
                }
            }
            Figure::Efficiency => {
                for algorithm in Algorithm::iter() {
                    let speedup = TimeSeries::new(dataset, focus, algorithm).speedup();
                    chart.line(algorithm.code(), xy(&efficiency(&speedup)));
                }
            }
        }

        trace!(
            "figure {}: {} series ({} lines)",
            self.number(),
            chart.series().len(),
            chart.line_count()
        );
        chart
    }
}

fn xy(points: &[(u32, f64)]) -> Vec<(f64, f64)> {
    points.iter().map(|&(t, v)| (t as f64, v)).collect()
}
