// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Turns sorting benchmark results into execution time, scaling, speedup
//! and efficiency charts.

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

mod chart;
mod config;
mod dataset;
mod error;
mod figure;
mod logger;
mod measurement;
mod report;
mod series;

pub use crate::chart::{Chart, Format, Series, Shape};
pub use crate::config::{default_output_dir, Config};
pub use crate::dataset::{Dataset, Filter};
pub use crate::error::{Error, Result};
pub use crate::figure::Figure;
pub use crate::logger::Logger;
pub use crate::measurement::{Algorithm, Measurement, Mode};
pub use crate::report::{summary, Report};
pub use crate::series::{efficiency, Points, TimeSeries};
