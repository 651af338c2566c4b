// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Loading benchmark results and querying them.
//!
//! Two input layouts are understood. The primary one is a CSV table with a
//! header row naming at least `ALG`, `MODE`, `N`, `T` and `TIME_MS`. The other
//! is the plain output of the benchmark programs, one measurement per line:
//!
//! ```text
//! ALG=QS MODE=PAR N=1000000 T=4 TIME_MS=12.345
//! ```

use crate::error::{Error, Result};
use crate::measurement::{Algorithm, Measurement, Mode};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ALG: &str = "ALG";
pub const MODE: &str = "MODE";
pub const SIZE: &str = "N";
pub const THREADS: &str = "T";
pub const TIME_MS: &str = "TIME_MS";

const COLUMNS: [&str; 5] = [ALG, MODE, SIZE, THREADS, TIME_MS];

/// Selects measurements by any combination of size, algorithm and mode. Unset
/// fields match everything.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Filter {
    size: Option<u64>,
    algorithm: Option<Algorithm>,
    mode: Option<Mode>,
}

impl Filter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn matches(&self, measurement: &Measurement) -> bool {
        self.size.map_or(true, |s| measurement.size == s)
            && self.algorithm.map_or(true, |a| measurement.algorithm == a)
            && self.mode.map_or(true, |m| measurement.mode == m)
    }
}

/// All measurements of a benchmark run, in source order. Read-only once
/// loaded.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    measurements: Vec<Measurement>,
}

impl Dataset {
    pub fn new(measurements: Vec<Measurement>) -> Self {
        Self { measurements }
    }

    /// Read and parse the whole file. Any malformed row aborts the load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(path, &content)
    }

    /// Parse file content; `path` is only used in error messages.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let first = content.lines().map(str::trim).find(|l| !l.is_empty());
        let dataset = if first.map_or(false, |l| l.starts_with("ALG=")) {
            debug!("{}: reading benchmark output lines", path.display());
            parse_lines(path, content)?
        } else {
            parse_csv(path, content)?
        };
        info!(
            "loaded {} measurements from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// matching measurements, in source order
    pub fn query<'a>(&'a self, filter: &'a Filter) -> impl Iterator<Item = &'a Measurement> + 'a {
        self.measurements.iter().filter(move |m| filter.matches(m))
    }

    /// distinct problem sizes, ascending
    pub fn sizes(&self) -> Vec<u64> {
        self.measurements
            .iter()
            .map(|m| m.size)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Raw text of the five fields of one row.
struct Row<'a> {
    line: u64,
    alg: &'a str,
    mode: &'a str,
    size: &'a str,
    threads: &'a str,
    time: &'a str,
}

impl<'a> Row<'a> {
    /// Numeric fields are converted first so a bad number is reported even
    /// on a row which is later skipped for an unknown code.
    fn into_measurement(self, path: &Path) -> Result<Option<Measurement>> {
        let size = parse_field(path, self.line, SIZE, self.size)?;
        let threads = parse_field(path, self.line, THREADS, self.threads)?;
        let time_ms = parse_field(path, self.line, TIME_MS, self.time)?;

        let algorithm = match Algorithm::from_str(self.alg) {
            Ok(a) => a,
            Err(_) => {
                warn!(
                    "{}:{}: skipping row with unknown algorithm '{}'",
                    path.display(),
                    self.line,
                    self.alg
                );
                return Ok(None);
            }
        };
        let mode = match Mode::from_str(self.mode) {
            Ok(m) => m,
            Err(_) => {
                warn!(
                    "{}:{}: skipping row with unknown mode '{}'",
                    path.display(),
                    self.line,
                    self.mode
                );
                return Ok(None);
            }
        };

        Ok(Some(Measurement::new(algorithm, mode, size, threads, time_ms)))
    }
}

fn parse_field<T: FromStr>(path: &Path, line: u64, column: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::InvalidValue {
        path: path.to_path_buf(),
        line,
        column,
        value: value.to_string(),
    })
}

fn missing(path: &Path, column: &'static str) -> Error {
    Error::MissingColumn {
        path: path.to_path_buf(),
        column,
    }
}

fn parse_csv(path: &Path, content: &str) -> Result<Dataset> {
    let csv_error = |source: csv::Error| Error::Csv {
        path: PathBuf::from(path),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers().map_err(csv_error)?.clone();
    let mut index = [0usize; 5];
    for (slot, column) in index.iter_mut().zip(COLUMNS.iter().copied()) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| missing(path, column))?;
    }

    let mut measurements = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |i: usize| record.get(index[i]).unwrap_or("");
        let row = Row {
            line,
            alg: field(0),
            mode: field(1),
            size: field(2),
            threads: field(3),
            time: field(4),
        };
        if let Some(m) = row.into_measurement(path)? {
            measurements.push(m);
        }
    }

    Ok(Dataset::new(measurements))
}

fn parse_lines(path: &Path, content: &str) -> Result<Dataset> {
    let mut measurements = Vec::new();

    for (i, text) in content.lines().enumerate() {
        let line = i as u64 + 1;
        if !text.contains("ALG=") {
            if !text.trim().is_empty() {
                debug!("{}:{}: ignoring '{}'", path.display(), line, text.trim());
            }
            continue;
        }

        let mut fields = [None; 5];
        for token in text.split_whitespace() {
            let mut kv = token.splitn(2, '=');
            if let (Some(key), Some(value)) = (kv.next(), kv.next()) {
                if let Some(i) = COLUMNS.iter().position(|c| *c == key) {
                    fields[i] = Some(value);
                }
            }
        }

        let get = |i: usize| fields[i].ok_or_else(|| missing(path, COLUMNS[i]));
        let row = Row {
            line,
            alg: get(0)?,
            mode: get(1)?,
            size: get(2)?,
            threads: get(3)?,
            time: get(4)?,
        };
        if let Some(m) = row.into_measurement(path)? {
            measurements.push(m);
        }
    }

    Ok(Dataset::new(measurements))
}
