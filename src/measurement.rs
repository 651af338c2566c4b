// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// The sorting algorithm a measurement was taken for. Parsed from the `ALG`
/// column code.
#[derive(Clone, Copy, Debug, EnumIter, EnumString, Eq, IntoStaticStr, PartialEq, Hash)]
pub enum Algorithm {
    #[strum(serialize = "QS")]
    Quicksort,
    #[strum(serialize = "MS")]
    Mergesort,
}

impl Algorithm {
    /// the code used in the input table, eg: `QS`
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Quicksort => "quicksort",
            Algorithm::Mergesort => "mergesort",
        }
    }
}

/// Sequential or parallel execution. Parsed from the `MODE` column code.
#[derive(Clone, Copy, Debug, EnumIter, EnumString, Eq, IntoStaticStr, PartialEq, Hash)]
pub enum Mode {
    #[strum(serialize = "SEQ")]
    Sequential,
    #[strum(serialize = "PAR")]
    Parallel,
}

impl Mode {
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// One row of benchmark output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub algorithm: Algorithm,
    pub mode: Mode,
    /// number of elements sorted
    pub size: u64,
    pub threads: u32,
    pub time_ms: f64,
}

impl Measurement {
    pub fn new(algorithm: Algorithm, mode: Mode, size: u64, threads: u32, time_ms: f64) -> Self {
        Self {
            algorithm,
            mode,
            size,
            threads,
            time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parse_codes() {
        assert_eq!(Algorithm::from_str("QS"), Ok(Algorithm::Quicksort));
        assert_eq!(Algorithm::from_str("MS"), Ok(Algorithm::Mergesort));
        assert!(Algorithm::from_str("BS").is_err());
        assert!(Algorithm::from_str("qs").is_err());

        assert_eq!(Mode::from_str("SEQ"), Ok(Mode::Sequential));
        assert_eq!(Mode::from_str("PAR"), Ok(Mode::Parallel));
        assert!(Mode::from_str("GPU").is_err());
    }

    #[test]
    fn codes_round_trip() {
        for algorithm in Algorithm::iter() {
            assert_eq!(Algorithm::from_str(algorithm.code()), Ok(algorithm));
        }
        for mode in Mode::iter() {
            assert_eq!(Mode::from_str(mode.code()), Ok(mode));
        }
    }

    #[test]
    fn iteration_order() {
        let algorithms: Vec<Algorithm> = Algorithm::iter().collect();
        assert_eq!(algorithms, vec![Algorithm::Quicksort, Algorithm::Mergesort]);
    }
}
