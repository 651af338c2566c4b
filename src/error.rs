// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors which abort a report run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(#[from] clap::Error),
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{path}:{line}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to render {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_message() {
        let e = Error::InvalidValue {
            path: PathBuf::from("results.csv"),
            line: 3,
            column: "TIME_MS",
            value: "fast".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "results.csv:3: column 'TIME_MS' has invalid value 'fast'"
        );
    }

    #[test]
    fn missing_column_message() {
        let e = Error::MissingColumn {
            path: PathBuf::from("r.csv"),
            column: "N",
        };
        assert_eq!(e.to_string(), "r.csv: missing required column 'N'");
    }
}
