// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::chart::{Chart, Format};
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::figure::Figure;

use strum::IntoEnumIterator;

use std::path::{Path, PathBuf};

/// Renders the five figures for one dataset and focused size.
pub struct Report {
    dataset: Dataset,
    focus: u64,
    output: PathBuf,
    format: Format,
    size: (u32, u32),
}

impl Report {
    pub fn new(dataset: Dataset, focus: u64, output: impl Into<PathBuf>) -> Self {
        Self {
            dataset,
            focus,
            output: output.into(),
            format: Format::default(),
            size: (1024, 768),
        }
    }

    /// Load the input named by the config. Nothing is written yet.
    pub fn from_config(config: &Config) -> Result<Self> {
        let dataset = Dataset::load(config.input())?;
        debug!("problem sizes: {:?}", dataset.sizes());
        if !dataset.sizes().contains(&config.focus()) {
            warn!(
                "no measurements for focused size {}, figures 1, 4 and 5 will be empty",
                config.focus()
            );
        }

        let mut report = Report::new(dataset, config.focus(), config.output_dir());
        report.format(config.format()).size(config.size());
        Ok(report)
    }

    pub fn format(&mut self, format: Format) -> &mut Self {
        self.format = format;
        self
    }

    pub fn size(&mut self, size: (u32, u32)) -> &mut Self {
        self.size = size;
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn charts(&self) -> Vec<(Figure, Chart)> {
        Figure::iter()
            .map(|figure| {
                let mut chart = figure.chart(&self.dataset, self.focus);
                chart.format(self.format).size(self.size);
                (figure, chart)
            })
            .collect()
    }

    /// output file of every figure, in figure order
    pub fn paths(&self) -> Vec<PathBuf> {
        Figure::iter()
            .map(|figure| self.output.join(figure.file_name(self.focus, self.format)))
            .collect()
    }

    /// Create the output directory and render every figure into it,
    /// returning the written paths in figure order.
    pub fn generate(&self) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output).map_err(|e| Error::io(&self.output, e))?;

        let mut written = Vec::new();
        for ((figure, chart), path) in self.charts().into_iter().zip(self.paths()) {
            chart.render(&path)?;
            info!("figure {}: {}", figure.number(), path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// The text printed once every figure is written.
pub fn summary(paths: &[PathBuf], output: &Path) -> String {
    let mut s = String::from("\nSaved figures:\n");
    for path in paths {
        s.push_str(&format!(" - {}\n", path.display()));
    }
    s.push_str(&format!(
        "\nOpen these files from the '{}' folder and insert them into your report.\n",
        output.display()
    ));
    s
}
