// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sortbench_plot::{fatal, summary, Config, Logger, Report};

fn main() {
    let config = Config::new();

    Logger::new()
        .label("sortbench_plot")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    config.print();

    let report = match Report::from_config(&config) {
        Ok(report) => report,
        Err(e) => fatal!("{}", e),
    };

    match report.generate() {
        Ok(paths) => print!("{}", summary(&paths, report.output())),
        Err(e) => fatal!("{}", e),
    }
}
