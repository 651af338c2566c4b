// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod general;
mod output;

pub use self::general::General;
pub use self::output::Output;

use crate::chart::Format;
use crate::error::{Error, Result};

use clap::{App, Arg, ArgMatches};
use log::Level;
use serde_derive::Deserialize;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// directory name used when the output location is derived from the input
pub const FIGURES: &str = "figures";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    output: Output,
    #[serde(skip)]
    input: PathBuf,
    #[serde(skip)]
    focus: u64,
}

impl Config {
    /// parse command line options and return `Config`, exiting on usage
    /// errors
    pub fn new() -> Config {
        match Config::from_args(std::env::args_os()) {
            Ok(config) => config,
            Err(Error::Usage(e)) => e.exit(),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                process::exit(1);
            }
        }
    }

    /// Build the config from an argument list, the first item being the
    /// program name. Values from `--config` are overridden by explicit
    /// options.
    pub fn from_args<I, T>(args: I) -> Result<Config>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;

        let mut config = if let Some(file) = matches.value_of_os("config") {
            Config::load_from_file(Path::new(file))?
        } else {
            Default::default()
        };

        // both are required and validated by clap
        config.input = matches.value_of_os("input").map(PathBuf::from).unwrap_or_default();
        config.focus = parse_arg(&matches, "size").unwrap_or_default();

        if let Some(output) = matches.value_of_os("output") {
            config.output.set_directory(Some(PathBuf::from(output)));
        }
        if let Some(format) = parse_arg(&matches, "format") {
            config.output.set_format(format);
        }
        if let Some(width) = parse_arg(&matches, "width") {
            config.output.set_width(width);
        }
        if let Some(height) = parse_arg(&matches, "height") {
            config.output.set_height(height);
        }

        match matches.occurrences_of("verbose") {
            0 => {}
            1 => config.general.set_logging(Level::Debug),
            _ => config.general.set_logging(Level::Trace),
        }

        Ok(config)
    }

    fn load_from_file(file: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: file.to_path_buf(),
            source,
        })
    }

    /// path of the benchmark results table
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// problem size shown by the focused figures
    pub fn focus(&self) -> u64 {
        self.focus
    }

    pub fn logging(&self) -> Level {
        self.general.logging()
    }

    pub fn format(&self) -> Format {
        self.output.format()
    }

    pub fn size(&self) -> (u32, u32) {
        self.output.size()
    }

    /// the configured output directory, or one derived from the input path
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .directory()
            .unwrap_or_else(|| default_output_dir(&self.input))
    }

    pub fn print(&self) {
        info!("{} {}", NAME, VERSION);
        info!("-----");
        info!("Config: Input: {}", self.input.display());
        info!("Config: Focused size: {}", self.focus);
        info!(
            "Config: Output: {} Format: {:?} Size: {}x{}",
            self.output_dir().display(),
            self.format(),
            self.size().0,
            self.size().1,
        );
        info!("-----");
    }
}

/// `figures` next to the input's parent directory, or `figures` in the
/// working directory when the input is a bare file name.
pub fn default_output_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.parent().unwrap_or(parent).join(FIGURES)
        }
        _ => PathBuf::from(FIGURES),
    }
}

fn app() -> App<'static, 'static> {
    App::new(NAME)
        .version(VERSION)
        .about("Charts execution time, speedup and efficiency of sorting benchmarks")
        .arg(
            Arg::with_name("input")
                .value_name("INPUT")
                .help("Benchmark results (CSV with ALG,MODE,N,T,TIME_MS or benchmark output)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("size")
                .value_name("SIZE")
                .help("Problem size shown in the focused figures")
                .required(true)
                .index(2)
                .validator(is_numeric::<u64>),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("DIR")
                .help("Directory for the rendered figures")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("format")
                .long("format")
                .value_name("FORMAT")
                .help("Image format")
                .possible_values(&["png", "svg"])
                .takes_value(true),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("PIXELS")
                .help("Image width")
                .takes_value(true)
                .validator(is_pixels),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("PIXELS")
                .help("Image height")
                .takes_value(true)
                .validator(is_pixels),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        )
}

fn is_numeric<T: FromStr>(value: String) -> std::result::Result<(), String> {
    value
        .parse::<T>()
        .map(|_| ())
        .map_err(|_| format!("'{}' is not a valid non-negative integer", value))
}

/// an image dimension: non-zero and within `u32`
fn is_pixels(value: String) -> std::result::Result<(), String> {
    match value.parse::<u32>() {
        Ok(0) => Err("image dimensions must be at least 1 pixel".to_string()),
        Ok(_) => Ok(()),
        Err(_) => Err(format!("'{}' is not a valid pixel count", value)),
    }
}

/// a helper function to parse an argument by name from `ArgMatches`, the
/// value having been checked by a validator or possible values
fn parse_arg<T: FromStr>(matches: &ArgMatches, key: &str) -> Option<T> {
    matches.value_of(key).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Result<Config> {
        let mut all = vec!["sortbench-plot"];
        all.extend_from_slice(list);
        Config::from_args(all)
    }

    #[test]
    fn positional_arguments() {
        let config = args(&["results/results.csv", "1000000"]).unwrap();
        assert_eq!(config.input(), Path::new("results/results.csv"));
        assert_eq!(config.focus(), 1_000_000);
        assert_eq!(config.format(), Format::Png);
        assert_eq!(config.size(), (1024, 768));
        assert_eq!(config.logging(), Level::Info);
    }

    #[test]
    fn missing_arguments() {
        assert!(matches!(args(&[]), Err(Error::Usage(_))));
        assert!(matches!(args(&["results.csv"]), Err(Error::Usage(_))));
    }

    #[test]
    fn non_numeric_size() {
        assert!(matches!(
            args(&["results.csv", "lots"]),
            Err(Error::Usage(_))
        ));
        assert!(matches!(
            args(&["results.csv", "-5"]),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn options_override() {
        let config = args(&[
            "r.csv", "10", "--output", "out", "--format", "svg", "--width", "640", "--height",
            "480", "-vv",
        ])
        .unwrap();
        assert_eq!(config.output_dir(), PathBuf::from("out"));
        assert_eq!(config.format(), Format::Svg);
        assert_eq!(config.size(), (640, 480));
        assert_eq!(config.logging(), Level::Trace);
    }

    #[test]
    fn image_dimensions_out_of_range() {
        for (option, value) in &[
            ("--width", "5000000000"),
            ("--height", "5000000000"),
            ("--width", "0"),
            ("--height", "0"),
            ("--width", "wide"),
        ] {
            assert!(
                matches!(args(&["r.csv", "10", *option, *value]), Err(Error::Usage(_))),
                "{} {} was accepted",
                option,
                value
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths() {
        use std::os::unix::ffi::OsStringExt;

        let input = OsString::from_vec(b"/tmp/r\xff/results.csv".to_vec());
        let output = OsString::from_vec(b"/tmp/out\xff".to_vec());
        let config = Config::from_args(vec![
            OsString::from("sortbench-plot"),
            input.clone(),
            OsString::from("10"),
            OsString::from("--output"),
            output.clone(),
        ])
        .unwrap();
        assert_eq!(config.input(), Path::new(&input));
        assert_eq!(config.output_dir(), PathBuf::from(&output));

        let config = Config::from_args(vec![
            OsString::from("sortbench-plot"),
            input,
            OsString::from("10"),
        ])
        .unwrap();
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/figures"));
    }

    #[test]
    fn bad_format() {
        assert!(matches!(
            args(&["r.csv", "10", "--format", "jpeg"]),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn output_dir_derivation() {
        assert_eq!(
            default_output_dir(Path::new("results.csv")),
            PathBuf::from("figures")
        );
        assert_eq!(
            default_output_dir(Path::new("results/results.csv")),
            PathBuf::from("figures")
        );
        assert_eq!(
            default_output_dir(Path::new("runs/2024/results.csv")),
            PathBuf::from("runs/figures")
        );
        assert_eq!(
            default_output_dir(Path::new("/data/results.csv")),
            PathBuf::from("/figures")
        );
    }

    #[test]
    fn config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[general]\nlogging = \"debug\"\n\n[output]\ndirectory = \"charts\"\nformat = \"svg\"\nwidth = 800\n"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = args(&["r.csv", "10", "--config", &path]).unwrap();
        assert_eq!(config.logging(), Level::Debug);
        assert_eq!(config.output_dir(), PathBuf::from("charts"));
        assert_eq!(config.format(), Format::Svg);
        assert_eq!(config.size(), (800, 768));

        let config = args(&["r.csv", "10", "--config", &path, "--format", "png"]).unwrap();
        assert_eq!(config.format(), Format::Png);
    }

    #[test]
    fn config_file_unknown_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[output]\ncolour = \"red\"\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        assert!(matches!(
            args(&["r.csv", "10", "--config", &path]),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn config_file_missing() {
        assert!(matches!(
            args(&["r.csv", "10", "--config", "/nonexistent/plot.toml"]),
            Err(Error::Io { .. })
        ));
    }
}
