// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A small line chart renderer on top of plotters.

use crate::error::{Error, Result};

use plotters::coord::Shift;
use plotters::prelude::*;
use serde_derive::Deserialize;
use strum_macros::{EnumString, IntoStaticStr};

use std::ops::Range;
use std::path::Path;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0x1F77B4),
    hexcolour!(0xFF7F0E),
    hexcolour!(0x2CA02C),
    hexcolour!(0xD62728),
    hexcolour!(0x9467BD),
    hexcolour!(0x8C564B),
    hexcolour!(0xE377C2),
    hexcolour!(0x7F7F7F),
    hexcolour!(0xBCBD22),
    hexcolour!(0x17BECF),
];

const FONT: &str = "sans-serif";

/// Image encoding of a rendered chart.
#[derive(Clone, Copy, Debug, Deserialize, EnumString, Eq, IntoStaticStr, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[strum(serialize = "png")]
    Png,
    #[strum(serialize = "svg")]
    Svg,
}

impl Default for Format {
    fn default() -> Self {
        Format::Png
    }
}

impl Format {
    pub fn extension(self) -> &'static str {
        self.into()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// a polyline with a circle on every point
    Line(Vec<(f64, f64)>),
    /// a single cross
    Marker((f64, f64)),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    label: String,
    shape: Shape,
}

impl Series {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    fn points(&self) -> &[(f64, f64)] {
        match &self.shape {
            Shape::Line(points) => points,
            Shape::Marker(point) => std::slice::from_ref(point),
        }
    }
}

/// Describes one chart: text, size, and the series to draw. Series take
/// colours from the palette in the order they were added.
#[derive(Clone, Debug)]
pub struct Chart {
    caption: String,
    x_desc: String,
    y_desc: String,
    size: (u32, u32),
    format: Format,
    series: Vec<Series>,
}

impl Chart {
    pub fn new(caption: impl AsRef<str>) -> Self {
        Self {
            caption: caption.as_ref().to_owned(),
            x_desc: String::new(),
            y_desc: String::new(),
            size: (1024, 768),
            format: Format::Png,
            series: Vec::new(),
        }
    }

    pub fn x_desc(&mut self, x_desc: impl AsRef<str>) -> &mut Self {
        self.x_desc = x_desc.as_ref().to_owned();
        self
    }

    pub fn y_desc(&mut self, y_desc: impl AsRef<str>) -> &mut Self {
        self.y_desc = y_desc.as_ref().to_owned();
        self
    }

    pub fn size(&mut self, size: (u32, u32)) -> &mut Self {
        self.size = size;
        self
    }

    pub fn format(&mut self, format: Format) -> &mut Self {
        self.format = format;
        self
    }

    /// Add a line. Empty point lists are ignored so callers never draw a
    /// legend entry without data.
    pub fn line<I>(&mut self, label: impl AsRef<str>, points: I) -> &mut Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points: Vec<_> = points.into_iter().collect();
        if !points.is_empty() {
            self.series.push(Series {
                label: label.as_ref().to_owned(),
                shape: Shape::Line(points),
            });
        }
        self
    }

    pub fn marker(&mut self, label: impl AsRef<str>, point: (f64, f64)) -> &mut Self {
        self.series.push(Series {
            label: label.as_ref().to_owned(),
            shape: Shape::Marker(point),
        });
        self
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// number of line series, markers excluded
    pub fn line_count(&self) -> usize {
        self.series
            .iter()
            .filter(|s| matches!(s.shape, Shape::Line(_)))
            .count()
    }

    /// Axis ranges covering every finite point with some headroom. The y
    /// axis always includes zero.
    pub fn ranges(&self) -> (Range<f64>, Range<f64>) {
        let points = self
            .series
            .iter()
            .flat_map(|s| s.points().iter().copied())
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for (x, y) in points {
            bounds = Some(match bounds {
                None => (x, x, y.min(0.0), y.max(0.0)),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            });
        }

        match bounds {
            None => (0.0..1.0, 0.0..1.0),
            Some((x0, x1, y0, y1)) => {
                let pad = ((x1 - x0) * 0.05).max(0.5);
                let top = if y1 > y0 { y1 + (y1 - y0) * 0.1 } else { y0 + 1.0 };
                (x0 - pad..x1 + pad, y0..top)
            }
        }
    }

    /// Render to `path`, replacing any existing file.
    pub fn render(&self, path: &Path) -> Result<()> {
        debug!(
            "rendering '{}' with {} series to {}",
            self.caption,
            self.series.len(),
            path.display()
        );
        let result = match self.format {
            Format::Png => self.draw(BitMapBackend::new(path, self.size).into_drawing_area()),
            Format::Svg => self.draw(SVGBackend::new(path, self.size).into_drawing_area()),
        };
        result.map_err(|source| Error::Render {
            path: path.to_path_buf(),
            source,
        })
    }

    fn draw<DB>(
        &self,
        root: DrawingArea<DB, Shift>,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let (x_range, y_range) = self.ranges();

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.caption, (FONT, 28))
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 80)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .label_style((FONT, 16))
            .axis_desc_style((FONT, 18))
            .draw()?;

        for (i, series) in self.series.iter().enumerate() {
            let colour = COLOURS[i % COLOURS.len()];
            match &series.shape {
                Shape::Line(points) => {
                    chart
                        .draw_series(LineSeries::new(
                            points.iter().copied(),
                            colour.stroke_width(2),
                        ))?
                        .label(series.label.as_str())
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
                        });
                    chart.draw_series(
                        points
                            .iter()
                            .map(|&point| Circle::new(point, 4, colour.filled())),
                    )?;
                }
                Shape::Marker(point) => {
                    chart
                        .draw_series(std::iter::once(Cross::new(
                            *point,
                            7,
                            colour.stroke_width(2),
                        )))?
                        .label(series.label.as_str())
                        .legend(move |(x, y)| Cross::new((x + 10, y), 5, colour.stroke_width(2)));
                }
            }
        }

        if !self.series.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font((FONT, 16))
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn format_names() {
        assert_eq!(Format::from_str("png"), Ok(Format::Png));
        assert_eq!(Format::from_str("svg"), Ok(Format::Svg));
        assert!(Format::from_str("gif").is_err());
        assert_eq!(Format::Svg.extension(), "svg");
        assert_eq!(Format::default(), Format::Png);
    }

    #[test]
    fn empty_lines_are_dropped() {
        let mut chart = Chart::new("empty");
        chart.line("none", Vec::new()).line("one", vec![(1.0, 2.0)]);
        assert_eq!(chart.line_count(), 1);
        assert_eq!(chart.series()[0].label(), "one");
    }

    #[test]
    fn markers_are_not_lines() {
        let mut chart = Chart::new("markers");
        chart
            .marker("seq", (1.0, 10.0))
            .line("par", vec![(2.0, 6.0), (4.0, 3.0)]);
        assert_eq!(chart.series().len(), 2);
        assert_eq!(chart.line_count(), 1);
        assert_eq!(chart.series()[0].shape(), &Shape::Marker((1.0, 10.0)));
    }

    #[test]
    fn ranges_cover_points() {
        let mut chart = Chart::new("ranges");
        chart
            .marker("seq", (1.0, 100.0))
            .line("par", vec![(2.0, 60.0), (8.0, 20.0)]);
        let (x, y) = chart.ranges();
        assert!(x.start < 1.0 && x.end > 8.0);
        assert_eq!(y.start, 0.0);
        assert!(y.end > 100.0);
    }

    #[test]
    fn ranges_without_data() {
        let chart = Chart::new("nothing");
        assert_eq!(chart.ranges(), (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn ranges_ignore_non_finite() {
        let mut chart = Chart::new("inf");
        chart.line("s", vec![(2.0, f64::INFINITY), (4.0, 2.0)]);
        let (x, y) = chart.ranges();
        assert!(x.start < 4.0 && x.end > 4.0);
        assert!(y.end.is_finite() && y.end > 2.0);
    }
}
