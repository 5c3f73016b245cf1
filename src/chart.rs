//! Bar-chart rendering of a [`LabelSummary`].
//!
//! Rendering is presentation only. The CLI picks a [`ChartRenderer`] and hands
//! it the summary; nothing here feeds back into labeling.

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{LabelError, Result};
use crate::observation::Label;
use crate::summary::LabelSummary;

pub const CHART_TITLE: &str = "LOS / MP / NLOS Distribution (Ocean GNSS Data)";
pub const X_AXIS_LABEL: &str = "Signal Class";
pub const Y_AXIS_LABEL: &str = "Number of Samples";

/// Something that can present a label distribution.
pub trait ChartRenderer {
    fn render(&mut self, summary: &LabelSummary) -> Result<()>;
}

/// Widest text bar, in characters.
pub const MAX_TEXT_WIDTH: usize = 500;

/// Horizontal bar chart drawn with block characters.
pub struct TextBarChart<W: Write> {
    writer: W,
    width: usize,
}

impl<W: Write> TextBarChart<W> {
    pub fn new(writer: W, width: usize) -> Self {
        Self {
            writer,
            width: width.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ChartRenderer for TextBarChart<W> {
    fn render(&mut self, summary: &LabelSummary) -> Result<()> {
        let text = render_text(summary, self.width);
        self.writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|e| LabelError::output("<chart>", e))
    }
}

/// Text rendering of the chart. Bars scale to the largest count; any
/// non-zero count gets at least one block.
pub fn render_text(summary: &LabelSummary, width: usize) -> String {
    let width = width.clamp(1, MAX_TEXT_WIDTH);
    let max = summary.iter().map(|(_, c)| c).max().unwrap_or(0);
    let mut out = String::new();

    let _ = writeln!(out, "{CHART_TITLE}");
    for (label, count) in summary.iter() {
        let len = if max == 0 || count == 0 {
            0
        } else {
            (count as f64 / max as f64 * width as f64).ceil() as usize
        };
        let _ = writeln!(out, "{:<4} | {} {}", label.as_str(), "█".repeat(len), count);
    }
    let _ = writeln!(out, "{X_AXIS_LABEL} vs {Y_AXIS_LABEL}");

    out
}

/// Writes the chart as an SVG image.
pub struct SvgBarChart {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgBarChart {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (800, 600),
        }
    }
}

impl ChartRenderer for SvgBarChart {
    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    fn render(&mut self, summary: &LabelSummary) -> Result<()> {
        let failed = |e: DrawingAreaErrorKind<std::io::Error>| {
            LabelError::output(&self.path, std::io::Error::other(e.to_string()))
        };

        let max = summary.iter().map(|(_, c)| c).max().unwrap_or(0);
        let y_max = u32::try_from(max).unwrap_or(u32::MAX).max(1);
        debug!(max, "Scaling chart axis");

        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(failed)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 24).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(
                // Integer ranges are inclusive here: one segment per label.
                (0u32..Label::ALL.len() as u32 - 1).into_segmented(),
                0u32..y_max.saturating_add(y_max / 10).saturating_add(1),
            )
            .map_err(failed)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(WHITE)
            .bold_line_style(BLACK.mix(0.2))
            .x_desc(X_AXIS_LABEL)
            .y_desc(Y_AXIS_LABEL)
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => Label::ALL
                    .get(*i as usize)
                    .map(|l| l.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(failed)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(30)
                    .data(summary.iter().enumerate().map(|(i, (_, count))| {
                        (i as u32, u32::try_from(count).unwrap_or(u32::MAX))
                    })),
            )
            .map_err(failed)?;

        root.present().map_err(failed)?;
        info!("Chart exported");
        Ok(())
    }
}

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_chart_order_and_scale() {
        let summary = LabelSummary { los: 10, mp: 0, nlos: 5 };
        let text = render_text(&summary, 20);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], CHART_TITLE);
        assert!(lines[1].starts_with("LOS "));
        assert!(lines[2].starts_with("MP "));
        assert!(lines[3].starts_with("NLOS"));
        assert_eq!(lines[1].matches('█').count(), 20);
        assert_eq!(lines[2].matches('█').count(), 0);
        assert_eq!(lines[3].matches('█').count(), 10);
        assert!(lines[2].ends_with(" 0"));
    }

    #[test]
    fn test_text_chart_all_zero() {
        let text = render_text(&LabelSummary::default(), 20);
        assert_eq!(text.matches('█').count(), 0);
    }

    #[test]
    fn test_small_count_gets_a_block() {
        let summary = LabelSummary { los: 1000, mp: 1, nlos: 0 };
        let text = render_text(&summary, 10);
        let mp_line = text.lines().nth(2).unwrap();
        assert_eq!(mp_line.matches('█').count(), 1);
    }

    #[test]
    fn test_text_renderer_writes_to_sink() {
        let mut chart = TextBarChart::new(Vec::new(), 10);
        chart.render(&LabelSummary { los: 1, mp: 2, nlos: 3 }).unwrap();
        let out = String::from_utf8(chart.into_inner()).unwrap();
        assert!(out.contains("NLOS | ██████████ 3"));
    }

    #[test]
    fn test_huge_width_is_clamped() {
        let summary = LabelSummary { los: 2, mp: 0, nlos: 1 };
        let text = render_text(&summary, usize::MAX);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[1].matches('█').count(), MAX_TEXT_WIDTH);
        assert_eq!(lines[3].matches('█').count(), MAX_TEXT_WIDTH / 2);
    }

    #[test]
    fn test_svg_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distribution.svg");

        let mut chart = SvgBarChart::new(&path);
        chart.render(&LabelSummary { los: 4, mp: 0, nlos: 7 }).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(CHART_TITLE));
        assert!(svg.contains(X_AXIS_LABEL));
        assert!(svg.contains(Y_AXIS_LABEL));
        let los = svg.find(">LOS<").unwrap();
        let mp = svg.find(">MP<").unwrap();
        let nlos = svg.find(">NLOS<").unwrap();
        assert!(los < mp && mp < nlos);
    }

    #[test]
    fn test_svg_export_to_unwritable_path() {
        let mut chart = SvgBarChart::new("/nonexistent/dir/chart.svg");
        let err = chart.render(&LabelSummary::default()).unwrap_err();
        assert!(err.is_output_error());
    }
}
