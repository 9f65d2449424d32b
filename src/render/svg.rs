//! SVG backend.
//!
//! Geometry is computed here in pixels; `templates/gantt.svg` only lays the
//! precomputed values out. Rows sit on a half-unit grid (row `i` centred at
//! `0.5 * (i + 1)`) with the first row at the top, bars a quarter unit tall.

use askama::Template;

use super::ChartRenderer;
use crate::config::ChartConfig;
use crate::report::Timeline;

const MARGIN_TOP: f64 = 20.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 50.0;
const ROW_UNIT: f64 = 0.5;
const BAR_UNIT: f64 = 0.25;
/// Space above the first row, in row units
const Y_PAD: f64 = 0.1;

/// Renders a [`Timeline`] as a standalone SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: ChartConfig,
}

impl SvgRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }
}

impl ChartRenderer for SvgRenderer {
    fn render(&self, timeline: &Timeline) -> anyhow::Result<String> {
        Ok(GanttTemplate::build(&self.config, timeline).render()?)
    }
}

struct GridLine {
    x: String,
    label: String,
}

struct BarView {
    x: String,
    y: String,
    width: String,
    height: String,
    center: String,
    label: String,
    tooltip: String,
}

struct ConnectorView {
    x: String,
    y1: String,
    y2: String,
}

#[derive(Template)]
#[template(path = "gantt.svg", escape = "html")]
struct GanttTemplate<'a> {
    width: u32,
    height: u32,
    font_family: &'a str,
    font_size: u32,
    title: &'a str,
    title_x: String,
    title_y: String,
    title_size: u32,
    grid_color: &'a str,
    connector_color: &'a str,
    bar_fill: &'a str,
    bar_edge: &'a str,
    bar_opacity: String,
    plot_left: String,
    plot_right: String,
    plot_top: String,
    plot_bottom: String,
    plot_width: String,
    plot_height: String,
    label_x: String,
    tick_label_y: String,
    minor_lines: Vec<GridLine>,
    major_lines: Vec<GridLine>,
    bars: Vec<BarView>,
    connectors: Vec<ConnectorView>,
}

/// Maps chart seconds and row units to pixels.
#[derive(Debug, Clone, Copy)]
struct Scale {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    extent: f64,
    /// Row units covered by the plot height
    row_span: f64,
}

impl Scale {
    fn x(&self, seconds: f64) -> f64 {
        if self.extent <= 0.0 {
            return self.left;
        }
        self.left + seconds / self.extent * self.width
    }

    fn y(&self, units: f64) -> f64 {
        self.top + (units + Y_PAD) / self.row_span * self.height
    }

    fn row_center(&self, row: usize) -> f64 {
        self.y(row as f64 * ROW_UNIT + ROW_UNIT)
    }
}

impl<'a> GanttTemplate<'a> {
    fn build(config: &'a ChartConfig, timeline: &Timeline) -> Self {
        let width = f64::from(config.width());
        let height = f64::from(config.height());
        let font_size = config.font_size();
        let title = config.title().unwrap_or("");

        let title_space = if title.is_empty() {
            0.0
        } else {
            f64::from(font_size) * 2.0
        };
        let left = label_margin(timeline, font_size, width);
        let top = MARGIN_TOP + title_space;

        let scale = Scale {
            left,
            top,
            width: (width - left - MARGIN_RIGHT).max(1.0),
            height: (height - top - MARGIN_BOTTOM).max(1.0),
            extent: timeline.extent,
            row_span: timeline.rows.len() as f64 * ROW_UNIT + ROW_UNIT + Y_PAD,
        };
        let bar_px = BAR_UNIT / scale.row_span * scale.height;

        let grid = |step: f64| -> Vec<GridLine> {
            timeline
                .ticks(step)
                .into_iter()
                .map(|t| GridLine {
                    x: px(scale.x(t)),
                    label: format!("{t}"),
                })
                .collect()
        };

        let bars = timeline
            .rows
            .iter()
            .map(|row| {
                let center = scale.row_center(row.row);
                let x0 = scale.x(row.start);
                // Backwards intervals are drawn as zero-width markers
                let bar_width = (scale.x(row.end) - x0).max(0.0);
                BarView {
                    x: px(x0),
                    y: px(center - bar_px / 2.0),
                    width: px(bar_width),
                    height: px(bar_px),
                    center: px(center),
                    label: row.label.clone(),
                    tooltip: format!("{}: {:.3}s -> {:.3}s", row.label, row.start, row.end),
                }
            })
            .collect();

        let connectors = timeline
            .rows
            .iter()
            .filter_map(|row| {
                let connector = row.connector?;
                Some(ConnectorView {
                    x: px(scale.x(connector.x)),
                    y1: px(scale.row_center(connector.from_row)),
                    y2: px(scale.row_center(row.row)),
                })
            })
            .collect();

        Self {
            width: config.width(),
            height: config.height(),
            font_family: config.font_family(),
            font_size,
            title,
            title_x: px(width / 2.0),
            title_y: px(MARGIN_TOP + f64::from(font_size)),
            title_size: font_size * 3 / 2,
            grid_color: config.grid_color(),
            connector_color: config.connector_color(),
            bar_fill: config.bar_fill(),
            bar_edge: config.bar_edge(),
            bar_opacity: format!("{}", config.bar_opacity()),
            plot_left: px(scale.left),
            plot_right: px(scale.left + scale.width),
            plot_top: px(scale.top),
            plot_bottom: px(scale.top + scale.height),
            plot_width: px(scale.width),
            plot_height: px(scale.height),
            label_x: px(scale.left - 5.0),
            tick_label_y: px(scale.top + scale.height + f64::from(font_size) + 4.0),
            minor_lines: grid(timeline.minor_step),
            major_lines: grid(timeline.major_step),
            bars,
            connectors,
        }
    }
}

/// Room for the longest row label, capped at a third of the image.
fn label_margin(timeline: &Timeline, font_size: u32, width: f64) -> f64 {
    let longest = timeline
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);
    let estimate = 15.0 + longest as f64 * f64::from(font_size) * 0.6;
    estimate.clamp(60.0, (width / 3.0).max(60.0))
}

fn px(value: f64) -> String {
    format!("{value:.2}")
}
