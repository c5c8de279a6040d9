//! SVG chart backend.

use std::{collections::HashMap, f64::consts::PI};

use askama::Template;
use tracing::debug;

use crate::view::{
    charts::{ChartConfig, ChartHandle, ChartId, ChartKind, ChartSurface, Rgba, X_AXIS_TITLE, Y_AXIS_TITLE},
    ViewError,
};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 360.0;
const LEFT: f64 = 80.0;
const RIGHT: f64 = 170.0;
const TOP: f64 = 24.0;
const BOTTOM: f64 = 52.0;
const Y_TICKS: usize = 5;

#[derive(Debug)]
struct LiveChart {
    id: ChartId,
    svg: String,
}

/// Draws charts as standalone SVG documents, one per canvas id.
#[derive(Debug, Default)]
pub struct SvgSurface {
    next_id: u64,
    canvases: HashMap<String, LiveChart>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// SVG markup of the live chart on `canvas`.
    pub fn svg(&self, canvas: &str) -> Option<&str> {
        self.canvases.get(canvas).map(|chart| chart.svg.as_str())
    }

    pub fn live_charts(&self) -> usize {
        self.canvases.len()
    }
}

impl ChartSurface for SvgSurface {
    fn create(&mut self, canvas: &str, config: ChartConfig) -> Result<ChartHandle, ViewError> {
        if self.canvases.contains_key(canvas) {
            return Err(ViewError::CanvasInUse(canvas.to_string()));
        }
        let svg = render(&config)?;
        self.next_id += 1;
        let id = ChartId(self.next_id);
        debug!(canvas, kind = config.kind.as_str(), ?id, "created svg chart");
        self.canvases
            .insert(canvas.to_string(), LiveChart { id, svg });
        Ok(ChartHandle::new(id, canvas, config))
    }

    fn destroy(&mut self, handle: ChartHandle) {
        let owned = self
            .canvases
            .get(handle.canvas())
            .is_some_and(|live| live.id == handle.id());
        if owned {
            self.canvases.remove(handle.canvas());
            debug!(canvas = handle.canvas(), id = ?handle.id(), "destroyed svg chart");
        }
    }
}

/// Render one chart config to SVG markup.
pub fn render(config: &ChartConfig) -> Result<String, askama::Error> {
    match config.kind {
        ChartKind::Line | ChartKind::Bar => AxesSvg::layout(config).render(),
        ChartKind::Pie => PieSvg::layout(config).render(),
    }
}

struct Tick {
    x: f64,
    y: f64,
    text: String,
}

struct Polyline {
    stroke: String,
    points: String,
}

struct Bar {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    fill: String,
    stroke: String,
    title: String,
}

struct LegendEntry {
    y: f64,
    color: String,
    label: String,
}

impl LegendEntry {
    fn column<'a>(entries: impl Iterator<Item = (&'a str, Rgba)>) -> Vec<Self> {
        entries
            .enumerate()
            .map(|(idx, (label, color))| LegendEntry {
                y: TOP + 18.0 * idx as f64,
                color: color.to_string(),
                label: label.to_string(),
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "charts/axes.svg", escape = "html")]
struct AxesSvg {
    kind: &'static str,
    width: f64,
    height: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    zero_y: f64,
    legend_x: f64,
    x_title: &'static str,
    y_title: &'static str,
    x_ticks: Vec<Tick>,
    y_ticks: Vec<Tick>,
    lines: Vec<Polyline>,
    bars: Vec<Bar>,
    legend: Vec<LegendEntry>,
}

/// Maps values onto the vertical pixel range of the plot area.
struct ValueScale {
    lo: f64,
    hi: f64,
}

impl ValueScale {
    fn covering(values: impl Iterator<Item = f64>) -> Self {
        let (lo, hi) = values
            .filter(|v| v.is_finite())
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let hi = if hi - lo <= f64::EPSILON { lo + 1.0 } else { hi };
        Self { lo, hi }
    }

    fn y(&self, value: f64) -> f64 {
        let plot_h = HEIGHT - TOP - BOTTOM;
        round1(TOP + plot_h * (self.hi - value) / (self.hi - self.lo))
    }
}

impl AxesSvg {
    fn layout(config: &ChartConfig) -> Self {
        let plot_w = WIDTH - LEFT - RIGHT;
        let labels = &config.data.labels;
        let datasets = &config.data.datasets;
        let scale = ValueScale::covering(datasets.iter().flat_map(|d| d.data.iter().copied()));
        let slots = labels.len().max(1) as f64;
        let is_bar = config.kind == ChartKind::Bar;

        let x_at = |idx: usize| -> f64 {
            if is_bar {
                LEFT + plot_w * (idx as f64 + 0.5) / slots
            } else if labels.len() <= 1 {
                LEFT + plot_w / 2.0
            } else {
                LEFT + plot_w * idx as f64 / (labels.len() - 1) as f64
            }
        };

        let x_ticks = labels
            .iter()
            .enumerate()
            .map(|(idx, label)| Tick {
                x: round1(x_at(idx)),
                y: HEIGHT - BOTTOM + 16.0,
                text: label.clone(),
            })
            .collect();

        let y_ticks = (0..=Y_TICKS)
            .map(|step| {
                let value = scale.lo + (scale.hi - scale.lo) * step as f64 / Y_TICKS as f64;
                Tick {
                    x: LEFT - 6.0,
                    y: scale.y(value),
                    text: format!("{value:.0}"),
                }
            })
            .collect();

        let mut lines = Vec::new();
        let mut bars = Vec::new();
        if is_bar {
            let group_w = plot_w / slots;
            let bar_w = group_w * 0.8 / datasets.len().max(1) as f64;
            for (series_idx, dataset) in datasets.iter().enumerate() {
                let fill = first_color(&dataset.background_color);
                let stroke = first_color(&dataset.border_color);
                for (idx, value) in dataset.data.iter().copied().enumerate().take(labels.len()) {
                    let top = scale.y(value.max(0.0));
                    let bottom = scale.y(value.min(0.0));
                    bars.push(Bar {
                        x: round1(LEFT + group_w * idx as f64 + group_w * 0.1 + bar_w * series_idx as f64),
                        y: top,
                        width: round1(bar_w),
                        height: round1(bottom - top),
                        fill: fill.clone(),
                        stroke: stroke.clone(),
                        title: format!("{}: {value:.2}", dataset.label),
                    });
                }
            }
        } else {
            for dataset in datasets {
                let points = dataset
                    .data
                    .iter()
                    .copied()
                    .enumerate()
                    .take(labels.len())
                    .map(|(idx, value)| format!("{},{}", round1(x_at(idx)), scale.y(value)))
                    .collect::<Vec<_>>()
                    .join(" ");
                lines.push(Polyline {
                    stroke: first_color(&dataset.border_color),
                    points,
                });
            }
        }

        let legend = LegendEntry::column(datasets.iter().map(|d| {
            let color = d.border_color.first().copied().unwrap_or(FALLBACK);
            (d.label.as_str(), color)
        }));

        Self {
            kind: config.kind.as_str(),
            width: WIDTH,
            height: HEIGHT,
            left: LEFT,
            right: WIDTH - RIGHT,
            top: TOP,
            bottom: HEIGHT - BOTTOM,
            zero_y: scale.y(0.0),
            legend_x: WIDTH - RIGHT + 16.0,
            x_title: X_AXIS_TITLE,
            y_title: Y_AXIS_TITLE,
            x_ticks,
            y_ticks,
            lines,
            bars,
            legend,
        }
    }
}

struct Slice {
    path: String,
    fill: String,
    title: String,
}

#[derive(Template)]
#[template(path = "charts/pie.svg", escape = "html")]
struct PieSvg {
    width: f64,
    height: f64,
    cx: f64,
    cy: f64,
    radius: f64,
    legend_x: f64,
    /// Set when exactly one slice carries the whole total.
    full: Option<Slice>,
    slices: Vec<Slice>,
    legend: Vec<LegendEntry>,
}

impl PieSvg {
    fn layout(config: &ChartConfig) -> Self {
        let cx = round1((WIDTH - RIGHT) / 2.0);
        let cy = round1(HEIGHT / 2.0);
        let radius = round1((HEIGHT - TOP - BOTTOM) / 2.0);
        let (values, colors) = config
            .data
            .datasets
            .first()
            .map(|d| (d.data.as_slice(), d.background_color.as_slice()))
            .unwrap_or_default();
        let labels = &config.data.labels;
        let color_at = |idx: usize| colors.get(idx).copied().unwrap_or(FALLBACK);

        let positive: Vec<(usize, f64)> = values
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| v.is_finite() && *v > 0.0)
            .collect();
        let total: f64 = positive.iter().map(|(_, v)| v).sum();
        let title_at = |idx: usize, value: f64| {
            let label = labels.get(idx).map(String::as_str).unwrap_or_default();
            format!("{label}: {value:.2}")
        };

        let mut full = None;
        let mut slices = Vec::new();
        if let [(idx, value)] = positive.as_slice() {
            full = Some(Slice {
                path: String::new(),
                fill: color_at(*idx).to_string(),
                title: title_at(*idx, *value),
            });
        } else if total > 0.0 {
            let mut start = -PI / 2.0;
            for &(idx, value) in &positive {
                let sweep = value / total * 2.0 * PI;
                let end = start + sweep;
                let large_arc = u8::from(sweep > PI);
                let (x0, y0) = (cx + radius * start.cos(), cy + radius * start.sin());
                let (x1, y1) = (cx + radius * end.cos(), cy + radius * end.sin());
                slices.push(Slice {
                    path: format!(
                        "M {cx} {cy} L {} {} A {radius} {radius} 0 {large_arc} 1 {} {} Z",
                        round1(x0),
                        round1(y0),
                        round1(x1),
                        round1(y1)
                    ),
                    fill: color_at(idx).to_string(),
                    title: title_at(idx, value),
                });
                start = end;
            }
        }

        // Only drugs that got a slice are listed.
        let legend = LegendEntry::column(positive.iter().map(|&(idx, _)| {
            let label = labels.get(idx).map(String::as_str).unwrap_or_default();
            (label, color_at(idx))
        }));

        Self {
            width: WIDTH,
            height: HEIGHT,
            cx,
            cy,
            radius,
            legend_x: WIDTH - RIGHT + 16.0,
            full,
            slices,
            legend,
        }
    }
}

const FALLBACK: Rgba = Rgba {
    r: 128,
    g: 128,
    b: 128,
    a: 1.0,
};

fn first_color(colors: &[Rgba]) -> String {
    colors.first().copied().unwrap_or(FALLBACK).to_string()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
