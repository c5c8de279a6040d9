//! Chart configuration, colours and owned chart handles.

use std::fmt;

use rand::Rng;
use serde::{Serialize, Serializer};

use crate::view::{transform::Shaped, ViewError};

pub const X_AXIS_TITLE: &str = "Year";
pub const Y_AXIS_TITLE: &str = "Total Spending ($)";
const FILL_ALPHA: f32 = 0.6;

/// Chart type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Bar, ChartKind::Pie];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
        }
    }

    /// Id of the page element the chart is drawn into.
    pub fn canvas_id(&self) -> &'static str {
        match self {
            Self::Line => "line-chart",
            Self::Bar => "bar-chart",
            Self::Pie => "pie-chart",
        }
    }
}

/// RGBA colour, rendered as CSS `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Draw a random colour with the fixed fill alpha.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
            a: FILL_ALPHA,
        }
    }

    pub fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A labelled value series with its assigned colours.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<f64>,
    /// One colour for line/bar datasets, one per slice for the pie.
    pub background_color: Vec<Rgba>,
    pub border_color: Vec<Rgba>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

impl ChartOptions {
    fn with_axes() -> Self {
        let title = |text: &str| Axis {
            title: AxisTitle {
                display: true,
                text: text.to_string(),
            },
        };
        Self {
            responsive: true,
            scales: Some(Scales {
                x: title(X_AXIS_TITLE),
                y: title(Y_AXIS_TITLE),
            }),
        }
    }

    fn without_axes() -> Self {
        Self {
            responsive: true,
            scales: None,
        }
    }
}

/// Everything a chart surface needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// Build the config for `kind`, drawing fresh colours from `rng`.
    pub fn build<R: Rng>(kind: ChartKind, shaped: &Shaped, rng: &mut R) -> Self {
        match kind {
            ChartKind::Line | ChartKind::Bar => {
                let datasets = shaped
                    .series
                    .iter()
                    .map(|series| {
                        let color = Rgba::random(rng);
                        ChartSeries {
                            label: series.label.clone(),
                            data: series.values.clone(),
                            background_color: vec![color],
                            border_color: vec![color.opaque()],
                        }
                    })
                    .collect();
                Self {
                    kind,
                    data: ChartData {
                        labels: shaped.labels.iter().map(ToString::to_string).collect(),
                        datasets,
                    },
                    options: ChartOptions::with_axes(),
                }
            }
            ChartKind::Pie => {
                let colors: Vec<Rgba> = shaped.pie.iter().map(|_| Rgba::random(rng)).collect();
                Self {
                    kind,
                    data: ChartData {
                        labels: shaped.pie.iter().map(|(drug, _)| drug.to_string()).collect(),
                        datasets: vec![ChartSeries {
                            label: Y_AXIS_TITLE.to_string(),
                            data: shaped.pie.iter().map(|(_, total)| total).collect(),
                            border_color: colors.iter().map(|c| c.opaque()).collect(),
                            background_color: colors,
                        }],
                    },
                    options: ChartOptions::without_axes(),
                }
            }
        }
    }
}

/// Opaque id a surface assigns to a live chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartId(pub u64);

/// Owned handle to a chart living on a surface. Must be handed back to
/// [`ChartSurface::destroy`] before the canvas is reused.
#[derive(Debug, PartialEq)]
pub struct ChartHandle {
    id: ChartId,
    canvas: String,
    config: ChartConfig,
}

impl ChartHandle {
    pub fn new(id: ChartId, canvas: impl Into<String>, config: ChartConfig) -> Self {
        Self {
            id,
            canvas: canvas.into(),
            config,
        }
    }

    pub fn id(&self) -> ChartId {
        self.id
    }

    pub fn canvas(&self) -> &str {
        &self.canvas
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
}

/// Backend that turns chart configs into drawn charts.
pub trait ChartSurface {
    /// Draw `config` into `canvas`. Fails with [`ViewError::CanvasInUse`]
    /// while another chart is live on that canvas.
    fn create(&mut self, canvas: &str, config: ChartConfig) -> Result<ChartHandle, ViewError>;

    /// Tear down a chart and free its canvas.
    fn destroy(&mut self, handle: ChartHandle);
}

/// Single-owner slot for the chart of one canvas.
#[derive(Debug, Default)]
pub struct ChartSlot {
    handle: Option<ChartHandle>,
}

impl ChartSlot {
    /// Dispose of the current chart, if any, then draw a new one.
    pub fn replace<S: ChartSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        canvas: &str,
        config: ChartConfig,
    ) -> Result<&ChartHandle, ViewError> {
        if let Some(previous) = self.handle.take() {
            surface.destroy(previous);
        }
        let handle = surface.create(canvas, config)?;
        Ok(&*self.handle.insert(handle))
    }

    pub fn handle(&self) -> Option<&ChartHandle> {
        self.handle.as_ref()
    }
}
