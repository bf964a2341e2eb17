use serde::Serialize;

// ---------------------------------------------------------------------------
// ChartSpec – renderer-agnostic chart description
// ---------------------------------------------------------------------------

/// A declarative chart: data, encodings and chrome. Carries no behaviour;
/// the renderer decides how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: Title,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub marks: Marks,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    /// Horizontal position as a fraction of the figure width.
    pub x: f32,
    pub anchor: TextAnchor,
    pub font_size: f32,
}

impl Title {
    pub fn centered(text: &str, font_size: f32) -> Self {
        Title {
            text: text.to_string(),
            x: 0.5,
            anchor: TextAnchor::Center,
            font_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub scale: AxisScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AxisScale {
    /// Category labels in axis order; position `i` on the axis is `categories[i]`.
    Categorical { categories: Vec<String> },
    Linear,
}

impl AxisScale {
    pub fn categories(&self) -> &[String] {
        match self {
            AxisScale::Categorical { categories } => categories,
            AxisScale::Linear => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub height: f32,
    pub plot_background: String,
    pub paper_background: String,
    pub font_color: String,
}

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Marks {
    Bars {
        mode: BarMode,
        legend_title: String,
        series: Vec<BarSeries>,
    },
    Bubbles {
        /// Diameter, in pixels, of the largest bubble.
        size_max: f32,
        color_scale: ColorScale,
        points: Vec<BubblePoint>,
    },
}

impl Marks {
    /// Number of drawn elements; zero for an empty chart.
    pub fn len(&self) -> usize {
        match self {
            Marks::Bars { series, .. } => series.iter().map(|s| s.bars.len()).sum(),
            Marks::Bubbles { points, .. } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    /// Series side by side within each category.
    Group,
}

/// One legend entry of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    /// `#rrggbb`
    pub color: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    /// Index into the x axis categories.
    pub category: usize,
    pub value: f64,
    /// Text drawn on the bar.
    pub label: String,
    pub hover: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubblePoint {
    /// Index into the x axis categories.
    pub x: usize,
    /// Index into the y axis categories.
    pub y: usize,
    pub value: f64,
    /// Diameter in pixels.
    pub size: f32,
    pub hover: String,
}

/// Continuous color encoding: `stops` are spread evenly over `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    pub title: String,
    pub stops: Vec<String>,
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// Position of `value` within the scale, clamped to `[0, 1]`.
    pub fn fraction(&self, value: f64) -> f32 {
        let span = self.max - self.min;
        if span <= f64::EPSILON {
            return 1.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0) as f32
    }
}
