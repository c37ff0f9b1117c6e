use std::ops::Range;

use plotters::style::RGBColor;

use crate::math::grid::Samples;

// ─────────────────────────────────────────────────────────────────────────────
// Palette
// ─────────────────────────────────────────────────────────────────────────────

pub mod palette {
    use plotters::style::RGBColor;

    pub const BLUE: RGBColor = RGBColor(31, 119, 180);
    pub const RED: RGBColor = RGBColor(214, 39, 40);
    pub const GREEN: RGBColor = RGBColor(44, 160, 44);
    pub const ORANGE: RGBColor = RGBColor(255, 127, 14);
    pub const MAGENTA: RGBColor = RGBColor(200, 40, 160);
    pub const GRAY: RGBColor = RGBColor(128, 128, 128);
    pub const BLACK: RGBColor = RGBColor(0, 0, 0);
    pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
    pub const NAVY: RGBColor = RGBColor(0, 0, 128);
    pub const DARK_RED: RGBColor = RGBColor(139, 0, 0);
    pub const YELLOW: RGBColor = RGBColor(240, 200, 40);

    /// 線性內插 `from` → `to`，t 夾在 [0, 1]。
    pub fn blend(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
    }

    /// `count` 個由 `from` 漸變到 `to` 的顏色。
    pub fn gradient(from: RGBColor, to: RGBColor, count: usize) -> Vec<RGBColor> {
        if count <= 1 {
            return vec![from; count];
        }
        (0..count)
            .map(|i| blend(from, to, i as f64 / (count - 1) as f64))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
    Cross
}

// ─────────────────────────────────────────────────────────────────────────────
// Layer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Line {
        points: Vec<(f64, f64)>,
        color: RGBColor,
        width: u32,
        dashed: bool,
        label: Option<String>
    },
    HLine {
        y: f64,
        color: RGBColor,
        dashed: bool,
        label: Option<String>
    },
    VLine {
        x: f64,
        color: RGBColor,
        dashed: bool,
        label: Option<String>
    },
    /// fill_between(x, y, baseline)
    Area {
        points: Vec<(f64, f64)>,
        baseline: f64,
        color: RGBColor
    },
    /// 兩條曲線之間的填色區域
    Band {
        lower: Vec<(f64, f64)>,
        upper: Vec<(f64, f64)>,
        color: RGBColor,
        label: Option<String>
    },
    /// 垂直色帶 [from, to]
    Span {
        from: f64,
        to: f64,
        color: RGBColor
    },
    Marker {
        at: (f64, f64),
        shape: MarkerShape,
        color: RGBColor,
        size: u32,
        label: Option<String>
    },
    Scatter {
        points: Vec<(f64, f64)>,
        colors: Vec<RGBColor>,
        size: u32,
        label: Option<String>
    },
    /// 第 i 根長條置於 x = i
    Bars {
        heights: Vec<f64>,
        colors: Vec<RGBColor>,
        label: Option<String>
    },
    Text {
        at: (f64, f64),
        text: String,
        color: RGBColor,
        size: f64
    }
}

impl Layer {
    pub fn line(points: Vec<(f64, f64)>, color: RGBColor) -> Layer {
        Layer::Line { points, color, width: 2, dashed: false, label: None }
    }

    pub fn curve(samples: &Samples, color: RGBColor) -> Layer {
        Layer::line(samples.pairs(), color)
    }

    pub fn dashed(points: Vec<(f64, f64)>, color: RGBColor) -> Layer {
        Layer::Line { points, color, width: 2, dashed: true, label: None }
    }

    pub fn hline(y: f64, color: RGBColor) -> Layer {
        Layer::HLine { y, color, dashed: true, label: None }
    }

    pub fn axis_hline(y: f64) -> Layer {
        Layer::HLine { y, color: palette::BLACK, dashed: false, label: None }
    }

    pub fn vline(x: f64, color: RGBColor) -> Layer {
        Layer::VLine { x, color, dashed: true, label: None }
    }

    pub fn axis_vline(x: f64) -> Layer {
        Layer::VLine { x, color: palette::BLACK, dashed: false, label: None }
    }

    pub fn area(samples: &Samples, color: RGBColor) -> Layer {
        Layer::Area { points: samples.pairs(), baseline: 0.0, color }
    }

    pub fn band(lower: Vec<(f64, f64)>, upper: Vec<(f64, f64)>, color: RGBColor) -> Layer {
        Layer::Band { lower, upper, color, label: None }
    }

    pub fn span(from: f64, to: f64, color: RGBColor) -> Layer {
        Layer::Span { from, to, color }
    }

    pub fn marker(at: (f64, f64), shape: MarkerShape, color: RGBColor) -> Layer {
        Layer::Marker { at, shape, color, size: 6, label: None }
    }

    pub fn scatter(points: Vec<(f64, f64)>, colors: Vec<RGBColor>) -> Layer {
        Layer::Scatter { points, colors, size: 3, label: None }
    }

    pub fn bars(heights: Vec<f64>, colors: Vec<RGBColor>) -> Layer {
        Layer::Bars { heights, colors, label: None }
    }

    pub fn text(at: (f64, f64), text: impl Into<String>) -> Layer {
        Layer::Text { at, text: text.into(), color: palette::BLACK, size: 14.0 }
    }

    pub fn with_label(mut self, text: impl Into<String>) -> Layer {
        match &mut self {
            Layer::Line { label, .. }
            | Layer::HLine { label, .. }
            | Layer::VLine { label, .. }
            | Layer::Band { label, .. }
            | Layer::Marker { label, .. }
            | Layer::Scatter { label, .. }
            | Layer::Bars { label, .. } => *label = Some(text.into()),
            Layer::Area { .. } | Layer::Span { .. } | Layer::Text { .. } => {}
        }
        self
    }

    pub fn with_color(mut self, new_color: RGBColor) -> Layer {
        match &mut self {
            Layer::Line { color, .. }
            | Layer::HLine { color, .. }
            | Layer::VLine { color, .. }
            | Layer::Area { color, .. }
            | Layer::Band { color, .. }
            | Layer::Span { color, .. }
            | Layer::Marker { color, .. }
            | Layer::Text { color, .. } => *color = new_color,
            Layer::Scatter { colors, .. } | Layer::Bars { colors, .. } => {
                colors.iter_mut().for_each(|c| *c = new_color)
            }
        }
        self
    }

    /// 線寬或標記大小。
    pub fn with_size(mut self, new_size: u32) -> Layer {
        match &mut self {
            Layer::Line { width, .. } => *width = new_size,
            Layer::Marker { size, .. } | Layer::Scatter { size, .. } => *size = new_size,
            Layer::Text { size, .. } => *size = new_size as f64,
            _ => {}
        }
        self
    }

    /// 套用 `f` 到所有 y 座標；長條高度與面積基準線一併換算。
    pub fn map_y(&self, f: impl Fn(f64) -> f64) -> Layer {
        let map_points = |points: &[(f64, f64)]| points.iter().map(|&(x, y)| (x, f(y))).collect::<Vec<_>>();
        let mut mapped = self.clone();
        match &mut mapped {
            Layer::Line { points, .. } | Layer::Scatter { points, .. } => *points = map_points(points.as_slice()),
            Layer::HLine { y, .. } => *y = f(*y),
            Layer::Area { points, baseline, .. } => {
                *points = map_points(points.as_slice());
                *baseline = f(*baseline);
            }
            Layer::Band { lower, upper, .. } => {
                *lower = map_points(lower.as_slice());
                *upper = map_points(upper.as_slice());
            }
            Layer::Marker { at, .. } | Layer::Text { at, .. } => at.1 = f(at.1),
            Layer::Bars { heights, .. } => heights.iter_mut().for_each(|h| *h = f(*h)),
            Layer::VLine { .. } | Layer::Span { .. } => {}
        }
        mapped
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Layer::Line { label, .. }
            | Layer::HLine { label, .. }
            | Layer::VLine { label, .. }
            | Layer::Band { label, .. }
            | Layer::Marker { label, .. }
            | Layer::Scatter { label, .. }
            | Layer::Bars { label, .. } => label.as_deref(),
            Layer::Area { .. } | Layer::Span { .. } | Layer::Text { .. } => None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    title: String,
    x_label: String,
    y_label: String,
    x_range: Range<f64>,
    y_range: Range<f64>,
    categories: Option<Vec<String>>,
    log_y: bool,
    layers: Vec<Layer>
}

impl Panel {
    pub fn new(title: impl Into<String>, x_range: Range<f64>, y_range: Range<f64>) -> Panel {
        Panel {
            title: title.into(),
            x_label: "x".to_owned(),
            y_label: "y".to_owned(),
            x_range,
            y_range,
            categories: None,
            log_y: false,
            layers: Vec::new()
        }
    }

    /// 長條圖面板：x 軸刻度為類別名稱。
    pub fn categorical(title: impl Into<String>, categories: Vec<String>, y_range: Range<f64>) -> Panel {
        let count = categories.len().max(1) as f64;
        let mut panel = Panel::new(title, -0.5..count - 0.5, y_range);
        panel.categories = Some(categories);
        panel
    }

    pub fn axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Panel {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// y 軸改用對數刻度；`y_range` 仍以原始數值表示且必須為正。
    pub fn log_scale_y(mut self) -> Panel {
        self.log_y = true;
        self
    }

    pub fn layer(mut self, layer: Layer) -> Panel {
        self.layers.push(layer);
        self
    }

    pub fn layers_from(mut self, layers: impl IntoIterator<Item = Layer>) -> Panel {
        self.layers.extend(layers);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn x_range(&self) -> &Range<f64> {
        &self.x_range
    }

    pub fn y_range(&self) -> &Range<f64> {
        &self.y_range
    }

    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }

    pub fn log_y(&self) -> bool {
        self.log_y
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// 以 log10(y) 為座標的線性面板，供對數軸繪製使用。
    /// 非正值變成 NaN 或 -inf，繪製時會被略過或夾到下緣。
    pub fn log10_coordinates(&self) -> Panel {
        Panel {
            y_range: self.y_range.start.log10()..self.y_range.end.log10(),
            log_y: false,
            layers: self.layers.iter().map(|layer| layer.map_y(f64::log10)).collect(),
            ..self.clone()
        }
    }

    pub fn has_legend(&self) -> bool {
        self.layers.iter().any(|layer| layer.label().is_some())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Figure
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    file_name: String,
    title: Option<String>,
    rows: usize,
    cols: usize,
    panels: Vec<Panel>
}

impl Figure {
    pub fn new(file_name: impl Into<String>, rows: usize, cols: usize) -> Figure {
        Figure {
            file_name: file_name.into(),
            title: None,
            rows,
            cols,
            panels: Vec::new()
        }
    }

    pub fn single(file_name: impl Into<String>, panel: Panel) -> Figure {
        Figure::new(file_name, 1, 1).panel(panel)
    }

    pub fn titled(mut self, title: impl Into<String>) -> Figure {
        self.title = Some(title.into());
        self
    }

    pub fn panel(mut self, panel: Panel) -> Figure {
        self.panels.push(panel);
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 幾何輔助函數
// ─────────────────────────────────────────────────────────────────────────────

/// 資料範圍外加 `padding` 比例的留白；全為非有限值時回傳 `fallback`。
pub fn fit_range(values: impl IntoIterator<Item = f64>, padding: f64, fallback: Range<f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !min.is_finite() || !max.is_finite() {
        return fallback;
    }
    let span = if max > min { max - min } else { 1.0 };
    (min - span * padding)..(max + span * padding)
}

/// 對數軸用的範圍：只看正的有限值，上下各乘除 `1 + padding`。
pub fn fit_log_range(values: impl IntoIterator<Item = f64>, padding: f64, fallback: Range<f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !min.is_finite() || !max.is_finite() {
        return fallback;
    }
    let factor = if max > min { 1.0 + padding } else { 2.0 };
    (min / factor)..(max * factor)
}

/// 把折線切成若干段，每段的 y 都落在 `y_range` 內且為有限值。
pub fn split_in_range(points: &[(f64, f64)], y_range: &Range<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for &(x, y) in points {
        if y.is_finite() && y >= y_range.start && y <= y_range.end {
            current.push((x, y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// 虛線：將折線等分為 `pieces` 小段，只保留偶數段。
pub fn dashed_segments(points: &[(f64, f64)], pieces: usize) -> Vec<[(f64, f64); 2]> {
    if points.len() < 2 {
        return Vec::new();
    }
    let segments = points.len() - 1;
    let per_segment = pieces.div_ceil(segments).max(1);
    let mut dashes = Vec::new();
    let mut counter = 0usize;
    for window in points.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        for k in 0..per_segment {
            if counter % 2 == 0 {
                let t0 = k as f64 / per_segment as f64;
                let t1 = (k + 1) as f64 / per_segment as f64;
                dashes.push([
                    (x0 + (x1 - x0) * t0, y0 + (y1 - y0) * t0),
                    (x0 + (x1 - x0) * t1, y0 + (y1 - y0) * t1)
                ]);
            }
            counter += 1;
        }
    }
    dashes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_in_range_breaks_at_out_of_range_points() {
        let points = vec![(0.0, 0.0), (1.0, 5.0), (2.0, 0.5), (3.0, f64::NAN), (4.0, 0.2), (5.0, 0.3)];
        let runs = split_in_range(&points, &(-1.0..1.0));
        assert_eq!(runs, vec![vec![(0.0, 0.0)], vec![(2.0, 0.5)], vec![(4.0, 0.2), (5.0, 0.3)]]);
    }

    #[test]
    fn dashed_segments_keep_every_other_piece() {
        let dashes = dashed_segments(&[(0.0, 0.0), (1.0, 0.0)], 10);
        assert_eq!(dashes.len(), 5);
        assert_eq!(dashes[0], [(0.0, 0.0), (0.1, 0.0)]);
        assert!(dashed_segments(&[(0.0, 0.0)], 10).is_empty());
    }

    #[test]
    fn fit_range_pads_and_falls_back() {
        let range = fit_range([0.0, 1.0, f64::NAN], 0.1, 0.0..1.0);
        assert!((range.start + 0.1).abs() < 1e-12);
        assert!((range.end - 1.1).abs() < 1e-12);
        assert_eq!(fit_range([f64::NAN], 0.1, -2.0..2.0), -2.0..2.0);
    }

    #[test]
    fn fit_log_range_ignores_non_positive_values() {
        let range = fit_log_range([0.0, -1.0, 2.0, 8.0, f64::NAN], 0.25, 1.0..10.0);
        assert!((range.start - 1.6).abs() < 1e-12);
        assert!((range.end - 10.0).abs() < 1e-12);
        assert_eq!(fit_log_range([3.0], 0.25, 1.0..10.0), 1.5..6.0);
        assert_eq!(fit_log_range([0.0], 0.25, 1.0..10.0), 1.0..10.0);
    }

    #[test]
    fn labels_only_attach_to_labelable_layers() {
        let line = Layer::line(vec![(0.0, 0.0)], palette::BLUE).with_label("f(x)");
        assert_eq!(line.label(), Some("f(x)"));
        let span = Layer::span(0.0, 1.0, palette::RED).with_label("ignored");
        assert_eq!(span.label(), None);
    }

    #[test]
    fn log10_coordinates_map_every_y_value() {
        let panel = Panel::new("loss", 0.0..2.0, 1.0..1000.0)
            .log_scale_y()
            .layer(Layer::line(vec![(0.0, 10.0), (1.0, 100.0), (2.0, 0.0)], palette::BLUE))
            .layer(Layer::hline(100.0, palette::RED))
            .layer(Layer::vline(1.0, palette::GRAY));
        assert!(panel.log_y());

        let mapped = panel.log10_coordinates();
        assert!(!mapped.log_y());
        assert!(mapped.y_range().start.abs() < 1e-12);
        assert!((mapped.y_range().end - 3.0).abs() < 1e-12);
        assert_eq!(mapped.x_range(), panel.x_range());
        match &mapped.layers()[0] {
            Layer::Line { points, .. } => {
                assert!((points[0].1 - 1.0).abs() < 1e-12);
                assert!((points[1].1 - 2.0).abs() < 1e-12);
                assert_eq!(points[2].1, f64::NEG_INFINITY);
            }
            other => panic!("unexpected layer {:?}", other)
        }
        assert!(matches!(mapped.layers()[1], Layer::HLine { y, .. } if (y - 2.0).abs() < 1e-12));
        assert_eq!(mapped.layers()[2], panel.layers()[2]);
    }

    #[test]
    fn categorical_panel_centers_bars_on_integers() {
        let panel = Panel::categorical("bars", vec!["a".into(), "b".into(), "c".into()], 0.0..1.0);
        assert_eq!(panel.x_range(), &(-0.5..2.5));
        assert_eq!(panel.categories().map(|c| c.len()), Some(3));
    }
}
