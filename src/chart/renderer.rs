use std::error::Error;
use std::fs;
use std::path::{
    Path,
    PathBuf
};

use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use tracing::{
    debug,
    info
};

use crate::chart::charterror::ChartError;
use crate::chart::figure::{
    Figure,
    Layer,
    MarkerShape,
    Panel,
    dashed_segments,
    split_in_range
};

type PanelChart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const DASH_PIECES: usize = 60;
const FONT: &str = "sans-serif";
const BAR_WIDTH: f64 = 0.7;

// ─────────────────────────────────────────────────────────────────────────────
// ChartStyle
// ─────────────────────────────────────────────────────────────────────────────

/// 每個子圖的像素大小；字型固定使用 plotters 預設的 sans-serif。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    panel_width: u32,
    panel_height: u32
}

impl ChartStyle {
    pub fn new(panel_width: u32, panel_height: u32) -> ChartStyle {
        ChartStyle {
            panel_width,
            panel_height
        }
    }

    pub fn panel_width(&self) -> u32 {
        self.panel_width
    }

    pub fn panel_height(&self) -> u32 {
        self.panel_height
    }

    pub fn font(&self) -> &'static str {
        FONT
    }

    /// 整張圖的像素大小；超出 `u32` 時回傳 `ImageTooLarge`。
    pub fn figure_size(&self, figure: &Figure) -> Result<(u32, u32), ChartError> {
        let scale = |pixels: u32, count: usize| u32::try_from(count).ok().and_then(|count| pixels.checked_mul(count));
        match (scale(self.panel_width, figure.cols()), scale(self.panel_height, figure.rows())) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(ChartError::ImageTooLarge {
                file_name: figure.file_name().to_owned(),
                rows: figure.rows(),
                cols: figure.cols(),
                panel_width: self.panel_width,
                panel_height: self.panel_height
            })
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle::new(700, 500)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// render
// ─────────────────────────────────────────────────────────────────────────────

pub fn validate(figure: &Figure) -> Result<(), ChartError> {
    if figure.panels().is_empty() {
        return Err(ChartError::EmptyFigure(figure.file_name().to_owned()));
    }
    if figure.panels().len() > figure.rows() * figure.cols() {
        return Err(ChartError::LayoutOverflow {
            file_name: figure.file_name().to_owned(),
            panels: figure.panels().len(),
            rows: figure.rows(),
            cols: figure.cols()
        });
    }
    for panel in figure.panels().iter().filter(|panel| panel.log_y()) {
        let range = panel.y_range();
        if !(range.start > 0.0 && range.end > range.start) {
            return Err(ChartError::NonPositiveLogRange {
                panel: panel.title().to_owned(),
                start: range.start,
                end: range.end
            });
        }
    }
    Ok(())
}

/// 將圖表寫入 `output_dir/<file_name>`，回傳完整路徑。
pub fn render(figure: &Figure, output_dir: &Path, style: &ChartStyle) -> Result<PathBuf, ChartError> {
    validate(figure)?;
    let size = style.figure_size(figure)?;
    fs::create_dir_all(output_dir).map_err(|source| ChartError::OutputDirectory {
        path: output_dir.to_path_buf(),
        source
    })?;

    let path = output_dir.join(figure.file_name());
    draw_figure(figure, &path, size, style).map_err(|error| ChartError::Drawing {
        path: path.clone(),
        message: error.to_string()
    })?;
    info!(path = %path.display(), "chart saved");
    Ok(path)
}

fn draw_figure(figure: &Figure, path: &Path, size: (u32, u32), style: &ChartStyle) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = match figure.title() {
        Some(title) => root.titled(title, (style.font(), 28.0).into_font())?,
        None => root
    };

    let areas = root.split_evenly((figure.rows(), figure.cols()));
    for (area, panel) in areas.iter().zip(figure.panels()) {
        debug!(panel = panel.title(), layers = panel.layers().len(), "drawing panel");
        draw_panel(area, panel, style)?;
    }
    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel,
    style: &ChartStyle
) -> Result<(), Box<dyn Error>> {
    // 對數軸：在 log10(y) 座標上畫線性圖，刻度再換回原始數值
    let log_y = panel.log_y();
    let log_panel;
    let panel = if log_y {
        log_panel = panel.log10_coordinates();
        &log_panel
    } else {
        panel
    };

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title(), (style.font(), 20.0).into_font())
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(panel.x_range().clone(), panel.y_range().clone())?;

    let categories = panel.categories().unwrap_or(&[]);
    let category_formatter = |v: &f64| {
        let nearest = v.round();
        if (v - nearest).abs() < 1e-6 && nearest >= 0.0 {
            categories.get(nearest as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };

    let log_formatter = |v: &f64| log_tick_label(*v);

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(panel.x_label())
        .y_desc(panel.y_label())
        .label_style((style.font(), 13.0).into_font())
        .light_line_style(RGBColor(235, 235, 235));
    if panel.categories().is_some() {
        mesh.x_labels(categories.len()).x_label_formatter(&category_formatter);
    }
    if log_y {
        mesh.y_label_formatter(&log_formatter);
    }
    mesh.draw()?;

    for layer in panel.layers() {
        draw_layer(&mut chart, panel, layer, style)?;
    }

    if panel.has_legend() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((style.font(), 13.0).into_font())
            .draw()?;
    }
    Ok(())
}

/// 對數軸刻度：`exponent` 為 log10(y)。
fn log_tick_label(exponent: f64) -> String {
    let value = 10f64.powf(exponent);
    if (1e-3..1e4).contains(&value) {
        format!("{:.3}", value)
    } else {
        format!("{:.1e}", value)
    }
}

fn draw_layer(
    chart: &mut PanelChart<'_, '_>,
    panel: &Panel,
    layer: &Layer,
    style: &ChartStyle
) -> Result<(), Box<dyn Error>> {
    let x_range = panel.x_range();
    let y_range = panel.y_range();
    let clamp_y = |y: f64| y.clamp(y_range.start, y_range.end);

    match layer {
        Layer::Line { points, color, width, dashed, label } => {
            draw_polyline(chart, points, *color, *width, *dashed, label.as_deref(), y_range)?;
        }
        Layer::HLine { y, color, dashed, label } => {
            if y_range.contains(y) {
                let points = [(x_range.start, *y), (x_range.end, *y)];
                draw_polyline(chart, &points, *color, 1, *dashed, label.as_deref(), y_range)?;
            }
        }
        Layer::VLine { x, color, dashed, label } => {
            if x_range.contains(x) {
                let points = [(*x, y_range.start), (*x, y_range.end)];
                draw_polyline(chart, &points, *color, 1, *dashed, label.as_deref(), y_range)?;
            }
        }
        Layer::Area { points, baseline, color } => {
            let clipped: Vec<(f64, f64)> = points
                .iter()
                .filter(|(_, y)| y.is_finite())
                .map(|&(x, y)| (x, clamp_y(y)))
                .collect();
            chart.draw_series(AreaSeries::new(clipped, clamp_y(*baseline), color.mix(0.3).filled()))?;
        }
        Layer::Band { lower, upper, color, label } => {
            let mut outline: Vec<(f64, f64)> = lower.iter().map(|&(x, y)| (x, clamp_y(y))).collect();
            outline.extend(upper.iter().rev().map(|&(x, y)| (x, clamp_y(y))));
            let fill = color.mix(0.25).filled();
            let anno = chart.draw_series(std::iter::once(Polygon::new(outline, fill)))?;
            if let Some(label) = label {
                anno.label(label.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill));
            }
        }
        Layer::Span { from, to, color } => {
            chart.draw_series(std::iter::once(Rectangle::new(
                [(*from, y_range.start), (*to, y_range.end)],
                color.mix(0.2).filled()
            )))?;
        }
        Layer::Marker { at, shape, color, size, label } => {
            let fill = color.filled();
            let anno = match shape {
                MarkerShape::Circle => chart.draw_series(std::iter::once(Circle::new(*at, *size, fill)))?,
                MarkerShape::Triangle => {
                    chart.draw_series(std::iter::once(TriangleMarker::new(*at, *size, fill)))?
                }
                MarkerShape::Cross => {
                    chart.draw_series(std::iter::once(Cross::new(*at, *size, color.stroke_width(3))))?
                }
                MarkerShape::Square => {
                    let half = *size as i32;
                    chart.draw_series(std::iter::once(
                        EmptyElement::at(*at) + Rectangle::new([(-half, -half), (half, half)], fill)
                    ))?
                }
            };
            if let Some(label) = label {
                anno.label(label.as_str())
                    .legend(move |(x, y)| Circle::new((x + 10, y), 4, fill));
            }
        }
        Layer::Scatter { points, colors, size, label } => {
            let anno = chart.draw_series(
                points
                    .iter()
                    .zip(colors.iter())
                    .filter(|((_, y), _)| y.is_finite())
                    .map(|(&at, color)| Circle::new(at, *size, color.filled()))
            )?;
            if let (Some(label), Some(first)) = (label, colors.first()) {
                let fill = first.filled();
                anno.label(label.as_str())
                    .legend(move |(x, y)| Circle::new((x + 10, y), 4, fill));
            }
        }
        // 對數面板上的長條以 y = 1 為底
        Layer::Bars { heights, colors, label } => {
            let anno = chart.draw_series(heights.iter().zip(colors.iter()).enumerate().map(|(i, (&h, color))| {
                let center = i as f64;
                Rectangle::new(
                    [(center - BAR_WIDTH / 2.0, clamp_y(0.0)), (center + BAR_WIDTH / 2.0, clamp_y(h))],
                    color.mix(0.7).filled()
                )
            }))?;
            if let (Some(label), Some(first)) = (label, colors.first()) {
                let fill = first.mix(0.7).filled();
                anno.label(label.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill));
            }
        }
        Layer::Text { at, text, color, size } => {
            let font = (style.font(), *size).into_font().color(color);
            let line_height = (*size * 1.2).round() as i32;
            chart.draw_series(text.lines().enumerate().map(|(i, line)| {
                EmptyElement::at(*at) + Text::new(line.to_owned(), (0, i as i32 * line_height), font.clone())
            }))?;
        }
    }
    Ok(())
}

fn draw_polyline(
    chart: &mut PanelChart<'_, '_>,
    points: &[(f64, f64)],
    color: RGBColor,
    width: u32,
    dashed: bool,
    label: Option<&str>,
    y_range: &std::ops::Range<f64>
) -> Result<(), Box<dyn Error>> {
    let stroke = color.stroke_width(width);
    let mut label = label;
    for run in split_in_range(points, y_range) {
        if run.len() < 2 {
            continue;
        }
        let anno = if dashed {
            chart.draw_series(
                dashed_segments(&run, DASH_PIECES)
                    .into_iter()
                    .map(|[a, b]| PathElement::new(vec![a, b], stroke))
            )?
        } else {
            chart.draw_series(LineSeries::new(run, stroke))?
        };
        if let Some(text) = label.take() {
            anno.label(text)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
        }
    }
    Ok(())
}
