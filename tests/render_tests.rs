//! Writing charts to disk. Rasterizing needs a system font, so a drawing
//! failure is accepted as long as it is reported as `ChartError::Drawing`.

use std::path::Path;

use tempfile::NamedTempFile;

use mathforml::chart::charterror::ChartError;
use mathforml::chart::figure::{
    Figure,
    Layer,
    MarkerShape,
    Panel,
    palette
};
use mathforml::chart::renderer::{
    ChartStyle,
    render
};
use mathforml::configuration::Configuration;
use mathforml::demo::demo::{
    Demo,
    DemoError,
    RunContext
};

fn every_layer_kind() -> Figure {
    let line: Vec<(f64, f64)> = (0..20).map(|i| (i as f64 / 19.0, 1.0 + i as f64)).collect();
    let linear = Panel::new("all layers", 0.0..1.0, 0.0..25.0)
        .axes("x", "y")
        .layer(Layer::line(line.clone(), palette::BLUE).with_label("line"))
        .layer(Layer::dashed(line.clone(), palette::RED))
        .layer(Layer::hline(5.0, palette::GRAY).with_label("level"))
        .layer(Layer::vline(0.5, palette::GRAY))
        .layer(Layer::Area { points: line.clone(), baseline: 0.0, color: palette::SKY_BLUE })
        .layer(Layer::band(vec![(0.0, 1.0), (1.0, 2.0)], vec![(0.0, 3.0), (1.0, 4.0)], palette::GREEN).with_label("band"))
        .layer(Layer::span(0.8, 0.9, palette::ORANGE))
        .layer(Layer::marker((0.5, 10.0), MarkerShape::Circle, palette::RED).with_label("peak"))
        .layer(Layer::marker((0.6, 10.0), MarkerShape::Square, palette::RED))
        .layer(Layer::marker((0.7, 10.0), MarkerShape::Triangle, palette::RED))
        .layer(Layer::marker((0.8, 10.0), MarkerShape::Cross, palette::RED))
        .layer(Layer::scatter(line.clone(), palette::gradient(palette::NAVY, palette::YELLOW, line.len())))
        .layer(Layer::text((0.1, 20.0), "two\nlines"));
    let bars = Panel::categorical("bars", vec!["a".into(), "b".into()], 0.0..2.0)
        .layer(Layer::bars(vec![0.5, 1.5], vec![palette::ORANGE, palette::DARK_RED]).with_label("terms"));
    let log = Panel::new("log", 0.0..1.0, 0.5..50.0)
        .log_scale_y()
        .layer(Layer::line(line, palette::BLUE));

    Figure::new("layers.png", 2, 2).titled("Layers").panel(linear).panel(bars).panel(log)
}

fn assert_written_or_drawing_error(result: Result<std::path::PathBuf, ChartError>, expected: &Path) {
    match result {
        Ok(path) => {
            assert_eq!(path, expected);
            assert!(path.is_file());
        }
        Err(ChartError::Drawing { path, .. }) => assert_eq!(path, expected),
        Err(other) => panic!("unexpected chart error: {}", other)
    }
}

// ============================================================================
// render
// ============================================================================

#[test]
fn test_render_draws_every_layer_kind() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("nested").join("charts");
    let result = render(&every_layer_kind(), &output_dir, &ChartStyle::new(320, 240));

    assert!(output_dir.is_dir());
    assert_written_or_drawing_error(result, &output_dir.join("layers.png"));
}

#[test]
fn test_output_directory_under_a_file_is_rejected() {
    let file = NamedTempFile::new().unwrap();
    let output_dir = file.path().join("charts");
    let error = render(&every_layer_kind(), &output_dir, &ChartStyle::default()).unwrap_err();

    match error {
        ChartError::OutputDirectory { path, .. } => assert_eq!(path, output_dir),
        other => panic!("unexpected chart error: {}", other)
    }
}

#[test]
fn test_empty_figure_is_rejected_before_drawing() {
    let dir = tempfile::tempdir().unwrap();
    let error = render(&Figure::new("empty.png", 1, 1), dir.path(), &ChartStyle::default()).unwrap_err();
    assert!(matches!(error, ChartError::EmptyFigure(name) if name == "empty.png"));
    assert!(!dir.path().join("empty.png").exists());
}

// ============================================================================
// Demos with charts
// ============================================================================

#[test]
fn test_every_demo_writes_its_chart() {
    let dir = tempfile::tempdir().unwrap();
    let configuration = Configuration::new().with_output_dir(dir.path().to_path_buf());
    let context = RunContext::new(&configuration, true);

    for demo in Demo::ALL {
        let expected = dir.path().join(demo.file_name());
        let result = match demo.run(&context) {
            Ok(output) => Ok(output.chart().map(Path::to_path_buf).unwrap()),
            Err(DemoError::Chart(error)) => Err(error),
            Err(other) => panic!("{} failed: {}", demo, other)
        };
        assert_written_or_drawing_error(result, &expected);
    }
}
