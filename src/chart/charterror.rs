use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("figure '{0}' has no panels")]
    EmptyFigure(String),

    #[error("figure '{file_name}' has {panels} panels but only a {rows}x{cols} layout")]
    LayoutOverflow {
        file_name: String,
        panels: usize,
        rows: usize,
        cols: usize
    },

    #[error("figure '{file_name}' is too large: {rows}x{cols} panels of {panel_width}x{panel_height} pixels")]
    ImageTooLarge {
        file_name: String,
        rows: usize,
        cols: usize,
        panel_width: u32,
        panel_height: u32
    },

    #[error("log-scale panel '{panel}' needs a positive y range, got {start}..{end}")]
    NonPositiveLogRange {
        panel: String,
        start: f64,
        end: f64
    },

    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[error("failed to draw {}: {message}", path.display())]
    Drawing {
        path: PathBuf,
        message: String
    }
}
