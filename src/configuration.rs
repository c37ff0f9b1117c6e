use std::fs::File;
use std::io::BufReader;
use std::path::{
    Path,
    PathBuf
};

use serde::Deserialize;
use thiserror::Error;

use crate::chart::renderer::ChartStyle;
use crate::optimize::fixedstepdescent::DescentSettings;

/// 單一子圖邊長上限（像素）。
pub const MAX_PANEL_SIZE: u32 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read configuration {}: {source}", path.display())]
    IOError {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[error("invalid configuration {}: {source}", path.display())]
    JsonParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error
    },

    #[error("panel size must be within 1..={max} pixels, got {0}x{1}", max = MAX_PANEL_SIZE)]
    InvalidPanelSize(u32, u32)
}

/// 所有欄位皆可省略，缺漏者使用預設值。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    output_dir: PathBuf,
    panel_width: u32,
    panel_height: u32,
    gradient_descent: DescentSettings
}

impl Default for Configuration {
    fn default() -> Self {
        let style = ChartStyle::default();
        Configuration {
            output_dir: PathBuf::from("."),
            panel_width: style.panel_width(),
            panel_height: style.panel_height(),
            gradient_descent: DescentSettings::default()
        }
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn from_reader(file_path: &Path) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path).map_err(|source| ConfigurationError::IOError {
            path: file_path.to_path_buf(),
            source
        })?;
        let reader = BufReader::new(file);
        let configuration: Configuration =
            serde_json::from_reader(reader).map_err(|source| ConfigurationError::JsonParseError {
                path: file_path.to_path_buf(),
                source
            })?;
        configuration.validate()?;
        Ok(configuration)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        let valid = 1..=MAX_PANEL_SIZE;
        if !valid.contains(&self.panel_width) || !valid.contains(&self.panel_height) {
            return Err(ConfigurationError::InvalidPanelSize(self.panel_width, self.panel_height));
        }
        Ok(())
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Configuration {
        self.output_dir = output_dir;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn gradient_descent(&self) -> &DescentSettings {
        &self.gradient_descent
    }

    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle::new(self.panel_width, self.panel_height)
    }
}
