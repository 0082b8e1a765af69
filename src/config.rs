use crate::colormap::Palette;
use crate::error::{Error, Result};
use crate::grid::{Axis, Grid};
use std::path::PathBuf;

pub const OUTPUT_FILE: &str = "styb-tang-map.png";

/// Everything that determines the rendered map. The defaults reproduce
/// the reference plot: `[-5, 5]²`, 2000 isosamples per axis, a 640x480
/// canvas and gnuplot's default pm3d palette.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// isosamples per axis
    pub samples: usize,
    /// canvas size in pixels
    pub size: (u32, u32),
    pub output: PathBuf,
    pub x_label: String,
    pub y_label: String,
    pub ticks: Vec<f64>,
    pub tick_font_size: u32,
    pub label_font_size: u32,
    pub palette: Palette,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            x_range: (-5.0, 5.0),
            y_range: (-5.0, 5.0),
            samples: 2000,
            size: (640, 480),
            output: PathBuf::from(OUTPUT_FILE),
            x_label: "x_1".to_string(),
            y_label: "x_2".to_string(),
            ticks: vec![-5.0, 0.0, 5.0],
            tick_font_size: 14,
            label_font_size: 16,
            palette: Palette::default(),
        }
    }
}

impl PlotConfig {
    /// The sampling grid, checking the ranges and sample count.
    pub fn grid(&self) -> Result<Grid> {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        Ok(Grid::new(
            Axis::new(x0..=x1, self.samples)?,
            Axis::new(y0..=y1, self.samples)?,
        ))
    }

    pub fn validate(&self) -> Result<()> {
        self.grid()?;
        let (width, height) = self.size;
        if width < 64 || height < 64 {
            return Err(Error::InvalidConfig(format!(
                "canvas {width}x{height} is too small to hold the axes"
            )));
        }
        if self.tick_font_size == 0 || self.label_font_size == 0 {
            return Err(Error::InvalidConfig("font sizes must be positive".to_string()));
        }
        Ok(())
    }
}
