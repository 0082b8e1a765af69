use crate::array::Field;
use crate::canvas::Canvas;
use crate::colormap::{self, STEPS};
use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::function::styblinski_tang_2d;
use crate::grid::Grid;
use image::{ImageFormat, RgbImage};
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FONT: &str = "sans-serif";

/// Linear axis whose ticks sit exactly at a fixed list of values,
/// both ends of the range included.
#[derive(Clone)]
pub struct TickAxis {
    linear: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickAxis {
    pub fn new((lo, hi): (f64, f64), ticks: &[f64]) -> TickAxis {
        TickAxis {
            linear: (lo..hi).into(),
            ticks: ticks.iter().copied().filter(|t| (lo..=hi).contains(t)).collect(),
        }
    }
}

impl Ranged for TickAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.linear.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        // ticks are bold points only, there are no light mesh lines
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.linear.range()
    }
}

impl ValueFormatter<f64> for TickAxis {
    fn format(value: &f64) -> String {
        format!("{}", value)
    }
}

/// A colour map of a function of two variables over a rectangular domain.
pub struct Figure {
    config: PlotConfig,
    grid: Grid,
}

impl Figure {
    pub fn new(config: PlotConfig) -> Result<Figure> {
        config.validate()?;
        let grid = config.grid()?;
        Ok(Figure { config, grid })
    }

    /// Evaluate `f` on the full sampling grid.
    pub fn sample<F>(&self, f: F) -> Field
    where
        F: Fn(f64, f64) -> f64,
    {
        debug!(
            samples_x = self.grid.x.samples,
            samples_y = self.grid.y.samples,
            "sampling grid"
        );
        self.grid.evaluate(f)
    }

    /// Lay out the chart on `root` and draw its axes: ticks at the
    /// configured positions, axis descriptions, no mesh and no legend.
    fn layout<'a, 'b>(
        &self,
        root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    ) -> Result<ChartContext<'a, BitMapBackend<'b>, Cartesian2d<TickAxis, TickAxis>>> {
        let config = &self.config;
        let tick_size = f64::from(config.tick_font_size);
        let label_size = f64::from(config.label_font_size);
        let label_area = (tick_size + label_size) as u32 + 20;

        let mut chart = ChartBuilder::on(root)
            .margin(15)
            .x_label_area_size(label_area)
            .y_label_area_size(label_area)
            .build_cartesian_2d(
                TickAxis::new(config.x_range, &config.ticks),
                TickAxis::new(config.y_range, &config.ticks),
            )
            .map_err(Error::backend)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .label_style((FONT, tick_size))
            .axis_desc_style((FONT, label_size))
            .draw()
            .map_err(Error::backend)?;
        Ok(chart)
    }

    /// Pixel columns and rows of the plot area on the configured canvas.
    pub fn plot_area(&self) -> Result<(Range<i32>, Range<i32>)> {
        let (width, height) = self.config.size;
        let mut buf = vec![0u8; width as usize * height as usize * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        let chart = self.layout(&root)?;
        let range = chart.plotting_area().get_pixel_range();
        Ok(range)
    }

    /// Draw a sampled field into an in-memory RGB canvas.
    ///
    /// The colour range spans the field's own minimum and maximum. The
    /// field is box filtered down to the plot area so every pixel is the
    /// mean of the samples it covers.
    pub fn draw(&self, field: &Field) -> Result<RgbImage> {
        let config = &self.config;
        let (width, height) = config.size;
        let range = field
            .value_range()
            .ok_or_else(|| Error::Backend("field has no finite values to colour".to_string()))?;
        let table = config.palette.table(STEPS);
        debug!(min = range.0, max = range.1, palette = ?config.palette, "colour range");

        let mut buf = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(Error::backend)?;
            let chart = self.layout(&root)?;

            let area = chart.plotting_area().strip_coord_spec();
            let (pw, ph) = area.dim_in_pixel();
            debug!(width = pw, height = ph, "plot area");

            let heat = colormap::map(&field.resample(pw as usize, ph as usize), &table, range);
            for (x, y, p) in heat.enumerate_pixels() {
                area.draw_pixel((x as i32, y as i32), &RGBColor(p[0], p[1], p[2]))
                    .map_err(Error::backend)?;
            }
            area.draw(&Rectangle::new(
                [(0, 0), (pw as i32 - 1, ph as i32 - 1)],
                BLACK.stroke_width(1),
            ))
            .map_err(Error::backend)?;

            root.present().map_err(Error::backend)?;
        }

        RgbImage::from_raw(width, height, buf)
            .ok_or_else(|| Error::Backend("canvas buffer does not match its size".to_string()))
    }

    /// Sample `f` and draw it.
    pub fn render<F>(&self, f: F) -> Result<RgbImage>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.draw(&self.sample(f))
    }

    /// Encode `img` as PNG at the configured output path, replacing any
    /// existing file.
    pub fn save(&self, img: &RgbImage) -> Result<PathBuf> {
        save_png(img, &self.config.output)?;
        Ok(self.config.output.clone())
    }

    pub fn plot<F>(&self, f: F) -> Result<PathBuf>
    where
        F: Fn(f64, f64) -> f64,
    {
        let img = self.render(f)?;
        let path = self.save(&img)?;
        info!(path = %path.display(), "map written");
        Ok(path)
    }
}

pub fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Render the Styblinski–Tang map described by `config`.
pub fn render_map(config: PlotConfig) -> Result<PathBuf> {
    let figure = Figure::new(config)?;
    figure.plot(styblinski_tang_2d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_rejects_invalid_config() {
        let config = PlotConfig { samples: 0, ..PlotConfig::default() };
        assert!(matches!(Figure::new(config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_draw_rejects_empty_field() {
        let figure = Figure::new(PlotConfig { samples: 8, ..PlotConfig::default() }).unwrap();
        let field = Field::from_fn(8, 8, |_, _| f64::NAN);
        assert!(matches!(figure.draw(&field), Err(Error::Backend(_))));
    }

    #[test]
    fn test_sample_stays_in_domain() {
        let figure = Figure::new(PlotConfig { samples: 101, ..PlotConfig::default() }).unwrap();
        let field = figure.sample(|x, y| {
            assert!((-5.0..=5.0).contains(&x));
            assert!((-5.0..=5.0).contains(&y));
            x + y
        });
        assert_eq!(field[(0, 0)], -10.0);
        assert_eq!(field[(100, 100)], 10.0);
    }
}
