use crate::canvas::{Canvas, Data, Meta};
use crate::error::{Error, Result};
use image::{Rgb, RgbImage};
use num::ToPrimitive;
use palette::{FromColor, Gradient, LabHue, Lch, Srgb};
use std::f64::consts::PI;

/// Number of entries in a sampled colour lookup table.
pub const STEPS: usize = 1024;

pub trait ColorMap {
    /// Colour for a value normalised to `[0, 1]`.
    fn color(&self, v: f64) -> Rgb<u8>;

    fn build(&self, steps: usize) -> Vec<Rgb<u8>> {
        let k = (steps.max(2) - 1) as f64;
        (0..steps).map(|i| self.color(i as f64 / k)).collect()
    }
}

/// gnuplot style `rgbformulae r, g, b`.
///
/// Each channel is one of gnuplot's 37 formulae, numbered 0 to 36. A
/// negative number applies the formula to `1 - v`. Results are clipped to
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbFormulae {
    r: i8,
    g: i8,
    b: i8,
}

impl RgbFormulae {
    /// gnuplot's default pm3d palette.
    pub const PM3D: RgbFormulae = RgbFormulae { r: 7, g: 5, b: 15 };

    pub fn new(r: i8, g: i8, b: i8) -> Result<RgbFormulae> {
        for n in [r, g, b] {
            if n.unsigned_abs() > 36 {
                return Err(Error::InvalidConfig(format!(
                    "rgbformulae takes numbers from -36 to 36, got {}",
                    n
                )));
            }
        }
        Ok(RgbFormulae { r, g, b })
    }

    pub fn formulae(&self) -> (i8, i8, i8) {
        (self.r, self.g, self.b)
    }

    fn eval(formula: i8, v: f64) -> f64 {
        let x = if formula < 0 { 1.0 - v } else { v };
        let deg = PI / 180.0;
        let y = match formula.unsigned_abs() {
            0 => 0.0,
            1 => 0.5,
            2 => 1.0,
            3 => x,
            4 => x * x,
            5 => x * x * x,
            6 => x * x * x * x,
            7 => x.sqrt(),
            8 => x.sqrt().sqrt(),
            9 => (90.0 * x * deg).sin(),
            10 => (90.0 * x * deg).cos(),
            11 => (x - 0.5).abs(),
            12 => (2.0 * x - 1.0) * (2.0 * x - 1.0),
            13 => (180.0 * x * deg).sin(),
            14 => (180.0 * x * deg).cos().abs(),
            15 => (360.0 * x * deg).sin(),
            16 => (360.0 * x * deg).cos(),
            17 => (360.0 * x * deg).sin().abs(),
            18 => (360.0 * x * deg).cos().abs(),
            19 => (720.0 * x * deg).sin().abs(),
            20 => (720.0 * x * deg).cos().abs(),
            21 => 3.0 * x,
            22 => 3.0 * x - 1.0,
            23 => 3.0 * x - 2.0,
            24 => (3.0 * x - 1.0).abs(),
            25 => (3.0 * x - 2.0).abs(),
            26 => (3.0 * x - 1.0) / 2.0,
            27 => (3.0 * x - 2.0) / 2.0,
            28 => ((3.0 * x - 1.0) / 2.0).abs(),
            29 => ((3.0 * x - 2.0) / 2.0).abs(),
            30 => x / 0.32 - 0.78125,
            31 => 2.0 * x - 0.84,
            32 => {
                if x < 0.25 {
                    4.0 * x
                } else if x < 0.42 {
                    1.0
                } else if x < 0.92 {
                    -2.0 * x + 1.84
                } else {
                    x / 0.08 - 11.5
                }
            }
            33 => (2.0 * x - 0.5).abs(),
            34 => 2.0 * x,
            35 => 2.0 * x - 0.5,
            36 => 2.0 * x - 1.0,
            // unreachable through `new`
            _ => x,
        };
        y.clamp(0.0, 1.0)
    }
}

#[inline]
fn to_u8(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl ColorMap for RgbFormulae {
    fn color(&self, v: f64) -> Rgb<u8> {
        let v = v.clamp(0.0, 1.0);
        Rgb([
            to_u8(Self::eval(self.r, v)),
            to_u8(Self::eval(self.g, v)),
            to_u8(Self::eval(self.b, v)),
        ])
    }
}

lazy_static! {
    pub static ref MAP_HEAT: [(f32, Lch); 5] = [
        (0.0, Lch::new(0.0, 0.0, LabHue::from_degrees(300.0))),
        (0.3, Lch::new(25.0, 70.0, LabHue::from_degrees(300.0))),
        (0.6, Lch::new(50.0, 90.0, LabHue::from_degrees(30.0))),
        (0.8, Lch::new(75.0, 80.0, LabHue::from_degrees(70.0))),
        (1.0, Lch::new(100.0, 0.0, LabHue::from_degrees(90.0)))
    ];
}

/// Piecewise gradient through LCh stops, interpolated in LCh.
pub struct GradientMap(Gradient<Lch>);

impl GradientMap {
    pub fn new(stops: &[(f32, Lch)]) -> GradientMap {
        GradientMap(Gradient::with_domain(stops.to_vec()))
    }
}

impl ColorMap for GradientMap {
    fn color(&self, v: f64) -> Rgb<u8> {
        let lch = self.0.get(v.clamp(0.0, 1.0) as f32);
        let (r, g, b) = Srgb::from_color(lch).into_format::<u8>().into_components();
        Rgb([r, g, b])
    }
}

/// The colour maps the renderer can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// gnuplot's default pm3d palette, `rgbformulae 7,5,15`.
    #[default]
    Pm3d,
    /// Perceptual black to white heat gradient in CIE LCh.
    Heat,
}

impl Palette {
    pub fn table(self, steps: usize) -> Vec<Rgb<u8>> {
        match self {
            Palette::Pm3d => RgbFormulae::PM3D.build(steps),
            Palette::Heat => GradientMap::new(&MAP_HEAT[..]).build(steps),
        }
    }
}

/// Colour every cell of `canvas`, normalising values over `range`.
///
/// Row 0 of the canvas is drawn at the bottom of the image. Values
/// outside `range` saturate, non finite values get the lowest colour,
/// and a degenerate range maps everything to the lowest colour.
pub fn map<C: Canvas>(canvas: &C, table: &[Rgb<u8>], range: (f64, f64)) -> RgbImage
where
    <C::Data as Data>::Item: ToPrimitive,
{
    canvas.run(|meta, data| {
        let (width, height) = meta.size();
        let mut imgbuf = RgbImage::new(width as u32, height as u32);
        if table.is_empty() {
            return imgbuf;
        }
        let steps = table.len();
        let (lo, hi) = range;
        let scale = if hi > lo { (steps - 1) as f64 / (hi - lo) } else { 0.0 };

        for (x, y, p) in imgbuf.enumerate_pixels_mut() {
            let row = height - 1 - y as usize;
            let v = data
                .get(meta.index((x as usize, row)))
                .to_f64()
                .filter(|v| v.is_finite())
                .map(|v| ((v - lo) * scale).round())
                .unwrap_or(0.);
            *p = table[v.clamp(0.0, (steps - 1) as f64) as usize];
        }

        imgbuf
    })
}
