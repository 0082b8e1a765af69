use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use styb_tang_map::colormap::{self, Palette, STEPS};
use styb_tang_map::function::styblinski_tang_2d;
use styb_tang_map::plot::{render_map, Figure};
use styb_tang_map::{Canvas, Error, PlotConfig};

fn out_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("styb-tang-map-tests");
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn config(name: &str, samples: usize) -> PlotConfig {
    PlotConfig {
        samples,
        output: out_path(name),
        ..PlotConfig::default()
    }
}

#[test]
fn test_render_default_map() {
    let path = render_map(config("default.png", 2000)).unwrap();
    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (640, 480));

    // margins stay white, the plot area is a smooth colour field
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(639, 479).0, [255, 255, 255]);
    let colours: HashSet<[u8; 3]> = img.pixels().map(|p| p.0).collect();
    assert!(colours.len() > 200, "only {} colours", colours.len());
}

#[test]
fn test_axes_have_ticks_and_no_legend() {
    let figure = Figure::new(config("axes.png", 50)).unwrap();
    let img = figure.render(styblinski_tang_2d).unwrap();
    let (xs, ys) = figure.plot_area().unwrap();
    let (width, _) = img.dimensions();
    let white = |x: i32, y: i32| img.get_pixel(x as u32, y as u32).0 == [255, 255, 255];
    let inked = |cols: std::ops::RangeInclusive<i32>, rows: std::ops::RangeInclusive<i32>| {
        cols.flat_map(|x| rows.clone().map(move |y| (x, y)))
            .any(|(x, y)| !white(x, y))
    };

    // -5..5 spans the plot area, x grows rightwards and y upwards
    let col = |v: f64| xs.start + ((v + 5.0) / 10.0 * f64::from(xs.end - xs.start - 1)).round() as i32;
    let row = |v: f64| ys.start + ((5.0 - v) / 10.0 * f64::from(ys.end - ys.start - 1)).round() as i32;

    // tick marks stick out below the bottom axis and left of the left axis
    let below = ys.end + 3;
    let left = xs.start - 4;
    for v in [-5.0, 0.0, 5.0] {
        assert!(inked(col(v) - 2..=col(v) + 2, below..=below), "no x tick at {}", v);
        assert!(inked(left..=left, row(v) - 2..=row(v) + 2), "no y tick at {}", v);
    }
    for v in [-2.5, 2.5] {
        assert!(!inked(col(v) - 2..=col(v) + 2, below..=below), "stray x tick at {}", v);
        assert!(!inked(left..=left, row(v) - 2..=row(v) + 2), "stray y tick at {}", v);
    }

    // nothing right of the plot area: no colour box, no legend
    assert!(!inked(xs.end + 1..=width as i32 - 1, ys.start..=ys.end - 1));
}

#[test]
fn test_render_is_deterministic() {
    let a = render_map(config("repeat-a.png", 300)).unwrap();
    let b = render_map(config("repeat-b.png", 300)).unwrap();
    assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
}

#[test]
fn test_render_overwrites_existing_file() {
    let path = out_path("overwrite.png");
    fs::write(&path, b"not a png").unwrap();
    render_map(config("overwrite.png", 100)).unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (640, 480));
}

#[test]
fn test_unwritable_output_fails() {
    let output = out_path("missing-dir").join("nested").join("map.png");
    let config = PlotConfig { samples: 50, output, ..PlotConfig::default() };
    match render_map(config) {
        Err(Error::Write { path, .. }) => assert!(path.ends_with("map.png")),
        other => panic!("expected a write error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_palettes_differ() {
    let pm3d = Figure::new(config("pm3d.png", 200)).unwrap();
    let heat = Figure::new(PlotConfig { palette: Palette::Heat, ..config("heat.png", 200) }).unwrap();
    let a = pm3d.render(styblinski_tang_2d).unwrap();
    let b = heat.render(styblinski_tang_2d).unwrap();
    assert_eq!(a.dimensions(), b.dimensions());
    assert_ne!(a.as_raw(), b.as_raw());
}

#[test]
fn test_minimum_is_darkest() {
    // pm3d maps the lowest value to black and the global minimum sits at
    // (-2.9, -2.9), so the darkest cell is in the lower left quadrant
    let figure = Figure::new(config("dark.png", 400)).unwrap();
    let field = figure.sample(styblinski_tang_2d);
    let range = field.value_range().unwrap();
    let img = colormap::map(&field.resample(200, 200), &Palette::Pm3d.table(STEPS), range);
    let darkest = img
        .enumerate_pixels()
        .min_by_key(|(_, _, p)| p.0.iter().map(|&c| c as u32).sum::<u32>())
        .map(|(x, y, _)| (x, y))
        .unwrap();
    assert!(darkest.0 < 100 && darkest.1 > 100, "darkest cell at {:?}", darkest);
    assert!((38..=46).contains(&darkest.0) && (154..=162).contains(&darkest.1));
}
