//! Shared output tools for the driver binaries: directory setup, `.npz` data
//! archives, and simple SVG line and bar charts.

use std::path::Path;
use ndarray as nd;
use plotters::prelude::*;

pub use ndarray_npy;

/// Create a directory (and any missing parents).
#[macro_export]
macro_rules! mkdir {
    ( $dir:expr ) => {
        std::fs::create_dir_all(&$dir)?
    }
}

/// Write a set of named arrays to a `.npz` archive.
///
/// ```ignore
/// write_npz!(
///     outdir.join("data.npz"),
///     arrays: {
///         "x" => &x,
///         "v" => &v,
///     }
/// );
/// ```
#[macro_export]
macro_rules! write_npz {
    ( $path:expr, arrays: { $( $name:expr => $arr:expr ),* $(,)? } ) => {
        {
            let mut npz
                = $crate::ndarray_npy::NpzWriter::new(
                    std::fs::File::create($path)?);
            $( npz.add_array($name, $arr)?; )*
            npz.finish()?;
        }
    }
}

/// Line colors, cycled in order.
pub const COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Pick the `k`-th color from [`COLORS`], wrapping around.
pub fn color(k: usize) -> RGBColor { COLORS[k % COLORS.len()] }

/// Render a non-negative integer with Unicode subscript digits.
pub fn sub(n: usize) -> String {
    n.to_string().chars()
        .map(|c| match c {
            '0' => '₀', '1' => '₁', '2' => '₂', '3' => '₃', '4' => '₄',
            '5' => '₅', '6' => '₆', '7' => '₇', '8' => '₈', _ => '₉',
        })
        .collect()
}

const SIZE: (u32, u32) = (1000, 600);
const FONT: &str = "sans-serif";

/// A single curve to be drawn on a [`LineChart`].
#[derive(Clone, Debug)]
pub struct Curve {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub width: u32,
}

impl Curve {
    /// Create a new labeled curve from coordinate arrays.
    pub fn new<S, T>(
        label: &str,
        x: &nd::ArrayBase<S, nd::Ix1>,
        y: &nd::ArrayBase<T, nd::Ix1>,
        color: RGBColor,
    ) -> Self
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        let points: Vec<(f64, f64)>
            = x.iter().zip(y).map(|(xk, yk)| (*xk, *yk)).collect();
        Self { label: Some(label.to_string()), points, color, width: 2 }
    }

    /// Create a horizontal line at height `y` spanning `xlim`, with no legend
    /// entry.
    pub fn hline(y: f64, xlim: (f64, f64), color: RGBColor) -> Self {
        Self {
            label: None,
            points: vec![(xlim.0, y), (xlim.1, y)],
            color,
            width: 1,
        }
    }
}

/// A text label placed at data coordinates.
#[derive(Clone, Debug)]
pub struct Annotation {
    pub text: String,
    pub at: (f64, f64),
}

/// Description of a line chart.
#[derive(Clone, Debug, Default)]
pub struct LineChart {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub curves: Vec<Curve>,
    pub annotations: Vec<Annotation>,
}

impl LineChart {
    pub fn new(title: &str, xlabel: &str, ylabel: &str) -> Self {
        Self {
            title: title.to_string(),
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
            ..Self::default()
        }
    }

    pub fn xlim(mut self, lim: (f64, f64)) -> Self {
        self.xlim = Some(lim);
        self
    }

    pub fn ylim(mut self, lim: (f64, f64)) -> Self {
        self.ylim = Some(lim);
        self
    }

    pub fn curve(mut self, curve: Curve) -> Self {
        self.curves.push(curve);
        self
    }

    pub fn annotate(mut self, text: &str, at: (f64, f64)) -> Self {
        self.annotations.push(Annotation { text: text.to_string(), at });
        self
    }

    fn data_range(&self, coord: impl Fn(&(f64, f64)) -> f64) -> (f64, f64) {
        let (lo, hi)
            = self.curves.iter()
            .flat_map(|c| c.points.iter())
            .map(coord)
            .fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), v| (lo.min(v), hi.max(v)),
            );
        padded(lo, hi)
    }

    /// Render the chart to an SVG file.
    pub fn render<P>(&self, path: P) -> anyhow::Result<()>
    where P: AsRef<Path>
    {
        let xlim = self.xlim.unwrap_or_else(|| self.data_range(|p| p.0));
        let ylim = self.ylim.unwrap_or_else(|| self.data_range(|p| p.1));
        let root = SVGBackend::new(path.as_ref(), SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart
            = ChartBuilder::on(&root)
            .caption(&self.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(65)
            .build_cartesian_2d(xlim.0..xlim.1, ylim.0..ylim.1)?;
        chart.configure_mesh()
            .x_desc(&self.xlabel)
            .y_desc(&self.ylabel)
            .draw()?;

        let mut has_legend = false;
        for curve in self.curves.iter() {
            let color = curve.color;
            let anno = chart.draw_series(
                LineSeries::new(
                    curve.points.iter().copied(),
                    color.stroke_width(curve.width),
                )
            )?;
            if let Some(label) = curve.label.as_ref() {
                has_legend = true;
                anno.label(label)
                    .legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
        }
        for note in self.annotations.iter() {
            chart.draw_series(
                std::iter::once(
                    Text::new(note.text.clone(), note.at, (FONT, 14).into_font()))
            )?;
        }
        if has_legend {
            chart.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }
        root.present()?;
        Ok(())
    }
}

/// Render a bar chart with one labeled bar per value to an SVG file.
pub fn bar_chart<P>(
    path: P,
    title: &str,
    xlabel: &str,
    ylabel: &str,
    labels: &[String],
    values: &[f64],
) -> anyhow::Result<()>
where P: AsRef<Path>
{
    anyhow::ensure!(
        labels.len() == values.len(),
        "bar_chart: got {} labels for {} values", labels.len(), values.len(),
    );
    let n = values.len();
    let (lo, hi)
        = values.iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let ylim = padded(lo, hi);
    let root = SVGBackend::new(path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart
        = ChartBuilder::on(&root)
        .caption(title, (FONT, 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..n as f64 - 0.5, ylim.0..ylim.1)?;
    let tick_label = |x: &f64| -> String {
        let k = x.round();
        if (x - k).abs() < 1e-6 && k >= 0.0 && (k as usize) < n {
            labels[k as usize].clone()
        } else {
            String::new()
        }
    };
    chart.configure_mesh()
        .x_desc(xlabel)
        .y_desc(ylabel)
        .x_labels(n)
        .x_label_formatter(&tick_label)
        .y_label_formatter(&|y| format!("{:.3e}", y))
        .draw()?;
    chart.draw_series(
        values.iter().enumerate()
            .map(|(k, v)| {
                let x = k as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *v)], color(0).filled())
            })
    )?;
    root.present()?;
    Ok(())
}

// pad a data range by 5% on each side, widening degenerate ranges
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if !(lo.is_finite() && hi.is_finite()) { return (-1.0, 1.0); }
    let span = hi - lo;
    let pad
        = if span > f64::EPSILON * hi.abs().max(lo.abs()).max(1e-300) {
            0.05 * span
        } else {
            0.5 * lo.abs().max(1e-12)
        };
    (lo - pad, hi + pad)
}
