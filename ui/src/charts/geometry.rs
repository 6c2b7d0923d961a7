//! SVG geometry for the metric charts: plot frame, value scale, "nice" axis ticks,
//! bar layout and monotone curves.

use std::fmt::Write;

/// Width of every chart's viewBox; the SVG scales to its container.
pub const VIEW_WIDTH: f64 = 640.0;

const MAX_BAR_WIDTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        // Room for two-line category labels below and tick labels on the left.
        Self {
            top: 12.0,
            right: 12.0,
            bottom: 44.0,
            left: 72.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: Margin::default(),
        }
    }

    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn right(&self) -> f64 {
        (self.width - self.margin.right).max(self.left())
    }

    pub fn top(&self) -> f64 {
        self.margin.top
    }

    pub fn bottom(&self) -> f64 {
        (self.height - self.margin.bottom).max(self.top())
    }

    pub fn plot_width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn plot_height(&self) -> f64 {
        self.bottom() - self.top()
    }
}

/// Linear value scale from 0 (plot bottom) to `max` (plot top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub max: f64,
}

impl ValueScale {
    pub fn from_ticks(ticks: &[f64]) -> Self {
        let max = ticks.last().copied().filter(|m| *m > 0.0).unwrap_or(1.0);
        Self { max }
    }

    /// Vertical pixel position of `value`. Non-finite values sit on the baseline.
    pub fn y(&self, frame: &Frame, value: f64) -> f64 {
        let value = finite_or_zero(value);
        let ratio = (value / self.max).clamp(0.0, 1.0);
        frame.bottom() - ratio * frame.plot_height()
    }
}

/// Axis ticks from 0 covering `max_value` with a 1/2/2.5/5×10ⁿ step.
///
/// Data with no positive maximum gets the unit axis `0..=4`.
pub fn nice_ticks(max_value: f64, count: usize) -> Vec<f64> {
    let count = count.max(2);
    let step = if max_value > 0.0 && max_value.is_finite() {
        nice_step(max_value / (count - 1) as f64)
    } else {
        1.0
    };
    let top = if max_value > 0.0 && max_value.is_finite() {
        (max_value / step).ceil().max(1.0)
    } else {
        (count - 1) as f64
    };

    (0..=top as usize).map(|i| i as f64 * step).collect()
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 2.5 {
        2.5
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Centers of `n` equal bands across the plot (bar charts).
pub fn band_centers(frame: &Frame, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let band = frame.plot_width() / n as f64;
    (0..n)
        .map(|i| frame.left() + band * (i as f64 + 0.5))
        .collect()
}

/// `n` points spread edge to edge (line and area charts). A single point is centered.
pub fn point_xs(frame: &Frame, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![frame.left() + frame.plot_width() / 2.0],
        _ => (0..n)
            .map(|i| frame.left() + frame.plot_width() * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn bar_rects(frame: &Frame, scale: &ValueScale, values: &[f64]) -> Vec<BarRect> {
    if values.is_empty() {
        return Vec::new();
    }
    let band = frame.plot_width() / values.len() as f64;
    let width = (band * 0.8).min(MAX_BAR_WIDTH);

    band_centers(frame, values.len())
        .into_iter()
        .zip(values)
        .map(|(center, value)| {
            let y = scale.y(frame, *value);
            BarRect {
                x: center - width / 2.0,
                y,
                width,
                height: frame.bottom() - y,
            }
        })
        .collect()
}

/// One cubic Bézier piece of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub from: (f64, f64),
    pub c1: (f64, f64),
    pub c2: (f64, f64),
    pub to: (f64, f64),
}

/// Monotone cubic interpolation (Fritsch–Carlson): the curve never overshoots
/// between two neighbouring points.
pub fn monotone_segments(points: &[(f64, f64)]) -> Vec<CubicSegment> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let slopes: Vec<f64> = points
        .windows(2)
        .map(|w| {
            let dx = w[1].0 - w[0].0;
            if dx == 0.0 {
                0.0
            } else {
                (w[1].1 - w[0].1) / dx
            }
        })
        .collect();

    let mut tangents = vec![0.0; n];
    tangents[0] = slopes[0];
    tangents[n - 1] = slopes[n - 2];
    for i in 1..n - 1 {
        tangents[i] = if slopes[i - 1] * slopes[i] <= 0.0 {
            0.0
        } else {
            (slopes[i - 1] + slopes[i]) / 2.0
        };
    }

    for (i, &slope) in slopes.iter().enumerate() {
        if slope == 0.0 {
            tangents[i] = 0.0;
            tangents[i + 1] = 0.0;
            continue;
        }
        let a = tangents[i] / slope;
        let b = tangents[i + 1] / slope;
        let h = a * a + b * b;
        if h > 9.0 {
            let t = 3.0 / h.sqrt();
            tangents[i] = t * a * slope;
            tangents[i + 1] = t * b * slope;
        }
    }

    points
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let (x0, y0) = w[0];
            let (x1, y1) = w[1];
            let third = (x1 - x0) / 3.0;
            CubicSegment {
                from: (x0, y0),
                c1: (x0 + third, y0 + tangents[i] * third),
                c2: (x1 - third, y1 - tangents[i + 1] * third),
                to: (x1, y1),
            }
        })
        .collect()
}

/// SVG path data for a monotone curve through `points`.
pub fn monotone_path(points: &[(f64, f64)]) -> String {
    let Some(&(x, y)) = points.first() else {
        return String::new();
    };

    let mut d = format!("M{x:.2},{y:.2}");
    for seg in monotone_segments(points) {
        let _ = write!(
            d,
            " C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            seg.c1.0, seg.c1.1, seg.c2.0, seg.c2.1, seg.to.0, seg.to.1
        );
    }
    d
}

/// Closed area under the monotone curve down to `baseline`.
pub fn area_path(points: &[(f64, f64)], baseline: f64) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    format!(
        "{} L{:.2},{baseline:.2} L{:.2},{baseline:.2} Z",
        monotone_path(points),
        last.0,
        first.0
    )
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_cover_maximum() {
        let ticks = nice_ticks(27_180_316.0, 5);
        assert_eq!(ticks.first(), Some(&0.0));
        assert!(*ticks.last().unwrap() >= 27_180_316.0);
        assert_eq!(ticks[1], 10_000_000.0);
    }

    #[test]
    fn ticks_for_percentages() {
        assert_eq!(nice_ticks(15.0, 5), vec![0.0, 5.0, 10.0, 15.0]);
    }

    #[test]
    fn ticks_for_flat_zero_data() {
        assert_eq!(nice_ticks(0.0, 5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(nice_ticks(f64::NAN, 5).len(), 5);
    }

    #[test]
    fn scale_maps_bounds() {
        let frame = Frame::new(VIEW_WIDTH, 300.0);
        let scale = ValueScale::from_ticks(&nice_ticks(100.0, 5));
        assert_eq!(scale.y(&frame, 0.0), frame.bottom());
        assert_eq!(scale.y(&frame, scale.max), frame.top());
        assert_eq!(scale.y(&frame, f64::NAN), frame.bottom());
    }

    #[test]
    fn bars_stay_in_bands() {
        let frame = Frame::new(VIEW_WIDTH, 300.0);
        let scale = ValueScale::from_ticks(&nice_ticks(40.0, 5));
        let bars = bar_rects(&frame, &scale, &[10.0, 40.0, 0.0]);

        assert_eq!(bars.len(), 3);
        assert!(bars.iter().all(|b| b.width <= MAX_BAR_WIDTH));
        assert!(bars[0].x >= frame.left());
        assert!(bars[2].x + bars[2].width <= frame.right());
        assert!((bars[1].y - frame.top()).abs() < 1e-9);
        assert_eq!(bars[2].height, 0.0);
    }

    #[test]
    fn points_span_plot() {
        let frame = Frame::new(VIEW_WIDTH, 300.0);
        let xs = point_xs(&frame, 8);
        assert_eq!(xs.first(), Some(&frame.left()));
        assert_eq!(xs.last(), Some(&frame.right()));
        assert_eq!(point_xs(&frame, 1), vec![frame.left() + frame.plot_width() / 2.0]);
    }

    #[test]
    fn monotone_curve_does_not_overshoot() {
        let points = [(0.0, 0.0), (1.0, 10.0), (2.0, 10.5), (3.0, 30.0), (4.0, 30.0)];
        for seg in monotone_segments(&points) {
            let lo = seg.from.1.min(seg.to.1);
            let hi = seg.from.1.max(seg.to.1);
            for cy in [seg.c1.1, seg.c2.1] {
                assert!(cy >= lo - 1e-9 && cy <= hi + 1e-9, "{seg:?}");
            }
        }
    }

    #[test]
    fn flat_series_is_flat() {
        let points = [(0.0, 5.0), (1.0, 5.0), (2.0, 5.0)];
        assert!(monotone_segments(&points)
            .iter()
            .all(|s| s.c1.1 == 5.0 && s.c2.1 == 5.0));
    }

    #[test]
    fn paths_are_well_formed() {
        assert_eq!(monotone_path(&[]), "");
        assert_eq!(monotone_path(&[(1.0, 2.0)]), "M1.00,2.00");

        let area = area_path(&[(0.0, 10.0), (10.0, 0.0)], 20.0);
        assert!(area.starts_with("M0.00,10.00 C"));
        assert!(area.ends_with("L10.00,20.00 L0.00,20.00 Z"));
    }
}
