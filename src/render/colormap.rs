use plotters::style::RGBColor;

/// Piecewise-linear control points `(x, value)` for one channel.
type Channel = &'static [(f64, f64)];

// Classic "jet": dark blue through cyan, yellow and red to dark red.
const JET_RED: Channel = &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: Channel = &[
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: Channel = &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

fn interpolate(channel: Channel, x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    for pair in channel.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if x <= x1 {
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    channel[channel.len() - 1].1
}

fn to_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Jet colormap sampled at `x` in [0, 1]; values outside are clamped.
pub fn jet(x: f64) -> RGBColor {
    RGBColor(
        to_byte(interpolate(JET_RED, x)),
        to_byte(interpolate(JET_GREEN, x)),
        to_byte(interpolate(JET_BLUE, x)),
    )
}

/// Linear map from a mean-age domain onto the colormap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` in the domain, clamped to [0, 1]. A degenerate
    /// domain or a non-finite value lands on the midpoint.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !value.is_finite() || !(span > 0.0) {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn color(&self, value: f64) -> RGBColor {
        jet(self.fraction(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jet_endpoints_and_middle() {
        assert_eq!(jet(0.0), RGBColor(0, 0, 128));
        assert_eq!(jet(1.0), RGBColor(128, 0, 0));
        // at 0.5 green is saturated, red and blue are close to balanced
        let RGBColor(r, g, b) = jet(0.5);
        assert_eq!(g, 255);
        assert!(r > 100 && r < 140, "r={}", r);
        assert!(b > 100 && b < 140, "b={}", b);
    }

    #[test]
    fn jet_clamps_outside_unit_interval() {
        assert_eq!(jet(-3.0), jet(0.0));
        assert_eq!(jet(7.0), jet(1.0));
    }

    #[test]
    fn scale_maps_domain_ends_to_colormap_ends() {
        let scale = ColorScale::new(37.0, 42.0);
        assert_eq!(scale.color(37.0), jet(0.0));
        assert_eq!(scale.color(42.0), jet(1.0));
        assert!((scale.fraction(39.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_domain_uses_midpoint() {
        let scale = ColorScale::new(40.0, 40.0);
        assert_eq!(scale.fraction(40.0), 0.5);
        assert_eq!(ColorScale::new(1.0, 2.0).fraction(f64::NAN), 0.5);
    }
}
