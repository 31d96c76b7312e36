use crate::quality::quality_range;
use base::mesh::{Color, Mesh};

pub const DEFAULT_STOPS: [Color; 5] = [
    [0, 0, 255],   // Blue.
    [0, 255, 255], // Cyan.
    [0, 255, 0],   // Green.
    [255, 255, 0], // Yellow.
    [255, 0, 0],   // Red.
];

/// Piecewise-linear gradient over evenly spaced stops.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    stops: Vec<Color>,
}

impl ColorRamp {
    /// # Panics
    ///
    /// Panics if `stops` is empty.
    pub fn new(stops: &[Color]) -> ColorRamp {
        assert!(!stops.is_empty());
        ColorRamp {
            stops: stops.to_vec(),
        }
    }

    pub fn first(&self) -> Color {
        self.stops[0]
    }

    pub fn last(&self) -> Color {
        self.stops[self.stops.len() - 1]
    }

    /// Maps `value` from `[min, max]` onto the stops, clamping values
    /// outside. A degenerate range or a non-finite value gives the first
    /// stop.
    pub fn color(&self, min: f64, max: f64, value: f64) -> Color {
        let num_segments = self.stops.len() - 1;
        if num_segments == 0 || !(max > min) || !value.is_finite() {
            return self.first();
        }

        let t = ((value - min) / (max - min)).max(0.0).min(1.0);
        let x = t * num_segments as f64;
        let i = (x.floor() as usize).min(num_segments - 1);
        let f = x - i as f64;

        let (a, b) = (self.stops[i], self.stops[i + 1]);
        let mut color = [0; 3];
        for k in 0..3 {
            let (a, b) = (a[k] as f64, b[k] as f64);
            color[k] = (a + (b - a) * f).round() as u8;
        }
        color
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        ColorRamp::new(&DEFAULT_STOPS)
    }
}

/// Colors vertices by quality over the current finite quality range.
pub fn vertex_quality_ramp(mesh: &mut Mesh, ramp: &ColorRamp) {
    mesh.enable_color();
    let (min, max) = quality_range(&mesh.qualities).unwrap_or((0.0, 0.0));
    for (color, &q) in mesh.colors.iter_mut().zip(mesh.qualities.iter()) {
        *color = ramp.color(min, max, q);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use base::{Point3, Vector3};

    #[test]
    fn test_ramp_endpoints_and_clamping() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color(-1.0, 3.0, -1.0), [0, 0, 255]);
        assert_eq!(ramp.color(-1.0, 3.0, 3.0), [255, 0, 0]);
        assert_eq!(ramp.color(-1.0, 3.0, -100.0), ramp.first());
        assert_eq!(ramp.color(-1.0, 3.0, 100.0), ramp.last());
        assert_eq!(ramp.color(-1.0, 3.0, 1.0), [0, 255, 0]);
    }

    #[test]
    fn test_ramp_interpolation() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color(0.0, 1.0, 0.125), [0, 128, 255]);
        assert_eq!(ramp.color(0.0, 1.0, 0.875), [255, 128, 0]);
    }

    #[test]
    fn test_ramp_degenerate() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color(2.0, 2.0, 2.0), ramp.first());
        assert_eq!(ramp.color(0.0, 1.0, f64::NAN), ramp.first());

        let single = ColorRamp::new(&[[10, 20, 30]]);
        assert_eq!(single.color(0.0, 1.0, 0.5), [10, 20, 30]);
    }

    #[test]
    #[should_panic]
    fn test_ramp_without_stops() {
        ColorRamp::new(&[]);
    }

    #[test]
    fn test_vertex_quality_ramp() {
        let mut mesh =
            Mesh::new(vec![Point3::origin(); 3], vec![Vector3::z(); 3], vec![]);
        mesh.qualities = vec![10.0, 20.0, 15.0];

        vertex_quality_ramp(&mut mesh, &ColorRamp::default());

        assert_eq!(mesh.colors, vec![[0, 0, 255], [255, 0, 0], [0, 255, 0]]);
    }
}
