//! Evenly spaced coordinate sequences between two values.

use crate::error::GridError;

/// Which side of the spacing/region trade-off gives when an interval is not
/// divisible by the requested spacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjust {
    /// Keep the interval fixed and round the spacing to the nearest multiple.
    Spacing,
    /// Keep the spacing exact and pad the interval symmetrically.
    Region,
}

/// How to generate a line of coordinates: point count or spacing, plus
/// registration.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSpec {
    /// Number of points in the sequence. Mutually exclusive with `spacing`.
    pub size: Option<usize>,
    /// Interval between points. Mutually exclusive with `size`.
    pub spacing: Option<f64>,
    /// Reconciliation policy when the interval is not divisible by `spacing`.
    /// Ignored when `size` is given.
    pub adjust: Adjust,
    /// Place points at interval midpoints instead of interval boundaries.
    ///
    /// When `spacing` drives the sequence this yields one fewer point than
    /// boundary registration. When `size` drives it, the requested count is
    /// kept and the realized spacing shrinks accordingly.
    pub pixel_register: bool,
}

impl Default for LineSpec {
    fn default() -> Self {
        Self {
            size: None,
            spacing: None,
            adjust: Adjust::Spacing,
            pixel_register: false,
        }
    }
}

impl LineSpec {
    /// A line with a fixed number of points.
    pub fn with_size(size: usize) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    /// A line with a fixed interval between points.
    pub fn with_spacing(spacing: f64) -> Self {
        Self {
            spacing: Some(spacing),
            ..Self::default()
        }
    }

    /// Set the reconciliation policy.
    pub fn adjust(mut self, adjust: Adjust) -> Self {
        self.adjust = adjust;
        self
    }

    /// Enable midpoint (pixel) registration.
    pub fn pixel_register(mut self, pixel_register: bool) -> Self {
        self.pixel_register = pixel_register;
        self
    }
}

/// Generate evenly spaced values from `start` to `stop` inclusive.
///
/// Exactly one of `spec.size` and `spec.spacing` must be set. When the
/// spacing does not divide the interval, `spec.adjust` decides whether the
/// realized spacing or the interval bounds give way.
pub fn line_coordinates(start: f64, stop: f64, spec: &LineSpec) -> Result<Vec<f64>, GridError> {
    let (size, start, stop) = match (spec.size, spec.spacing) {
        (Some(_), Some(_)) => return Err(GridError::ConflictingArguments),
        (None, None) => return Err(GridError::MissingArgument),
        (None, Some(spacing)) => spacing_to_size(start, stop, spacing, spec.adjust),
        (Some(size), None) => {
            // Midpoint registration discards the last boundary point, so
            // generate one extra to keep the requested count.
            let size = if spec.pixel_register { size + 1 } else { size };
            (size, start, stop)
        }
    };
    let values = linspace(start, stop, size);
    if spec.pixel_register && values.len() >= 2 {
        let half_step = (values[1] - values[0]) / 2.0;
        return Ok(values[..values.len() - 1]
            .iter()
            .map(|v| v + half_step)
            .collect());
    }
    Ok(values)
}

/// Number of points (and possibly adjusted bounds) realizing a spacing.
///
/// Rounds the interval to the nearest whole number of steps, but never
/// below one full step: a spacing of twice the interval or more would
/// otherwise collapse to a single point and silently discard the interval.
fn spacing_to_size(start: f64, stop: f64, spacing: f64, adjust: Adjust) -> (usize, f64, f64) {
    let mut size = ((stop - start) / spacing).round() as usize + 1;
    if size == 1 {
        size = 2;
    }
    match adjust {
        Adjust::Spacing => (size, start, stop),
        Adjust::Region => {
            let required = (size - 1) as f64 * spacing;
            let pad = (required - (stop - start)) / 2.0;
            (size, start - pad, stop + pad)
        }
    }
}

/// `size` evenly spaced values from `start` to `stop`, endpoints exact.
fn linspace(start: f64, stop: f64, size: usize) -> Vec<f64> {
    match size {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (size - 1) as f64;
            (0..size)
                .map(|i| {
                    if i == size - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_allclose(got: &[f64], want: &[f64]) {
        assert_eq!(got.len(), want.len(), "got {got:?}, want {want:?}");
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-12, "got {got:?}, want {want:?}");
        }
    }

    #[test]
    fn size_matches_linspace() {
        let values = line_coordinates(0.0, 10.0, &LineSpec::with_size(5)).unwrap();
        assert_allclose(&values, &[0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn exact_spacing_matches_size() {
        let by_spacing = line_coordinates(0.0, 10.0, &LineSpec::with_spacing(2.5)).unwrap();
        let by_size = line_coordinates(0.0, 10.0, &LineSpec::with_size(5)).unwrap();
        assert_allclose(&by_spacing, &by_size);
        let short = line_coordinates(0.0, 5.0, &LineSpec::with_spacing(2.5)).unwrap();
        assert_allclose(&short, &[0.0, 2.5, 5.0]);
    }

    #[test]
    fn inexact_spacing_adjusts_spacing_by_default() {
        let values = line_coordinates(0.0, 10.0, &LineSpec::with_spacing(2.4)).unwrap();
        assert_allclose(&values, &[0.0, 2.5, 5.0, 7.5, 10.0]);
        let values = line_coordinates(0.0, 10.0, &LineSpec::with_spacing(2.6)).unwrap();
        assert_allclose(&values, &[0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn inexact_spacing_can_adjust_region_instead() {
        let values =
            line_coordinates(0.0, 10.0, &LineSpec::with_spacing(2.4).adjust(Adjust::Region))
                .unwrap();
        assert_allclose(&values, &[0.2, 2.6, 5.0, 7.4, 9.8]);
        let values =
            line_coordinates(0.0, 10.0, &LineSpec::with_spacing(2.6).adjust(Adjust::Region))
                .unwrap();
        assert_allclose(&values, &[-0.2, 2.4, 5.0, 7.6, 10.2]);
    }

    #[test]
    fn oversized_spacing_still_yields_one_full_step() {
        // spacing >= 2x the interval rounds to a single point; force two so
        // the requested interval is not discarded.
        let values = line_coordinates(0.0, 1.0, &LineSpec::with_spacing(5.0)).unwrap();
        assert_eq!(values.len(), 2);
        assert_allclose(&values, &[0.0, 1.0]);
        let values =
            line_coordinates(0.0, 1.0, &LineSpec::with_spacing(5.0).adjust(Adjust::Region))
                .unwrap();
        assert_eq!(values.len(), 2);
        assert_allclose(&values, &[-2.0, 3.0]);
    }

    #[test]
    fn pixel_register_with_spacing_drops_one_point() {
        let values =
            line_coordinates(0.0, 10.0, &LineSpec::with_spacing(2.5).pixel_register(true))
                .unwrap();
        assert_allclose(&values, &[1.25, 3.75, 6.25, 8.75]);
    }

    #[test]
    fn pixel_register_with_size_keeps_the_count() {
        let values =
            line_coordinates(0.0, 10.0, &LineSpec::with_size(5).pixel_register(true)).unwrap();
        assert_allclose(&values, &[1.0, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn size_and_spacing_are_mutually_exclusive() {
        let mut spec = LineSpec::with_size(5);
        spec.spacing = Some(2.5);
        assert_eq!(
            line_coordinates(0.0, 10.0, &spec).unwrap_err(),
            GridError::ConflictingArguments
        );
        assert_eq!(
            line_coordinates(0.0, 10.0, &LineSpec::default()).unwrap_err(),
            GridError::MissingArgument
        );
    }
}
