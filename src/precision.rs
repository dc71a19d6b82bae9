use crate::Error;
use geo_types::Coord;

/// Specifies how computed coordinates are mapped onto representable values.
///
/// Geometry construction and the buffer pipeline route every computed
/// coordinate (intersection points, offset-curve vertices) through the
/// active model exactly once, immediately before the coordinate is emitted.
///
/// Three modes are supported:
///
/// - `Floating`: full double precision; rounding is a no-op. This is the
///   default.
/// - `FloatingSingle`: coordinates are rounded to IEEE single precision.
/// - `Fixed`: coordinates are snapped to a grid with `scale` cells per unit,
///   i.e. `q = round(p * scale) / scale`. Rounding is half-up, away from
///   zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PrecisionModel {
    #[default]
    Floating,
    FloatingSingle,
    Fixed {
        scale: f64,
    },
}

impl PrecisionModel {
    /// Construct a fixed-grid model with `scale` grid cells per unit.
    ///
    /// Returns [`Error::InvalidArgument`] unless `scale` is finite and
    /// strictly positive.
    pub fn new_fixed(scale: f64) -> Result<Self, Error> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidArgument("precision scale must be > 0"));
        }
        Ok(PrecisionModel::Fixed { scale })
    }

    /// True iff this model does not constrain coordinates.
    pub fn is_floating(&self) -> bool {
        matches!(self, PrecisionModel::Floating)
    }

    /// The number of decimal digits of precision the model can represent.
    pub fn maximum_significant_digits(&self) -> i32 {
        match self {
            PrecisionModel::Floating => 16,
            PrecisionModel::FloatingSingle => 6,
            PrecisionModel::Fixed { scale } => 1 + scale.log10().ceil().max(0.0) as i32,
        }
    }

    /// Round a single ordinate value to this model's precision.
    pub fn make_precise_value(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        match self {
            PrecisionModel::Floating => value,
            PrecisionModel::FloatingSingle => {
                let single: f32 = num_traits::cast(value).unwrap_or(value as f32);
                single as f64
            }
            // round half away from zero, matching symmetric arithmetic rounding
            PrecisionModel::Fixed { scale } => (value * scale).round() / scale,
        }
    }

    /// Round `coord` in place.
    pub fn make_precise(&self, coord: &mut Coord<f64>) {
        if self.is_floating() {
            return;
        }
        coord.x = self.make_precise_value(coord.x);
        coord.y = self.make_precise_value(coord.y);
    }

    /// The rounded copy of `coord`.
    pub fn precise(&self, coord: Coord<f64>) -> Coord<f64> {
        let mut rounded = coord;
        self.make_precise(&mut rounded);
        rounded
    }
}
