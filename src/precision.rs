use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The rule mapping a raw ordinate to its normalized, stored value.
///
/// ```
/// use geomatrix::Precision;
///
/// let precision = Precision::fixed(100);
/// assert_eq!(precision.convert(1.001), 1.0);
/// assert_eq!(Precision::Floating.convert(1.001), 1.001);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Precision {
    /// Full floating-point precision; values are stored unchanged.
    #[default]
    Floating,

    /// Values are rounded to `1 / scale` units.
    ///
    /// A scale of 100 keeps two decimal places. Only a positive scale is meaningful; other values
    /// are rejected when a row is expanded.
    Fixed {
        /// Decimal scale factor.
        scale: i64,
    },
}

impl Precision {
    /// Construct a fixed precision with the given scale.
    pub fn fixed(scale: i64) -> Self {
        Self::Fixed { scale }
    }

    /// Whether this policy leaves values untouched.
    pub fn is_exact(&self) -> bool {
        matches!(self, Precision::Floating)
    }

    /// Normalize `value` under this policy.
    ///
    /// Fixed precision computes `round(value * scale) / scale`, with ties rounded half away from
    /// zero, so `0.125` at scale 100 becomes `0.13` and `-0.125` becomes `-0.13`.
    pub fn convert(&self, value: f64) -> f64 {
        match self {
            Precision::Floating => value,
            Precision::Fixed { scale } => {
                let scale = *scale as f64;
                (value * scale).round() / scale
            }
        }
    }

    /// The type name used by the library under test.
    pub fn type_name(&self) -> &'static str {
        match self {
            Precision::Floating => "FloatingPrecision",
            Precision::Fixed { .. } => "FixedPrecision",
        }
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precision::Floating => write!(f, "FloatingPrecision"),
            Precision::Fixed { scale } => write!(f, "FixedPrecision(scale: {scale})"),
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn floating_is_identity() {
        for value in [0.0, -0.0, 1.001, -2.002, 1e300, f64::MIN_POSITIVE] {
            assert_eq!(Precision::Floating.convert(value), value);
        }
    }

    #[test]
    fn scale_10() {
        let precision = Precision::fixed(10);
        assert_eq!(precision.convert(1.01), 1.0);
        assert_eq!(precision.convert(1.05), 1.1);
        assert_eq!(precision.convert(1.09), 1.1);
        assert_eq!(precision.convert(1.0111), 1.0);
        assert_eq!(precision.convert(1.0555), 1.1);
        assert_eq!(precision.convert(1.0999), 1.1);
    }

    #[test]
    fn scale_100() {
        let precision = Precision::fixed(100);
        assert_eq!(precision.convert(1.001), 1.0);
        assert_eq!(precision.convert(2.002), 2.0);
        assert_eq!(precision.convert(3.003), 3.0);
        assert_eq!(precision.convert(0.0), 0.0);
        assert_relative_eq!(precision.convert(3.14159), 3.14);
    }

    #[test]
    fn ties_round_away_from_zero() {
        // 0.125 and 12.5 are exactly representable, so these are true ties.
        let precision = Precision::fixed(100);
        assert_eq!(precision.convert(0.125), 0.13);
        assert_eq!(precision.convert(-0.125), -0.13);

        let precision = Precision::fixed(1);
        assert_eq!(precision.convert(2.5), 3.0);
        assert_eq!(precision.convert(-2.5), -3.0);
        assert_eq!(precision.convert(0.5), 1.0);
    }

    #[test]
    fn display() {
        assert_eq!(Precision::Floating.to_string(), "FloatingPrecision");
        assert_eq!(Precision::fixed(100).to_string(), "FixedPrecision(scale: 100)");
        assert_eq!(Precision::fixed(100).type_name(), "FixedPrecision");
    }

    #[test]
    fn serde_tagged() {
        let json = serde_json::to_string(&Precision::fixed(100)).unwrap();
        assert_eq!(json, r#"{"type":"fixed","scale":100}"#);
        let precision: Precision = serde_json::from_str(r#"{"type":"floating"}"#).unwrap();
        assert_eq!(precision, Precision::Floating);
    }

    proptest! {
        #[test]
        fn fixed_lands_on_grid(value in -1.0e6f64..1.0e6, scale in 1i64..=10_000) {
            let scaled = Precision::fixed(scale).convert(value) * scale as f64;
            let tolerance = scaled.abs().max(1.0) * 4.0 * f64::EPSILON;
            prop_assert!((scaled - scaled.round()).abs() <= tolerance, "{scaled}");
        }

        #[test]
        fn fixed_moves_at_most_half_a_unit(value in -1.0e6f64..1.0e6, scale in 1i64..=10_000) {
            let converted = Precision::fixed(scale).convert(value);
            let tolerance = (value.abs() + 1.0) * 4.0 * f64::EPSILON;
            prop_assert!((converted - value).abs() <= 0.5 / scale as f64 + tolerance);
        }

        #[test]
        fn fixed_is_symmetric(value in -1.0e6f64..1.0e6, scale in 1i64..=10_000) {
            let precision = Precision::fixed(scale);
            prop_assert_eq!(precision.convert(-value), -precision.convert(value));
        }

        #[test]
        fn fixed_is_monotonic(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6, scale in 1i64..=10_000) {
            let precision = Precision::fixed(scale);
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(precision.convert(low) <= precision.convert(high));
        }

        #[test]
        fn fixed_is_idempotent(value in -1.0e6f64..1.0e6, scale in 1i64..=10_000) {
            let precision = Precision::fixed(scale);
            let once = precision.convert(value);
            prop_assert_eq!(precision.convert(once), once);
        }
    }
}
