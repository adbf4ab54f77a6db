//! Regular-polygon relations between edge length, side count and radius.
//!
//! A ring of `n` identical trapezoidal modules is a regular `n`-gon twice over:
//! the short module edges (L1) close the inner polygon, whose vertices sit on
//! the circumscribed circle, and the long edges (L2) close the outer polygon,
//! whose edge midpoints touch the inscribed circle.
//!
//! All functions use the exact closed forms; no small-angle shortcuts.

use std::f64::consts::PI;
use std::fmt;

/// Invalid input to a polygon relation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryError {
    /// A polygon needs at least three sides.
    TooFewSides { sides: usize },
    /// The chord does not fit inside the circle (`edge >= 2 * radius`).
    ChordTooLong { edge: f64, radius: f64 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSides { sides } => {
                write!(f, "a polygon must have at least 3 sides (got {sides})")
            }
            Self::ChordTooLong { edge, radius } => write!(
                f,
                "side length {edge} must be smaller than the diameter 2*{radius}"
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

#[inline]
fn check_sides(sides: usize) -> Result<f64, GeometryError> {
    if sides <= 2 {
        tracing::debug!(sides, "rejecting polygon with fewer than 3 sides");
        return Err(GeometryError::TooFewSides { sides });
    }
    Ok(sides as f64)
}

/// Inscribed radius (apothem) of a regular polygon: `edge / (2 tan(π/n))`.
#[inline]
pub fn inscribed_radius(edge: f64, sides: usize) -> Result<f64, GeometryError> {
    let n = check_sides(sides)?;
    Ok(edge / (2.0 * (PI / n).tan()))
}

/// Circumscribed radius of a regular polygon: `edge / (2 sin(π/n))`.
#[inline]
pub fn circumscribed_radius(edge: f64, sides: usize) -> Result<f64, GeometryError> {
    let n = check_sides(sides)?;
    Ok(edge / (2.0 * (PI / n).sin()))
}

/// Real-valued side count of the regular polygon inscribed in a circle of
/// `radius` whose sides have length `edge`: `π / asin(edge / 2r)`.
///
/// Inverse of [`circumscribed_radius`] in its side-count argument.
pub fn sides_for_chord(radius: f64, edge: f64) -> Result<f64, GeometryError> {
    // Negated form also rejects NaN inputs.
    if !(edge < 2.0 * radius) {
        tracing::debug!(edge, radius, "chord does not fit the circle");
        return Err(GeometryError::ChordTooLong { edge, radius });
    }
    Ok(PI / (edge / (2.0 * radius)).asin())
}

/// Largest side count [`snap_sides`] will produce.
pub const MAX_SIDES: usize = u32::MAX as usize;

/// Round a real side count to an integer side count divisible by `granularity`.
///
/// Only the two integers bracketing `n_star` (its floor and floor + 1) are
/// considered; among those that are multiples of `granularity` and have at
/// least three sides the one nearest `n_star` wins, ties going to the even
/// integer. `None` when neither qualifies or `n_star` is beyond
/// [`MAX_SIDES`]. With `granularity == 1` this is round-half-to-even.
pub fn snap_sides(n_star: f64, granularity: usize) -> Option<usize> {
    if !n_star.is_finite() || n_star < 2.0 || n_star >= MAX_SIDES as f64 || granularity == 0 {
        return None;
    }
    let lo = n_star.floor() as usize;
    [lo, lo + 1]
        .into_iter()
        .filter(|&n| n >= 3 && n % granularity == 0)
        .min_by(|&a, &b| {
            let da = (a as f64 - n_star).abs();
            let db = (b as f64 - n_star).abs();
            da.total_cmp(&db).then((a % 2).cmp(&(b % 2)))
        })
}

/// Tallest isosceles trapezoid with parallel edges `l1`, `l2` that fits a
/// circular wafer of radius `wafer_radius` (both edges as chords).
pub fn max_module_height(l1: f64, l2: f64, wafer_radius: f64) -> Result<f64, GeometryError> {
    let half_chord = |edge: f64| {
        if !(edge <= 2.0 * wafer_radius) {
            return Err(GeometryError::ChordTooLong {
                edge,
                radius: wafer_radius,
            });
        }
        Ok((wafer_radius * wafer_radius - edge * edge / 4.0).sqrt())
    };
    Ok(half_chord(l1)? + half_chord(l2)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn square_and_hexagon_closed_forms() {
        // Unit square: apothem 1/2, circumradius 1/sqrt(2).
        assert!((inscribed_radius(1.0, 4).unwrap() - 0.5).abs() < 1e-12);
        assert!((circumscribed_radius(1.0, 4).unwrap() - 0.5f64.sqrt()).abs() < 1e-12);
        // Hexagon circumradius equals its side.
        assert!((circumscribed_radius(3.0, 6).unwrap() - 3.0).abs() < 1e-12);
        assert!((sides_for_chord(3.0, 3.0).unwrap() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_are_reported() {
        assert_eq!(
            inscribed_radius(10.0, 2),
            Err(GeometryError::TooFewSides { sides: 2 })
        );
        assert!(circumscribed_radius(10.0, 0).is_err());
        assert!(matches!(
            sides_for_chord(5.0, 10.0),
            Err(GeometryError::ChordTooLong { .. })
        ));
        assert!(sides_for_chord(5.0, f64::NAN).is_err());
    }

    #[test]
    fn first_ring_anchor_lands_on_r_min() {
        let l1 = 2.0 * 414.0 * (PI / 48.0).sin();
        assert!((circumscribed_radius(l1, 48).unwrap() - 414.0).abs() < 1e-9);
        let l2 = 2.0 * 690.0 * (PI / 64.0).tan();
        assert!((inscribed_radius(l2, 64).unwrap() - 690.0).abs() < 1e-9);
    }

    #[test]
    fn snap_respects_granularity() {
        assert_eq!(snap_sides(55.6, 1), Some(56));
        assert_eq!(snap_sides(55.4, 1), Some(55));
        assert_eq!(snap_sides(55.5, 1), Some(56));
        assert_eq!(snap_sides(56.4, 4), Some(56));
        assert_eq!(snap_sides(55.9, 8), Some(56));
        // Neither 61 nor 62 is a multiple of 4.
        assert_eq!(snap_sides(61.5, 4), None);
        assert_eq!(snap_sides(2.2, 1), Some(3));
        assert_eq!(snap_sides(f64::NAN, 1), None);
    }

    #[test]
    fn snap_rejects_huge_side_counts() {
        assert_eq!(snap_sides(1e30, 4), None);
        assert_eq!(snap_sides(f64::MAX, 1), None);
        assert_eq!(snap_sides(MAX_SIDES as f64, 1), None);
        // A micron-sized chord on a ring wants ~1e21 sides.
        let n_star = sides_for_chord(414.0, 1e-18).unwrap();
        assert_eq!(snap_sides(n_star, 4), None);
    }

    #[test]
    fn wafer_height_limit() {
        // Both edges equal to the diameter: zero height.
        assert!(max_module_height(20.0, 20.0, 10.0).unwrap().abs() < 1e-12);
        // Vanishing edges: full diameter.
        assert!((max_module_height(0.0, 0.0, 10.0).unwrap() - 20.0).abs() < 1e-12);
        assert!(max_module_height(50.0, 80.0, 101.5).unwrap() > 150.0);
        assert!(max_module_height(250.0, 80.0, 101.5).is_err());
    }

    #[test]
    fn radii_converge_to_circle_seeded() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let edge: f64 = rng.gen_range(1.0..100.0);
            let sides = 200_000usize;
            let circle = edge * sides as f64 / (2.0 * PI);
            let r_in = inscribed_radius(edge, sides).unwrap();
            let r_out = circumscribed_radius(edge, sides).unwrap();
            assert!(r_out > r_in);
            assert!((r_in - circle).abs() / circle < 1e-9);
            assert!((r_out - circle).abs() / circle < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn circumscribed_exceeds_inscribed(edge in 0.01f64..500.0, sides in 3usize..20_000) {
            let r_in = inscribed_radius(edge, sides).unwrap();
            let r_out = circumscribed_radius(edge, sides).unwrap();
            prop_assert!(r_out > r_in);
            prop_assert!(r_in > 0.0);
        }

        #[test]
        fn sides_for_chord_inverts_circumscribed(radius in 1.0f64..2_000.0, sides in 3usize..2_000) {
            let edge = 2.0 * radius * (PI / sides as f64).sin();
            let n = sides_for_chord(radius, edge).unwrap();
            prop_assert!((n - sides as f64).abs() < 1e-6 * sides as f64);
        }
    }
}
