//! Spherical-to-Cartesian coordinate conversion.
//!
//! Galactic longitude `l` maps to the azimuthal angle directly, while
//! latitude `b` is re-centered so the polar angle is zero at the north
//! galactic pole (`b = 90°`) rather than at the equator:
//!
//! ```text
//! ρ = l · π/180
//! θ = (b + 90) · π/180
//! x = d · cos(ρ) · sin(θ)
//! y = d · sin(ρ) · sin(θ)
//! z = d · cos(θ)
//! ```
//!
//! Inputs are not range-checked: out-of-range `l`/`b` produce
//! mathematically defined but physically meaningless positions.

use crate::table::{SkyRecord, StarRecord, StarTable};

/// Convert a single sky record to a star record with Cartesian
/// position appended. Pure; preserves `l`, `b`, `d` unchanged.
pub fn to_cartesian(sky: &SkyRecord) -> StarRecord {
    let rho = sky.l.to_radians();
    let theta = (sky.b + 90.0).to_radians();

    StarRecord {
        l: sky.l,
        b: sky.b,
        d: sky.d,
        x: sky.d * rho.cos() * theta.sin(),
        y: sky.d * rho.sin() * theta.sin(),
        z: sky.d * theta.cos(),
    }
}

/// Transform a full fetch result into a star table, preserving row
/// order.
pub fn transform_table(rows: Vec<SkyRecord>) -> StarTable {
    let stars = rows.iter().map(to_cartesian).collect();
    StarTable::from_stars(stars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, 1.0)]
    #[case(47.3, -12.9, 250.0)]
    #[case(180.0, 45.0, 3.5)]
    #[case(359.99, 89.99, 1e6)]
    #[case(213.7, -89.99, 0.001)]
    fn test_radius_preserved(#[case] l: f64, #[case] b: f64, #[case] d: f64) {
        let star = to_cartesian(&SkyRecord { l, b, d });
        let radius = (star.x * star.x + star.y * star.y + star.z * star.z).sqrt();
        assert_relative_eq!(radius, d, max_relative = 1e-12);
    }

    #[rstest]
    #[case(0.0)]
    #[case(117.5)]
    #[case(340.0)]
    fn test_north_pole(#[case] l: f64) {
        let star = to_cartesian(&SkyRecord { l, b: 90.0, d: 7.0 });
        assert_relative_eq!(star.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(star.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(star.z, 7.0, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0.0)]
    #[case(117.5)]
    #[case(340.0)]
    fn test_south_pole(#[case] l: f64) {
        let star = to_cartesian(&SkyRecord { l, b: -90.0, d: 7.0 });
        assert_relative_eq!(star.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(star.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(star.z, -7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_distance_maps_to_origin() {
        for (l, b) in [(0.0, 0.0), (123.0, 45.0), (722.0, -300.0)] {
            let star = to_cartesian(&SkyRecord { l, b, d: 0.0 });
            assert_eq!(star.position(), nalgebra::Vector3::zeros());
        }
    }

    #[test]
    fn test_known_pairs() {
        // (l=0, b=90, d=10) sits on the north pole axis.
        let north = to_cartesian(&SkyRecord {
            l: 0.0,
            b: 90.0,
            d: 10.0,
        });
        assert_relative_eq!(north.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(north.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(north.z, 10.0, epsilon = 1e-9);

        // (l=180, b=0, d=5): rho = pi, theta = pi/2 -> (-5, 0, 0).
        let anticenter = to_cartesian(&SkyRecord {
            l: 180.0,
            b: 0.0,
            d: 5.0,
        });
        assert_relative_eq!(anticenter.x, -5.0, epsilon = 1e-9);
        assert_relative_eq!(anticenter.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(anticenter.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_range_inputs_still_defined() {
        // No validation by contract: values outside the nominal ranges
        // wrap through the trig functions.
        let star = to_cartesian(&SkyRecord {
            l: 540.0,
            b: 270.0,
            d: 2.0,
        });
        assert!(star.x.is_finite() && star.y.is_finite() && star.z.is_finite());
        let radius = star.position().norm();
        assert_relative_eq!(radius, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_table_transform_preserves_order_and_inputs() {
        let rows = vec![
            SkyRecord {
                l: 10.0,
                b: 20.0,
                d: 30.0,
            },
            SkyRecord {
                l: 40.0,
                b: -50.0,
                d: 60.0,
            },
        ];
        let table = transform_table(rows.clone());

        assert_eq!(table.len(), 2);
        for (sky, star) in rows.iter().zip(table.iter()) {
            assert_eq!(star.l, sky.l);
            assert_eq!(star.b, sky.b);
            assert_eq!(star.d, sky.d);
        }
    }
}
