use std::f64::consts::{FRAC_PI_2, PI};

use kestrel_sim::domains::planning::geometry::{
    angular_difference, bearing_between, bearing_of, distance_between, normalize_angle,
};
use kestrel_sim::domains::planning::Position2D;

const EPS: f64 = 1e-9;

#[test]
fn test_distance_between_is_euclidean() {
    let a = Position2D::new(0.0, 0.0);
    let b = Position2D::new(3.0, 4.0);
    assert!((distance_between(&a, &b) - 5.0).abs() < EPS);
    assert!((distance_between(&b, &a) - 5.0).abs() < EPS);
    assert!(distance_between(&a, &a).abs() < EPS);
}

#[test]
fn test_normalize_angle_folds_into_half_open_range() {
    assert!((normalize_angle(0.0)).abs() < EPS);
    assert!((normalize_angle(3.0 * PI) - PI).abs() < EPS);
    assert!((normalize_angle(-3.0 * PI) - PI).abs() < EPS);
    assert!((normalize_angle(5.0 * FRAC_PI_2) - FRAC_PI_2).abs() < EPS);
    // -pi is excluded from the range, pi is included
    assert!((normalize_angle(-PI) - PI).abs() < EPS);
    assert!((normalize_angle(PI) - PI).abs() < EPS);
}

#[test]
fn test_normalized_angles_stay_in_range() {
    let mut angle = -20.0;
    while angle < 20.0 {
        let folded = normalize_angle(angle);
        assert!(folded > -PI && folded <= PI, "angle {} folded to {}", angle, folded);
        angle += 0.1;
    }
}

#[test]
fn test_bearing_of_cardinal_directions() {
    assert!((bearing_of(1.0, 0.0)).abs() < EPS);
    assert!((bearing_of(0.0, 1.0) - FRAC_PI_2).abs() < EPS);
    assert!((bearing_of(-1.0, 0.0) - PI).abs() < EPS);
    assert!((bearing_of(0.0, -1.0) + FRAC_PI_2).abs() < EPS);
}

#[test]
fn test_bearing_between_positions() {
    let from = Position2D::new(10.0, 10.0);
    let to = Position2D::new(10.0, 25.0);
    assert!((bearing_between(&from, &to) - FRAC_PI_2).abs() < EPS);
}

#[test]
fn test_angular_difference_is_shortest_distance() {
    assert!((angular_difference(0.1, -0.1) - 0.2).abs() < EPS);
    // across the pi discontinuity the short way is taken
    assert!((angular_difference(PI - 0.1, -PI + 0.1) - 0.2).abs() < EPS);
    assert!((angular_difference(-PI + 0.1, PI - 0.1) - 0.2).abs() < EPS);
    // symmetric in its arguments
    assert!(
        (angular_difference(1.0, 2.5) - angular_difference(2.5, 1.0)).abs() < EPS
    );
    // never exceeds pi
    assert!(angular_difference(PI, 0.0) <= PI + EPS);
}
