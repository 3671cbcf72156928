use std::f64::consts::PI;

use proptest::prelude::*;
use road_surface::{
    Arc, CubicSpline, Line, Mat3D, RefLine, Road, RoadGeometry, Superelevation, Vec3D,
};

fn road_geometry() -> impl Strategy<Value = RoadGeometry> {
    let header = (-100.0..100.0f64, -100.0..100.0f64, -PI..PI);
    prop_oneof![
        header
            .clone()
            .prop_map(|(x0, y0, hdg0)| RoadGeometry::from(Line::new(0.0, x0, y0, hdg0, 100.0).unwrap())),
        (header, 0.001..0.05f64, any::<bool>()).prop_map(|((x0, y0, hdg0), k, left)| {
            let k = if left { k } else { -k };
            RoadGeometry::from(Arc::new(0.0, x0, y0, hdg0, 100.0, k).unwrap())
        }),
    ]
}

fn road(geometry: RoadGeometry, grade: f64, vertical_curve: f64, superelevation: f64) -> Road {
    let mut elevation = CubicSpline::new();
    elevation.add_coefficients(0.0, 10.0, grade, vertical_curve, 0.0);
    let ref_line = RefLine::new("f", 100.0)
        .with_geometry(geometry)
        .with_elevation(elevation);
    Road::new("f", 100.0, ref_line)
        .with_superelevation(Superelevation::new(CubicSpline::constant(superelevation)))
}

fn frame(m: &Mat3D) -> (Vec3D, Vec3D) {
    (m.column(0).into_owned(), m.column(1).into_owned())
}

proptest! {
    #[test]
    fn frame_is_right_handed_orthonormal(
        geometry in road_geometry(),
        grade in -0.1..0.1f64,
        vertical_curve in -1e-3..1e-3f64,
        superelevation in -0.3..0.3f64,
        s in 0.0..=100.0f64,
    ) {
        let road = road(geometry, grade, vertical_curve, superelevation);
        let (e_t, e_h) = frame(&road.get_transformation_matrix(s));
        prop_assert!(e_t.dot(&e_h).abs() < 1e-9);
        prop_assert!((e_t.norm() - 1.0).abs() < 1e-9);
        prop_assert!((e_h.norm() - 1.0).abs() < 1e-9);

        let tangent = road.ref_line.get_grad(s).normalize();
        let rotation = Mat3D::from_columns(&[tangent, e_t, e_h]);
        prop_assert!(rotation.determinant() > 0.0);
    }

    #[test]
    fn frame_origin_is_reference_point(
        geometry in road_geometry(),
        grade in -0.1..0.1f64,
        superelevation in -0.3..0.3f64,
        s in 0.0..=100.0f64,
    ) {
        let road = road(geometry, grade, 0.0, superelevation);
        let m = road.get_transformation_matrix(s);
        let origin: Vec3D = m.column(2).into_owned();
        prop_assert!((origin - road.ref_line.get_xyz(s)).norm() < 1e-9);
        prop_assert!((road.get_xyz(s, 0.0, 0.0) - origin).norm() < 1e-9);
    }

    #[test]
    fn surface_normal_points_up(
        geometry in road_geometry(),
        grade in -0.1..0.1f64,
        superelevation in -0.3..0.3f64,
        s in 0.0..=100.0f64,
    ) {
        let road = road(geometry, grade, 0.0, superelevation);
        let (_, e_h) = frame(&road.get_transformation_matrix(s));
        prop_assert!(e_h.z > 0.0);
    }
}

#[test]
fn flat_road_frame_is_planar() {
    let road = road(
        RoadGeometry::from(Line::new(0.0, 0.0, 0.0, 0.0, 100.0).unwrap()),
        0.0,
        0.0,
        0.0,
    );
    let m = road.get_transformation_matrix(25.0);
    let (e_t, e_h) = frame(&m);
    assert!((e_t - Vec3D::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    assert!((e_h - Vec3D::new(0.0, 0.0, 1.0)).norm() < 1e-12);
}
