use std::f64::consts::FRAC_PI_2;

use road_surface::{
    Arc, CubicSpline, Crossfall, Lane, LaneSection, Line, Poly3, RefLine, Road, Side, Spiral,
    Superelevation, Vec3D,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_close(actual: Vec3D, expected: Vec3D) {
    assert!(
        (actual - expected).norm() < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

fn straight_road(hdg0: f64, length: f64) -> Road {
    let ref_line =
        RefLine::new("1", length).with_geometry(Line::new(0.0, 0.0, 0.0, hdg0, length).unwrap());
    Road::new("1", length, ref_line)
}

/// Center lane, right lane -1 (3.5 m), left lane 1 (3 m) and a level
/// left lane 2 (2 m).
fn four_lane_section() -> LaneSection {
    LaneSection::new(0.0)
        .with_lane(Lane::new(0))
        .with_lane(Lane::new(-1).with_width(CubicSpline::constant(3.5)))
        .with_lane(Lane::new(1).with_width(CubicSpline::constant(3.0)))
        .with_lane(
            Lane::new(2)
                .with_width(CubicSpline::constant(2.0))
                .with_level(true),
        )
}

#[test]
fn straight_road_without_camber() {
    let road = straight_road(0.0, 100.0);
    assert_close(road.get_xyz(50.0, 1.5, 0.0), Vec3D::new(50.0, 1.5, 0.0));
    assert_close(road.get_xyz(50.0, 1.5, 2.0), Vec3D::new(50.0, 1.5, 2.0));
}

#[test]
fn straight_road_surface_point() {
    let mut road = straight_road(0.0, 100.0);
    road.add_lanesection(
        LaneSection::new(0.0)
            .with_lane(Lane::new(0))
            .with_lane(Lane::new(1).with_borders(CubicSpline::constant(0.0), CubicSpline::constant(3.0))),
    );
    assert_close(road.get_surface_pt(50.0, 1.5), Vec3D::new(50.0, 1.5, 0.0));
}

#[test]
fn quarter_circle_arc() {
    let r = 50.0;
    let arc = Arc::new(0.0, 0.0, 0.0, 0.0, FRAC_PI_2 * r, 1.0 / r).unwrap();
    let end = arc.get_point(FRAC_PI_2 * r, 0.0);
    assert!((end.x - 50.0).abs() < 1e-9 && (end.y - 50.0).abs() < 1e-9);
    let grad = arc.get_grad(FRAC_PI_2 * r);
    assert!(grad.x.abs() < 1e-9 && (grad.y - 1.0).abs() < 1e-9);
}

#[test]
fn superelevation_does_not_lift_a_road_along_x() {
    let road = straight_road(0.0, 100.0)
        .with_superelevation(Superelevation::new(CubicSpline::constant(0.1)));
    assert_close(road.get_xyz(50.0, 1.5, 0.0), Vec3D::new(50.0, 1.5, 0.0));
}

#[test]
fn superelevation_lifts_a_road_along_y() {
    let road = straight_road(FRAC_PI_2, 100.0)
        .with_superelevation(Superelevation::new(CubicSpline::constant(0.1)));
    let p = road.get_xyz(50.0, 1.5, 0.0);
    assert_close(p, Vec3D::new(-1.5 * 0.1f64.cos(), 50.0, 1.5 * 0.1f64.sin()));
}

#[test]
fn arc_reference_line() {
    let ref_line =
        RefLine::new("2", 100.0).with_geometry(Arc::new(0.0, 0.0, 0.0, 0.0, 100.0, 0.01).unwrap());
    let road = Road::new("2", 100.0, ref_line);
    let hdg = 0.5f64;
    let on_line = Vec3D::new(100.0 * hdg.sin(), 100.0 * (1.0 - hdg.cos()), 0.0);
    assert_close(road.get_xyz(50.0, 0.0, 0.0), on_line);
    let lateral = Vec3D::new(-hdg.sin(), hdg.cos(), 0.0) * 1.5;
    assert_close(road.get_xyz(50.0, 1.5, 0.0), on_line + lateral);
}

#[test]
fn spiral_reference_line_turns_half_a_radian() {
    let ref_line = RefLine::new("3", 100.0)
        .with_geometry(Spiral::new(0.0, 0.0, 0.0, 0.0, 100.0, 0.0, 0.01).unwrap());
    assert!((ref_line.get_heading(100.0) - 0.5).abs() < 1e-12);
    let grad = ref_line.get_grad(100.0);
    assert!((grad.y.atan2(grad.x) - 0.5).abs() < 1e-9);
}

#[test]
fn elevation_profile_lifts_reference_line() {
    let ref_line = RefLine::new("4", 100.0)
        .with_geometry(Line::new(0.0, 0.0, 0.0, 0.0, 100.0).unwrap())
        .with_elevation(CubicSpline::constant(1.0));
    let road = Road::new("4", 100.0, ref_line);
    assert_close(road.get_xyz(50.0, 1.5, 0.0), Vec3D::new(50.0, 1.5, 1.0));
}

#[test]
fn crossfall_and_level_lanes_shape_the_surface() {
    init_logging();
    let mut crossfall = Crossfall::new();
    crossfall.add_poly(0.0, Poly3::constant(0.05), Side::Both);
    let mut road = straight_road(0.0, 100.0).with_crossfall(crossfall);
    road.add_lanesection_from_widths(four_lane_section());

    let drop = 0.05f64.tan();
    // regular lanes fall away from the reference line on both sides
    assert_close(road.get_surface_pt(10.0, -2.0), Vec3D::new(10.0, -2.0, -2.0 * drop));
    assert_close(road.get_surface_pt(10.0, 2.0), Vec3D::new(10.0, 2.0, -2.0 * drop));
    // the level lane keeps the height of its inner border
    assert_close(road.get_surface_pt(10.0, 4.0), Vec3D::new(10.0, 4.0, -3.0 * drop));
    assert_close(road.get_surface_pt(10.0, 4.9), Vec3D::new(10.0, 4.9, -3.0 * drop));
}

#[test]
fn level_lane_follows_superelevation() {
    let mut road = straight_road(0.0, 100.0)
        .with_superelevation(Superelevation::new(CubicSpline::constant(0.02)));
    road.add_lanesection_from_widths(four_lane_section());
    let p = road.get_surface_pt(10.0, 4.0);
    // the superelevated frame has no z lift along x, so only h_t remains
    assert!((p.z - 0.02f64.tan() * 1.0).abs() < 1e-9);
}

#[test]
fn height_offset_adds_to_the_surface() {
    let mut section = four_lane_section();
    if let Some(lane) = section.id_to_lane.get_mut(&-1) {
        lane.add_height_offset(0.0, 0.0, 0.2);
    }
    let mut road = straight_road(0.0, 100.0);
    road.add_lanesection_from_widths(section);
    let p = road.get_surface_pt(10.0, -3.5);
    assert!((p.z - 0.2).abs() < 1e-9);
}

#[test]
fn station_before_first_lanesection_uses_first_section() {
    init_logging();
    let mut crossfall = Crossfall::new();
    crossfall.add_poly(0.0, Poly3::constant(0.05), Side::Both);
    let mut road = straight_road(0.0, 100.0).with_crossfall(crossfall);
    road.add_lanesection_from_widths(
        LaneSection::new(0.0)
            .with_lane(Lane::new(0))
            .with_lane(Lane::new(1).with_width(CubicSpline::constant(3.0))),
    );

    assert_eq!(road.get_lanesection_s0(-0.5), Some(0.0));
    let p = road.get_surface_pt(-0.5, 2.0);
    assert_close(p, Vec3D::new(-0.5, 2.0, -2.0 * 0.05f64.tan()));
}

#[test]
fn road_without_lanesections_falls_back_to_reference_plane() {
    init_logging();
    let mut crossfall = Crossfall::new();
    crossfall.add_poly(0.0, Poly3::constant(0.05), Side::Both);
    let road = straight_road(0.0, 100.0).with_crossfall(crossfall);
    assert!(road.get_lanesection(10.0).is_none());
    assert_close(road.get_surface_pt(10.0, 1.0), Vec3D::new(10.0, 1.0, 0.0));
}

#[test]
fn level_lanes_take_crossfall_from_their_own_side() {
    let mut crossfall = Crossfall::new();
    crossfall.add_poly(0.0, Poly3::constant(0.05), Side::Right);
    let mut road = straight_road(0.0, 100.0).with_crossfall(crossfall);
    road.add_lanesection_from_widths(
        LaneSection::new(0.0)
            .with_lane(Lane::new(0))
            .with_lane(Lane::new(-1).with_width(CubicSpline::constant(3.5)))
            .with_lane(
                Lane::new(-2)
                    .with_width(CubicSpline::constant(2.0))
                    .with_level(true),
            )
            .with_lane(Lane::new(1).with_width(CubicSpline::constant(3.0)))
            .with_lane(
                Lane::new(2)
                    .with_width(CubicSpline::constant(2.0))
                    .with_level(true),
            ),
    );

    let drop = 0.05f64.tan();
    assert_close(road.get_surface_pt(10.0, -2.0), Vec3D::new(10.0, -2.0, -2.0 * drop));
    // the right level lane holds the crossfall height of its inner border
    assert_close(road.get_surface_pt(10.0, -4.5), Vec3D::new(10.0, -4.5, -3.5 * drop));
    // the left side has no crossfall, so both left lanes stay flat
    assert_close(road.get_surface_pt(10.0, 2.0), Vec3D::new(10.0, 2.0, 0.0));
    assert_close(road.get_surface_pt(10.0, 4.0), Vec3D::new(10.0, 4.0, 0.0));
}

#[test]
fn lane_border_points() {
    let mut crossfall = Crossfall::new();
    crossfall.add_poly(0.0, Poly3::constant(0.05), Side::Both);
    let mut road = straight_road(0.0, 100.0).with_crossfall(crossfall);
    road.add_lanesection_from_widths(four_lane_section());

    let outer = road.get_lane_border_pt(10.0, -1, true).unwrap();
    assert_close(outer, Vec3D::new(10.0, -3.5, -3.5 * 0.05f64.tan()));
    let inner = road.get_lane_border_pt(10.0, -1, false).unwrap();
    assert_close(inner, Vec3D::new(10.0, 0.0, 0.0));
    assert!(road.get_lane_border_pt(10.0, 7, true).is_none());
}

#[test]
fn lane_lookup_through_road() {
    let mut road = straight_road(0.0, 100.0).with_lane_offset(CubicSpline::constant(0.5));
    road.add_lanesection_from_widths(four_lane_section());
    let (_, lane) = road.get_lane(10.0, 3.0).unwrap();
    assert_eq!(lane.id, 1);
    let (_, lane) = road.get_lane(10.0, 0.2).unwrap();
    assert_eq!(lane.id, -1);
}

#[test]
fn road_loads_from_json() {
    let json = r#"{
        "id": "7",
        "length": 100.0,
        "ref_line": {
            "road_id": "7",
            "length": 100.0,
            "elevation_profile": {
                "s0_to_poly": [[0.0, { "s0": 0.0, "a": 1.0, "b": 0.0, "c": 0.0, "d": 0.0 }]]
            },
            "s0_to_geometry": [
                [0.0, { "type": "line", "s0": 0.0, "x0": 0.0, "y0": 0.0, "hdg0": 0.0, "length": 100.0 }]
            ]
        }
    }"#;
    let road: Road = serde_json::from_str(json).unwrap();
    assert_eq!(road.id, "7");
    assert!(road.get_lanesections().is_empty());
    assert_close(road.get_xyz(50.0, 1.5, 0.0), Vec3D::new(50.0, 1.5, 1.0));
}
