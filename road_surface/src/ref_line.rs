//! Reference line: planar geometry pieces plus an elevation profile.

use crate::config::Tolerances;
use crate::cubic_spline::CubicSpline;
use crate::error::RoadError;
use crate::geometry::RoadGeometry;
use crate::math::{Vec2D, Vec3D};
use crate::station_map::StationMap;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RefLine {
    pub road_id: String,
    pub length: f64,
    #[serde(default)]
    pub elevation_profile: CubicSpline,
    pub s0_to_geometry: StationMap<RoadGeometry>,
}

impl RefLine {
    pub fn new(road_id: impl Into<String>, length: f64) -> Self {
        Self {
            road_id: road_id.into(),
            length,
            ..Self::default()
        }
    }

    /// Adds a piece keyed by its start station.
    pub fn add_geometry(&mut self, geometry: impl Into<RoadGeometry>) {
        let geometry = geometry.into();
        self.s0_to_geometry.insert(geometry.s_start(), geometry);
    }

    pub fn with_geometry(mut self, geometry: impl Into<RoadGeometry>) -> Self {
        self.add_geometry(geometry);
        self
    }

    pub fn with_elevation(mut self, elevation_profile: CubicSpline) -> Self {
        self.elevation_profile = elevation_profile;
        self
    }

    /// Start station of the piece active at `s`.
    pub fn get_geometry_s0(&self, s: f64) -> Option<f64> {
        self.s0_to_geometry.floor(s).map(|(s0, _)| s0)
    }

    pub fn get_geometry(&self, s: f64) -> Option<&RoadGeometry> {
        self.s0_to_geometry.floor(s).map(|(_, g)| g)
    }

    pub fn get_geometries(&self) -> impl Iterator<Item = &RoadGeometry> + '_ {
        self.s0_to_geometry.values()
    }

    /// Point on the reference line at `s`, lifted by the elevation profile.
    pub fn get_xyz(&self, s: f64) -> Vec3D {
        let pt = self
            .get_geometry(s)
            .map(|g| g.get_point(s, 0.0))
            .unwrap_or_else(Vec2D::zeros);
        Vec3D::new(pt.x, pt.y, self.elevation_profile.get(s))
    }

    /// `(dx/ds, dy/ds, dz/ds)`; the planar part has unit length.
    pub fn get_grad(&self, s: f64) -> Vec3D {
        let grad = self
            .get_geometry(s)
            .map(|g| g.get_grad(s))
            .unwrap_or_else(Vec2D::zeros);
        Vec3D::new(grad.x, grad.y, self.elevation_profile.get_grad(s))
    }

    pub fn get_heading(&self, s: f64) -> f64 {
        self.get_geometry(s).map(|g| g.get_heading(s)).unwrap_or(0.0)
    }

    /// Station of the reference line point nearest to `(x, y)`.
    pub fn match_point(&self, x: f64, y: f64) -> f64 {
        self.match_point_with(x, y, &Tolerances::default())
    }

    pub fn match_point_with(&self, x: f64, y: f64, tol: &Tolerances) -> f64 {
        let target = Vec2D::new(x, y);
        let mut best: Option<(f64, f64)> = None;
        for geometry in self.s0_to_geometry.values() {
            let s = geometry.project_with(x, y, tol);
            let dist = (geometry.get_point(s, 0.0) - target).norm();
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((s, dist)),
            }
        }
        best.map(|(s, _)| s).unwrap_or(0.0)
    }

    /// Checks that the pieces tile `[0, length]` without gaps.
    pub fn validate(&self, tol: &Tolerances) -> Result<(), RoadError> {
        let (first_s0, _) = self.s0_to_geometry.first().ok_or(RoadError::EmptyRefLine)?;
        if first_s0.abs() > tol.tiling_tolerance {
            return Err(RoadError::RefLineGap {
                s_end: 0.0,
                s_next: first_s0,
            });
        }
        for geometry in self.s0_to_geometry.values() {
            geometry.validate()?;
        }
        let pieces: Vec<&RoadGeometry> = self.s0_to_geometry.values().collect();
        for pair in pieces.windows(2) {
            let s_end = pair[0].s_end();
            let s_next = pair[1].s_start();
            if (s_end - s_next).abs() > tol.tiling_tolerance {
                return Err(RoadError::RefLineGap { s_end, s_next });
            }
        }
        let actual = pieces.last().map(|g| g.s_end()).unwrap_or(0.0);
        if (actual - self.length).abs() > tol.tiling_tolerance {
            return Err(RoadError::RefLineLength {
                expected: self.length,
                actual,
            });
        }
        Ok(())
    }

    /// Sorted stations in `[s_start, s_end]` sampling the line within `eps`.
    pub fn approximate_linear(&self, eps: f64, s_start: f64, s_end: f64) -> Vec<f64> {
        let mut stations = vec![s_start, s_end];
        for geometry in self.s0_to_geometry.values() {
            if geometry.s_end() < s_start || geometry.s_start() > s_end {
                continue;
            }
            stations.extend(
                geometry
                    .approximate_linear(eps)
                    .into_iter()
                    .filter(|s| *s >= s_start && *s <= s_end),
            );
        }
        stations.extend(
            self.elevation_profile
                .s0_to_poly
                .keys()
                .filter(|s| *s > s_start && *s < s_end),
        );
        stations.sort_by(|a, b| a.total_cmp(b));
        stations.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        stations
    }

    /// 3D polyline along the reference line.
    pub fn get_line(&self, s_start: f64, s_end: f64, eps: f64) -> Vec<Vec3D> {
        self.approximate_linear(eps, s_start, s_end)
            .into_iter()
            .map(|s| self.get_xyz(s))
            .collect()
    }
}
