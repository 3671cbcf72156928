//! Road surface evaluation: `(s, t, h)` to world coordinates.

use crate::config::Tolerances;
use crate::cubic_spline::CubicSpline;
use crate::error::RoadError;
use crate::lane::Lane;
use crate::lane_section::LaneSection;
use crate::math::{normalize, Mat3D, Vec2D, Vec3D};
use crate::ref_line::RefLine;
use crate::station_map::StationMap;
use crate::superelevation::{Crossfall, Superelevation};

/// A road with its reference line, cross-section profiles and lane sections.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Road {
    pub id: String,
    pub length: f64,
    pub ref_line: RefLine,
    #[serde(default)]
    pub lane_offset: CubicSpline,
    #[serde(default)]
    pub superelevation: Superelevation,
    #[serde(default)]
    pub crossfall: Crossfall,
    #[serde(default)]
    pub s_to_lanesection: StationMap<LaneSection>,
}

impl Road {
    pub fn new(id: impl Into<String>, length: f64, ref_line: RefLine) -> Self {
        Self {
            id: id.into(),
            length,
            ref_line,
            lane_offset: CubicSpline::new(),
            superelevation: Superelevation::default(),
            crossfall: Crossfall::default(),
            s_to_lanesection: StationMap::new(),
        }
    }

    pub fn with_superelevation(mut self, superelevation: Superelevation) -> Self {
        self.superelevation = superelevation;
        self
    }

    pub fn with_crossfall(mut self, crossfall: Crossfall) -> Self {
        self.crossfall = crossfall;
        self
    }

    pub fn with_lane_offset(mut self, lane_offset: CubicSpline) -> Self {
        self.lane_offset = lane_offset;
        self
    }

    /// Adds a section whose lane borders are already populated.
    pub fn add_lanesection(&mut self, section: LaneSection) {
        self.s_to_lanesection.insert(section.s0, section);
    }

    /// Adds a section after deriving its lane borders from the lane widths
    /// and the road's lane offset.
    pub fn add_lanesection_from_widths(&mut self, mut section: LaneSection) {
        section.build_borders(&self.lane_offset);
        self.add_lanesection(section);
    }

    /// All lane sections ordered by start station.
    pub fn get_lanesections(&self) -> Vec<&LaneSection> {
        self.s_to_lanesection.values().collect()
    }

    /// Section with the greatest start station not exceeding `s`; the first
    /// section before it. `None` only when the road has no sections.
    pub fn get_lanesection(&self, s: f64) -> Option<&LaneSection> {
        self.s_to_lanesection.floor(s).map(|(_, section)| section)
    }

    pub fn get_lanesection_s0(&self, s: f64) -> Option<f64> {
        self.s_to_lanesection.floor(s).map(|(s0, _)| s0)
    }

    /// End station of the section starting at `s0`: the next start, or the
    /// road length for the last one.
    pub fn get_lanesection_end(&self, s0: f64) -> f64 {
        self.s_to_lanesection
            .keys()
            .find(|k| *k > s0)
            .unwrap_or(self.length)
    }

    pub fn get_lanesection_length(&self, s0: f64) -> f64 {
        self.get_lanesection_end(s0) - s0
    }

    pub fn get_lane(&self, s: f64, t: f64) -> Option<(&LaneSection, &Lane)> {
        let section = self.get_lanesection(s)?;
        let lane = section.get_lane(s, t)?;
        Some((section, lane))
    }

    /// Local frame at `s`. Columns are the lateral axis `e_t`, the surface
    /// normal `e_h` and the reference line point, so that
    /// `M · (t, h, 1)` is the world position.
    pub fn get_transformation_matrix(&self, s: f64) -> Mat3D {
        let s_vec = self.ref_line.get_grad(s);
        let superelevation = self.superelevation.get(s);

        // the roll lift scales with |dy/ds| on purpose
        let e_t = normalize(Vec3D::new(
            -s_vec.y,
            s_vec.x,
            superelevation.tan() * s_vec.y.abs(),
        ));
        let e_h = normalize(s_vec.cross(&e_t));
        let p0 = self.ref_line.get_xyz(s);

        Mat3D::from_columns(&[e_t, e_h, p0])
    }

    pub fn get_xyz(&self, s: f64, t: f64, h: f64) -> Vec3D {
        self.get_transformation_matrix(s) * Vec3D::new(t, h, 1.0)
    }

    /// Point on the road surface at `(s, t)`, following crossfall, level
    /// lanes and lane height offsets.
    pub fn get_surface_pt(&self, s: f64, t: f64) -> Vec3D {
        let Some(section) = self.get_lanesection(s) else {
            log::warn!("road #{} - could not get lane section for s: {:.2}", self.id, s);
            return self.get_xyz(s, t, 0.0);
        };
        let Some(lane) = section.get_lane(s, t) else {
            log::warn!(
                "road #{} - lane section at s: {:.2} has no lanes",
                self.id,
                section.s0
            );
            return self.get_xyz(s, t, 0.0);
        };
        self.get_xyz(s, t, self.surface_height(s, t, lane))
    }

    /// Height above the reference plane at `(s, t)` inside `lane`.
    fn surface_height(&self, s: f64, t: f64, lane: &Lane) -> f64 {
        let t_inner = lane.inner_border.get(s);
        let crossfall = self.crossfall.get_crossfall(s, lane.id > 0);

        let h_t = if lane.level {
            // drop the crossfall beyond the inner border and follow the
            // superelevation outward instead
            let h_inner = -crossfall.tan() * t_inner.abs();
            h_inner + self.superelevation.get(s).tan() * (t - t_inner)
        } else {
            -crossfall.tan() * t.abs()
        };

        h_t + lane.get_height_offset(s, t)
    }

    /// Surface point on the inner or outer border of lane `lane_id` at `s`.
    pub fn get_lane_border_pt(&self, s: f64, lane_id: i32, outer: bool) -> Option<Vec3D> {
        let lane = self.get_lanesection(s)?.get_lane_by_id(lane_id)?;
        let t = if outer {
            lane.outer_border.get(s)
        } else {
            lane.inner_border.get(s)
        };
        Some(self.get_xyz(s, t, self.surface_height(s, t, lane)))
    }

    /// Road coordinates `(s, t)` of the world point `(x, y)`; `t` is the
    /// signed planar distance, positive to the left.
    pub fn get_st(&self, x: f64, y: f64) -> (f64, f64) {
        let s = self.ref_line.match_point(x, y);
        let origin = self.ref_line.get_xyz(s).xy();
        let grad = self.ref_line.get_grad(s).xy();
        let d = Vec2D::new(x, y) - origin;
        (s, grad.x * d.y - grad.y * d.x)
    }

    pub fn validate(&self, tol: &Tolerances) -> Result<(), RoadError> {
        self.ref_line.validate(tol)?;
        if (self.ref_line.length - self.length).abs() > tol.tiling_tolerance {
            return Err(RoadError::RefLineLength {
                expected: self.length,
                actual: self.ref_line.length,
            });
        }
        for section in self.s_to_lanesection.values() {
            section.validate()?;
        }
        Ok(())
    }
}
