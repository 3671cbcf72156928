use std::collections::BTreeMap;

use crate::cubic_spline::CubicSpline;
use crate::error::RoadError;
use crate::lane::Lane;

/// Stretch of road with a fixed set of lanes, starting at `s0`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LaneSection {
    pub s0: f64,
    pub id_to_lane: BTreeMap<i32, Lane>,
}

impl LaneSection {
    pub fn new(s0: f64) -> Self {
        Self {
            s0,
            id_to_lane: BTreeMap::new(),
        }
    }

    pub fn add_lane(&mut self, lane: Lane) {
        self.id_to_lane.insert(lane.id, lane);
    }

    pub fn with_lane(mut self, lane: Lane) -> Self {
        self.add_lane(lane);
        self
    }

    /// Lanes ordered by id.
    pub fn lanes(&self) -> impl Iterator<Item = &Lane> + '_ {
        self.id_to_lane.values()
    }

    pub fn get_lane_by_id(&self, id: i32) -> Option<&Lane> {
        self.id_to_lane.get(&id)
    }

    /// Lane containing the lateral offset `t` at station `s`.
    ///
    /// Offsets left of the center lane are searched outward through the left
    /// lanes, offsets right of it through the right lanes. Past the last lane
    /// the outermost lane of that side is returned.
    pub fn get_lane(&self, s: f64, t: f64) -> Option<&Lane> {
        let center = self.id_to_lane.get(&0);
        let t_center = center.map(|l| l.outer_border.get(s)).unwrap_or(0.0);

        if t > t_center {
            let mut outermost = None;
            for lane in self.id_to_lane.range(1..).map(|(_, l)| l) {
                if lane.contains(s, t) {
                    return Some(lane);
                }
                outermost = Some(lane);
            }
            if outermost.is_some() {
                return outermost;
            }
        } else if t < t_center {
            let mut outermost = None;
            for lane in self.id_to_lane.range(..0).rev().map(|(_, l)| l) {
                if lane.contains(s, t) {
                    return Some(lane);
                }
                outermost = Some(lane);
            }
            if outermost.is_some() {
                return outermost;
            }
        }
        center.or_else(|| {
            self.id_to_lane
                .values()
                .min_by_key(|lane| lane.id.abs())
        })
    }

    pub fn get_lane_id(&self, s: f64, t: f64) -> Option<i32> {
        self.get_lane(s, t).map(|lane| lane.id)
    }

    /// Derives every lane border from the lane widths. The center lane sits
    /// on `lane_offset`; left lanes stack outward by their width, right lanes
    /// by the negated width.
    pub fn build_borders(&mut self, lane_offset: &CubicSpline) {
        if let Some(center) = self.id_to_lane.get_mut(&0) {
            center.inner_border = lane_offset.clone();
            center.outer_border = lane_offset.clone();
        }

        let mut border = lane_offset.clone();
        for (_, lane) in self.id_to_lane.range_mut(1..) {
            lane.inner_border = border.clone();
            border = border.add(&lane.lane_width);
            lane.outer_border = border.clone();
        }

        let mut border = lane_offset.clone();
        for (_, lane) in self.id_to_lane.range_mut(..0).rev() {
            lane.inner_border = border.clone();
            border = border.add(&lane.lane_width.negate());
            lane.outer_border = border.clone();
        }
    }

    pub fn validate(&self) -> Result<(), RoadError> {
        if !self.id_to_lane.is_empty() && !self.id_to_lane.contains_key(&0) {
            return Err(RoadError::MissingCenterLane { s0: self.s0 });
        }
        Ok(())
    }
}
