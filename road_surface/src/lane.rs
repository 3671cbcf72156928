use crate::cubic_spline::CubicSpline;
use crate::station_map::StationMap;

/// Height added at the inner and outer border of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct HeightOffset {
    pub inner: f64,
    pub outer: f64,
}

/// A lane inside a lane section. Positive ids lie left of the reference
/// line, negative ids right of it, id 0 is the center lane.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lane {
    pub id: i32,
    /// Keep the lane flat instead of following crossfall.
    #[serde(default)]
    pub level: bool,
    /// Width as a function of `s`; only used to derive the borders.
    #[serde(default)]
    pub lane_width: CubicSpline,
    #[serde(default)]
    pub inner_border: CubicSpline,
    #[serde(default)]
    pub outer_border: CubicSpline,
    #[serde(default)]
    pub s_to_height_offset: StationMap<HeightOffset>,
}

impl Lane {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_borders(mut self, inner_border: CubicSpline, outer_border: CubicSpline) -> Self {
        self.inner_border = inner_border;
        self.outer_border = outer_border;
        self
    }

    pub fn with_width(mut self, lane_width: CubicSpline) -> Self {
        self.lane_width = lane_width;
        self
    }

    pub fn with_level(mut self, level: bool) -> Self {
        self.level = level;
        self
    }

    pub fn add_height_offset(&mut self, s: f64, inner: f64, outer: f64) {
        self.s_to_height_offset.insert(s, HeightOffset { inner, outer });
    }

    /// `(t_inner, t_outer)` at station `s`.
    pub fn get_t_range(&self, s: f64) -> (f64, f64) {
        (self.inner_border.get(s), self.outer_border.get(s))
    }

    /// Checks whether `t` lies between the lane borders at `s`.
    pub fn contains(&self, s: f64, t: f64) -> bool {
        let (t_inner, t_outer) = self.get_t_range(s);
        t >= t_inner.min(t_outer) && t <= t_inner.max(t_outer)
    }

    /// Height offset at `(s, t)`: linear across the lane between the inner
    /// and outer value, and linear in `s` towards the next entry.
    pub fn get_height_offset(&self, s: f64, t: f64) -> f64 {
        let Some(idx) = self.s_to_height_offset.floor_index(s) else {
            return 0.0;
        };
        let Some((s_entry, offset)) = self.s_to_height_offset.entry(idx) else {
            return 0.0;
        };
        let (t_inner, t_outer) = self.get_t_range(s);
        let p_t = if t_outer != t_inner {
            (t - t_inner) / (t_outer - t_inner)
        } else {
            0.0
        };

        let mut height = p_t * (offset.outer - offset.inner) + offset.inner;
        if let Some((s_next, next)) = self.s_to_height_offset.next(idx) {
            let ds = s_next - s_entry;
            let dh_inner = (next.inner - offset.inner) / ds * (s - s_entry);
            let dh_outer = (next.outer - offset.outer) / ds * (s - s_entry);
            height += p_t * (dh_outer - dh_inner) + dh_inner;
        }
        height
    }
}
