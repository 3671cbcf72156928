//! Geometry engine for OpenDRIVE-style road networks.
//!
//! Records are built once by an external loader and only read afterwards:
//! a [`Road`] owns its [`RefLine`], cross-section profiles and
//! [`LaneSection`]s, and maps road coordinates `(s, t, h)` to world space.

pub mod clothoid;
pub mod config;
pub mod cubic_spline;
pub mod error;
pub mod geometry;
pub mod lane;
pub mod lane_section;
pub mod math;
pub mod numeric;
pub mod poly3;
pub mod ref_line;
pub mod road;
pub mod station_map;
pub mod superelevation;

pub use config::Tolerances;
pub use cubic_spline::CubicSpline;
pub use error::{GeometryError, RoadError};
pub use geometry::{Arc, Line, ParamPoly3, Poly3Geometry, RoadGeometry, Spiral};
pub use lane::{HeightOffset, Lane};
pub use lane_section::LaneSection;
pub use math::{Box2D, Mat3D, Vec2D, Vec3D};
pub use poly3::Poly3;
pub use ref_line::RefLine;
pub use road::Road;
pub use station_map::StationMap;
pub use superelevation::{Crossfall, Side, Superelevation};
