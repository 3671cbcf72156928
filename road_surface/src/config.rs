//! Numerical settings for projection and validation.

/// Tolerances shared by the numerical routines.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Iteration cap for the bounded 1D minimization.
    pub max_iterations: usize,
    /// Stop width of the minimization as a fraction of the searched interval.
    pub relative_tolerance: f64,
    /// Samples taken to bracket the global minimum before refinement.
    pub coarse_samples: usize,
    /// Allowed gap between consecutive reference line pieces, in meters.
    pub tiling_tolerance: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            relative_tolerance: 1e-6,
            coarse_samples: 32,
            tiling_tolerance: 1e-6,
        }
    }
}

impl Tolerances {
    /// Parses tolerances from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
