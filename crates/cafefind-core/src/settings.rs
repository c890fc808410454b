//! User-adjustable search settings.

use serde::{Deserialize, Serialize};

use crate::CoreError;

pub const MIN_RADIUS_M: u32 = 500;
pub const MAX_RADIUS_M: u32 = 10_000;
pub const MAX_RESULTS_CAP: u32 = 50;

pub const DEFAULT_RADIUS_M: u32 = 5_000;
pub const DEFAULT_MIN_RESULTS: u32 = 5;
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Whether results are limited to venues open right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningFilter {
    #[default]
    Anytime,
    OpenNow,
}

/// Where the search point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMode {
    /// The device's positioning sensor.
    Current,
    /// The centre of the map viewport, or coordinates given explicitly.
    MapCenter,
}

impl LocationMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LocationMode::Current => "current",
            LocationMode::MapCenter => "map_center",
        }
    }
}

/// Parameters for one search.
///
/// Callers own this value and pass it into each search; changing it never
/// affects a search that is already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub radius_m: u32,
    /// Below this many fresh cached venues the external source is queried.
    pub min_results: u32,
    pub max_results: u32,
    pub opening_filter: OpeningFilter,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_RADIUS_M,
            min_results: DEFAULT_MIN_RESULTS,
            max_results: DEFAULT_MAX_RESULTS,
            opening_filter: OpeningFilter::Anytime,
        }
    }
}

impl SearchSettings {
    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSettings`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(MIN_RADIUS_M..=MAX_RADIUS_M).contains(&self.radius_m) {
            return Err(CoreError::InvalidSettings(format!(
                "radius_m must be within [{MIN_RADIUS_M}, {MAX_RADIUS_M}], got {}",
                self.radius_m
            )));
        }
        if !(1..=MAX_RESULTS_CAP).contains(&self.max_results) {
            return Err(CoreError::InvalidSettings(format!(
                "max_results must be within [1, {MAX_RESULTS_CAP}], got {}",
                self.max_results
            )));
        }
        if self.min_results > self.max_results {
            return Err(CoreError::InvalidSettings(format!(
                "min_results ({}) must not exceed max_results ({})",
                self.min_results, self.max_results
            )));
        }
        Ok(())
    }

    /// Search radius in kilometres, as the store's proximity query expects.
    #[must_use]
    pub fn radius_km(&self) -> f64 {
        f64::from(self.radius_m) / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = SearchSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.radius_m, 5_000);
        assert_eq!(settings.min_results, 5);
        assert_eq!(settings.max_results, 20);
        assert_eq!(settings.opening_filter, OpeningFilter::Anytime);
    }

    #[test]
    fn radius_outside_bounds_is_rejected() {
        let too_small = SearchSettings {
            radius_m: MIN_RADIUS_M - 1,
            ..SearchSettings::default()
        };
        let too_large = SearchSettings {
            radius_m: MAX_RADIUS_M + 1,
            ..SearchSettings::default()
        };
        assert!(too_small.validate().is_err());
        assert!(too_large.validate().is_err());
    }

    #[test]
    fn radius_bounds_are_inclusive() {
        for radius_m in [MIN_RADIUS_M, MAX_RADIUS_M] {
            let settings = SearchSettings {
                radius_m,
                ..SearchSettings::default()
            };
            assert!(settings.validate().is_ok(), "radius {radius_m} should pass");
        }
    }

    #[test]
    fn zero_max_results_is_rejected() {
        let settings = SearchSettings {
            max_results: 0,
            min_results: 0,
            ..SearchSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn min_above_max_is_rejected() {
        let settings = SearchSettings {
            min_results: 30,
            max_results: 10,
            ..SearchSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn radius_km_converts_meters() {
        let settings = SearchSettings {
            radius_m: 2_500,
            ..SearchSettings::default()
        };
        assert!((settings.radius_km() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn opening_filter_uses_snake_case() {
        let json = serde_json::to_string(&OpeningFilter::OpenNow).unwrap();
        assert_eq!(json, "\"open_now\"");
        let parsed: OpeningFilter = serde_json::from_str("\"anytime\"").unwrap();
        assert_eq!(parsed, OpeningFilter::Anytime);
    }

    #[test]
    fn location_mode_labels() {
        assert_eq!(LocationMode::Current.as_str(), "current");
        assert_eq!(LocationMode::MapCenter.as_str(), "map_center");
    }
}
