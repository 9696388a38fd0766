//! User configuration as supplied by a settings store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::method::CalculationMethod;
use crate::times::PrayerTimeSet;
use crate::{compute_prayer_times, local_offset_hours, GeoCoordinate};

/// Location and method preferences.
///
/// Absent fields fall back to Makkah (21.4225° N, 39.8262° E) and the ISNA
/// method. A missing `timezone` means the device's local offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub city_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub method: String,
    pub timezone: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            city_name: None,
            latitude: 21.4225,
            longitude: 39.8262,
            method: CalculationMethod::default().name().into(),
            timezone: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        log::debug!("loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rejects coordinates outside the valid latitude/longitude ranges.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidLatitude {
                value: self.latitude,
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidLongitude {
                value: self.longitude,
            });
        }
        Ok(())
    }

    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }

    pub fn calculation_method(&self) -> CalculationMethod {
        CalculationMethod::from_name(&self.method)
    }

    pub fn timezone_for(&self, date: NaiveDate) -> f64 {
        self.timezone.unwrap_or_else(|| local_offset_hours(date))
    }

    pub fn prayer_times(&self, date: NaiveDate) -> PrayerTimeSet {
        compute_prayer_times(
            date,
            self.coordinate(),
            self.calculation_method(),
            self.timezone_for(date),
        )
    }
}
