use crate::errors::{Error, Result};
use simulator::WearableData;

const BATTERY_MAX: u8 = 100;
const LATITUDE_MIN: f64 = -90.0;
const LATITUDE_MAX: f64 = 90.0;
const LONGITUDE_MIN: f64 = -180.0;
const LONGITUDE_MAX: f64 = 180.0;

/// Validates a wearable sample before it is published to consumers.
pub fn validate(sample: &WearableData) -> Result<()> {
    if sample.battery_level > BATTERY_MAX {
        return Err(Error::Validation(format!(
            "Battery level {} out of range [0, {}]",
            sample.battery_level, BATTERY_MAX
        )));
    }

    if sample.location.latitude < LATITUDE_MIN || sample.location.latitude > LATITUDE_MAX {
        return Err(Error::Validation(format!(
            "Latitude {} out of range [{}, {}]",
            sample.location.latitude, LATITUDE_MIN, LATITUDE_MAX
        )));
    }

    if sample.location.longitude < LONGITUDE_MIN || sample.location.longitude > LONGITUDE_MAX {
        return Err(Error::Validation(format!(
            "Longitude {} out of range [{}, {}]",
            sample.location.longitude, LONGITUDE_MIN, LONGITUDE_MAX
        )));
    }

    Ok(())
}
