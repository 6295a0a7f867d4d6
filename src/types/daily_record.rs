use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, Div};

/// Daily averages for one calendar day of weather-station observations.
///
/// Wind is stored as its Cartesian components (`speed * cos(angle)`, `speed * sin(angle)`)
/// so averaging several samples is a plain vector mean instead of a circular mean of angles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyRecord {
    pub temperature: f64, // Temperature (C)
    pub wind_x: f64,      // Wind_X (m/s)
    pub wind_y: f64,      // Wind_Y (m/s)
    pub humidity: f64,    // Humidity (%)
    pub pressure: f64,    // Pressure (Pa)
}

impl DailyRecord {
    /// Column names used when a daily record is written to or read from a compact file.
    pub const FIELD_NAMES: [&'static str; 5] =
        ["Temperature", "Wind_X", "Wind_Y", "Humidity", "Pressure"];

    /// Field values in `FIELD_NAMES` order.
    pub fn to_array(&self) -> [f64; 5] {
        [
            self.temperature,
            self.wind_x,
            self.wind_y,
            self.humidity,
            self.pressure,
        ]
    }

    pub fn from_array(values: [f64; 5]) -> Self {
        let [temperature, wind_x, wind_y, humidity, pressure] = values;
        Self {
            temperature,
            wind_x,
            wind_y,
            humidity,
            pressure,
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.to_array().to_vec()
    }
}

impl AddAssign for DailyRecord {
    fn add_assign(&mut self, rhs: Self) {
        self.temperature += rhs.temperature;
        self.wind_x += rhs.wind_x;
        self.wind_y += rhs.wind_y;
        self.humidity += rhs.humidity;
        self.pressure += rhs.pressure;
    }
}

impl Div<f64> for DailyRecord {
    type Output = DailyRecord;

    fn div(self, rhs: f64) -> Self::Output {
        DailyRecord::from_array(self.to_array().map(|v| v / rhs))
    }
}
