//! Climate reading models

use serde::{Deserialize, Serialize};

/// Five climate measurements taken at one point in time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClimateReading {
    /// Air temperature in °C
    pub temperature: f64,
    /// Solar radiation; only its distance to a centroid matters, never its unit
    pub solar_radiation: f64,
    /// Soil moisture in percent
    pub soil_moisture: f64,
    /// Relative humidity in percent
    pub relative_humidity: f64,
    /// Precipitation in mm
    pub precipitation: f64,
}

impl ClimateReading {
    pub const fn new(
        temperature: f64,
        solar_radiation: f64,
        soil_moisture: f64,
        relative_humidity: f64,
        precipitation: f64,
    ) -> Self {
        Self {
            temperature,
            solar_radiation,
            soil_moisture,
            relative_humidity,
            precipitation,
        }
    }

    /// Value of a single field
    pub fn get(&self, field: ReadingField) -> f64 {
        match field {
            ReadingField::Temperature => self.temperature,
            ReadingField::SolarRadiation => self.solar_radiation,
            ReadingField::SoilMoisture => self.soil_moisture,
            ReadingField::RelativeHumidity => self.relative_humidity,
            ReadingField::Precipitation => self.precipitation,
        }
    }
}

/// Fields of a [`ClimateReading`], in distance-vector order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReadingField {
    Temperature,
    SolarRadiation,
    SoilMoisture,
    RelativeHumidity,
    Precipitation,
}

impl ReadingField {
    pub const ALL: [ReadingField; 5] = [
        ReadingField::Temperature,
        ReadingField::SolarRadiation,
        ReadingField::SoilMoisture,
        ReadingField::RelativeHumidity,
        ReadingField::Precipitation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingField::Temperature => "temperature",
            ReadingField::SolarRadiation => "solar_radiation",
            ReadingField::SoilMoisture => "soil_moisture",
            ReadingField::RelativeHumidity => "relative_humidity",
            ReadingField::Precipitation => "precipitation",
        }
    }

    /// Spanish label used in localized error messages
    pub fn label_es(&self) -> &'static str {
        match self {
            ReadingField::Temperature => "temperatura",
            ReadingField::SolarRadiation => "radiación solar",
            ReadingField::SoilMoisture => "humedad del suelo",
            ReadingField::RelativeHumidity => "humedad relativa",
            ReadingField::Precipitation => "pluviometría",
        }
    }
}

impl std::fmt::Display for ReadingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
