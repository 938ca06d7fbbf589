//! Crop viability profiles
//!
//! Ranges were tuned by hand for the Milagro (Ecuador) campus station.

use serde::{Deserialize, Serialize};

use super::reading::ReadingField;
use crate::types::Language;

/// Crops supported by the classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Crop {
    Tomato,
    Banana,
    Cacao,
    Rice,
    Maize,
}

impl Crop {
    /// Fixed prediction order
    pub const ALL: [Crop; 5] = [Crop::Tomato, Crop::Banana, Crop::Cacao, Crop::Rice, Crop::Maize];

    pub fn name(&self, language: Language) -> &'static str {
        match (self, language) {
            (Crop::Tomato, Language::English) => "Tomato",
            (Crop::Banana, Language::English) => "Banana",
            (Crop::Cacao, Language::English) => "Cacao",
            (Crop::Rice, Language::English) => "Rice",
            (Crop::Maize, Language::English) => "Maize",
            (Crop::Tomato, Language::Spanish) => "Tomate",
            (Crop::Banana, Language::Spanish) => "Banana",
            (Crop::Cacao, Language::Spanish) => "Cacao",
            (Crop::Rice, Language::Spanish) => "Arroz",
            (Crop::Maize, Language::Spanish) => "Maíz",
        }
    }

    /// Column header used for this crop in the historical CSV
    pub fn csv_column(&self) -> &'static str {
        match self {
            Crop::Tomato => "Tomate",
            Crop::Banana => "Banana",
            Crop::Cacao => "Cacao",
            Crop::Rice => "Arroz",
            Crop::Maize => "Maiz",
        }
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name(Language::English))
    }
}

/// Acceptable range for one dimension, peaking at `optimum`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub optimum: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64, optimum: f64) -> Self {
        Self { min, max, optimum }
    }

    /// Closed-interval membership
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Which bound `value` falls past, if any
    pub fn violated_side(&self, value: f64) -> Option<BoundSide> {
        if value < self.min {
            Some(BoundSide::Below)
        } else if value > self.max {
            Some(BoundSide::Above)
        } else {
            None
        }
    }
}

/// Dimensions used for per-crop scoring
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScoredDimension {
    Temperature,
    Humidity,
    Precipitation,
}

impl ScoredDimension {
    pub const ALL: [ScoredDimension; 3] = [
        ScoredDimension::Temperature,
        ScoredDimension::Humidity,
        ScoredDimension::Precipitation,
    ];

    /// Reading field this dimension is scored on
    pub fn reading_field(&self) -> ReadingField {
        match self {
            ScoredDimension::Temperature => ReadingField::Temperature,
            ScoredDimension::Humidity => ReadingField::RelativeHumidity,
            ScoredDimension::Precipitation => ReadingField::Precipitation,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ScoredDimension::Temperature => "°C",
            ScoredDimension::Humidity => "%",
            ScoredDimension::Precipitation => "mm",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BoundSide {
    Below,
    Above,
}

/// A viability bound the reading failed to meet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundViolation {
    pub dimension: ScoredDimension,
    pub side: BoundSide,
    pub value: f64,
    pub limit: f64,
}

impl BoundViolation {
    /// Human-readable clause, e.g. "temperature too low (18°C < 20°C)"
    pub fn describe(&self, language: Language) -> String {
        let unit = self.dimension.unit();
        let phrase = match (language, self.dimension, self.side) {
            (Language::English, ScoredDimension::Temperature, BoundSide::Below) => "temperature too low",
            (Language::English, ScoredDimension::Temperature, BoundSide::Above) => "temperature too high",
            (Language::English, ScoredDimension::Humidity, BoundSide::Below) => "humidity too low",
            (Language::English, ScoredDimension::Humidity, BoundSide::Above) => "humidity too high",
            (Language::English, ScoredDimension::Precipitation, BoundSide::Below) => "precipitation too low",
            (Language::English, ScoredDimension::Precipitation, BoundSide::Above) => "precipitation too high",
            (Language::Spanish, ScoredDimension::Temperature, BoundSide::Below) => "temp. muy baja",
            (Language::Spanish, ScoredDimension::Temperature, BoundSide::Above) => "temp. muy alta",
            (Language::Spanish, ScoredDimension::Humidity, BoundSide::Below) => "humedad baja",
            (Language::Spanish, ScoredDimension::Humidity, BoundSide::Above) => "humedad alta",
            (Language::Spanish, ScoredDimension::Precipitation, BoundSide::Below) => "lluvia insuficiente",
            (Language::Spanish, ScoredDimension::Precipitation, BoundSide::Above) => "lluvia excesiva",
        };
        let op = match self.side {
            BoundSide::Below => '<',
            BoundSide::Above => '>',
        };
        format!("{} ({}{} {} {}{})", phrase, self.value, unit, op, self.limit, unit)
    }
}

/// Scoring ranges for one crop
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CropProfile {
    pub crop: Crop,
    pub temperature: Range,
    pub humidity: Range,
    pub precipitation: Range,
    /// Whether the humidity range is part of the boolean viability rule.
    /// Confidence always uses all three ranges.
    pub humidity_gates_viability: bool,
}

impl CropProfile {
    pub fn range(&self, dimension: ScoredDimension) -> &Range {
        match dimension {
            ScoredDimension::Temperature => &self.temperature,
            ScoredDimension::Humidity => &self.humidity,
            ScoredDimension::Precipitation => &self.precipitation,
        }
    }

    /// Dimensions that decide the viable/not-viable flag
    pub fn gating_dimensions(&self) -> impl Iterator<Item = ScoredDimension> + '_ {
        ScoredDimension::ALL
            .into_iter()
            .filter(move |d| *d != ScoredDimension::Humidity || self.humidity_gates_viability)
    }
}

pub static CROP_PROFILES: [CropProfile; 5] = [
    CropProfile {
        crop: Crop::Tomato,
        temperature: Range::new(20.0, 32.0, 26.0),
        humidity: Range::new(50.0, 85.0, 70.0),
        precipitation: Range::new(1.0, 15.0, 8.0),
        humidity_gates_viability: true,
    },
    CropProfile {
        crop: Crop::Banana,
        temperature: Range::new(20.0, 32.0, 27.0),
        humidity: Range::new(60.0, 90.0, 80.0),
        precipitation: Range::new(2.0, 35.0, 15.0),
        humidity_gates_viability: false,
    },
    CropProfile {
        crop: Crop::Cacao,
        temperature: Range::new(21.0, 32.0, 25.0),
        humidity: Range::new(70.0, 95.0, 85.0),
        precipitation: Range::new(0.0, 45.0, 10.0),
        humidity_gates_viability: false,
    },
    CropProfile {
        crop: Crop::Rice,
        temperature: Range::new(22.0, 32.0, 28.0),
        humidity: Range::new(70.0, 95.0, 85.0),
        precipitation: Range::new(2.0, 30.0, 12.0),
        humidity_gates_viability: false,
    },
    CropProfile {
        crop: Crop::Maize,
        temperature: Range::new(20.0, 32.0, 26.0),
        humidity: Range::new(50.0, 80.0, 65.0),
        precipitation: Range::new(1.0, 20.0, 8.0),
        humidity_gates_viability: false,
    },
];

/// Look up the standard profile for a crop
pub fn crop_profile(crop: Crop) -> Option<&'static CropProfile> {
    CROP_PROFILES.iter().find(|p| p.crop == crop)
}
