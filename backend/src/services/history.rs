//! Historical station readings loaded from the viability CSV

use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use serde::Serialize;
use shared::{
    validate_reading, ClimateCluster, ClimateReading, Crop, HistoricalStats, PaginatedResponse,
    Pagination,
};

use crate::config::HistoryConfig;
use crate::error::{AppError, AppResult};

const DATE_COLUMN: &str = "date";
const TEMPERATURE_COLUMN: &str = "Temperatura";
const RADIATION_COLUMN: &str = "RadiacionsolarpromediokWm2";
const SOIL_MOISTURE_COLUMN: &str = "HumedadSuelo";
const HUMIDITY_COLUMN: &str = "Humedadrelativa";
const PRECIPITATION_COLUMN: &str = "Pluviometria";

/// One row of the historical dataset
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoricalRecord {
    pub date: String,
    pub reading: ClimateReading,
    /// Sí/No flags from the old rule set; the engine's verdict replaces them
    pub legacy_viability: Vec<LegacyFlag>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LegacyFlag {
    pub crop: Crop,
    pub viable: bool,
}

/// Flat row for CSV export
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    date: &'a str,
    temperature: f64,
    solar_radiation: f64,
    soil_moisture: f64,
    relative_humidity: f64,
    precipitation: f64,
}

/// Parsed historical dataset, read-only after startup
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: Vec<HistoricalRecord>,
    readings: Vec<ClimateReading>,
    skipped_rows: usize,
}

struct ColumnIndex {
    date: Option<usize>,
    reading: [usize; 5],
    crops: Vec<(Crop, usize)>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> AppResult<Self> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| AppError::HistoryLoad(format!("missing column {}", name)))
        };

        Ok(Self {
            date: position(DATE_COLUMN),
            reading: [
                required(TEMPERATURE_COLUMN)?,
                required(RADIATION_COLUMN)?,
                required(SOIL_MOISTURE_COLUMN)?,
                required(HUMIDITY_COLUMN)?,
                required(PRECIPITATION_COLUMN)?,
            ],
            crops: Crop::ALL
                .iter()
                .filter_map(|crop| position(crop.csv_column()).map(|i| (*crop, i)))
                .collect(),
        })
    }

    fn parse_row(&self, row: &csv::StringRecord) -> Option<HistoricalRecord> {
        let mut values = [0.0; 5];
        for (slot, index) in values.iter_mut().zip(self.reading) {
            *slot = parse_number(row.get(index)?)?;
        }
        let [temperature, solar_radiation, soil_moisture, relative_humidity, precipitation] = values;
        let reading = ClimateReading {
            temperature,
            solar_radiation,
            soil_moisture,
            relative_humidity,
            precipitation,
        };
        validate_reading(&reading).ok()?;

        let legacy_viability = self
            .crops
            .iter()
            .filter_map(|(crop, index)| {
                parse_flag(row.get(*index)?).map(|viable| LegacyFlag {
                    crop: *crop,
                    viable,
                })
            })
            .collect();

        Some(HistoricalRecord {
            date: self
                .date
                .and_then(|i| row.get(i))
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            reading,
            legacy_viability,
        })
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "sí" | "si" | "yes" | "true" | "1" => Some(true),
        "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

impl HistoryStore {
    /// Parse CSV data. Rows with a blank, garbage or implausible number are
    /// skipped and counted.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| AppError::HistoryLoad(format!("unreadable header: {}", e)))?
            .clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut store = HistoryStore::default();
        for result in csv_reader.records() {
            match result.ok().and_then(|row| columns.parse_row(&row)) {
                Some(record) => {
                    store.readings.push(record.reading);
                    store.records.push(record);
                }
                None => store.skipped_rows += 1,
            }
        }

        Ok(store)
    }

    /// Load the dataset from a file
    pub fn load(path: &Path) -> AppResult<Self> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;
        Self::from_file(file, path)
    }

    fn from_file(file: File, path: &Path) -> AppResult<Self> {
        let store = Self::from_reader(file)?;

        tracing::info!(
            "Loaded {} historical records from {}",
            store.len(),
            path.display()
        );
        if store.skipped_rows > 0 {
            tracing::warn!("Skipped {} unusable rows in {}", store.skipped_rows, path.display());
        }

        Ok(store)
    }

    /// Load per configuration. A missing file is fatal only when the history
    /// is marked as required; a file that exists but cannot be read or parsed
    /// is always fatal.
    pub fn from_config(config: &HistoryConfig) -> AppResult<Self> {
        let path = Path::new(&config.csv_path);
        match File::open(path) {
            Ok(file) => Self::from_file(file, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound && !config.required => {
                tracing::warn!("Starting without history: {}: {}", path.display(), e);
                Ok(Self::default())
            }
            Err(e) => Err(open_error(path, e)),
        }
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    /// Readings in file order, for distance comparisons
    pub fn readings(&self) -> &[ClimateReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Most recent row in file order
    pub fn last(&self) -> Option<&HistoricalRecord> {
        self.records.last()
    }

    pub fn page(&self, pagination: &Pagination) -> PaginatedResponse<HistoricalRecord> {
        PaginatedResponse::from_slice(&self.records, pagination)
    }

    pub fn stats(&self, clusters: &[ClimateCluster]) -> HistoricalStats {
        shared::historical_stats(&self.readings, clusters)
    }

    /// Export the readings as CSV with English column names
    pub fn export_csv(&self) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in &self.records {
            wtr.serialize(ExportRow {
                date: &record.date,
                temperature: record.reading.temperature,
                solar_radiation: record.reading.solar_radiation,
                soil_moisture: record.reading.soil_moisture,
                relative_humidity: record.reading.relative_humidity,
                precipitation: record.reading.precipitation,
            })
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

fn open_error(path: &Path, e: io::Error) -> AppError {
    AppError::HistoryLoad(format!("{}: {}", path.display(), e))
}
