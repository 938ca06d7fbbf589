//! Historical dataset statistics

use serde::Serialize;

use super::cluster::ClimateCluster;
use super::reading::ClimateReading;
use crate::types::ValueRange;

/// Summary of the historical readings behind the dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoricalStats {
    pub total_records: usize,
    pub temperature: Option<ValueRange>,
    pub relative_humidity: Option<ValueRange>,
    pub solar_radiation: Option<ValueRange>,
    pub clusters: Vec<ClusterShare>,
}

/// How much of the history a climate profile represents
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClusterShare {
    pub cluster_id: u8,
    pub name: &'static str,
    pub population_size: u32,
    /// `population_size` as a percentage of `total_records`
    pub share_percent: f64,
}

impl HistoricalStats {
    /// Ranges over `records` and each cluster's share of them
    pub fn compute(records: &[ClimateReading], clusters: &[ClimateCluster]) -> Self {
        let total_records = records.len();
        let clusters = clusters
            .iter()
            .map(|c| ClusterShare {
                cluster_id: c.id,
                name: c.name,
                population_size: c.population_size,
                share_percent: if total_records == 0 {
                    0.0
                } else {
                    c.population_size as f64 / total_records as f64 * 100.0
                },
            })
            .collect();

        Self {
            total_records,
            temperature: ValueRange::of(records.iter().map(|r| r.temperature)),
            relative_humidity: ValueRange::of(records.iter().map(|r| r.relative_humidity)),
            solar_radiation: ValueRange::of(records.iter().map(|r| r.solar_radiation)),
            clusters,
        }
    }
}

/// Statistics over `records` against the given cluster table
pub fn historical_stats(records: &[ClimateReading], clusters: &[ClimateCluster]) -> HistoricalStats {
    HistoricalStats::compute(records, clusters)
}
