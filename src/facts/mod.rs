//! Read-only market data.
//!
//! The fact store holds the static (country, period) metric table and is
//! built once at startup. The trend store holds the optional per-country
//! share history extracted from the monthly PDF reports. Neither has a
//! write path after construction.

use crate::models::{HistoricalTrend, MetricSet};
use crate::resolver;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Seed table compiled into the binary.
const BUILTIN_SEED: &str = include_str!("../../data/starla_seed.json");

type PeriodTable = BTreeMap<String, MetricSet>;

/// Static (country, period) -> MetricSet mapping.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    table: BTreeMap<String, PeriodTable>,
}

impl FactStore {
    /// Build the store from the seed compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_SEED).context("Failed to parse built-in seed data")
    }

    /// Build the store from a seed file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Failed to parse seed file: {}", path.display()))
    }

    /// Build the store from JSON shaped `{country: {period: MetricSet}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: BTreeMap<String, PeriodTable> = serde_json::from_str(json)?;
        let entries: usize = table.values().map(BTreeMap::len).sum();
        debug!("Fact store seeded with {} entries", entries);
        Ok(Self { table })
    }

    /// Exact two-level lookup. A miss means "no data", not a fault.
    pub fn lookup(&self, country: &str, period: &str) -> Option<&MetricSet> {
        self.table.get(country)?.get(period)
    }

    /// Periods held for a country, sorted.
    pub fn periods_for(&self, country: &str) -> Vec<String> {
        self.table
            .get(country)
            .map(|periods| periods.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Countries with at least one entry, sorted.
    pub fn countries(&self) -> Vec<String> {
        self.table.keys().cloned().collect()
    }
}

/// Per-country share history keyed by canonical country.
#[derive(Debug, Clone, Default)]
pub struct TrendStore {
    trends: BTreeMap<String, HistoricalTrend>,
}

impl TrendStore {
    /// Load trends from a JSON file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No extracted data at {}, trends disabled", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read extracted data: {}", path.display()))?;

        let store = Self::from_json(&content)
            .with_context(|| format!("Failed to parse extracted data: {}", path.display()))?;

        info!("Extracted data loaded for {} countries", store.trends.len());
        Ok(store)
    }

    /// Keys are canonicalised, so `"unitedkingdom"` is stored as `uk`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, HistoricalTrend> = serde_json::from_str(json)?;
        let trends = raw
            .into_iter()
            .map(|(country, trend)| (resolver::normalize_country(&country), trend))
            .collect();
        Ok(Self { trends })
    }

    pub fn get(&self, country: &str) -> Option<&HistoricalTrend> {
        self.trends.get(country)
    }

    /// Countries with trend data, sorted.
    pub fn countries(&self) -> Vec<String> {
        self.trends.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }
}
