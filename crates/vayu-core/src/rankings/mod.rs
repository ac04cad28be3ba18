//! Historical city rankings bundled with the crate.

pub mod builtin;

use crate::classify::Classifier;
use crate::error::VayuError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A year of monthly averages for a set of ranked cities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingDataset {
    pub name: String,
    pub year: i32,
    /// Measured quantity, e.g. "aqi" or "pm25".
    pub metric: String,
    #[serde(default)]
    pub unit: String,
    pub cities: Vec<CityRanking>,
}

/// One ranked city with its annual and monthly averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRanking {
    pub rank: u32,
    /// "City, Country".
    pub city: String,
    pub avg: u32,
    pub months: [u32; 12],
}

/// Sort orders for ranking tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingSort {
    /// Published rank, ascending.
    Rank,
    /// Annual average, worst first.
    Avg,
    /// Worst single month, worst first.
    Peak,
    /// City name, alphabetical.
    Name,
}

impl RankingSort {
    pub fn from_str_loose(s: &str) -> Option<RankingSort> {
        match s.trim().to_lowercase().as_str() {
            "rank" => Some(RankingSort::Rank),
            "avg" | "average" => Some(RankingSort::Avg),
            "peak" | "max" => Some(RankingSort::Peak),
            "name" | "city" => Some(RankingSort::Name),
            _ => None,
        }
    }
}

impl CityRanking {
    /// City name without the country suffix.
    pub fn short_name(&self) -> &str {
        self.city.split(',').next().unwrap_or(&self.city).trim()
    }

    /// Worst month; the earliest one wins ties.
    pub fn peak_month(&self) -> (&'static str, u32) {
        let mut best = 0;
        for (i, v) in self.months.iter().enumerate() {
            if *v > self.months[best] {
                best = i;
            }
        }
        (MONTHS[best], self.months[best])
    }

    /// Cleanest month; the earliest one wins ties.
    pub fn cleanest_month(&self) -> (&'static str, u32) {
        let mut best = 0;
        for (i, v) in self.months.iter().enumerate() {
            if *v < self.months[best] {
                best = i;
            }
        }
        (MONTHS[best], self.months[best])
    }

    /// Month names paired with values, January first.
    pub fn monthly_series(&self) -> Vec<(&'static str, u32)> {
        MONTHS.iter().copied().zip(self.months.iter().copied()).collect()
    }
}

impl RankingDataset {
    /// Rounded mean of the annual averages; 0 for an empty dataset.
    pub fn national_average(&self) -> u32 {
        if self.cities.is_empty() {
            return 0;
        }
        let sum: u64 = self.cities.iter().map(|c| u64::from(c.avg)).sum();
        (sum as f64 / self.cities.len() as f64).round() as u32
    }

    /// Find a city by short or full name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&CityRanking> {
        let wanted = name.trim().to_lowercase();
        self.cities.iter().find(|c| {
            c.short_name().to_lowercase() == wanted || c.city.to_lowercase() == wanted
        })
    }

    /// The first `n` cities by published rank.
    pub fn top(&self, n: usize) -> Vec<&CityRanking> {
        let mut cities = self.sorted_by(RankingSort::Rank);
        cities.truncate(n);
        cities
    }

    pub fn sorted_by(&self, key: RankingSort) -> Vec<&CityRanking> {
        let mut cities: Vec<&CityRanking> = self.cities.iter().collect();
        match key {
            RankingSort::Rank => cities.sort_by_key(|c| c.rank),
            RankingSort::Avg => cities.sort_by(|a, b| b.avg.cmp(&a.avg).then(a.rank.cmp(&b.rank))),
            RankingSort::Peak => cities.sort_by(|a, b| {
                b.peak_month()
                    .1
                    .cmp(&a.peak_month().1)
                    .then(a.rank.cmp(&b.rank))
            }),
            RankingSort::Name => cities.sort_by(|a, b| a.short_name().cmp(b.short_name())),
        }
        cities
    }
}

/// A ranking row with tiers attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCity {
    pub rank: u32,
    pub city: String,
    pub avg: u32,
    pub tier_label: String,
    pub color: String,
    pub peak_month: String,
    pub peak_value: u32,
    pub peak_tier_label: String,
}

/// Attach tiers for the annual average and worst month of each city.
pub fn classify_cities(cities: &[&CityRanking], classifier: &Classifier) -> Vec<RankedCity> {
    cities
        .iter()
        .map(|c| {
            let tier = classifier.classify(f64::from(c.avg));
            let (peak_month, peak_value) = c.peak_month();
            RankedCity {
                rank: c.rank,
                city: c.city.clone(),
                avg: c.avg,
                tier_label: tier.label.clone(),
                color: tier.color.clone(),
                peak_month: peak_month.to_string(),
                peak_value,
                peak_tier_label: classifier.classify(f64::from(peak_value)).label.clone(),
            }
        })
        .collect()
}

/// Classify every city of a dataset in published rank order.
pub fn classify_dataset(dataset: &RankingDataset, classifier: &Classifier) -> Vec<RankedCity> {
    classify_cities(&dataset.sorted_by(RankingSort::Rank), classifier)
}

/// Parse a dataset from a JSON string.
pub fn parse_dataset_str(json: &str) -> Result<RankingDataset, VayuError> {
    let dataset: RankingDataset = serde_json::from_str(json)?;
    validate_dataset(&dataset)?;
    Ok(dataset)
}

/// Validate that a dataset is well-formed.
pub fn validate_dataset(dataset: &RankingDataset) -> Result<(), VayuError> {
    if dataset.cities.is_empty() {
        return Err(VayuError::DatasetInvalid("cities must not be empty".into()));
    }

    let mut ranks = HashSet::new();
    let mut names = HashSet::new();
    for city in &dataset.cities {
        if city.city.trim().is_empty() {
            return Err(VayuError::DatasetInvalid(format!(
                "city at rank {} has no name",
                city.rank
            )));
        }
        if !ranks.insert(city.rank) {
            return Err(VayuError::DatasetInvalid(format!(
                "rank {} appears more than once",
                city.rank
            )));
        }
        if !names.insert(city.city.to_lowercase()) {
            return Err(VayuError::DatasetInvalid(format!(
                "city '{}' appears more than once",
                city.city
            )));
        }
    }

    Ok(())
}
