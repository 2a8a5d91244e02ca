use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Deserialize;

/// Side-of-street numbering parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn name(&self) -> &'static str {
        match self {
            Parity::Even => "EVEN",
            Parity::Odd => "ODD",
        }
    }
}

/// Parity of the curb a pole stands on, taken from the last character of its identifier.
/// Returns `None` when that character is not a digit.
pub fn parity_from_pole(pole: &str) -> Option<Parity> {
    let digit = pole.chars().last()?.to_digit(10)?;
    if digit % 2 == 0 {
        Some(Parity::Even)
    } else {
        Some(Parity::Odd)
    }
}

/// A meter row as it appears in the meter data, before validation.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawMeterRecord {
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<String>,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<String>,
    #[serde(rename = "SubArea", default)]
    pub sub_area: Option<String>,
    #[serde(rename = "Pole", default)]
    pub pole: Option<String>,
}

/// A parking meter with a usable position.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterRecord {
    pub latitude: f64,
    pub longitude: f64,
    /// Street name as spelled in the meter system.
    pub sub_area: Option<String>,
    pub pole: String,
}

impl MeterRecord {
    pub fn point(&self) -> geo::Point {
        geo::Point::new(self.longitude, self.latitude)
    }
}

impl TryFrom<RawMeterRecord> for MeterRecord {
    type Error = anyhow::Error;

    fn try_from(raw: RawMeterRecord) -> anyhow::Result<Self> {
        let parse_coordinate =
            |value: Option<String>, field: &str, bound: f64| -> anyhow::Result<f64> {
                let value = value.ok_or_else(|| anyhow!("Missing {}", field))?;
                let coordinate: f64 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {} '{}'", field, value))?;
                if !coordinate.is_finite() || coordinate.abs() > bound {
                    return Err(anyhow!("{} '{}' out of range", field, value));
                }
                Ok(coordinate)
            };
        let latitude = parse_coordinate(raw.latitude, "Latitude", 90.0)?;
        let longitude = parse_coordinate(raw.longitude, "Longitude", 180.0)?;
        let pole = raw.pole.ok_or_else(|| anyhow!("Missing Pole"))?;
        Ok(Self {
            latitude,
            longitude,
            sub_area: raw.sub_area.filter(|sub_area| !sub_area.is_empty()),
            pole,
        })
    }
}

/// Read meter records from a CSV file with a header row. Rows that cannot be read or turned
/// into a `MeterRecord` are skipped with a warning.
pub fn read_meters_from_csv(filepath: &Path) -> anyhow::Result<Vec<MeterRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(filepath)
        .with_context(|| format!("Opening meter file {:?}", filepath))?;
    let mut meters = Vec::new();
    for (row, result) in reader.deserialize::<RawMeterRecord>().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("Skipping unreadable meter row {}: {}", row + 1, err);
                continue;
            }
        };
        match MeterRecord::try_from(raw) {
            Ok(meter) => meters.push(meter),
            Err(err) => log::warn!("Skipping meter row {}: {}", row + 1, err),
        }
    }
    Ok(meters)
}
