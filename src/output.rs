//! CSV, JSON, text, and console-table writers for analysis artifacts.

use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

use crate::error::EngineError;
use crate::types::MetricCardRow;

pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<(), EngineError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), EngineError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn write_text(path: impl AsRef<Path>, content: &str) -> Result<(), EngineError> {
    std::fs::write(path, content)?;
    Ok(())
}

/// One metric card per row: `Metric,Value,Unit,Change,Timestamp,Source`.
pub fn write_metric_cards(
    path: impl AsRef<Path>,
    cards: &[MetricCardRow],
) -> Result<(), EngineError> {
    write_csv(path, cards)
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_card_csv_has_the_fixed_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.csv");
        let cards = vec![MetricCardRow {
            metric: "Land Surface Temperature".into(),
            value: "42.5".into(),
            unit: "°C".into(),
            change: "+1.2".into(),
            timestamp: "2026-08-30T00:00:00Z".into(),
            source: "NASA Landsat 8 TIRS".into(),
        }];
        write_metric_cards(&path, &cards).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Metric,Value,Unit,Change,Timestamp,Source"
        );
        assert!(lines.next().unwrap().starts_with("Land Surface Temperature,42.5"));
    }
}
