//! Mock Earth-observation data service.
//!
//! Mirrors the upstream GIBS/Worldview layer catalog and returns simulated
//! observation samples. Synthetic series are derived from a seed mixed with
//! the query key, so the same request always yields the same values.

use std::f64::consts::PI;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh32::xxh32;

use crate::error::EngineError;

const GIBS_BASE_URL: &str = "https://gibs.earthdata.nasa.gov";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerParameters {
    pub layers: String,
    pub format: String,
    pub transparent: bool,
    pub version: String,
}

/// A WMS layer descriptor exposed through the `layers` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataLayer {
    pub id: String,
    pub name: String,
    pub description: String,
    pub source: String,
    pub url: String,
    pub parameters: LayerParameters,
}

fn wms_layer(id: &str, name: &str, description: &str, source: &str, layers: &str) -> DataLayer {
    DataLayer {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        source: source.into(),
        url: format!("{GIBS_BASE_URL}/wms/epsg4326/best/wms.cgi"),
        parameters: LayerParameters {
            layers: layers.into(),
            format: "image/png".into(),
            transparent: true,
            version: "1.1.1".into(),
        },
    }
}

static DATA_LAYERS: Lazy<Vec<DataLayer>> = Lazy::new(|| {
    vec![
        wms_layer(
            "landsat_temperature",
            "Landsat 8 Land Surface Temperature",
            "Land Surface Temperature from Landsat 8 TIRS",
            "NASA Landsat 8",
            "MODIS_Terra_Land_Surface_Temperature_Day",
        ),
        wms_layer(
            "modis_ndvi",
            "MODIS Vegetation Index",
            "Normalized Difference Vegetation Index from MODIS",
            "NASA MODIS",
            "MODIS_Terra_NDVI",
        ),
        wms_layer(
            "modis_aerosol",
            "MODIS Aerosol Optical Depth",
            "Air quality monitoring from MODIS",
            "NASA MODIS",
            "MODIS_Terra_Aerosol_Optical_Depth",
        ),
        wms_layer(
            "srtm_elevation",
            "SRTM Elevation Data",
            "Topographical data for flood risk assessment",
            "NASA SRTM",
            "SRTM30_Color_Index",
        ),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperaturePoint {
    pub lat: f64,
    pub lng: f64,
    pub temperature: f64,
    pub timestamp: DateTime<Utc>,
    pub source: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VegetationPoint {
    pub lat: f64,
    pub lng: f64,
    pub ndvi: f64,
    pub timestamp: DateTime<Utc>,
    pub source: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirQualityPoint {
    pub lat: f64,
    pub lng: f64,
    pub aqi: f64,
    pub pollutant: &'static str,
    pub timestamp: DateTime<Utc>,
    pub source: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloodRiskPoint {
    pub lat: f64,
    pub lng: f64,
    pub risk_level: RiskLevel,
    pub elevation: f64,
    pub timestamp: DateTime<Utc>,
    pub source: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInsights {
    pub heat_island_intensity: f64,
    pub green_space_deficit: f64,
    pub air_quality_index: f64,
    pub flood_risk_areas: f64,
    pub data_sources: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoricalMetric {
    Temperature,
    Vegetation,
    AirQuality,
}

impl HistoricalMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoricalMetric::Temperature => "temperature",
            HistoricalMetric::Vegetation => "vegetation",
            HistoricalMetric::AirQuality => "airquality",
        }
    }
}

impl FromStr for HistoricalMetric {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(HistoricalMetric::Temperature),
            "vegetation" => Ok(HistoricalMetric::Vegetation),
            "airquality" => Ok(HistoricalMetric::AirQuality),
            other => Err(EngineError::InvalidParameter {
                name: "metric",
                reason: format!("unsupported metric {other:?}"),
            }),
        }
    }
}

/// Stateless service over the mock data. The seed fixes every synthetic
/// series, keyed per (city, metric) so different queries diverge.
#[derive(Debug, Clone, Copy)]
pub struct EarthDataService {
    seed: u64,
}

impl Default for EarthDataService {
    fn default() -> Self {
        EarthDataService::with_seed(0x5542_414e)
    }
}

impl EarthDataService {
    pub fn with_seed(seed: u64) -> Self {
        EarthDataService { seed }
    }

    pub fn data_layers(&self) -> &'static [DataLayer] {
        &DATA_LAYERS
    }

    /// Build the WMS request URL for a layer over a bounding box.
    pub fn layer_url(
        &self,
        layer_id: &str,
        bbox: [f64; 4],
        width: u32,
        height: u32,
    ) -> Result<String, EngineError> {
        let layer = DATA_LAYERS
            .iter()
            .find(|l| l.id == layer_id)
            .ok_or_else(|| EngineError::LayerNotFound(layer_id.to_string()))?;
        let p = &layer.parameters;
        Ok(format!(
            "{}?layers={}&format={}&transparent={}&version={}&bbox={},{},{},{}&width={}&height={}&crs=EPSG:4326",
            layer.url,
            p.layers,
            p.format,
            p.transparent,
            p.version,
            bbox[0],
            bbox[1],
            bbox[2],
            bbox[3],
            width,
            height,
        ))
    }

    pub fn temperature(&self, _city: &str, now: DateTime<Utc>) -> Vec<TemperaturePoint> {
        let source = "Landsat 8 TIRS";
        vec![
            TemperaturePoint { lat: 19.0760, lng: 72.8777, temperature: 85.2, timestamp: now, source },
            TemperaturePoint { lat: 19.0860, lng: 72.8877, temperature: 88.1, timestamp: now, source },
            TemperaturePoint { lat: 19.0660, lng: 72.8677, temperature: 82.8, timestamp: now, source },
        ]
    }

    pub fn vegetation(&self, _city: &str, now: DateTime<Utc>) -> Vec<VegetationPoint> {
        let source = "MODIS NDVI";
        vec![
            VegetationPoint { lat: 19.0760, lng: 72.8777, ndvi: 0.45, timestamp: now, source },
            VegetationPoint { lat: 19.0860, lng: 72.8877, ndvi: 0.35, timestamp: now, source },
            VegetationPoint { lat: 19.0660, lng: 72.8677, ndvi: 0.68, timestamp: now, source },
        ]
    }

    pub fn air_quality(&self, _city: &str, now: DateTime<Utc>) -> Vec<AirQualityPoint> {
        let source = "MODIS Aerosol";
        vec![
            AirQualityPoint { lat: 19.0760, lng: 72.8777, aqi: 198.0, pollutant: "PM2.5", timestamp: now, source },
            AirQualityPoint { lat: 19.0860, lng: 72.8877, aqi: 156.0, pollutant: "PM10", timestamp: now, source },
            AirQualityPoint { lat: 19.0660, lng: 72.8677, aqi: 178.0, pollutant: "NO2", timestamp: now, source },
        ]
    }

    pub fn flood_risk(&self, _city: &str, now: DateTime<Utc>) -> Vec<FloodRiskPoint> {
        let source = "SRTM";
        vec![
            FloodRiskPoint { lat: 19.0760, lng: 72.8777, risk_level: RiskLevel::High, elevation: 14.0, timestamp: now, source },
            FloodRiskPoint { lat: 19.0860, lng: 72.8877, risk_level: RiskLevel::Medium, elevation: 18.0, timestamp: now, source },
            FloodRiskPoint { lat: 19.0660, lng: 72.8677, risk_level: RiskLevel::Low, elevation: 25.0, timestamp: now, source },
        ]
    }

    /// Per-city derived insight figures; unrecognized cities fall back to
    /// the Mumbai row.
    pub fn city_insights(&self, city: &str) -> CityInsights {
        match city {
            "Delhi, NCT" => CityInsights {
                heat_island_intensity: 7.2,
                green_space_deficit: 42.0,
                air_quality_index: 285.0,
                flood_risk_areas: 15.0,
                data_sources: vec!["Landsat 8 TIRS", "MODIS Aerosol", "SRTM"],
            },
            "Bangalore, Karnataka" => CityInsights {
                heat_island_intensity: 4.1,
                green_space_deficit: 28.0,
                air_quality_index: 156.0,
                flood_risk_areas: 8.0,
                data_sources: vec!["Landsat 8 TIRS", "MODIS NDVI", "SRTM"],
            },
            "Chennai, Tamil Nadu" => CityInsights {
                heat_island_intensity: 5.3,
                green_space_deficit: 31.0,
                air_quality_index: 178.0,
                flood_risk_areas: 35.0,
                data_sources: vec!["Landsat 8 TIRS", "MODIS NDVI", "SRTM"],
            },
            "Kolkata, West Bengal" => CityInsights {
                heat_island_intensity: 4.7,
                green_space_deficit: 38.0,
                air_quality_index: 201.0,
                flood_risk_areas: 42.0,
                data_sources: vec!["Landsat 8 TIRS", "MODIS NDVI", "SRTM"],
            },
            _ => CityInsights {
                heat_island_intensity: 5.8,
                green_space_deficit: 35.0,
                air_quality_index: 198.0,
                flood_risk_areas: 28.0,
                data_sources: vec!["Landsat 8 TIRS", "MODIS NDVI", "SRTM"],
            },
        }
    }

    /// Monthly synthetic series ending at `now`, one decimal per point.
    /// Temperature and vegetation follow a seasonal sine with jitter; air
    /// quality is flat with wider jitter.
    pub fn historical(
        &self,
        city: &str,
        metric: HistoricalMetric,
        months: u32,
        now: DateTime<Utc>,
    ) -> Vec<HistoricalPoint> {
        let key = format!("{city}/{}", metric.as_str());
        let mut rng =
            ChaCha8Rng::seed_from_u64(self.seed ^ u64::from(xxh32(key.as_bytes(), 0)));

        let mut points = Vec::with_capacity(months as usize);
        for i in (0..months).rev() {
            let seasonal = ((f64::from(i) / 12.0) * PI * 2.0).sin();
            let value = match metric {
                HistoricalMetric::Temperature => 65.0 + seasonal * 15.0 + rng.gen::<f64>() * 5.0,
                HistoricalMetric::Vegetation => 20.0 + seasonal * 15.0 + rng.gen::<f64>() * 10.0,
                HistoricalMetric::AirQuality => 100.0 + rng.gen::<f64>() * 80.0,
            };
            points.push(HistoricalPoint {
                date: month_start(now, i).format("%Y-%m-%d").to_string(),
                value: crate::util::round1(value),
            });
        }
        points
    }
}

/// First day of the month `months_back` months before `at`.
fn month_start(at: DateTime<Utc>, months_back: u32) -> NaiveDate {
    let total = at.year() * 12 + at.month0() as i32 - months_back as i32;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    // month0 is 0..12 and day 1 always exists, so this cannot fail.
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(at.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_four_layers() {
        let service = EarthDataService::default();
        let ids: Vec<&str> = service.data_layers().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["landsat_temperature", "modis_ndvi", "modis_aerosol", "srtm_elevation"]
        );
    }

    #[test]
    fn layer_url_encodes_bbox_and_size() {
        let service = EarthDataService::default();
        let url = service
            .layer_url("modis_ndvi", [72.7, 18.9, 73.0, 19.3], 512, 512)
            .unwrap();
        assert!(url.starts_with("https://gibs.earthdata.nasa.gov/wms/epsg4326/best/wms.cgi?"));
        assert!(url.contains("layers=MODIS_Terra_NDVI"));
        assert!(url.contains("bbox=72.7,18.9,73,19.3"));
        assert!(url.contains("width=512&height=512&crs=EPSG:4326"));
    }

    #[test]
    fn unknown_layer_is_not_found() {
        let service = EarthDataService::default();
        let err = service.layer_url("nope", [0.0; 4], 512, 512).unwrap_err();
        assert!(matches!(err, EngineError::LayerNotFound(_)));
    }

    #[test]
    fn historical_is_deterministic_per_seed_and_key() {
        let service = EarthDataService::with_seed(42);
        let now = Utc::now();
        let a = service.historical("Delhi, NCT", HistoricalMetric::Temperature, 12, now);
        let b = service.historical("Delhi, NCT", HistoricalMetric::Temperature, 12, now);
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);

        let other_city = service.historical("Chennai, Tamil Nadu", HistoricalMetric::Temperature, 12, now);
        assert_ne!(a, other_city);
    }

    #[test]
    fn historical_dates_are_month_starts_ending_now() {
        let service = EarthDataService::default();
        let now = "2026-08-30T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let series = service.historical("Mumbai, Maharashtra", HistoricalMetric::Vegetation, 3, now);
        let dates: Vec<&str> = series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-06-01", "2026-07-01", "2026-08-01"]);
    }

    #[test]
    fn metric_parsing() {
        assert_eq!("temperature".parse::<HistoricalMetric>().unwrap(), HistoricalMetric::Temperature);
        assert!("rainfall".parse::<HistoricalMetric>().is_err());
    }

    #[test]
    fn insights_fall_back_to_mumbai() {
        let service = EarthDataService::default();
        assert_eq!(
            service.city_insights("Austin, TX"),
            service.city_insights("Mumbai, Maharashtra")
        );
    }
}
