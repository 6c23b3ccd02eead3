//! City health index: a weighted sum over eight metric scores.
//!
//! overall = airQuality*0.25 + temperature*0.15 + vegetation*0.20
//!         + waterQuality*0.15 + wasteManagement*0.10 + publicHealth*0.10
//!         + transportEfficiency*0.03 + energyConsumption*0.02

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::{HealthAssessment, HealthMetrics, HealthTrend};

const W_AIR_QUALITY: f64 = 0.25;
const W_TEMPERATURE: f64 = 0.15;
const W_VEGETATION: f64 = 0.20;
const W_WATER_QUALITY: f64 = 0.15;
const W_WASTE_MANAGEMENT: f64 = 0.10;
const W_PUBLIC_HEALTH: f64 = 0.10;
const W_TRANSPORT: f64 = 0.03;
const W_ENERGY: f64 = 0.02;

/// History delta beyond which the last-3/first-3 comparison reads as a trend.
const TREND_THRESHOLD: f64 = 5.0;

/// Weighted overall score, rounded to the nearest integer and clamped to
/// 0-100. Pure function of the metric values, independent of field order.
pub fn compute_index(m: &HealthMetrics) -> u32 {
    let weighted = m.air_quality * W_AIR_QUALITY
        + m.temperature * W_TEMPERATURE
        + m.vegetation * W_VEGETATION
        + m.water_quality * W_WATER_QUALITY
        + m.waste_management * W_WASTE_MANAGEMENT
        + m.public_health * W_PUBLIC_HEALTH
        + m.transport_efficiency * W_TRANSPORT
        + m.energy_consumption * W_ENERGY;
    weighted.round().clamp(0.0, 100.0) as u32
}

pub fn score_label(score: u32) -> &'static str {
    match score {
        90.. => "Excellent",
        80..=89 => "Very Good",
        70..=79 => "Good",
        60..=69 => "Fair",
        50..=59 => "Poor",
        40..=49 => "Very Poor",
        _ => "Critical",
    }
}

pub fn recommendations_for(score: u32) -> Vec<&'static str> {
    if score >= 80 {
        vec![
            "Maintain current initiatives",
            "Continue monitoring air quality",
            "Expand green infrastructure",
        ]
    } else if score >= 60 {
        vec![
            "Increase green space coverage",
            "Improve public transportation",
            "Implement air quality monitoring",
        ]
    } else if score >= 40 {
        vec![
            "Urgent: Reduce air pollution",
            "Plant more trees immediately",
            "Improve waste management systems",
        ]
    } else {
        vec![
            "CRITICAL: Immediate action required",
            "Emergency air quality measures",
            "Rapid green infrastructure deployment",
        ]
    }
}

/// Compare the mean of the last three points against the first three; a gap
/// beyond +-5 is a trend. Histories shorter than six points read as stable.
pub fn trend_from_history(history: &[f64]) -> HealthTrend {
    if history.len() < 6 {
        return HealthTrend::Stable;
    }
    let older: f64 = history[..3].iter().sum::<f64>() / 3.0;
    let recent: f64 = history[history.len() - 3..].iter().sum::<f64>() / 3.0;
    if recent > older + TREND_THRESHOLD {
        HealthTrend::Up
    } else if recent < older - TREND_THRESHOLD {
        HealthTrend::Down
    } else {
        HealthTrend::Stable
    }
}

/// Display-only 12-point history scattered around `base`. Seeded so callers
/// can pin the series under test; never feeds the pure scoring functions.
pub fn synthetic_history(base: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut history: Vec<f64> = (0..12)
        .map(|_| (base + (rng.gen::<f64>() - 0.5) * 20.0).clamp(0.0, 100.0))
        .collect();
    history.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    history
}

/// Full assessment from the component metrics and a 12-point score history.
pub fn assess(metrics: &HealthMetrics, history: &[f64]) -> HealthAssessment {
    let score = compute_index(metrics);
    HealthAssessment {
        score,
        label: score_label(score),
        trend: trend_from_history(history),
        recommendations: recommendations_for(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> HealthMetrics {
        HealthMetrics {
            air_quality: 65.0,
            temperature: 58.0,
            vegetation: 45.0,
            water_quality: 72.0,
            waste_management: 68.0,
            public_health: 75.0,
            transport_efficiency: 60.0,
            energy_consumption: 55.0,
        }
    }

    #[test]
    fn weighted_sum_matches_reference_value() {
        // 65*.25 + 58*.15 + 45*.20 + 72*.15 + 68*.10 + 75*.10
        //   + 60*.03 + 55*.02 = 61.95 -> 62.
        assert_eq!(compute_index(&sample_metrics()), 62);
    }

    #[test]
    fn index_bounds() {
        let zero = HealthMetrics {
            air_quality: 0.0,
            temperature: 0.0,
            vegetation: 0.0,
            water_quality: 0.0,
            waste_management: 0.0,
            public_health: 0.0,
            transport_efficiency: 0.0,
            energy_consumption: 0.0,
        };
        assert_eq!(compute_index(&zero), 0);
        let full = HealthMetrics {
            air_quality: 100.0,
            temperature: 100.0,
            vegetation: 100.0,
            water_quality: 100.0,
            waste_management: 100.0,
            public_health: 100.0,
            transport_efficiency: 100.0,
            energy_consumption: 100.0,
        };
        assert_eq!(compute_index(&full), 100);
    }

    #[test]
    fn label_buckets() {
        assert_eq!(score_label(95), "Excellent");
        assert_eq!(score_label(80), "Very Good");
        assert_eq!(score_label(70), "Good");
        assert_eq!(score_label(60), "Fair");
        assert_eq!(score_label(50), "Poor");
        assert_eq!(score_label(40), "Very Poor");
        assert_eq!(score_label(39), "Critical");
    }

    #[test]
    fn trend_uses_first_and_last_thirds() {
        let rising = [40.0, 41.0, 42.0, 50.0, 55.0, 60.0, 61.0, 62.0, 63.0];
        assert_eq!(trend_from_history(&rising), HealthTrend::Up);
        let falling = [63.0, 62.0, 61.0, 55.0, 50.0, 45.0, 43.0, 42.0, 41.0];
        assert_eq!(trend_from_history(&falling), HealthTrend::Down);
        let flat = [50.0, 51.0, 52.0, 50.0, 51.0, 52.0];
        assert_eq!(trend_from_history(&flat), HealthTrend::Stable);
        assert_eq!(trend_from_history(&[1.0, 2.0]), HealthTrend::Stable);
    }

    #[test]
    fn synthetic_history_is_deterministic_per_seed() {
        let a = synthetic_history(62.0, 7);
        let b = synthetic_history(62.0, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert!(a.iter().all(|v| (0.0..=100.0).contains(v)));
        // Sorted ascending for the sparkline display.
        assert!(a.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn assessment_composes_score_label_and_trend() {
        let assessment = assess(&sample_metrics(), &[60.0; 12]);
        assert_eq!(assessment.score, 62);
        assert_eq!(assessment.label, "Fair");
        assert_eq!(assessment.trend, HealthTrend::Stable);
        assert_eq!(assessment.recommendations.len(), 3);
    }
}
