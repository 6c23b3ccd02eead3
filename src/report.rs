//! Report assembly and plain-text rendering.
//!
//! `build_report` is a pure function of the response collection and the
//! clock value passed in; rendering produces the fixed-layout text document
//! with the `EXECUTIVE SUMMARY` and `CATEGORY ANALYSIS` sections.

use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use crate::analysis::{aggregate_category, priority_for, trend_for};
use crate::insights;
use crate::types::{
    Category, CategoryAnalysisResult, CategoryPerformance, Priority, ReportDocument,
    ReportSummary, SurveyResponse, Trend,
};
use crate::util::round1;

pub const ALL_CITIES: &str = "All Cities";

/// Keep everything for `All Cities`, otherwise exact-match on location.
fn filter_location<'a>(
    location: &str,
    responses: &'a [SurveyResponse],
) -> Vec<&'a SurveyResponse> {
    responses
        .iter()
        .filter(|r| location == ALL_CITIES || r.location == location)
        .collect()
}

fn report_category(
    category: Category,
    responses: &[SurveyResponse],
) -> (CategoryAnalysisResult, CategoryPerformance) {
    let agg = aggregate_category(responses, category);

    let result = if agg.rating_count == 0 {
        CategoryAnalysisResult {
            category,
            score: 0.0,
            trend: Trend::Stable,
            insights: insights::no_data_insights(),
            recommendations: insights::no_data_recommendations(),
            priority: Priority::Low,
        }
    } else {
        CategoryAnalysisResult {
            category,
            score: round1(agg.average),
            trend: trend_for(agg.average),
            insights: insights::report_insights(category, agg.average, agg.response_count),
            recommendations: insights::analysis_recommendations(category, agg.average),
            priority: priority_for(agg.average),
        }
    };

    let performance = CategoryPerformance {
        category: category.display_name(),
        score: agg.average,
        responses: agg.rating_count,
    };
    (result, performance)
}

fn key_findings(categories: &[CategoryAnalysisResult]) -> Vec<String> {
    let mut findings = Vec::new();
    let high_priority = categories.iter().filter(|c| c.priority == Priority::High).count();
    let declining = categories.iter().filter(|c| c.trend == Trend::Declining).count();

    if high_priority > 0 {
        findings.push(format!("{high_priority} categories require immediate attention"));
    }
    if declining > 0 {
        findings.push(format!("{declining} categories showing declining trends"));
    }

    let avg: f64 =
        categories.iter().map(|c| c.score).sum::<f64>() / categories.len().max(1) as f64;
    if avg < 3.0 {
        findings.push("Overall urban planning satisfaction is below average".into());
    } else if avg > 4.0 {
        findings.push("Urban planning initiatives are well-received".into());
    }

    findings
}

fn summary_recommendations(categories: &[CategoryAnalysisResult]) -> Vec<String> {
    let mut recommendations = Vec::new();
    for cat in categories {
        if cat.priority != Priority::High {
            continue;
        }
        let text = match cat.category {
            Category::Heat => "Implement comprehensive heat island mitigation strategy",
            Category::GreenSpace => "Launch major green space expansion program",
            Category::AirQuality => "Enact strict air quality improvement measures",
            Category::Infrastructure => "Prioritize infrastructure modernization projects",
            Category::Community => continue,
        };
        recommendations.push(text.to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("Continue current urban planning strategies".into());
        recommendations.push("Monitor trends and adjust policies as needed".into());
    }
    recommendations
}

/// Assemble a report for `location` from the full response collection.
pub fn build_report(
    location: &str,
    responses: &[SurveyResponse],
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    let scoped: Vec<SurveyResponse> = filter_location(location, responses)
        .into_iter()
        .cloned()
        .collect();

    let mut category_analysis = Vec::with_capacity(Category::AGGREGATED.len());
    let mut performance = Vec::with_capacity(Category::AGGREGATED.len());
    for category in Category::AGGREGATED {
        let (result, perf) = report_category(category, &scoped);
        category_analysis.push(result);
        performance.push(perf);
    }

    let average_score = round1(
        category_analysis.iter().map(|c| c.score).sum::<f64>()
            / category_analysis.len().max(1) as f64,
    );

    ReportDocument {
        title: format!("Urban Planning Analysis Report - {location}"),
        generated_at,
        location: location.to_string(),
        summary: ReportSummary {
            total_surveys: scoped.len(),
            average_score,
            key_findings: key_findings(&category_analysis),
            recommendations: summary_recommendations(&category_analysis),
        },
        category_analysis,
        performance,
    }
}

/// Render the fixed plain-text export format. Section headers are literal
/// and round-trip string comparisons in downstream tooling.
pub fn render_text(report: &ReportDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.title);
    let _ = writeln!(out, "Generated: {}", report.generated_at.format("%Y-%m-%d"));
    let _ = writeln!(out, "Location: {}", report.location);
    out.push('\n');

    out.push_str("EXECUTIVE SUMMARY\n");
    out.push_str("================\n");
    let _ = writeln!(out, "Total Surveys: {}", report.summary.total_surveys);
    let _ = writeln!(out, "Average Score: {:.1}/5", report.summary.average_score);
    out.push('\n');

    out.push_str("Key Findings:\n");
    for finding in &report.summary.key_findings {
        let _ = writeln!(out, "• {finding}");
    }

    out.push_str("\nRecommendations:\n");
    for rec in &report.summary.recommendations {
        let _ = writeln!(out, "• {rec}");
    }

    out.push_str("\nCATEGORY ANALYSIS\n");
    out.push_str("=================\n");
    for category in &report.category_analysis {
        let _ = writeln!(out, "\n{}", category.category.display_name().to_uppercase());
        let _ = writeln!(out, "Score: {:.1}/5", category.score);
        let _ = writeln!(out, "Trend: {}", category.trend);
        let _ = writeln!(out, "Priority: {}", category.priority);
        out.push_str("Insights:\n");
        for insight in &category.insights {
            let _ = writeln!(out, "  • {insight}");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Answer, AnswerValue};

    fn rated(location: &str, category: Category, value: u8) -> SurveyResponse {
        SurveyResponse {
            id: "1".into(),
            timestamp: Utc::now(),
            answers: vec![Answer {
                question_id: format!("{}-1", category.label()),
                category,
                value: AnswerValue::Rating(value),
            }],
            location: location.into(),
            user_type: "Resident".into(),
        }
    }

    #[test]
    fn location_filter_scopes_the_report() {
        let responses = vec![
            rated("Mumbai, Maharashtra", Category::Heat, 1),
            rated("Delhi, NCT", Category::Heat, 5),
        ];
        let mumbai = build_report("Mumbai, Maharashtra", &responses, Utc::now());
        assert_eq!(mumbai.summary.total_surveys, 1);
        let heat = &mumbai.category_analysis[0];
        assert_eq!(heat.score, 1.0);

        let all = build_report(ALL_CITIES, &responses, Utc::now());
        assert_eq!(all.summary.total_surveys, 2);
    }

    #[test]
    fn high_priority_categories_drive_recommendations() {
        let responses = vec![rated("Delhi, NCT", Category::AirQuality, 1)];
        let report = build_report(ALL_CITIES, &responses, Utc::now());
        assert!(report
            .summary
            .recommendations
            .contains(&"Enact strict air quality improvement measures".to_string()));
        assert!(report
            .summary
            .key_findings
            .iter()
            .any(|f| f.contains("require immediate attention")));
    }

    #[test]
    fn healthy_scores_fall_back_to_default_recommendations() {
        let responses = vec![
            rated("Delhi, NCT", Category::Heat, 5),
            rated("Delhi, NCT", Category::GreenSpace, 5),
            rated("Delhi, NCT", Category::AirQuality, 5),
            rated("Delhi, NCT", Category::Infrastructure, 5),
        ];
        let report = build_report(ALL_CITIES, &responses, Utc::now());
        assert_eq!(
            report.summary.recommendations,
            vec![
                "Continue current urban planning strategies".to_string(),
                "Monitor trends and adjust policies as needed".to_string(),
            ]
        );
        assert!(report
            .summary
            .key_findings
            .contains(&"Urban planning initiatives are well-received".to_string()));
    }

    #[test]
    fn text_render_carries_literal_section_headers() {
        let report = build_report(ALL_CITIES, &[], Utc::now());
        let text = render_text(&report);
        assert!(text.contains("EXECUTIVE SUMMARY\n================\n"));
        assert!(text.contains("CATEGORY ANALYSIS\n=================\n"));
        assert!(text.contains("Total Surveys: 0"));
    }

    #[test]
    fn average_is_mean_of_rounded_category_scores() {
        let responses = vec![
            rated("Delhi, NCT", Category::Heat, 2),
            rated("Delhi, NCT", Category::GreenSpace, 4),
        ];
        let report = build_report(ALL_CITIES, &responses, Utc::now());
        // Scores: 2.0, 4.0, 0.0, 0.0 -> mean 1.5.
        assert_eq!(report.summary.average_score, 1.5);
    }
}
