//! Category aggregation and trend/priority classification.
//!
//! All functions here are pure over the in-memory response collection;
//! running the aggregator twice on unchanged input yields identical results.

use crate::insights;
use crate::types::{Category, CategoryAnalysisResult, Priority, SurveyResponse, Trend};
use crate::util::round1;

/// Score thresholds shared by the trend and priority classifiers.
const IMPROVING_MIN: f64 = 4.0;
const DECLINING_MAX: f64 = 2.0;
const MEDIUM_PRIORITY_MAX: f64 = 3.0;

/// `score >= 4` improving, `score <= 2` declining, stable in between.
pub fn trend_for(score: f64) -> Trend {
    if score >= IMPROVING_MIN {
        Trend::Improving
    } else if score <= DECLINING_MAX {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// `score <= 2` high, `score <= 3` medium, low otherwise.
pub fn priority_for(score: f64) -> Priority {
    if score <= DECLINING_MAX {
        Priority::High
    } else if score <= MEDIUM_PRIORITY_MAX {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Raw per-category aggregate before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryAggregate {
    /// Mean of all rating answers in the category, 0 when none exist.
    pub average: f64,
    /// Number of rating answers summed (the divisor).
    pub rating_count: usize,
    /// Number of responses carrying at least one answer in the category.
    pub response_count: usize,
}

/// Sum every rating answer in `category` across the collection and divide by
/// the count of rating answers found, not the count of responses. A response
/// with no rating answers in the category contributes nothing.
pub fn aggregate_category(responses: &[SurveyResponse], category: Category) -> CategoryAggregate {
    let mut total = 0.0;
    let mut rating_count = 0usize;
    let mut response_count = 0usize;

    for response in responses {
        let mut contributes = false;
        for answer in &response.answers {
            if answer.category != category {
                continue;
            }
            contributes = true;
            if let Some(rating) = answer.value.rating() {
                total += rating;
                rating_count += 1;
            }
        }
        if contributes {
            response_count += 1;
        }
    }

    let average = if rating_count > 0 {
        total / rating_count as f64
    } else {
        0.0
    };
    CategoryAggregate {
        average,
        rating_count,
        response_count,
    }
}

fn classify(category: Category, agg: CategoryAggregate) -> CategoryAnalysisResult {
    // Zero rating answers means there is nothing to classify: the score is
    // defined as 0 with trend forced stable and priority low, rather than
    // letting the thresholds read an absence of data as "declining".
    if agg.rating_count == 0 {
        return CategoryAnalysisResult {
            category,
            score: 0.0,
            trend: Trend::Stable,
            insights: insights::no_data_insights(),
            recommendations: insights::no_data_recommendations(),
            priority: Priority::Low,
        };
    }

    let trend = trend_for(agg.average);
    let priority = priority_for(agg.average);
    CategoryAnalysisResult {
        category,
        score: round1(agg.average),
        trend,
        insights: insights::analysis_insights(category, agg.average, agg.response_count),
        recommendations: insights::analysis_recommendations(category, agg.average),
        priority,
    }
}

/// Run the aggregator over the four scored categories.
pub fn analyze(responses: &[SurveyResponse]) -> Vec<CategoryAnalysisResult> {
    Category::AGGREGATED
        .iter()
        .map(|&category| classify(category, aggregate_category(responses, category)))
        .collect()
}

/// Headline counters shown above the per-category cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub total_surveys: usize,
    pub high_priority: usize,
    pub improving: usize,
}

pub fn summarize(responses: &[SurveyResponse], results: &[CategoryAnalysisResult]) -> AnalysisSummary {
    AnalysisSummary {
        total_surveys: responses.len(),
        high_priority: results.iter().filter(|r| r.priority == Priority::High).count(),
        improving: results.iter().filter(|r| r.trend == Trend::Improving).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Answer, AnswerValue, SurveyResponse};
    use chrono::Utc;

    fn response(ratings: &[(&str, Category, u8)]) -> SurveyResponse {
        SurveyResponse {
            id: "1".into(),
            timestamp: Utc::now(),
            answers: ratings
                .iter()
                .map(|&(id, category, value)| Answer {
                    question_id: id.into(),
                    category,
                    value: AnswerValue::Rating(value),
                })
                .collect(),
            location: "Mumbai, Maharashtra".into(),
            user_type: "Resident".into(),
        }
    }

    #[test]
    fn trend_thresholds_are_fixed() {
        assert_eq!(trend_for(4.0), Trend::Improving);
        assert_eq!(trend_for(2.0), Trend::Declining);
        assert_eq!(trend_for(3.0), Trend::Stable);
    }

    #[test]
    fn priority_thresholds_are_fixed() {
        assert_eq!(priority_for(2.0), Priority::High);
        assert_eq!(priority_for(3.0), Priority::Medium);
        assert_eq!(priority_for(4.0), Priority::Low);
    }

    #[test]
    fn average_divides_by_rating_count_not_responses() {
        // One response carries two heat ratings, another carries one.
        let responses = vec![
            response(&[("heat-1", Category::Heat, 2), ("heat-3", Category::Heat, 4)]),
            response(&[("heat-1", Category::Heat, 3)]),
        ];
        let agg = aggregate_category(&responses, Category::Heat);
        assert_eq!(agg.rating_count, 3);
        assert_eq!(agg.response_count, 2);
        assert!((agg.average - 3.0).abs() < 1e-9);
    }

    #[test]
    fn choice_only_responses_contribute_nothing_numeric() {
        let mut r = response(&[]);
        r.answers.push(Answer {
            question_id: "heat-2".into(),
            category: Category::Heat,
            value: AnswerValue::Choice("Fans".into()),
        });
        let agg = aggregate_category(&[r], Category::Heat);
        assert_eq!(agg.rating_count, 0);
        assert_eq!(agg.response_count, 1);
        assert_eq!(agg.average, 0.0);
    }

    #[test]
    fn no_numeric_answers_forces_stable_low() {
        let results = analyze(&[]);
        assert_eq!(results.len(), 4);
        for r in &results {
            assert_eq!(r.score, 0.0);
            assert_eq!(r.trend, Trend::Stable);
            assert_eq!(r.priority, Priority::Low);
        }
    }

    #[test]
    fn scores_stay_in_bounds_after_rounding() {
        let responses = vec![
            response(&[("heat-1", Category::Heat, 5)]),
            response(&[("heat-1", Category::Heat, 5)]),
        ];
        let results = analyze(&responses);
        for r in &results {
            assert!((0.0..=5.0).contains(&r.score));
        }
    }

    #[test]
    fn aggregator_is_idempotent() {
        let responses = vec![
            response(&[("heat-1", Category::Heat, 1), ("green-1", Category::GreenSpace, 4)]),
            response(&[("air-1", Category::AirQuality, 3)]),
        ];
        assert_eq!(analyze(&responses), analyze(&responses));
    }

    #[test]
    fn three_low_heat_ratings_declining_high() {
        let responses: Vec<_> = (0..3)
            .map(|_| response(&[("heat-1", Category::Heat, 1)]))
            .collect();
        let results = analyze(&responses);
        let heat = results.iter().find(|r| r.category == Category::Heat).unwrap();
        assert_eq!(heat.score, 1.0);
        assert_eq!(heat.trend, Trend::Declining);
        assert_eq!(heat.priority, Priority::High);
    }

    #[test]
    fn summary_counts_priorities_and_trends() {
        let responses = vec![
            response(&[("heat-1", Category::Heat, 1)]),
            response(&[("green-1", Category::GreenSpace, 5)]),
        ];
        let results = analyze(&responses);
        let summary = summarize(&responses, &results);
        assert_eq!(summary.total_surveys, 2);
        assert_eq!(summary.high_priority, 1);
        assert_eq!(summary.improving, 1);
    }
}
