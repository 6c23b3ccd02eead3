//! Canned insight and recommendation text, selected by score band.
//!
//! Two variants exist on purpose: the analysis view flags limited data below
//! 5 responses, the report view below 3. The score bands themselves match
//! the trend classifier thresholds (<=2, 2-4, >=4).

use crate::types::Category;

/// Response count under which the analysis view flags limited data.
const ANALYSIS_LIMITED_DATA: usize = 5;
/// Response count under which the report view flags limited data.
const REPORT_LIMITED_DATA: usize = 3;

pub fn no_data_insights() -> Vec<String> {
    vec!["No data available for analysis".to_string()]
}

pub fn no_data_recommendations() -> Vec<String> {
    vec!["Encourage more survey participation".to_string()]
}

/// Insights shown on the analysis view.
pub fn analysis_insights(category: Category, score: f64, response_count: usize) -> Vec<String> {
    let mut insights = Vec::new();
    if response_count < ANALYSIS_LIMITED_DATA {
        insights.push(format!("Limited data available ({response_count} responses)"));
    }

    match category {
        Category::Heat => {
            if score <= 2.0 {
                insights.push("Residents report severe heat discomfort".into());
                insights.push("Urban heat island effect is significant".into());
            } else if score >= 4.0 {
                insights.push("Heat management is generally effective".into());
            } else {
                insights.push("Moderate heat stress reported".into());
            }
        }
        Category::GreenSpace => {
            if score <= 2.0 {
                insights.push("Insufficient green space coverage".into());
                insights.push("High demand for more parks and vegetation".into());
            } else if score >= 4.0 {
                insights.push("Good green space availability".into());
            } else {
                insights.push("Moderate green space satisfaction".into());
            }
        }
        Category::AirQuality => {
            if score <= 2.0 {
                insights.push("Poor air quality affecting residents".into());
                insights.push("Pollution sources need immediate attention".into());
            } else if score >= 4.0 {
                insights.push("Air quality is generally acceptable".into());
            } else {
                insights.push("Air quality concerns present".into());
            }
        }
        Category::Infrastructure => {
            if score <= 2.0 {
                insights.push("Infrastructure needs significant improvement".into());
                insights.push("Flood risk management inadequate".into());
            } else if score >= 4.0 {
                insights.push("Infrastructure is well-maintained".into());
            } else {
                insights.push("Infrastructure requires moderate improvements".into());
            }
        }
        Category::Community => {}
    }

    insights
}

/// Recommendations shown on the analysis view. Bands: <=2, <=3, else.
pub fn analysis_recommendations(category: Category, score: f64) -> Vec<String> {
    let texts: &[&str] = match category {
        Category::Heat => {
            if score <= 2.0 {
                &[
                    "Implement green roof programs",
                    "Increase tree canopy coverage by 30%",
                    "Install cool pavement materials",
                ]
            } else if score <= 3.0 {
                &[
                    "Expand existing cooling infrastructure",
                    "Create more shaded public spaces",
                ]
            } else {
                &["Maintain current heat management strategies"]
            }
        }
        Category::GreenSpace => {
            if score <= 2.0 {
                &[
                    "Develop 5 new parks in underserved areas",
                    "Implement street tree planting program",
                    "Create community garden initiatives",
                ]
            } else if score <= 3.0 {
                &["Enhance existing green spaces", "Improve park accessibility"]
            } else {
                &["Continue green space maintenance"]
            }
        }
        Category::AirQuality => {
            if score <= 2.0 {
                &[
                    "Implement vehicle emission controls",
                    "Increase air quality monitoring stations",
                    "Promote public transportation",
                ]
            } else if score <= 3.0 {
                &[
                    "Strengthen pollution control measures",
                    "Improve industrial emission standards",
                ]
            } else {
                &["Maintain air quality standards"]
            }
        }
        Category::Infrastructure => {
            if score <= 2.0 {
                &[
                    "Upgrade drainage systems",
                    "Implement flood early warning system",
                    "Strengthen flood barriers",
                ]
            } else if score <= 3.0 {
                &[
                    "Improve existing infrastructure",
                    "Enhance emergency response systems",
                ]
            } else {
                &["Maintain infrastructure standards"]
            }
        }
        Category::Community => &[],
    };
    texts.iter().map(|s| s.to_string()).collect()
}

/// Insights used inside generated reports; one line per category plus the
/// limited-data flag at the report threshold.
pub fn report_insights(category: Category, score: f64, response_count: usize) -> Vec<String> {
    let mut insights = Vec::new();
    if response_count < REPORT_LIMITED_DATA {
        insights.push(format!("Limited data available ({response_count} responses)"));
    }

    let text = match category {
        Category::Heat => {
            if score <= 2.0 {
                "Severe heat stress reported by residents"
            } else if score >= 4.0 {
                "Heat management strategies are effective"
            } else {
                "Moderate heat concerns identified"
            }
        }
        Category::GreenSpace => {
            if score <= 2.0 {
                "Insufficient green space coverage"
            } else if score >= 4.0 {
                "Adequate green space availability"
            } else {
                "Green space needs improvement"
            }
        }
        Category::AirQuality => {
            if score <= 2.0 {
                "Poor air quality affecting health"
            } else if score >= 4.0 {
                "Air quality standards met"
            } else {
                "Air quality requires attention"
            }
        }
        Category::Infrastructure => {
            if score <= 2.0 {
                "Infrastructure needs major upgrades"
            } else if score >= 4.0 {
                "Infrastructure is well-maintained"
            } else {
                "Infrastructure improvements needed"
            }
        }
        Category::Community => return insights,
    };
    insights.push(text.to_string());
    insights
}
