//! Static survey question catalog. Fixed at build time.

use crate::types::{Category, QuestionKind, SurveyQuestion};

pub const CITIES: [&str; 5] = [
    "Mumbai, Maharashtra",
    "Delhi, NCT",
    "Bangalore, Karnataka",
    "Chennai, Tamil Nadu",
    "Kolkata, West Bengal",
];

pub const QUESTIONS: [SurveyQuestion; 10] = [
    SurveyQuestion {
        id: "heat-1",
        kind: QuestionKind::Rating,
        question: "How would you rate the temperature comfort in your area during peak summer?",
        options: &[],
        required: true,
        category: Category::Heat,
    },
    SurveyQuestion {
        id: "heat-2",
        kind: QuestionKind::MultipleChoice,
        question: "What cooling methods do you primarily use?",
        options: &[
            "Air Conditioning",
            "Fans",
            "Natural ventilation",
            "Cooling centers",
            "Other",
        ],
        required: true,
        category: Category::Heat,
    },
    SurveyQuestion {
        id: "green-1",
        kind: QuestionKind::Rating,
        question: "How satisfied are you with the amount of green space in your neighborhood?",
        options: &[],
        required: true,
        category: Category::GreenSpace,
    },
    SurveyQuestion {
        id: "green-2",
        kind: QuestionKind::MultipleChoice,
        question: "What type of green spaces do you use most?",
        options: &[
            "Parks",
            "Street trees",
            "Community gardens",
            "Rooftop gardens",
            "None available",
        ],
        required: true,
        category: Category::GreenSpace,
    },
    SurveyQuestion {
        id: "air-1",
        kind: QuestionKind::Rating,
        question: "How would you rate the air quality in your area?",
        options: &[],
        required: true,
        category: Category::AirQuality,
    },
    SurveyQuestion {
        id: "air-2",
        kind: QuestionKind::MultipleChoice,
        question: "What air quality issues do you notice most?",
        options: &[
            "Vehicle emissions",
            "Industrial pollution",
            "Dust/construction",
            "Burning waste",
            "None",
        ],
        required: true,
        category: Category::AirQuality,
    },
    SurveyQuestion {
        id: "infra-1",
        kind: QuestionKind::Rating,
        question: "How would you rate the flood risk management in your area?",
        options: &[],
        required: true,
        category: Category::Infrastructure,
    },
    SurveyQuestion {
        id: "infra-2",
        kind: QuestionKind::MultipleChoice,
        question: "What infrastructure improvements are most needed?",
        options: &[
            "Better drainage",
            "Flood barriers",
            "Water storage",
            "Emergency systems",
            "None needed",
        ],
        required: true,
        category: Category::Infrastructure,
    },
    SurveyQuestion {
        id: "community-1",
        kind: QuestionKind::FreeText,
        question: "What specific urban planning concerns do you have?",
        options: &[],
        required: false,
        category: Category::Community,
    },
    SurveyQuestion {
        id: "location",
        kind: QuestionKind::LocationSelect,
        question: "Select your area of residence",
        options: &[
            "Mumbai, Maharashtra",
            "Delhi, NCT",
            "Bangalore, Karnataka",
            "Chennai, Tamil Nadu",
            "Kolkata, West Bengal",
        ],
        required: true,
        category: Category::Community,
    },
];

/// Look up a catalog question by id.
pub fn question(id: &str) -> Option<&'static SurveyQuestion> {
    QUESTIONS.iter().find(|q| q.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_all_aggregated_categories() {
        for category in Category::AGGREGATED {
            assert!(
                QUESTIONS
                    .iter()
                    .any(|q| q.category == category && q.kind == QuestionKind::Rating),
                "no rating question for {category}"
            );
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(question("heat-1").unwrap().category, Category::Heat);
        assert!(question("nope").is_none());
    }
}
