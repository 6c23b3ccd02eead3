//! End-to-end flows: persist responses, aggregate them, and render the
//! report document they produce.

use chrono::Utc;

use urbanscope::analysis;
use urbanscope::report;
use urbanscope::store::{JsonFileStore, ResponseStore};
use urbanscope::types::{Answer, AnswerValue, Category, NewResponse, Priority, Trend};

fn low_heat_response(location: &str) -> NewResponse {
    NewResponse {
        answers: vec![Answer {
            question_id: "heat-1".into(),
            category: Category::Heat,
            value: AnswerValue::Rating(1),
        }],
        location: location.into(),
        user_type: "Resident".into(),
    }
}

#[test]
fn persisted_responses_flow_into_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("surveys.json");

    let mut store = JsonFileStore::new(&path);
    for _ in 0..3 {
        store.record(low_heat_response("Mumbai, Maharashtra")).unwrap();
    }

    let responses = JsonFileStore::new(&path).load_all().unwrap();
    assert_eq!(responses.len(), 3);

    let results = analysis::analyze(&responses);
    let heat = results.iter().find(|r| r.category == Category::Heat).unwrap();
    assert_eq!(heat.score, 1.0);
    assert_eq!(heat.trend, Trend::Declining);
    assert_eq!(heat.priority, Priority::High);

    let summary = analysis::summarize(&responses, &results);
    assert_eq!(summary.total_surveys, 3);
    assert_eq!(summary.high_priority, 1);
}

#[test]
fn report_renders_from_the_stored_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("surveys.json");

    let mut store = JsonFileStore::new(&path);
    store.record(low_heat_response("Delhi, NCT")).unwrap();
    store.record(low_heat_response("Mumbai, Maharashtra")).unwrap();

    let responses = JsonFileStore::new(&path).load_all().unwrap();

    let delhi = report::build_report("Delhi, NCT", &responses, Utc::now());
    assert_eq!(delhi.summary.total_surveys, 1);

    let all = report::build_report(report::ALL_CITIES, &responses, Utc::now());
    assert_eq!(all.summary.total_surveys, 2);

    let text = report::render_text(&all);
    assert!(text.contains("EXECUTIVE SUMMARY\n================\n"));
    assert!(text.contains("CATEGORY ANALYSIS\n=================\n"));
    assert!(text.contains("Total Surveys: 2"));
}
