// Entry point and high-level CLI flow.
//
// The menu drives the full pipeline:
// - Option [1] loads the persisted survey collection, printing diagnostics.
// - Option [2] records a demo survey response into the store.
// - Option [3] runs the analysis engine and previews the category table.
// - Option [4] assembles a report and exports text + CSV artifacts.
// - Option [5] simulates an intervention scenario for a city.
// - Option [6] prints the city health index breakdown.
// - Option [7] serves the Earth-observation query API.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use once_cell::sync::Lazy;
use tracing::warn;

use urbanscope::analysis;
use urbanscope::api;
use urbanscope::earthdata::{EarthDataService, HistoricalMetric};
use urbanscope::health;
use urbanscope::output;
use urbanscope::report;
use urbanscope::scenario;
use urbanscope::store::{JsonFileStore, ResponseStore};
use urbanscope::survey;
use urbanscope::types::{
    Answer, AnswerValue, CategoryRow, HealthMetrics, MetricCardRow, NewResponse, QuestionKind,
    SurveyResponse,
};
use urbanscope::util::format_int;

const STORE_PATH: &str = "urban_planning_surveys.json";
const API_ADDR: &str = "127.0.0.1:3000";

// Simple in-memory app state so we only load the collection once but can run
// analyses and reports multiple times in a single session.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { responses: None }));

struct AppState {
    responses: Option<Vec<SurveyResponse>>,
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn prompt(label: &str) -> String {
    print!("{label}: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn loaded_responses() -> Option<Vec<SurveyResponse>> {
    let state = APP_STATE.lock().unwrap();
    state.responses.clone()
}

/// Handle option [1]: load the persisted survey collection.
fn handle_load() {
    let store = JsonFileStore::new(STORE_PATH);
    match store.load_all() {
        Ok(responses) => {
            println!(
                "Loaded {} survey responses from {}.\n",
                format_int(responses.len() as i64),
                STORE_PATH
            );
            let mut state = APP_STATE.lock().unwrap();
            state.responses = Some(responses);
        }
        Err(e) => {
            eprintln!("Failed to load survey data: {}\n", e);
        }
    }
}

/// Handle option [2]: record a demo response built from the question catalog.
fn handle_submit() {
    let location = {
        println!("Locations: {}", survey::CITIES.join(", "));
        let choice = prompt("Location");
        if choice.is_empty() {
            survey::CITIES[0].to_string()
        } else {
            choice
        }
    };

    let mut answers = Vec::new();
    for question in &survey::QUESTIONS {
        let value = match question.kind {
            QuestionKind::Rating => {
                let raw = prompt(&format!("{} (1-5)", question.question));
                match raw.parse::<u8>() {
                    Ok(r @ 1..=5) => AnswerValue::Rating(r),
                    _ => {
                        println!("Skipping {} (expected a 1-5 rating)", question.id);
                        continue;
                    }
                }
            }
            QuestionKind::MultipleChoice => {
                AnswerValue::Choice(question.options[0].to_string())
            }
            QuestionKind::FreeText | QuestionKind::LocationSelect => continue,
        };
        answers.push(Answer {
            question_id: question.id.to_string(),
            category: question.category,
            value,
        });
    }

    let mut store = JsonFileStore::new(STORE_PATH);
    match store.record(NewResponse {
        answers,
        location,
        user_type: "Resident".to_string(),
    }) {
        Ok(recorded) => {
            println!("Recorded response {} for {}.\n", recorded.id, recorded.location);
            // Invalidate the cached collection so the next analysis reloads.
            let mut state = APP_STATE.lock().unwrap();
            state.responses = None;
        }
        Err(e) => eprintln!("Failed to record response: {}\n", e),
    }
}

/// Handle option [3]: run the analysis engine over the loaded collection.
fn handle_analysis() {
    let Some(responses) = loaded_responses() else {
        println!("Error: No data loaded. Please load the survey collection first (option 1).\n");
        return;
    };

    let results = analysis::analyze(&responses);
    let summary = analysis::summarize(&responses, &results);
    println!(
        "Analyzed {} surveys: {} high priority, {} improving.\n",
        format_int(summary.total_surveys as i64),
        summary.high_priority,
        summary.improving
    );

    let rows: Vec<CategoryRow> = results.iter().map(CategoryRow::from).collect();
    output::preview_table_rows(&rows, rows.len());

    for result in &results {
        println!("{} insights:", result.category.display_name());
        for insight in &result.insights {
            println!("  - {insight}");
        }
    }
    println!();
}

/// Handle option [4]: assemble a report and export the artifacts.
fn handle_report() {
    let Some(responses) = loaded_responses() else {
        println!("Error: No data loaded. Please load the survey collection first (option 1).\n");
        return;
    };

    let location = {
        println!("Locations: {} or {}", survey::CITIES.join(", "), report::ALL_CITIES);
        let choice = prompt("Location");
        if choice.is_empty() {
            report::ALL_CITIES.to_string()
        } else {
            choice
        }
    };

    println!("Generating report...");
    let document = report::build_report(&location, &responses, Utc::now());

    let text = report::render_text(&document);
    let text_file = "urban_planning_report.txt";
    if let Err(e) = output::write_text(text_file, &text) {
        eprintln!("Write error: {}", e);
    }

    let rows: Vec<CategoryRow> = document.category_analysis.iter().map(CategoryRow::from).collect();
    let csv_file = "report_category_analysis.csv";
    if let Err(e) = output::write_csv(csv_file, &rows) {
        eprintln!("Write error: {}", e);
    }

    let json_file = "urban_planning_report.json";
    if let Err(e) = output::write_json(json_file, &document) {
        eprintln!("Write error: {}", e);
    }

    println!("{}", text);
    println!("(Report exported to {text_file}, {csv_file}, {json_file})\n");
}

/// Handle option [5]: simulate an intervention scenario.
fn handle_simulation() {
    println!("Available scenarios:");
    for s in scenario::scenarios() {
        println!("  {} - {} ({}, {})", s.id, s.name, s.estimated_cost, s.timeline);
    }
    let scenario_id = prompt("Scenario id");
    let city = prompt("City");

    match scenario::simulate(&scenario_id, &city) {
        Ok(result) => {
            println!("\nSimulation Results: {}\n", result.scenario);
            let ba = &result.before_after;
            println!(
                "Temperature: {:.1}°C -> {:.1}°C",
                ba.temperature.before, ba.temperature.after
            );
            println!(
                "Green Space: {:.0}% -> {:.0}%",
                ba.green_space.before, ba.green_space.after
            );
            println!(
                "Air Quality: {:.0} AQI -> {:.0} AQI",
                ba.air_quality.before, ba.air_quality.after
            );
            println!(
                "Engagement: {:.0}% -> {:.0}%",
                ba.engagement.before, ba.engagement.after
            );
            let cb = &result.cost_benefit;
            println!(
                "Cost: {} | Annual savings: {} | Payback: {} | ROI: {}",
                cb.total_cost, cb.annual_savings, cb.payback_period, cb.roi
            );
            println!("\nTop risks:");
            for risk in &result.risks.high {
                println!("  - {risk}");
            }
            println!();
        }
        Err(e) => {
            eprintln!("Simulation failed: {}\n", e);
        }
    }
}

/// Handle option [6]: city health index from the demo metric sets, plus a
/// metric-card CSV export for the chosen city.
fn handle_health_index() {
    let city = {
        let choice = prompt("City");
        if choice.is_empty() {
            "Mumbai, Maharashtra".to_string()
        } else {
            choice
        }
    };
    let metrics = demo_metrics(&city);
    let score = health::compute_index(&metrics);
    let history = health::synthetic_history(f64::from(score), 0);
    let assessment = health::assess(&metrics, &history);

    println!("\nCity Health Index for {}: {} ({})", city, assessment.score, assessment.label);
    println!("Trend: {:?}", assessment.trend);
    println!("Recommendations:");
    for rec in &assessment.recommendations {
        println!("  - {rec}");
    }

    let cards = metric_cards(&city, Utc::now());
    let cards_file = "city_metric_cards.csv";
    match output::write_metric_cards(cards_file, &cards) {
        Ok(()) => println!("(Metric cards exported to {cards_file})\n"),
        Err(e) => eprintln!("Write error: {}\n", e),
    }
}

/// One exportable card per insight figure, with the change column taken from
/// the tail of the matching historical series.
fn metric_cards(city: &str, now: chrono::DateTime<Utc>) -> Vec<MetricCardRow> {
    let service = EarthDataService::default();
    let insights = service.city_insights(city);
    let timestamp = now.format("%Y-%m-%d %H:%M").to_string();

    let change_for = |metric: HistoricalMetric| {
        let series = service.historical(city, metric, 2, now);
        match series.as_slice() {
            [prev, last] => format!("{:+.1}", last.value - prev.value),
            _ => "0.0".to_string(),
        }
    };

    vec![
        MetricCardRow {
            metric: "Heat Island Intensity".into(),
            value: format!("{:.1}", insights.heat_island_intensity),
            unit: "°C".into(),
            change: change_for(HistoricalMetric::Temperature),
            timestamp: timestamp.clone(),
            source: "Landsat 8 TIRS".into(),
        },
        MetricCardRow {
            metric: "Green Space Deficit".into(),
            value: format!("{:.0}", insights.green_space_deficit),
            unit: "%".into(),
            change: change_for(HistoricalMetric::Vegetation),
            timestamp: timestamp.clone(),
            source: "MODIS NDVI".into(),
        },
        MetricCardRow {
            metric: "Air Quality Index".into(),
            value: format!("{:.0}", insights.air_quality_index),
            unit: "AQI".into(),
            change: change_for(HistoricalMetric::AirQuality),
            timestamp: timestamp.clone(),
            source: "MODIS Aerosol".into(),
        },
        MetricCardRow {
            metric: "Flood Risk Areas".into(),
            value: format!("{:.0}", insights.flood_risk_areas),
            unit: "%".into(),
            change: "0.0".into(),
            timestamp,
            source: "SRTM".into(),
        },
    ]
}

/// Demo component scores per city, standing in for live dashboard inputs.
fn demo_metrics(city: &str) -> HealthMetrics {
    match city {
        "Bangalore, Karnataka" => HealthMetrics {
            air_quality: 72.0,
            temperature: 68.0,
            vegetation: 61.0,
            water_quality: 74.0,
            waste_management: 70.0,
            public_health: 78.0,
            transport_efficiency: 64.0,
            energy_consumption: 62.0,
        },
        "Delhi, NCT" => HealthMetrics {
            air_quality: 38.0,
            temperature: 45.0,
            vegetation: 40.0,
            water_quality: 58.0,
            waste_management: 55.0,
            public_health: 62.0,
            transport_efficiency: 57.0,
            energy_consumption: 48.0,
        },
        _ => HealthMetrics {
            air_quality: 65.0,
            temperature: 58.0,
            vegetation: 45.0,
            water_quality: 72.0,
            waste_management: 68.0,
            public_health: 75.0,
            transport_efficiency: 60.0,
            energy_consumption: 55.0,
        },
    }
}

/// Handle option [7]: serve the Earth-observation query API until Ctrl-C.
fn handle_serve() {
    let service = Arc::new(EarthDataService::default());
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}\n", e);
            return;
        }
    };
    println!("Serving earth data API on http://{API_ADDR} (Ctrl-C to stop)\n");
    if let Err(e) = runtime.block_on(api::serve(API_ADDR, service)) {
        warn!(%e, "API server exited");
        eprintln!("Server error: {}\n", e);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "urbanscope=info".into()),
        )
        .init();

    loop {
        println!("Urban Planning Analytics");
        println!("[1] Load survey responses");
        println!("[2] Submit a demo response");
        println!("[3] Run analysis engine");
        println!("[4] Generate report");
        println!("[5] Simulate scenario");
        println!("[6] City health index");
        println!("[7] Serve earth data API");
        println!("[q] Quit\n");
        match read_choice().as_str() {
            "1" => handle_load(),
            "2" => handle_submit(),
            "3" => handle_analysis(),
            "4" => handle_report(),
            "5" => handle_simulation(),
            "6" => handle_health_index(),
            "7" => handle_serve(),
            "q" | "Q" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 1-7 or q.\n");
            }
        }
    }
}
