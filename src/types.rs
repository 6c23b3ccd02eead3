use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Survey categories used to bucket questions and aggregate scores.
///
/// `Community` holds free-text and location questions; only the first four
/// categories are aggregated into scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Heat,
    GreenSpace,
    AirQuality,
    Infrastructure,
    Community,
}

impl Category {
    /// The four categories that produce a `CategoryAnalysisResult`.
    pub const AGGREGATED: [Category; 4] = [
        Category::Heat,
        Category::GreenSpace,
        Category::AirQuality,
        Category::Infrastructure,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Heat => "heat",
            Category::GreenSpace => "green-space",
            Category::AirQuality => "air-quality",
            Category::Infrastructure => "infrastructure",
            Category::Community => "community",
        }
    }

    /// Human-readable form, e.g. `green space`.
    pub fn display_name(&self) -> String {
        self.label().replace('-', " ")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single answer within a survey response. Typed so aggregation never has
/// to guess at the shape of a value: only `Rating` answers are numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub category: Category,
    pub value: AnswerValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum AnswerValue {
    /// 1-5 satisfaction rating.
    Rating(u8),
    /// Selected option from a multiple-choice question.
    Choice(String),
    /// Free-text comment.
    Text(String),
}

impl AnswerValue {
    pub fn rating(&self) -> Option<f64> {
        match self {
            AnswerValue::Rating(r) => Some(f64::from(*r)),
            _ => None,
        }
    }
}

/// One submitted survey. Immutable after creation and only ever appended to
/// the persisted collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub answers: Vec<Answer>,
    pub location: String,
    pub user_type: String,
}

/// Answers supplied at submission time; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewResponse {
    pub answers: Vec<Answer>,
    pub location: String,
    pub user_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Rating,
    MultipleChoice,
    FreeText,
    LocationSelect,
}

/// Static survey catalog entry. Fixed at build time, not user-editable.
#[derive(Debug, Clone, Copy)]
pub struct SurveyQuestion {
    pub id: &'static str,
    pub kind: QuestionKind,
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub required: bool,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

/// Per-category aggregation output. Recomputed on every analysis run and
/// never persisted independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysisResult {
    pub category: Category,
    /// Average rating, 0-5, rounded to one decimal.
    pub score: f64,
    pub trend: Trend,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub priority: Priority,
}

/// Console preview row for analysis results.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CategoryRow {
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub category: String,
    #[serde(rename = "Score")]
    #[tabled(rename = "Score")]
    pub score: String,
    #[serde(rename = "Trend")]
    #[tabled(rename = "Trend")]
    pub trend: String,
    #[serde(rename = "Priority")]
    #[tabled(rename = "Priority")]
    pub priority: String,
}

impl From<&CategoryAnalysisResult> for CategoryRow {
    fn from(r: &CategoryAnalysisResult) -> Self {
        CategoryRow {
            category: r.category.display_name(),
            score: format!("{:.1}/5", r.score),
            trend: r.trend.to_string(),
            priority: r.priority.to_string(),
        }
    }
}

/// Exportable metric card, one CSV row per dashboard metric.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct MetricCardRow {
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
    #[serde(rename = "Unit")]
    #[tabled(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Change")]
    #[tabled(rename = "Change")]
    pub change: String,
    #[serde(rename = "Timestamp")]
    #[tabled(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Source")]
    #[tabled(rename = "Source")]
    pub source: String,
}

// ---------------------------------------------------------------------------
// Scenario simulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Draft,
    Simulating,
    Completed,
    Recommended,
}

/// Fixed per-scenario impact deltas applied to a city baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetrics {
    pub temperature_reduction: f64,
    pub green_space_increase: f64,
    pub air_quality_improvement: f64,
    pub community_engagement: f64,
}

/// Read-only scenario catalog entry.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub interventions: &'static [&'static str],
    pub estimated_cost: &'static str,
    pub timeline: &'static str,
    pub impact_metrics: ImpactMetrics,
    pub status: ScenarioStatus,
}

/// Pre-intervention reference values for a city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityBaseline {
    pub temperature: f64,
    pub green_space: f64,
    pub air_quality: f64,
    pub engagement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDelta {
    pub before: f64,
    pub after: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeforeAfter {
    pub temperature: MetricDelta,
    pub green_space: MetricDelta,
    pub air_quality: MetricDelta,
    pub engagement: MetricDelta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBenefit {
    pub total_cost: String,
    pub annual_savings: String,
    pub payback_period: String,
    pub roi: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalImpact {
    /// Tonnes of CO2 avoided per year.
    pub co2_reduction: i64,
    /// MWh saved per year.
    pub energy_savings: i64,
    /// Percent reduction in flood-prone area.
    pub flood_risk_reduction: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanPhase {
    pub phase: &'static str,
    pub duration: &'static str,
    pub activities: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

/// Ephemeral output of one simulation run; not persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub scenario: String,
    pub before_after: BeforeAfter,
    pub cost_benefit: CostBenefit,
    pub environmental_impact: EnvironmentalImpact,
    pub recommendations: Vec<String>,
    pub implementation_plan: Vec<PlanPhase>,
    pub risks: RiskAssessment,
}

// ---------------------------------------------------------------------------
// City health index
// ---------------------------------------------------------------------------

/// Eight component scores, each 0-100, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub air_quality: f64,
    pub temperature: f64,
    pub vegetation: f64,
    pub water_quality: f64,
    pub waste_management: f64,
    pub public_health: f64,
    pub transport_efficiency: f64,
    pub energy_consumption: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTrend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthAssessment {
    /// Weighted overall score, 0-100.
    pub score: u32,
    pub label: &'static str,
    pub trend: HealthTrend,
    pub recommendations: Vec<&'static str>,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_surveys: usize,
    /// Mean of the four category scores, one decimal.
    pub average_score: f64,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Per-category score datapoint used by the report's chart section.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPerformance {
    pub category: String,
    pub score: f64,
    pub responses: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub location: String,
    pub summary: ReportSummary,
    pub category_analysis: Vec<CategoryAnalysisResult>,
    pub performance: Vec<CategoryPerformance>,
}
