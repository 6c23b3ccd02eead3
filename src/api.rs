//! HTTP query endpoint for the mock Earth-observation service.
//!
//! One read-only route, `GET /api/earth`, dispatching on the `action`
//! parameter. Dispatch is a pure function over the parsed query so it can be
//! tested without a socket; the axum handler only maps errors to statuses.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::earthdata::{EarthDataService, HistoricalMetric};
use crate::error::EngineError;

const DEFAULT_CITY: &str = "Mumbai, Maharashtra";
const DEFAULT_MONTHS: u32 = 12;
/// Longest historical series a query may request (10 years of months).
const MAX_MONTHS: u32 = 120;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EarthQuery {
    pub action: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "layerId")]
    pub layer_id: Option<String>,
    /// Four comma-separated numbers: min-lng, min-lat, max-lng, max-lat.
    pub bbox: Option<String>,
    pub metric: Option<String>,
    pub months: Option<String>,
}

fn parse_bbox(raw: &str) -> Result<[f64; 4], EngineError> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| EngineError::InvalidParameter {
            name: "bbox",
            reason: e.to_string(),
        })?;
    parts.try_into().map_err(|_| EngineError::InvalidParameter {
        name: "bbox",
        reason: "expected 4 comma-separated numbers".into(),
    })
}

/// Resolve one query against the service. Every action returns the JSON
/// body shape the dashboard consumes: `{"layers"|"url"|"data"|"insights"}`.
pub fn dispatch(
    service: &EarthDataService,
    query: &EarthQuery,
    now: DateTime<Utc>,
) -> Result<Value, EngineError> {
    let action = query
        .action
        .as_deref()
        .ok_or(EngineError::MissingParameter("action"))?;
    let city = query.city.as_deref().unwrap_or(DEFAULT_CITY);

    match action {
        "layers" => Ok(json!({ "layers": service.data_layers() })),
        "layer-url" => {
            let layer_id = query
                .layer_id
                .as_deref()
                .ok_or(EngineError::MissingParameter("layerId"))?;
            let bbox = parse_bbox(
                query
                    .bbox
                    .as_deref()
                    .ok_or(EngineError::MissingParameter("bbox"))?,
            )?;
            let url = service.layer_url(layer_id, bbox, 512, 512)?;
            Ok(json!({ "url": url }))
        }
        "temperature" => Ok(json!({ "data": service.temperature(city, now) })),
        "vegetation" => Ok(json!({ "data": service.vegetation(city, now) })),
        "airquality" => Ok(json!({ "data": service.air_quality(city, now) })),
        "floodrisk" => Ok(json!({ "data": service.flood_risk(city, now) })),
        "insights" => Ok(json!({ "insights": service.city_insights(city) })),
        "historical" => {
            let metric: HistoricalMetric = query
                .metric
                .as_deref()
                .ok_or(EngineError::MissingParameter("metric"))?
                .parse()?;
            let months = match query.months.as_deref() {
                None => DEFAULT_MONTHS,
                Some(raw) => raw.parse().map_err(|_| EngineError::InvalidParameter {
                    name: "months",
                    reason: format!("not a number: {raw:?}"),
                })?,
            };
            if !(1..=MAX_MONTHS).contains(&months) {
                return Err(EngineError::InvalidParameter {
                    name: "months",
                    reason: format!("must be between 1 and {MAX_MONTHS}, got {months}"),
                });
            }
            Ok(json!({ "data": service.historical(city, metric, months, now) }))
        }
        other => Err(EngineError::InvalidParameter {
            name: "action",
            reason: format!("unsupported action {other:?}"),
        }),
    }
}

fn status_for(err: &EngineError) -> StatusCode {
    match err {
        EngineError::MissingParameter(_) | EngineError::InvalidParameter { .. } => {
            StatusCode::BAD_REQUEST
        }
        EngineError::LayerNotFound(_) | EngineError::ScenarioNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::MalformedData(_) | EngineError::Csv(_) | EngineError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn earth_handler(
    State(service): State<Arc<EarthDataService>>,
    Query(query): Query<EarthQuery>,
) -> Response {
    match dispatch(&service, &query, Utc::now()) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            let status = status_for(&err);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error!(%err, "earth data query failed");
                // Generic message only; the details stay in the log.
                return (status, Json(json!({ "error": "Failed to fetch earth data" })))
                    .into_response();
            }
            (status, Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}

pub fn router(service: Arc<EarthDataService>) -> Router {
    Router::new()
        .route("/api/earth", get(earth_handler))
        .with_state(service)
}

/// Bind and serve until the process exits.
pub async fn serve(addr: &str, service: Arc<EarthDataService>) -> Result<(), EngineError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "earth data API listening");
    axum::serve(listener, router(service)).await?;
    Ok(())
}
