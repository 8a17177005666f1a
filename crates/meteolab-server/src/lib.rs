//! HTTP API for the MeteoLab greenhouse dashboard.
//!
//! Mounts one [`Dashboard`] for the lifetime of the server and serves its
//! history, live reading and the static project catalog as JSON.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};

use meteolab_core::catalog::{self, Hypothesis, HypothesisStatus, MonthlyLight, ProjectPhase};
use meteolab_core::{Dashboard, DashboardConfig, Metric, MetricSummary, SensorReading};

/// Shared server state.
struct AppState {
    dashboard: Dashboard,
}

#[derive(Deserialize)]
struct HistoryParams {
    /// Restrict the summary to one metric (temperature, humidity, light, plant_height).
    metric: Option<Metric>,
}

#[derive(Serialize)]
struct HistoryResponse {
    days: usize,
    readings: Vec<SensorReading>,
    summary: Vec<MetricSummary>,
}

#[derive(Serialize)]
struct CurrentResponse {
    reading: Option<SensorReading>,
    revision: u64,
    ticks: u64,
    refresh_ms: u64,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    live_feed: bool,
    ticks: u64,
    history_days: usize,
}

#[derive(Deserialize)]
struct HypothesisParams {
    status: Option<String>,
}

#[derive(Serialize)]
struct HypothesesResponse {
    hypotheses: Vec<&'static Hypothesis>,
    total: usize,
}

#[derive(Serialize)]
struct TimelineResponse {
    phases: &'static [ProjectPhase],
    progress: f64,
}

async fn handle_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Json<HistoryResponse> {
    let readings = state.dashboard.history();
    let summary = match params.metric {
        Some(metric) => meteolab_core::summarize(readings, metric).into_iter().collect(),
        None => meteolab_core::summarize_all(readings),
    };
    Json(HistoryResponse {
        days: readings.len(),
        readings: readings.to_vec(),
        summary,
    })
}

async fn handle_current(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<CurrentResponse>) {
    let (reading, revision) = state.dashboard.view().snapshot();
    let status = if reading.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(CurrentResponse {
            reading,
            revision,
            ticks: state.dashboard.ticks(),
            refresh_ms: state.dashboard.refresh().as_millis() as u64,
        }),
    )
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dash = &state.dashboard;
    let live = dash.is_mounted() && dash.current().is_some();
    Json(HealthResponse {
        status: if live {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        live_feed: dash.is_mounted(),
        ticks: dash.ticks(),
        history_days: dash.history().len(),
    })
}

async fn handle_hypotheses(
    Query(params): Query<HypothesisParams>,
) -> Result<Json<HypothesesResponse>, (StatusCode, Json<serde_json::Value>)> {
    let hypotheses: Vec<&'static Hypothesis> = match params.status.as_deref() {
        None => catalog::HYPOTHESES.iter().collect(),
        Some(s) => {
            let status = HypothesisStatus::from_name(s).ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                        "error": format!("unknown status '{s}', expected pending, verified or refuted"),
                    })),
                )
            })?;
            catalog::hypotheses_with(status).collect()
        }
    };
    let total = hypotheses.len();
    Ok(Json(HypothesesResponse { hypotheses, total }))
}

async fn handle_timeline() -> Json<TimelineResponse> {
    Json(TimelineResponse {
        phases: catalog::TIMELINE,
        progress: catalog::timeline_progress(),
    })
}

async fn handle_monthly_light() -> Json<&'static [MonthlyLight]> {
    Json(catalog::MONTHLY_LIGHT)
}

async fn handle_index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": format!("{} Server", catalog::PROJECT_NAME),
        "version": meteolab_core::VERSION,
        "refresh_ms": state.dashboard.refresh().as_millis() as u64,
        "endpoints": {
            "/": "This API index",
            "/health": "Live feed health check",
            "/api/history": {
                "method": "GET",
                "description": "Daily readings for the history window, oldest first",
                "params": {
                    "metric": "Limit the summary to temperature, humidity, light or plant_height",
                }
            },
            "/api/current": "Live current reading with revision and tick count",
            "/api/hypotheses": {
                "method": "GET",
                "description": "Student hypotheses",
                "params": {
                    "status": "Filter by pending, verified or refuted",
                }
            },
            "/api/timeline": "Project phases with completion",
            "/api/light/monthly": "Seasonal average light per month",
        },
    }))
}

/// Build the axum router around a mounted dashboard.
fn build_router(dashboard: Dashboard) -> Router {
    let state = Arc::new(AppState { dashboard });

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/api/history", get(handle_history))
        .route("/api/current", get(handle_current))
        .route("/api/hypotheses", get(handle_hypotheses))
        .route("/api/timeline", get(handle_timeline))
        .route("/api/light/monthly", get(handle_monthly_light))
        .with_state(state)
}

/// Mount a dashboard and serve it until Ctrl+C.
///
/// The dashboard is unmounted when the server stops.
pub async fn run_server(config: &DashboardConfig, host: &str, port: u16) -> std::io::Result<()> {
    let app = build_router(Dashboard::mount(config));
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("shutdown requested");
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state(seed: u64) -> State<Arc<AppState>> {
        let config = DashboardConfig {
            seed: Some(seed),
            ..Default::default()
        };
        State(Arc::new(AppState {
            dashboard: Dashboard::mount(&config),
        }))
    }

    #[tokio::test(start_paused = true)]
    async fn history_lists_all_days() {
        let Json(body) = handle_history(state(1), Query(HistoryParams { metric: None })).await;
        assert_eq!(body.days, 21);
        assert_eq!(body.readings.len(), 21);
        assert_eq!(body.summary.len(), 4);

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["readings"][0].get("plantHeight").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn history_summary_can_be_narrowed() {
        let Json(body) = handle_history(
            state(2),
            Query(HistoryParams {
                metric: Some(Metric::Light),
            }),
        )
        .await;
        assert_eq!(body.summary.len(), 1);
        assert_eq!(body.summary[0].metric, Metric::Light);
    }

    #[tokio::test(start_paused = true)]
    async fn current_follows_the_live_feed() {
        let st = state(3);
        let (code, Json(before)) = handle_current(State(Arc::clone(&st.0))).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(before.ticks, 0);
        assert_eq!(before.reading.as_ref(), st.0.dashboard.history().last());

        tokio::time::sleep(Duration::from_millis(3_001)).await;
        let (_, Json(after)) = handle_current(st).await;
        assert_eq!(after.ticks, 1);
        assert_eq!(after.revision, before.revision + 1);
        assert_eq!(after.refresh_ms, 3000);
    }

    #[tokio::test(start_paused = true)]
    async fn health_reports_live_feed() {
        let Json(body) = handle_health(state(4)).await;
        assert_eq!(body.status, "healthy");
        assert!(body.live_feed);
        assert_eq!(body.history_days, 21);
    }

    #[tokio::test]
    async fn hypotheses_filter_by_status() {
        let Ok(Json(all)) = handle_hypotheses(Query(HypothesisParams { status: None })).await
        else {
            panic!("unfiltered request failed");
        };
        assert_eq!(all.total, 3);

        let Ok(Json(refuted)) = handle_hypotheses(Query(HypothesisParams {
            status: Some("refuted".to_string()),
        }))
        .await
        else {
            panic!("refuted filter failed");
        };
        assert_eq!(refuted.total, 1);
        assert_eq!(refuted.hypotheses[0].student_name, "Ján Novák");

        let Err((code, Json(body))) = handle_hypotheses(Query(HypothesisParams {
            status: Some("maybe".to_string()),
        }))
        .await
        else {
            panic!("unknown status accepted");
        };
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("maybe"));
    }

    #[tokio::test]
    async fn timeline_and_light_are_static() {
        let Json(timeline) = handle_timeline().await;
        assert_eq!(timeline.phases.len(), 5);
        assert!(timeline.progress > 0.0 && timeline.progress < 1.0);

        let Json(light) = handle_monthly_light().await;
        assert_eq!(light.len(), 6);
        assert_eq!(light[2].month, "Dec");
    }

    #[tokio::test(start_paused = true)]
    async fn index_lists_endpoints() {
        let Json(body) = handle_index(state(5)).await;
        assert_eq!(body["name"], "MeteoLab Server");
        assert!(body["endpoints"].get("/api/light/monthly").is_some());
    }
}
