use crate::charts::PieChart;
use crate::config::AppConfig;
use crate::dashboard::{self, Dashboard};
use crate::error::ApiError;
use crate::matching::{match_jobs, SkillSet};
use crate::skills;
use crate::types::{JobTable, MatchCounts};
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

// Wrapper for RTree indexing, [lng, lat] like geo::Point.
struct JobMarker {
    index: usize,
    position: [f64; 2],
}

impl RTreeObject for JobMarker {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for JobMarker {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

pub struct AppState {
    pub table: Arc<JobTable>,
    pub dashboard: Dashboard,
    tree: RTree<JobMarker>,
}

impl AppState {
    pub fn new(config: &AppConfig, table: Arc<JobTable>) -> Self {
        let markers: Vec<JobMarker> = table
            .iter()
            .enumerate()
            .filter_map(|(index, job)| {
                job.location.map(|point| JobMarker {
                    index,
                    position: [point.x(), point.y()],
                })
            })
            .collect();
        debug!(markers = markers.len(), "building spatial index");

        Self {
            dashboard: dashboard::build(&table, config),
            tree: RTree::bulk_load(markers),
            table,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub core_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub counts: MatchCounts,
    pub chart: PieChart,
    /// Selected names outside the vocabulary; they did not affect the result.
    pub ignored: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub core_options: &'static [&'static str],
    pub soft_options: &'static [&'static str],
    pub default_core: Vec<String>,
    pub default_soft: Vec<String>,
}

#[derive(Deserialize)]
pub struct NearestParams {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Serialize)]
pub struct NearestResponse {
    id: String,
    lat: f64,
    lng: f64,
    work_type: String,
    applicant_count: Option<u32>,
    skills: Vec<&'static str>,
}

pub fn router(state: Arc<AppState>, static_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/skills", get(skills_handler))
        .route("/api/match", post(match_handler))
        .route("/api/nearest", get(nearest_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(config: AppConfig, table: JobTable) -> Result<()> {
    let state = Arc::new(AppState::new(&config, Arc::new(table)));
    let app = router(state, &config.server.static_dir);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    Json(state.dashboard.clone())
}

async fn skills_handler(State(state): State<Arc<AppState>>) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        core_options: skills::CORE_MATCH_SKILLS,
        soft_options: skills::SOFT_MATCH_SKILLS,
        default_core: state.dashboard.matcher.default_core.clone(),
        default_soft: state.dashboard.matcher.default_soft.clone(),
    })
}

/// Selection changed: rescan the table and hand back a fresh pie.
async fn match_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MatchRequest>,
) -> Json<MatchResponse> {
    let selection = SkillSet::from_selection(&request.core_skills, &request.soft_skills);
    let counts = match_jobs(&state.table, &selection);
    let ignored: Vec<String> = selection.unknown().map(str::to_string).collect();
    if !ignored.is_empty() {
        debug!(?ignored, "ignoring skills outside the vocabulary");
    }
    debug!(matched = counts.matched, total = counts.total(), "recomputed match");

    Json(MatchResponse {
        counts,
        chart: PieChart::from_match(counts),
        ignored,
    })
}

async fn nearest_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearestParams>,
) -> Result<Json<Option<NearestResponse>>, ApiError> {
    if !(-90.0..=90.0).contains(&params.lat) || !(-180.0..=180.0).contains(&params.lon) {
        return Err(ApiError::BadRequest(format!(
            "({}, {}) is not a valid coordinate",
            params.lat, params.lon
        )));
    }

    let nearest = state
        .tree
        .nearest_neighbor(&[params.lon, params.lat])
        .and_then(|marker| state.table.jobs().get(marker.index))
        .and_then(|job| job.location.map(|point| (job, point)))
        .map(|(job, point)| NearestResponse {
            id: job.id.clone(),
            lat: point.y(),
            lng: point.x(),
            work_type: job.work_type_label().to_string(),
            applicant_count: job.applicant_count,
            skills: job.skills.iter().copied().collect(),
        });

    Ok(Json(nearest))
}
