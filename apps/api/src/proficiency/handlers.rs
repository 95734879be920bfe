//! Axum route handlers for the skill proficiency API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::proficiency::chips::{
    compact_view, detail_view, select_chips, ChipGroup, ChipSelection,
};
use crate::proficiency::classifier::{classify, classify_parsed};
use crate::proficiency::models::{ProficiencyBuckets, SkillCount};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Either a bare project array or a parsed resume carrying `projects`.
/// `projects` takes precedence when both are sent.
#[derive(Debug, Deserialize)]
pub struct ProficiencyRequest {
    #[serde(default)]
    pub projects: Option<Value>,
    #[serde(default)]
    pub parsed: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChipsRequest {
    pub items: Vec<SkillCount>,
    pub max_shown: i64,
}

#[derive(Debug, Serialize)]
pub struct ChipsResponse {
    #[serde(flatten)]
    pub selection: ChipSelection,
    pub overflow_label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ViewsRequest {
    #[serde(default)]
    pub parsed: Value,
    pub compact_max: Option<i64>,
    pub detail_max: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ViewsResponse {
    pub buckets: ProficiencyBuckets,
    pub compact: Vec<ChipGroup>,
    pub detail: Vec<ChipGroup>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/proficiency
pub async fn handle_classify(
    Json(req): Json<ProficiencyRequest>,
) -> Result<Json<ProficiencyBuckets>, AppError> {
    let buckets = match (&req.projects, &req.parsed) {
        (Some(Value::Array(projects)), _) => classify(projects),
        (Some(Value::Null) | None, Some(parsed)) => classify_parsed(parsed),
        (Some(Value::Null) | None, None) => ProficiencyBuckets::default(),
        (Some(_), _) => {
            return Err(AppError::Validation(
                "projects must be an array".to_string(),
            ))
        }
    };
    debug!("Classified {} distinct skills", buckets.len());
    Ok(Json(buckets))
}

/// POST /api/v1/skills/chips
pub async fn handle_select_chips(
    Json(req): Json<ChipsRequest>,
) -> Result<Json<ChipsResponse>, AppError> {
    let selection = select_chips(&req.items, clamp_max_shown(req.max_shown));
    let overflow_label = selection.overflow_label();
    Ok(Json(ChipsResponse {
        selection,
        overflow_label,
    }))
}

/// POST /api/v1/skills/views
///
/// Classifies a parsed resume and returns both the compact row groups and the
/// expanded detail groups. Chip limits default to the configured values.
pub async fn handle_views(
    State(state): State<AppState>,
    Json(req): Json<ViewsRequest>,
) -> Result<Json<ViewsResponse>, AppError> {
    let compact_max = req
        .compact_max
        .map(clamp_max_shown)
        .unwrap_or(state.config.chip_max_compact);
    let detail_max = req
        .detail_max
        .map(clamp_max_shown)
        .unwrap_or(state.config.chip_max_detail);

    let buckets = classify_parsed(&req.parsed);
    let primary_skills = primary_skills_of(&req.parsed);

    Ok(Json(ViewsResponse {
        compact: compact_view(&buckets, &primary_skills, compact_max),
        detail: detail_view(&buckets, detail_max),
        buckets,
    }))
}

/// Negative limits show nothing.
fn clamp_max_shown(max_shown: i64) -> usize {
    usize::try_from(max_shown).unwrap_or(0)
}

fn primary_skills_of(parsed: &Value) -> Vec<String> {
    parsed
        .get("primary_skills")
        .and_then(Value::as_array)
        .map(|skills| {
            skills
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
