use anyhow::Context;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use tracing::info;

use super::AppState;
use crate::error::ApiError;
use crate::parser;
use crate::upstream::Fetched;

/// The only report kind served.
pub const REPORT_TYPE: &str = "ip-check-report";

pub fn cache_key(kind: &str, hash: &str) -> String {
    format!("{}-{}", kind, hash)
}

/// `GET ?type=ip-check-report&hash=<id>` on any path.
pub async fn report_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let kind = non_empty(&params, "type").ok_or(ApiError::MissingType)?;
    if kind != REPORT_TYPE {
        return Err(ApiError::UnsupportedType);
    }
    let hash = non_empty(&params, "hash").ok_or(ApiError::MissingHash)?;

    let report = load_report(&state, kind, hash).await?;
    Ok(Json(report).into_response())
}

/// Cached report if there is one, otherwise fetch, parse and cache it.
pub async fn load_report(state: &AppState, kind: &str, hash: &str) -> Result<Value, ApiError> {
    let key = cache_key(kind, hash);
    if let Some(cached) = state.cache.get(&key).await? {
        info!("Cache hit: {}", key);
        let value = serde_json::from_str(&cached)
            .with_context(|| format!("Cached entry {} is not JSON", key))?;
        return Ok(value);
    }

    info!("Cache miss: {}", key);
    let svg = match state.upstream.fetch_svg(hash).await? {
        Fetched::Svg(svg) => svg,
        Fetched::Rejected(status) => return Err(ApiError::Upstream { status }),
    };

    let report = parser::parse_svg(&svg);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    state.cache.put(&key, &json).await?;
    info!("Stored {} ({} bytes)", key, json.len());

    Ok(serde_json::to_value(&report).context("Failed to serialize report")?)
}

/// First value given for `name`; an empty one counts as missing.
fn non_empty<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .filter(|v| !v.is_empty())
}
