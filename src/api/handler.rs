use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::{pipeline::Analyzer, report::ReportRenderer};

pub const DEFAULT_FIRST_GAMER: &str = "11497";
pub const DEFAULT_SECOND_GAMER: &str = "20768";

/// Incoming request event. Only the query string is looked at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    fn new(status_code: u16, content_type: &str, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }
}

impl RequestEvent {
    fn param(&self, name: &str, default: &str) -> String {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .unwrap_or(default)
            .to_string()
    }
}

/// Compare the gamers named by `gamerid1` / `gamerid2` and answer with the
/// rendered report.
pub async fn handle_request(
    event: &RequestEvent,
    analyzer: &Analyzer,
    renderer: &ReportRenderer,
) -> ApiResponse {
    let ids = (
        gamer_id(event, "gamerid1", DEFAULT_FIRST_GAMER),
        gamer_id(event, "gamerid2", DEFAULT_SECOND_GAMER),
    );
    let (first, second) = match ids {
        (Ok(first), Ok(second)) => (first, second),
        (Err(message), _) | (_, Err(message)) => {
            warn!("Rejected comparison request: {}", message);
            return ApiResponse::new(400, "text/plain", message);
        }
    };
    info!("Handling comparison request for {} and {}", first, second);

    let comparison = match analyzer.compare(&first.to_string(), &second.to_string()).await {
        Ok(comparison) => comparison,
        Err(e) => {
            error!("Comparison of {} and {} failed: {}", first, second, e);
            return ApiResponse::new(502, "text/plain", format!("Failed to compare gamers: {}", e));
        }
    };

    match renderer.render(&comparison) {
        Ok(body) => ApiResponse::new(200, "text/html", body),
        Err(e) => {
            error!("Rendering comparison of {} and {} failed: {}", first, second, e);
            ApiResponse::new(500, "text/plain", format!("Failed to render report: {}", e))
        }
    }
}

fn gamer_id(event: &RequestEvent, name: &str, default: &str) -> Result<u64, String> {
    let value = event.param(name, default);
    value
        .parse::<u64>()
        .map_err(|_| format!("{} must be a numeric gamer id, got '{}'", name, value))
}
