//! Health check endpoint

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::AppState;

/// GET /health - Check API health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let settings_loaded = state.settings().await.is_ok();
    Json(HealthResponse::new(settings_loaded))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::routes::test_support::{call, loaded_app};
    use crate::{create_app, AppState};

    #[tokio::test]
    async fn test_health() {
        let app = create_app(AppState::new());
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["settings_loaded"], false);

        let (_, app) = loaded_app().await;
        let (_, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(body["settings_loaded"], true);
    }
}
