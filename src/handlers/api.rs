use axum::Json;
use serde_json::{Value, json};

/// Handler for GET / - basic service health check.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_reports_healthy() {
        let Json(body) = health_check().await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "xftts-gateway");
    }
}
