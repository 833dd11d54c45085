use axum::Json;
use serde_json::{json, Value};

use super::error::ApiPath;

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({"message": "Patient management API is running."}))
}

/// GET /about
pub async fn about() -> Json<Value> {
    Json(json!({"message": "This is the about page."}))
}

/// GET /greet/:name
pub async fn greet(ApiPath(name): ApiPath<String>) -> Json<Value> {
    Json(json!({"message": format!("Hello, {}!", name)}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_greet_embeds_the_name() {
        let Json(body) = greet(ApiPath("Nikhil".to_string())).await;
        assert_eq!(body, json!({"message": "Hello, Nikhil!"}));
    }
}
