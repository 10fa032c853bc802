pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::guidance::handlers as guidance;
use crate::matching::handlers as matching;
use crate::profiles::handlers as profiles;
use crate::state::AppState;

// Routes sharing a segment position share the param name; the handler decides
// whether it is a user id or a record id.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles
        .route("/api/profile", post(profiles::handle_create_profile))
        .route(
            "/api/profile/:id",
            get(profiles::handle_get_profile_by_user).put(profiles::handle_update_profile),
        )
        .route("/api/profile/id/:id", get(profiles::handle_get_profile))
        // Catalog
        .route("/api/scholarships", get(catalog::handle_list_scholarships))
        .route(
            "/api/scholarships/search",
            get(catalog::handle_search_scholarships),
        )
        .route("/api/seed-data", post(catalog::handle_seed_data))
        // Matches
        .route("/api/matches/generate", post(matching::handle_generate_matches))
        .route("/api/matches/:id", get(matching::handle_list_matches))
        .route("/api/matches/:id/dashboard", get(matching::handle_dashboard))
        .route(
            "/api/matches/:id/status",
            put(matching::handle_update_match_status),
        )
        // Guidance
        .route("/api/guidance", post(guidance::handle_create_guidance))
        .route(
            "/api/guidance/:profile_id/:scholarship_id",
            get(guidance::handle_get_guidance),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::guidance::advisor::GuidanceAdvisor;
    use crate::matching::oracle::ScoringChain;
    use crate::matching::request::tests::new_scholarship;
    use crate::store::memory::MemoryStore;

    fn test_app(store: MemoryStore) -> Router {
        build_router(AppState {
            store: Arc::new(store),
            scorer: Arc::new(ScoringChain::fallback_only()),
            advisor: Arc::new(GuidanceAdvisor::new(None)),
            config: Config::for_tests(),
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(b) => request.body(Body::from(b.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn profile_body(user_id: &str) -> Value {
        json!({
            "userId": user_id,
            "profile": {
                "name": "Maya Okafor",
                "email": "maya@gmail.com",
                "educationLevel": "undergraduate-junior",
                "fieldOfStudy": "Computer Science",
                "gpa": "3.7",
                "graduationYear": "2026",
                "financialNeed": "high",
                "location": "national"
            }
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(MemoryStore::new());
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_profile_create_then_fetch() {
        let app = test_app(MemoryStore::new());
        let (status, created) = send(&app, Method::POST, "/api/profile", Some(profile_body("user-42"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["financialNeed"], "high");

        let (status, by_user) = send(&app, Method::GET, "/api/profile/user-42", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_user["id"], created["id"]);

        let uri = format!("/api/profile/id/{}", created["id"].as_str().unwrap());
        let (status, by_id) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_id["userId"], "user-42");

        let uri = format!("/api/profile/{}", created["id"].as_str().unwrap());
        let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"skills": "Rust"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["skills"], "Rust");
        assert_eq!(updated["name"], "Maya Okafor");
    }

    #[tokio::test]
    async fn test_profile_validation_errors_are_400() {
        let app = test_app(MemoryStore::new());
        let mut body = profile_body("user-1");
        body["profile"]["email"] = json!("maya@example.org");
        let (status, err) = send(&app, Method::POST, "/api/profile", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"]["code"], "VALIDATION_ERROR");

        let mut body = profile_body("user-1");
        body.as_object_mut().unwrap().remove("userId");
        let (status, err) = send(&app, Method::POST, "/api/profile", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"]["message"], "User ID is required");
    }

    #[tokio::test]
    async fn test_match_lifecycle_through_the_api() {
        let (store, _) = MemoryStore::with_catalog(vec![
            new_scholarship("STEM Excellence", &["Computer Science"]),
            new_scholarship("Nursing Futures", &["Nursing"]),
            new_scholarship("Open Award", &[]),
        ]);
        let app = test_app(store);
        let (_, profile) = send(&app, Method::POST, "/api/profile", Some(profile_body("user-7"))).await;
        let profile_id = profile["id"].as_str().unwrap().to_string();

        let (status, generated) = send(
            &app,
            Method::POST,
            "/api/matches/generate",
            Some(json!({ "profileId": profile_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(generated["scorerBackend"], "fallback");
        assert_eq!(generated["matches"].as_array().unwrap().len(), 3);

        let (_, fresh) = send(&app, Method::GET, &format!("/api/matches/{profile_id}"), None).await;
        let fresh = fresh.as_array().unwrap().clone();
        assert_eq!(fresh.len(), 3);
        assert!(fresh[0]["scholarship"]["title"].is_string());
        let match_id = fresh[0]["id"].as_str().unwrap().to_string();

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/matches/{match_id}/status"),
            Some(json!({ "status": "favorited" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "favorited");

        let (_, favorited) = send(
            &app,
            Method::GET,
            &format!("/api/matches/{profile_id}?status=favorited"),
            None,
        )
        .await;
        assert_eq!(favorited.as_array().unwrap().len(), 1);
        assert_eq!(favorited[0]["id"], match_id.as_str());

        let (_, remaining) = send(&app, Method::GET, &format!("/api/matches/{profile_id}"), None).await;
        assert_eq!(remaining.as_array().unwrap().len(), 2);

        let (status, dashboard) = send(
            &app,
            Method::GET,
            &format!("/api/matches/{profile_id}/dashboard?sort=amount"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(dashboard["stats"]["totalMatches"], 2);
        assert_eq!(dashboard["matches"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_match_request_errors() {
        let app = test_app(MemoryStore::new());
        let (status, err) = send(&app, Method::POST, "/api/matches/generate", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"]["message"], "Profile ID is required");

        let uri = format!("/api/matches/{}?status=archived", uuid::Uuid::new_v4());
        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = format!("/api/matches/{}/status", uuid::Uuid::new_v4());
        let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"status": "applied"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_extractor_rejections_use_the_error_body() {
        let app = test_app(MemoryStore::new());

        let (status, err) = send(&app, Method::GET, "/api/matches/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"]["code"], "VALIDATION_ERROR");

        let (status, err) = send(&app, Method::GET, "/api/guidance/abc/def", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"]["code"], "VALIDATION_ERROR");

        let (status, err) = send(
            &app,
            Method::POST,
            "/api/guidance",
            Some(json!({ "profileId": "abc", "scholarshipId": 7 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"]["code"], "VALIDATION_ERROR");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/matches/generate")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let err: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(err["error"]["code"], "VALIDATION_ERROR");

        let uri = format!("/api/matches/{}/dashboard?minAmount=lots", uuid::Uuid::new_v4());
        let (status, err) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_guidance_is_generated_then_cached() {
        let (store, catalog) = MemoryStore::with_catalog(vec![new_scholarship("STEM Excellence", &[])]);
        let app = test_app(store);
        let (_, profile) = send(&app, Method::POST, "/api/profile", Some(profile_body("user-9"))).await;
        let profile_id = profile["id"].as_str().unwrap().to_string();
        let get_uri = format!("/api/guidance/{profile_id}/{}", catalog[0].id);

        let (status, _) = send(&app, Method::GET, &get_uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let body = json!({ "profileId": profile_id, "scholarshipId": catalog[0].id });
        let (status, created) = send(&app, Method::POST, "/api/guidance", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["checklist"].as_array().unwrap().len(), 3);

        let (status, cached) = send(&app, Method::GET, &get_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cached, created);
    }

    #[tokio::test]
    async fn test_seed_data_replaces_catalog() {
        let app = test_app(MemoryStore::new());
        let (status, seeded) = send(&app, Method::POST, "/api/seed-data", None).await;
        assert_eq!(status, StatusCode::OK);
        let count = seeded["count"].as_u64().unwrap();
        assert!(count > 0);

        let (_, list) = send(&app, Method::GET, "/api/scholarships", None).await;
        assert_eq!(list.as_array().unwrap().len() as u64, count);

        let (status, _) = send(&app, Method::GET, "/api/scholarships/search?type=need-based", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
