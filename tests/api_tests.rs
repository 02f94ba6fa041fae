//! HTTP-level tests: static endpoints, CORS and the record API with the
//! default hooks installed.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum_test::TestServer;
use darwin::core::error::PII_REJECTION_MESSAGE;
use darwin::prelude::*;
use serde_json::json;
use tower::ServiceExt;

fn app() -> axum::Router {
    ServerBuilder::new()
        .with_store(InMemoryRecordStore::new())
        .with_hooks(default_hooks())
        .build()
        .unwrap()
}

fn server() -> TestServer {
    TestServer::new(app()).unwrap()
}

mod service_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let response = server().get("/api/v1/health").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body, json!({"status": "healthy", "service": "darwin-mfc-api"}));
    }

    #[tokio::test]
    async fn test_version() {
        let response = server().get("/api/v1/version").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body, json!({"version": "1.0.0", "api": "v1"}));
    }
}

mod cors_tests {
    use super::*;

    async fn send(method: Method, uri: &str) -> axum::response::Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        app().oneshot(request).await.unwrap()
    }

    fn assert_cors(response: &axum::response::Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, PATCH, DELETE, OPTIONS"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
    }

    #[tokio::test]
    async fn test_options_is_204_everywhere() {
        for uri in [
            "/api/v1/health",
            "/api/collections/users/records",
            "/api/collections/nope/records",
            "/not/a/route",
        ] {
            let response = send(Method::OPTIONS, uri).await;
            assert_eq!(response.status(), StatusCode::NO_CONTENT, "{}", uri);
            assert_cors(&response);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn test_headers_on_every_method() {
        for method in [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            let response = send(method.clone(), "/api/v1/health").await;
            assert_cors(&response);
        }
    }

    #[tokio::test]
    async fn test_headers_on_errors() {
        let response = send(Method::GET, "/api/collections/invoices/records").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors(&response);
    }
}

mod record_api_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_user_lowercases_username() {
        let server = server();

        let response = server
            .post("/api/collections/users/records")
            .json(&json!({"username": "Dr.ANA_Souza", "email": "ana@example.com"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["username"], "dr.ana_souza");
        assert_eq!(body["collection"], "users");

        let id = body["id"].as_str().unwrap();
        let fetched: Value = server
            .get(&format!("/api/collections/users/records/{}", id))
            .await
            .json();
        assert_eq!(fetched["username"], "dr.ana_souza");
    }

    #[tokio::test]
    async fn test_reply_increments_post_count() {
        let server = server();

        let post: Value = server
            .post("/api/collections/forum_posts/records")
            .json(&json!({"title": "Manejo de HAS", "reply_count": 7}))
            .await
            .json();
        let post_id = post["id"].as_str().unwrap();

        server
            .post("/api/collections/forum_replies/records")
            .json(&json!({"post_id": post_id, "content": "Concordo"}))
            .await
            .assert_status(StatusCode::CREATED);

        let post: Value = server
            .get(&format!("/api/collections/forum_posts/records/{}", post_id))
            .await
            .json();
        assert_eq!(post["reply_count"], 8);
    }

    #[tokio::test]
    async fn test_reply_without_post_still_succeeds() {
        let server = server();

        server
            .post("/api/collections/forum_replies/records")
            .json(&json!({"post_id": "", "content": "Orphan"}))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/collections/forum_replies/records")
            .json(&json!({"post_id": Uuid::new_v4(), "content": "Dangling"}))
            .await
            .assert_status(StatusCode::CREATED);

        let posts: Value = server.get("/api/collections/forum_posts/records").await.json();
        assert_eq!(posts["total"], 0);
        let replies: Value = server
            .get("/api/collections/forum_replies/records")
            .await
            .json();
        assert_eq!(replies["total"], 2);
    }

    #[tokio::test]
    async fn test_clinical_case_with_pii_is_rejected() {
        let server = server();

        let response = server
            .post("/api/collections/clinical_cases/records")
            .json(&json!({"presentation": "email: foo@example.com"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "PII_DETECTED");
        assert_eq!(body["message"], PII_REJECTION_MESSAGE);

        let list: Value = server
            .get("/api/collections/clinical_cases/records")
            .await
            .json();
        assert_eq!(list["total"], 0);
    }

    #[tokio::test]
    async fn test_clean_clinical_case_is_accepted_unmodified() {
        let server = server();

        let response = server
            .post("/api/collections/clinical_cases/records")
            .json(&json!({"presentation": "headache for 3 days"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["presentation"], "headache for 3 days");
    }

    #[tokio::test]
    async fn test_clinical_case_patch_is_not_screened() {
        let server = server();

        let created: Value = server
            .post("/api/collections/clinical_cases/records")
            .json(&json!({"presentation": "febre há 3 dias"}))
            .await
            .json();
        let url = format!(
            "/api/collections/clinical_cases/records/{}",
            created["id"].as_str().unwrap()
        );

        let response = server
            .patch(&url)
            .json(&json!({"presentation": "email: foo@example.com"}))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["presentation"], "email: foo@example.com");
    }

    #[tokio::test]
    async fn test_patch_and_delete() {
        let server = server();

        let created: Value = server
            .post("/api/collections/sync_log/records")
            .json(&json!({"status": "pending"}))
            .await
            .json();
        let url = format!(
            "/api/collections/sync_log/records/{}",
            created["id"].as_str().unwrap()
        );

        let updated = server.patch(&url).json(&json!({"status": "done"})).await;
        updated.assert_status(StatusCode::OK);
        let updated: Value = updated.json();
        assert_eq!(updated["status"], "done");
        assert_eq!(updated["id"], created["id"]);

        server.delete(&url).await.assert_status(StatusCode::NO_CONTENT);
        server.get(&url).await.assert_status(StatusCode::NOT_FOUND);
        server.delete(&url).await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_404() {
        let response = server().get("/api/collections/invoices/records").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "UNKNOWN_COLLECTION");
        assert_eq!(body["details"]["collection"], "invoices");
    }

    #[tokio::test]
    async fn test_malformed_id_is_400() {
        let response = server()
            .get("/api/collections/users/records/not-a-uuid")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_RECORD_ID");
    }

    #[tokio::test]
    async fn test_non_object_body_is_400() {
        let response = server()
            .post("/api/collections/users/records")
            .json(&json!(["not", "an", "object"]))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_BODY");
    }
}
