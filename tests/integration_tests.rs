use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceExt;

use detailshop::config::AppConfig;
use detailshop::db;
use detailshop::handlers;
use detailshop::services::mail::EmailProvider;
use detailshop::state::AppState;

// ── Mock Email Provider ──

#[derive(Clone, Debug)]
struct SentEmail {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

struct MockMailer {
    attempts: Arc<Mutex<Vec<SentEmail>>>,
    fail_on_attempt: Option<usize>,
}

#[async_trait]
impl EmailProvider for MockMailer {
    async fn send_email(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        html: &str,
    ) -> anyhow::Result<()> {
        let mut attempts = self.attempts.lock().unwrap();
        let idx = attempts.len();
        attempts.push(SentEmail {
            from: from.to_string(),
            to: to.to_vec(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        if self.fail_on_attempt == Some(idx) {
            anyhow::bail!("simulated provider outage");
        }
        Ok(())
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        resend_api_key: "test-key".to_string(),
        contact_from_email: "Prime Detail <contact@primedetail.example>".to_string(),
        contact_to_email: "leads@primedetail.example".to_string(),
    }
}

fn test_state(fail_on_attempt: Option<usize>) -> (Arc<AppState>, Arc<Mutex<Vec<SentEmail>>>) {
    let conn = db::init_db(":memory:").unwrap();
    let attempts = Arc::new(Mutex::new(vec![]));
    let mailer = MockMailer {
        attempts: Arc::clone(&attempts),
        fail_on_attempt,
    };
    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: test_config(),
        mailer: Box::new(mailer),
    });
    (state, attempts)
}

fn test_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/contact", post(handlers::contact::submit_contact))
        .route("/api/articles", get(handlers::articles::list_articles))
        .route("/api/articles/:slug", get(handlers::articles::get_article))
        .route("/api/reviews", get(handlers::reviews::list_reviews))
        .with_state(state)
}

fn contact_request(json: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("Content-Type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

const BASE_INQUIRY: &str = r#"{
    "firstName": "Jane",
    "lastName": "Doe",
    "email": "jane@example.com",
    "phone": "555-0100",
    "service": "Ceramic Coating",
    "message": "Quote please"
}"#;

// ── Contact Form ──

#[tokio::test]
async fn test_contact_success_sends_two_emails() {
    let (state, attempts) = test_state(None);
    let app = test_app(state);

    let res = app.oneshot(contact_request(BASE_INQUIRY)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["status"], "success");

    let sent = attempts.lock().unwrap();
    assert_eq!(sent.len(), 2, "expected business alert + acknowledgment");

    let business = &sent[0];
    assert_eq!(business.to, vec!["leads@primedetail.example".to_string()]);
    assert_eq!(business.subject, "New Inquiry: Ceramic Coating");
    assert!(business.html.contains("Jane Doe"));
    assert!(business.html.contains("jane@example.com"));
    assert!(business.html.contains("555-0100"));
    assert!(business.html.contains("Quote please"));
    assert!(
        !business.html.contains("Vehicle Details"),
        "no vehicle section without vehicleYear"
    );

    let ack = &sent[1];
    assert_eq!(ack.to, vec!["jane@example.com".to_string()]);
    assert_eq!(ack.from, "Prime Detail <contact@primedetail.example>");
    assert!(ack.html.contains("Ceramic Coating"));
    assert!(ack.html.contains("Quote please"));
}

#[tokio::test]
async fn test_contact_accepts_minimal_five_field_inquiry() {
    let (state, attempts) = test_state(None);
    let app = test_app(state);

    // phone is optional; the smallest valid submission carries only the
    // five required fields.
    let res = app
        .oneshot(contact_request(
            r#"{
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "service": "Ceramic Coating",
                "message": "Quote please"
            }"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["status"], "success");

    let sent = attempts.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert!(!sent[0].html.contains("Vehicle Details"));
    assert_eq!(sent[1].to, vec!["jane@example.com".to_string()]);
}

#[tokio::test]
async fn test_contact_vehicle_block_rendered_when_year_present() {
    let (state, attempts) = test_state(None);
    let app = test_app(state);

    let res = app
        .oneshot(contact_request(
            r#"{
                "firstName": "Sam",
                "lastName": "Lee",
                "email": "sam@example.com",
                "phone": "555-0101",
                "service": "Paint Correction",
                "message": "Swirl marks everywhere",
                "vehicleYear": "2022",
                "vehicleMake": "Tesla",
                "vehicleModel": "Model 3"
            }"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let sent = attempts.lock().unwrap();
    let business = &sent[0];
    assert!(business.html.contains("Vehicle Details"));
    assert!(business.html.contains("2022 Tesla Model 3"));
    assert!(
        business.html.contains("Not specified"),
        "missing color gets a placeholder"
    );
}

#[tokio::test]
async fn test_contact_missing_field_sends_nothing() {
    let (state, attempts) = test_state(None);
    let app = test_app(state);

    let res = app
        .oneshot(contact_request(
            r#"{
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "phone": "555-0100",
                "service": "Ceramic Coating"
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(res).await;
    assert_eq!(json["status"], "error");
    assert!(
        json["error"].as_str().unwrap().contains("message"),
        "error should name the missing field"
    );

    assert_eq!(attempts.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn test_contact_malformed_email_rejected() {
    let (state, attempts) = test_state(None);
    let app = test_app(state);

    let res = app
        .oneshot(contact_request(
            r#"{
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "not-an-address",
                "phone": "555-0100",
                "service": "Ceramic Coating",
                "message": "Quote please"
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(attempts.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn test_contact_business_send_failure_is_generic_and_not_retried() {
    let (state, attempts) = test_state(Some(0));
    let app = test_app(state);

    let res = app.oneshot(contact_request(BASE_INQUIRY)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(res).await;
    assert_eq!(json["status"], "error");
    assert!(
        !json["error"].as_str().unwrap().contains("simulated"),
        "provider detail must not reach the caller"
    );

    // One attempt only: the failed send is not retried and the
    // acknowledgment is never attempted.
    assert_eq!(attempts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_contact_acknowledgment_failure_reported() {
    let (state, attempts) = test_state(Some(1));
    let app = test_app(state);

    let res = app.oneshot(contact_request(BASE_INQUIRY)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(attempts.lock().unwrap().len(), 2, "both sends attempted once");
}

#[tokio::test]
async fn test_contact_user_text_escaped_in_emails() {
    let (state, attempts) = test_state(None);
    let app = test_app(state);

    let res = app
        .oneshot(contact_request(
            r#"{
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "phone": "555-0100",
                "service": "Ceramic Coating",
                "message": "<script>alert('x')</script>"
            }"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let sent = attempts.lock().unwrap();
    for email in sent.iter() {
        assert!(
            !email.html.contains("<script>"),
            "raw markup leaked into email body: {}",
            email.html
        );
    }
    assert!(sent[0].html.contains("&lt;script&gt;"));
}

// ── Articles ──

#[tokio::test]
async fn test_article_by_slug_with_toc_and_related() {
    let (state, _) = test_state(None);
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/articles/how-long-does-ceramic-coating-last")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let json = body_json(res).await;
    assert_eq!(json["slug"], "how-long-does-ceramic-coating-last");
    assert_eq!(json["categorySlug"], "ceramic-coating");
    assert!(json["faqs"].as_array().unwrap().len() >= 1);

    let toc = json["toc"].as_array().unwrap();
    assert_eq!(toc.len(), 4);
    assert_eq!(toc[0]["text"], "What the warranty numbers mean");
    assert_eq!(toc[0]["level"], 2);
    assert_eq!(toc[0]["id"], "what-the-warranty-numbers-mean");
    assert_eq!(toc[1]["level"], 3);

    let related = json["related"].as_array().unwrap();
    assert_eq!(related.len(), 2, "two other ceramic-coating articles seeded");
    for r in related {
        assert_eq!(r["categorySlug"], "ceramic-coating");
        assert_ne!(r["slug"], "how-long-does-ceramic-coating-last");
    }
}

#[tokio::test]
async fn test_article_unknown_slug_is_404() {
    let (state, _) = test_state(None);
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/articles/no-such-article")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_article_listing_newest_first() {
    let (state, _) = test_state(None);
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/articles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let json = body_json(res).await;
    let articles = json.as_array().unwrap();
    assert_eq!(articles.len(), 4);
    assert_eq!(articles[0]["slug"], "what-is-paint-correction");
    // Summaries carry no body
    assert!(articles[0].get("content").is_none());
}

#[tokio::test]
async fn test_article_listing_filtered_by_category() {
    let (state, _) = test_state(None);
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/articles?category=ceramic-coating")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let json = body_json(res).await;
    let articles = json.as_array().unwrap();
    assert_eq!(articles.len(), 3);
    for a in articles {
        assert_eq!(a["categorySlug"], "ceramic-coating");
    }
}

// ── Reviews ──

#[tokio::test]
async fn test_reviews_listing() {
    let (state, _) = test_state(None);
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/reviews")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let json = body_json(res).await;
    let reviews = json.as_array().unwrap();
    assert_eq!(reviews.len(), 6);
    for r in reviews {
        let rating = r["rating"].as_i64().unwrap();
        assert!((1..=5).contains(&rating));
        let platform = r["platform"].as_str().unwrap();
        assert!(["google", "yelp", "direct"].contains(&platform));
    }
    // Newest first
    assert_eq!(reviews[0]["id"], "rev-001");
}

// ── Health Check ──

#[tokio::test]
async fn test_health() {
    let (state, _) = test_state(None);
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}
