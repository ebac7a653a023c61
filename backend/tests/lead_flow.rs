use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceExt;

use lead_calculators::handlers::result_store::{self, REVENUE_RESULTS_KEY};
use lead_calculators::{build_router, config::settings::Settings, AppState};

struct TestWebhook {
    url: String,
    calls: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl TestWebhook {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn spawn_webhook(status: StatusCode, delay: Duration) -> TestWebhook {
    let calls = Arc::new(AtomicUsize::new(0));
    let bodies = Arc::new(Mutex::new(Vec::new()));

    let (handler_calls, handler_bodies) = (calls.clone(), bodies.clone());
    let app = Router::new().route(
        "/lead",
        post(move |Json(body): Json<Value>| {
            let calls = handler_calls.clone();
            let bodies = handler_bodies.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                bodies.lock().await.push(body);
                tokio::time::sleep(delay).await;
                status
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestWebhook {
        url: format!("http://{}/lead", addr),
        calls,
        bodies,
    }
}

fn app_with(webhook_url: Option<String>) -> Router {
    let settings = Settings {
        webhook_url,
        webhook_timeout: Duration::from_secs(1),
        ..Settings::default()
    };
    build_router(Arc::new(AppState::new(settings).unwrap()))
}

fn post_json(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn assert_redirects_home(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

fn dental_form() -> Value {
    json!({
        "firstName": "<b>Maria</b>",
        "lastName": "Lopez",
        "email": " maria@smiles.com ",
        "phone": "661-555-0100",
        "specialty": "Dental",
        "monthlyAppointments": "800",
        "website": ""
    })
}

fn ciso_form() -> Value {
    json!({
        "firstName": "Sam",
        "lastName": "Okafor",
        "email": "sam@health.org",
        "phone": "(555) 123-4567",
        "jobTitle": "CISO",
        "organizationSize": "5000+",
        "industry": "Health System",
        "currentlyUsingAI": "Yes"
    })
}

#[tokio::test]
async fn revenue_submission_delivers_persists_and_reads_once() {
    let webhook = spawn_webhook(StatusCode::OK, Duration::ZERO).await;
    let app = app_with(Some(webhook.url.clone()));

    let response = app
        .clone()
        .oneshot(post_json("/api/revenue-calculator", dental_form(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).expect("session cookie");
    assert_eq!(json_body(response).await, json!({"redirect": "/revenue-calculator-results"}));

    assert_eq!(webhook.calls(), 1);
    let delivered = webhook.bodies.lock().await[0].clone();
    assert_eq!(
        delivered,
        json!({
            "firstName": "Maria",
            "lastName": "Lopez",
            "email": "maria@smiles.com",
            "phone": "661-555-0100",
            "specialty": "Dental",
            "monthlyAppointments": 800
        })
    );

    let response = app
        .clone()
        .oneshot(get("/api/revenue-calculator-results", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["firstName"], "Maria");
    assert_eq!(body["data"]["afterHoursLoss"], 39_000);
    assert_eq!(body["data"]["holdTimeLoss"], 320_640);
    assert_eq!(body["data"]["noShowLoss"], 506_880);
    assert_eq!(body["data"]["totalLoss"], 866_520);
    assert_eq!(body["data"]["monthlyLoss"], 72_210);
    assert_eq!(body["data"]["dailyLoss"], 2_374);
    assert_eq!(body["report"]["totalLoss"], "$866,520");
    assert!(body["bookingUrl"].as_str().unwrap().starts_with("https://"));

    let response = app
        .oneshot(get("/api/revenue-calculator-results", Some(&cookie)))
        .await
        .unwrap();
    assert_redirects_home(&response);
}

#[tokio::test]
async fn governance_submission_scores_and_hands_off() {
    let webhook = spawn_webhook(StatusCode::CREATED, Duration::ZERO).await;
    let app = app_with(Some(webhook.url.clone()));

    let response = app
        .clone()
        .oneshot(post_json("/api/governance-scorecard", ciso_form(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap();
    assert_eq!(json_body(response).await["redirect"], "/governance-scorecard-results");

    let delivered = webhook.bodies.lock().await[0].clone();
    assert_eq!(delivered, ciso_form());

    let body = json_body(
        app.oneshot(get("/api/governance-scorecard-results", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"]["score"], 60);
    assert_eq!(body["data"]["rawScore"], 60);
    assert_eq!(body["data"]["riskLevel"], "Medium Risk");
    assert_eq!(body["data"]["riskColor"], "#F59E0B");
    assert_eq!(body["report"]["interpretation"]["headline"], "MODERATE RISK");
    assert_eq!(body["report"]["score"], 60);
    assert_eq!(body["report"]["scoreOutOf"], 100);
}

#[tokio::test]
async fn honeypot_submission_is_silently_dropped() {
    let webhook = spawn_webhook(StatusCode::OK, Duration::ZERO).await;
    let app = app_with(Some(webhook.url.clone()));

    let mut form = dental_form();
    form["website"] = json!("http://cheap-pills.example");
    let response = app
        .clone()
        .oneshot(post_json("/api/revenue-calculator", form, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(session_cookie(&response).is_none());

    // Invalid fields are not even looked at.
    let response = app
        .oneshot(post_json("/api/governance-scorecard", json!({"website": "x"}), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(session_cookie(&response).is_none());

    assert_eq!(webhook.calls(), 0);
}

#[tokio::test]
async fn non_string_honeypot_is_silently_dropped() {
    let webhook = spawn_webhook(StatusCode::OK, Duration::ZERO).await;
    let app = app_with(Some(webhook.url.clone()));

    let mut form = dental_form();
    form["website"] = json!(1);
    let response = app
        .oneshot(post_json("/api/revenue-calculator", form, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(session_cookie(&response).is_none());
    assert_eq!(webhook.calls(), 0);
}

#[tokio::test]
async fn null_field_is_a_field_error() {
    let webhook = spawn_webhook(StatusCode::OK, Duration::ZERO).await;
    let app = app_with(Some(webhook.url.clone()));

    let mut form = ciso_form();
    form["firstName"] = Value::Null;
    form["website"] = Value::Null;
    let response = app
        .oneshot(post_json("/api/governance-scorecard", form, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await,
        json!({ "errors": { "firstName": "First name must be 2–50 characters." } })
    );
    assert_eq!(webhook.calls(), 0);
}

#[tokio::test]
async fn invalid_fields_are_reported_together() {
    let webhook = spawn_webhook(StatusCode::OK, Duration::ZERO).await;
    let app = app_with(Some(webhook.url.clone()));

    let response = app
        .oneshot(post_json(
            "/api/revenue-calculator",
            json!({
                "firstName": "A",
                "lastName": "Lopez",
                "email": "a@b",
                "phone": "555-1234",
                "specialty": "Dental",
                "monthlyAppointments": 10_001
            }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(session_cookie(&response).is_none());
    assert_eq!(
        json_body(response).await,
        json!({
            "errors": {
                "firstName": "First name must be 2–50 characters.",
                "email": "Please enter a valid email address.",
                "phone": "Please enter a valid phone number (10+ digits).",
                "monthlyAppointments": "Please enter a number between 1 and 10,000."
            }
        })
    );
    assert_eq!(webhook.calls(), 0);
}

#[tokio::test]
async fn rejected_delivery_stores_nothing() {
    let webhook = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR, Duration::ZERO).await;
    let app = app_with(Some(webhook.url.clone()));

    let response = app
        .clone()
        .oneshot(post_json("/api/governance-scorecard", ciso_form(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(session_cookie(&response).is_none());
    assert_eq!(
        json_body(response).await["error"],
        "Something went wrong sending your data. Please try again or email us directly."
    );
    assert_eq!(webhook.calls(), 1);

    let response = app
        .oneshot(get("/api/governance-scorecard-results", None))
        .await
        .unwrap();
    assert_redirects_home(&response);
}

#[tokio::test]
async fn slow_webhook_times_out_as_failure() {
    let webhook = spawn_webhook(StatusCode::OK, Duration::from_secs(3)).await;
    let app = app_with(Some(webhook.url.clone()));

    let response = app
        .oneshot(post_json("/api/revenue-calculator", dental_form(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn missing_webhook_counts_as_delivered() {
    let app = app_with(None);

    let response = app
        .clone()
        .oneshot(post_json("/api/revenue-calculator", dental_form(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap();

    let response = app
        .oneshot(get("/api/revenue-calculator-results", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn results_without_session_redirect_home() {
    let app = app_with(None);

    for uri in ["/api/revenue-calculator-results", "/api/governance-scorecard-results"] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_redirects_home(&response);

        let response = app
            .clone()
            .oneshot(get(uri, Some("lead_session=999")))
            .await
            .unwrap();
        assert_redirects_home(&response);
    }
}

#[tokio::test]
async fn malformed_stored_result_redirects_home() {
    let state = Arc::new(AppState::new(Settings::default()).unwrap());
    let id = state
        .result_store
        .stash(None, REVENUE_RESULTS_KEY, json!({"totalLoss": "lots"}))
        .await
        .unwrap();
    let set_cookie = result_store::session_cookie(&id, false);
    let cookie = set_cookie.split(';').next().unwrap();

    let app = build_router(state.clone());
    let response = app
        .oneshot(get("/api/revenue-calculator-results", Some(cookie)))
        .await
        .unwrap();
    assert_redirects_home(&response);
    assert_eq!(state.result_store.held_sessions().await, 0);
}

#[tokio::test]
async fn results_are_scoped_per_calculator() {
    let app = app_with(None);

    let response = app
        .clone()
        .oneshot(post_json("/api/revenue-calculator", dental_form(), None))
        .await
        .unwrap();
    let cookie = session_cookie(&response).unwrap();

    let response = app
        .clone()
        .oneshot(get("/api/governance-scorecard-results", Some(&cookie)))
        .await
        .unwrap();
    assert_redirects_home(&response);

    let response = app
        .oneshot(get("/api/revenue-calculator-results", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn resubmission_overwrites_previous_result() {
    let app = app_with(None);

    let response = app
        .clone()
        .oneshot(post_json("/api/revenue-calculator", dental_form(), None))
        .await
        .unwrap();
    let cookie = session_cookie(&response).unwrap();

    let mut second = dental_form();
    second["specialty"] = json!("Cardiology");
    second["monthlyAppointments"] = json!(100);
    let response = app
        .clone()
        .oneshot(post_json("/api/revenue-calculator", second, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(session_cookie(&response).as_deref(), Some(cookie.as_str()));

    let body = json_body(
        app.oneshot(get("/api/revenue-calculator-results", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"]["specialty"], "Cardiology");
    assert_eq!(body["data"]["monthlyAppointments"], 100);
}

#[tokio::test]
async fn options_and_health() {
    let app = app_with(None);

    let body = json_body(
        app.clone()
            .oneshot(get("/api/calculators/options", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["specialties"][0], "Dental");
    assert_eq!(body["jobTitles"][3], "VP Risk & Compliance");
    assert_eq!(body["currentlyUsingAI"], json!(["Yes", "No", "Not Sure"]));

    let response = app.oneshot(get("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}
