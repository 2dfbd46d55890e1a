#![cfg(feature = "ssr")]

use actix_web::cookie::Cookie;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use reviewware::api::{configure, USER_EMAIL_HEADER, USER_ID_HEADER, USER_NAME_HEADER};
use reviewware::db::Database;
use reviewware::lifecycle::ReviewService;
use reviewware::models::form::ReviewSubmission;
use reviewware::models::review::PublicReviews;
use reviewware::models::score::default_score_choices;
use reviewware::models::target::{ContentObject, TargetRef};
use reviewware::registry::InMemoryRegistry;
use reviewware::state::AppState;
use std::sync::Arc;

const COOKIE: &str = "reviews_session";

async fn create_state() -> AppState {
    let db = Database::new(":memory:").unwrap();
    db.create_schema().await.unwrap();
    let registry = InMemoryRegistry::with_objects(vec![ContentObject {
        target: TargetRef::new(1, 7),
        title: "Espresso machine".into(),
        url: None,
    }]);
    AppState::new(
        ReviewService::new(db, Arc::new(registry), default_score_choices()),
        COOKIE,
    )
}

fn submission(score: &str, comment: &str, user_name: &str) -> ReviewSubmission {
    ReviewSubmission {
        content_type_id: 1,
        content_id: 7,
        score: score.into(),
        comment: comment.into(),
        user_name: user_name.into(),
        ..Default::default()
    }
}

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn test_anonymous_review_flow() {
    let state = create_state().await;
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    // Entering the form starts an anonymous session
    let resp = test::call_service(&app, test::TestRequest::get().uri("/reviews/add/1/7").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let session: Cookie<'static> = resp
        .response()
        .cookies()
        .find(|c| c.name() == COOKIE)
        .map(|c| c.into_owned())
        .expect("session cookie");
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Espresso machine"));
    assert!(body.contains("user_name"));

    // Valid submission goes to the preview
    let req = test::TestRequest::post()
        .uri("/reviews/add/1/7")
        .cookie(session.clone())
        .set_form(submission("5", "great", "Alice"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Alice"));
    assert!(body.contains("great"));
    assert!(body.contains("/reviews/save"));

    // Confirm
    let req = test::TestRequest::post()
        .uri("/reviews/save")
        .cookie(session.clone())
        .set_form(submission("5", "great", "Alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/reviews/thank-you");

    let req = test::TestRequest::get()
        .uri("/api/reviews/1/7")
        .cookie(session.clone())
        .to_request();
    let unit: PublicReviews = test::call_and_read_body_json(&app, req).await;
    assert!(unit.has_rated);
    assert_eq!(unit.reviews.len(), 1);
    assert_eq!(unit.reviews[0].score, 5.0);
    assert_eq!(unit.reviews[0].user_name, "Alice");
    assert_eq!(unit.average.average, Some(5.0));
    assert_eq!(unit.average.count, 1);

    // A second attempt is turned away
    let req = test::TestRequest::get()
        .uri("/reviews/add/1/7")
        .cookie(session.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/reviews/already-rated");

    // Another visitor has not rated yet
    let req = test::TestRequest::get().uri("/api/reviews/1/7").to_request();
    let unit: PublicReviews = test::call_and_read_body_json(&app, req).await;
    assert!(!unit.has_rated);
}

#[actix_web::test]
async fn test_missing_name_rerenders_form() {
    let state = create_state().await;
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/reviews/add/1/7")
        .cookie(Cookie::new(COOKIE, "s1"))
        .set_form(submission("4", "ok", ""))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("This field is required"));
    assert!(!body.contains("/reviews/save"));
}

#[actix_web::test]
async fn test_authenticated_review_uses_account() {
    let state = create_state().await.with_auth_headers(true);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/reviews/save")
        .insert_header((USER_ID_HEADER, "21"))
        .insert_header((USER_NAME_HEADER, "Bob Smith"))
        .insert_header((USER_EMAIL_HEADER, "bob@example.com"))
        .set_form(submission("3", "fine", "Mallory"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/reviews/thank-you");

    let req = test::TestRequest::get()
        .uri("/api/reviews/1/7")
        .insert_header((USER_ID_HEADER, "21"))
        .to_request();
    let unit: PublicReviews = test::call_and_read_body_json(&app, req).await;
    assert!(unit.has_rated);
    assert_eq!(unit.reviews[0].user_name, "Bob Smith");

    let req = test::TestRequest::get().uri("/api/reviews/1/7").to_request();
    let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert!(!body.contains("bob@example.com"));
}

#[actix_web::test]
async fn test_auth_headers_ignored_by_default() {
    let state = create_state().await;
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/reviews/save")
        .insert_header((USER_ID_HEADER, "21"))
        .insert_header((USER_NAME_HEADER, "Bob Smith"))
        .set_form(submission("3", "fine", "Mallory"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/reviews/thank-you");

    // Stored as an anonymous review under the posted name
    let req = test::TestRequest::get()
        .uri("/api/reviews/1/7")
        .insert_header((USER_ID_HEADER, "21"))
        .to_request();
    let unit: PublicReviews = test::call_and_read_body_json(&app, req).await;
    assert!(!unit.has_rated);
    assert_eq!(unit.reviews[0].user_name, "Mallory");
}

#[actix_web::test]
async fn test_json_hides_reviewer_session_and_ip() {
    let state = create_state().await;
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    let mut posted = submission("4", "solid", "Victor");
    posted.user_email = "victor@example.com".into();
    let req = test::TestRequest::post()
        .uri("/reviews/save")
        .cookie(Cookie::new(COOKIE, "victim-secret-session"))
        .peer_addr("203.0.113.9:4711".parse().unwrap())
        .set_form(posted)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/reviews/thank-you");

    let req = test::TestRequest::get().uri("/api/reviews/1/7").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let unit: PublicReviews = serde_json::from_slice(&body).unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(unit.reviews.len(), 1);
    assert_eq!(unit.reviews[0].user_name, "Victor");
    assert!(!body.contains("victim-secret-session"));
    assert!(!body.contains("203.0.113.9"));
    assert!(!body.contains("victor@example.com"));
}

#[actix_web::test]
async fn test_edit_from_preview() {
    let state = create_state().await;
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    let mut posted = submission("2", "needs work", "Dan");
    posted.edit = "1".into();
    let req = test::TestRequest::post()
        .uri("/reviews/save")
        .cookie(Cookie::new(COOKIE, "s2"))
        .set_form(posted)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("needs work"));
    assert!(body.contains("Dan"));

    let req = test::TestRequest::get().uri("/api/reviews/1/7").to_request();
    let unit: PublicReviews = test::call_and_read_body_json(&app, req).await;
    assert!(unit.reviews.is_empty());
    assert_eq!(unit.average.average, None);
}

#[actix_web::test]
async fn test_unknown_target_is_not_found() {
    let state = create_state().await;
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    for uri in ["/reviews/add/9/9", "/reviews/for/9/9", "/api/reviews/9/9"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_web::test]
async fn test_reviews_fragment() {
    let state = create_state().await;
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/reviews/for/1/7").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Not rated yet"));
    assert!(body.contains("/reviews/add/1/7"));
}
