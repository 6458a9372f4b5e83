//! End-to-end tests driving the router with real sessions.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use studylog::config::Config;
use studylog::models::study_log::NewStudyLog;
use studylog::services::{LogService, TagService};
use studylog::web::AppState;
use tower::ServiceExt;

const ADMIN_PASSWORD: &str = "correct-horse";

struct TestApp {
    state: Arc<AppState>,
    router: Router,
}

fn test_config() -> Config {
    let db_path =
        std::env::temp_dir().join(format!("studylog-web-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.general.locale = "en".to_string();
    config.server.secure_cookies = false;
    config.server.secret_key = Some("s".repeat(64));
    config.bootstrap.admin_password = Some(ADMIN_PASSWORD.to_string());
    config.security.argon2_memory_cost_kib = 64;
    config.security.argon2_time_cost = 1;
    config
}

async fn spawn_app() -> TestApp {
    let state = studylog::web::create_app_state_from_config(test_config())
        .await
        .expect("failed to create app state");
    let router = studylog::web::router(state.clone())
        .await
        .expect("failed to build router");
    TestApp { state, router }
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `name=value` part of the session cookie set by a response.
fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::to_string)
        .next()
}

async fn login(app: &TestApp) -> String {
    let response = app
        .router
        .clone()
        .oneshot(post_form(
            "/login",
            None,
            &format!("username=admin&password={ADMIN_PASSWORD}"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    session_cookie(&response).expect("login should set a session cookie")
}

#[tokio::test]
async fn test_protected_routes_redirect_to_login() {
    let app = spawn_app().await;

    for uri in ["/", "/search", "/tags", "/edit/1"] {
        let response = app.router.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }

    let response = app
        .router
        .clone()
        .oneshot(post_form("/tags/add", None, "name=Math&tag_type=subject"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.state.store().count_tags().await.unwrap(), 0);
}

#[tokio::test]
async fn test_public_pages() {
    let app = spawn_app().await;

    let response = app.router.clone().oneshot(get("/login", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-frame-options").unwrap(),
        "DENY"
    );
    assert!(body_text(response).await.contains(r#"action="/login""#));

    let response = app
        .router
        .clone()
        .oneshot(get("/logged_out", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(get("/static/style.css", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
}

#[tokio::test]
async fn test_login_failures_use_generic_message() {
    let app = spawn_app().await;

    for body in [
        "username=admin&password=wrong",
        "username=nobody&password=whatever",
    ] {
        let response = app
            .router
            .clone()
            .oneshot(post_form("/login", None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(session_cookie(&response).is_none());
        let html = body_text(response).await;
        assert!(html.contains("Username or password is incorrect"));
    }

    let response = app
        .router
        .clone()
        .oneshot(post_form("/login", None, "username=admin&password="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Please enter your username and password"));
    assert!(html.contains(r#"value="admin""#));
}

#[tokio::test]
async fn test_login_grants_access_and_logout_revokes_it() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(get("/", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Review reminders"));
    assert!(html.contains(r#"href="/logout""#));

    let response = app
        .router
        .clone()
        .oneshot(get("/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/logged_out");

    let response = app
        .router
        .clone()
        .oneshot(get("/", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_create_log_and_reject_blank_text() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(post_form("/", Some(&cookie), "title=Chapter+1&text=++"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Please enter some text"));
    assert!(html.contains(r#"value="Chapter 1""#));
    assert!(
        app.state
            .log_service()
            .search_all(&Default::default())
            .await
            .unwrap()
            .is_empty()
    );

    let tag = app
        .state
        .tag_service()
        .add_tag("Math", "subject")
        .await
        .unwrap();

    let body = format!(
        "title=Chapter+1&text=Limits+and+%3Cb%3Ederivatives%3C%2Fb%3E&tag_ids={}&tag_ids=999",
        tag.id
    );
    let response = app
        .router
        .clone()
        .oneshot(post_form("/", Some(&cookie), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let logs = app
        .state
        .log_service()
        .search_all(&Default::default())
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].title, "Chapter 1");
    assert_eq!(logs[0].date, chrono::Local::now().date_naive());
    assert_eq!(logs[0].tags.len(), 1);
    assert_eq!(logs[0].tags[0].name, "Math");

    let response = app
        .router
        .clone()
        .oneshot(get("/", Some(&cookie)))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("Chapter 1"));
    assert!(html.contains("&lt;b&gt;derivatives"));
}

#[tokio::test]
async fn test_edit_update_and_delete_log() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    let tags = app.state.tag_service();
    let math = tags.add_tag("Math", "subject").await.unwrap();
    let review = tags.add_tag("Review", "category").await.unwrap();

    let id = app
        .state
        .log_service()
        .create_log(NewStudyLog {
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            title: "Old title".to_string(),
            text: "Old text".to_string(),
            tag_ids: vec![math.id],
        })
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(get(&format!("/edit/{id}"), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"value="Old title""#));
    assert!(html.contains(&format!(r#"value="{}" checked>"#, math.id)));

    // Missing title rejects the whole update.
    let response = app
        .router
        .clone()
        .oneshot(post_form(
            &format!("/update/{id}"),
            Some(&cookie),
            "date=2024-02-01&title=&text=New+text&tags_submitted=1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Please enter a title"));
    let unchanged = app.state.log_service().get_log(id).await.unwrap();
    assert_eq!(unchanged.text, "Old text");
    assert_eq!(unchanged.tags.len(), 1);

    let response = app
        .router
        .clone()
        .oneshot(post_form(
            &format!("/update/{id}"),
            Some(&cookie),
            &format!(
                "date=2024-02-01&title=New+title&text=&tags_submitted=1&tag_ids={}",
                review.id
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/search");

    let updated = app.state.log_service().get_log(id).await.unwrap();
    assert_eq!(updated.title, "New title");
    assert_eq!(updated.text, "Old text");
    assert_eq!(
        updated.date,
        chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    );
    assert_eq!(
        updated.tags.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![review.id]
    );

    let response = app
        .router
        .clone()
        .oneshot(post_form(&format!("/delete/{id}"), Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/search");

    let response = app
        .router
        .clone()
        .oneshot(get(&format!("/edit/{id}"), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .router
        .clone()
        .oneshot(post_form(&format!("/delete/{id}"), Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tag_management_flow() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    for name in ["Math", "History"] {
        let response = app
            .router
            .clone()
            .oneshot(post_form(
                "/tags/add",
                Some(&cookie),
                &format!("name={name}&tag_type=subject"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/tags");
    }

    let response = app
        .router
        .clone()
        .oneshot(post_form(
            "/tags/add",
            Some(&cookie),
            "name=+Math+&tag_type=subject",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body_text(response)
            .await
            .contains("A tag with that name already exists for this type")
    );
    assert_eq!(app.state.store().count_tags().await.unwrap(), 2);

    let subjects = app.state.tag_service().list_tags("subject").await.unwrap();
    let (math, history) = (subjects[0].clone(), subjects[1].clone());
    assert_eq!((math.name.as_str(), math.sort_order), ("Math", 1));
    assert_eq!((history.name.as_str(), history.sort_order), ("History", 2));

    let response = app
        .router
        .clone()
        .oneshot(post_form(
            &format!("/tags/move/{}/up", history.id),
            Some(&cookie),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let names: Vec<String> = app
        .state
        .tag_service()
        .list_tags("subject")
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["History", "Math"]);

    let response = app
        .router
        .clone()
        .oneshot(post_form(
            &format!("/tags/move/{}/sideways", math.id),
            Some(&cookie),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .router
        .clone()
        .oneshot(post_form(
            &format!("/tags/delete/{}", math.id),
            Some(&cookie),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.state.store().count_tags().await.unwrap(), 1);

    let response = app
        .router
        .clone()
        .oneshot(post_form("/tags/delete/9999", Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .router
        .clone()
        .oneshot(get("/tags", Some(&cookie)))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("History"));
    assert!(!html.contains(">Math<"));
}

#[tokio::test]
async fn test_search_page_filters_and_paginates() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    for i in 1..=12 {
        app.state
            .log_service()
            .create_log(NewStudyLog {
                date,
                title: format!("Entry {i}"),
                text: if i % 2 == 0 {
                    "exam prep".to_string()
                } else {
                    "reading".to_string()
                },
                tag_ids: vec![],
            })
            .await
            .unwrap();
    }

    let response = app
        .router
        .clone()
        .oneshot(get("/search", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("12 results"));
    assert!(html.contains("Page 1 of 2"));
    assert!(html.contains(r#"href="/search?page=2""#));

    let response = app
        .router
        .clone()
        .oneshot(get(
            "/search?date=2024-01-05&keyword=exam&page=1",
            Some(&cookie),
        ))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("6 results"));
    assert!(!html.contains("Page 1 of"));

    let response = app
        .router
        .clone()
        .oneshot(get("/search?keyword=Exam", Some(&cookie)))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("0 results"));

    let response = app
        .router
        .clone()
        .oneshot(get("/search?page=18446744073709551615", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("12 results"));
    assert!(!html.contains("<strong>Entry"));

    let response = app
        .router
        .clone()
        .oneshot(get("/search?date=2024-13-40", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body_text(response)
            .await
            .contains("Dates must use the YYYY-MM-DD format")
    );
}
