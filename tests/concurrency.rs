use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use camp_signups::model::{NewActivity, NewCamper};
use camp_signups::{app, open, ActivityService, AppConfig, AppState, CamperService};
use serde_json::json;
use sqlx::SqlitePool;
use tokio::task::JoinSet;
use tower::ServiceExt;

async fn file_backed() -> (tempfile::TempDir, Router, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        database_url: format!("sqlite://{}", dir.path().join("camp.db").display()),
        ..AppConfig::default()
    };
    let pool = open(&config).await.unwrap();
    let router = app(AppState::new(pool.clone()), config.body_limit_bytes);
    (dir, router, pool)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writes_on_a_file_store_all_succeed() {
    let (_dir, router, pool) = file_backed().await;
    let camper = CamperService::create(
        &pool,
        &NewCamper {
            name: Some("Nicholas".into()),
            age: Some(10),
        },
    )
    .await
    .unwrap();
    let activity = ActivityService::create(
        &pool,
        &NewActivity {
            name: Some("Archery".into()),
            difficulty: Some(2),
        },
    )
    .await
    .unwrap();

    let mut requests = JoinSet::new();
    for i in 0..40i64 {
        let router = router.clone();
        let req = json_request(
            "PATCH",
            &format!("/campers/{}", camper.id),
            json!({ "age": 8 + i % 10 }),
        );
        requests.spawn(async move { (StatusCode::ACCEPTED, router.oneshot(req).await.unwrap().status()) });
    }
    for i in 0..20i64 {
        let router = router.clone();
        let req = json_request(
            "POST",
            "/signups",
            json!({ "camper_id": camper.id, "activity_id": activity.id, "time": i }),
        );
        requests.spawn(async move { (StatusCode::CREATED, router.oneshot(req).await.unwrap().status()) });
    }

    while let Some(joined) = requests.join_next().await {
        let (expected, actual) = joined.unwrap();
        assert_eq!(actual, expected);
    }

    let (stored, signups) = CamperService::read_detail(&pool, camper.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Nicholas");
    assert!((8..=17).contains(&stored.age));
    assert_eq!(signups.len(), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_activity_delete_and_signups_leave_no_orphans() {
    let (_dir, router, pool) = file_backed().await;
    let camper = CamperService::create(
        &pool,
        &NewCamper {
            name: Some("Lizzie".into()),
            age: Some(9),
        },
    )
    .await
    .unwrap();
    let activity = ActivityService::create(
        &pool,
        &NewActivity {
            name: Some("Canoeing".into()),
            difficulty: Some(3),
        },
    )
    .await
    .unwrap();

    let mut requests = JoinSet::new();
    for i in 0..20i64 {
        let router = router.clone();
        let req = json_request(
            "POST",
            "/signups",
            json!({ "camper_id": camper.id, "activity_id": activity.id, "time": i }),
        );
        requests.spawn(async move { router.oneshot(req).await.unwrap().status() });
    }
    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/activities/{}", activity.id))
        .body(Body::empty())
        .unwrap();
    let delete_status = router.clone().oneshot(delete).await.unwrap().status();
    assert_eq!(delete_status, StatusCode::NO_CONTENT);

    while let Some(joined) = requests.join_next().await {
        let status = joined.unwrap();
        // Signups that lost the race to the delete see an unknown activity.
        assert!(status == StatusCode::CREATED || status == StatusCode::BAD_REQUEST);
    }

    let (orphans,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM signups WHERE activity_id = ?")
        .bind(activity.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}
