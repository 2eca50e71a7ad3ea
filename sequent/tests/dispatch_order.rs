use sequent::testing::RecordingHandler;
use sequent::{Flow, sync_fn};
use std::sync::{Arc, Mutex};

mod common;

#[tokio::test]
async fn global_runs_before_scoped_before_route_regardless_of_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = common::router();

    // Deliberately registered route first, middleware last: the chain is
    // concatenated by category at dispatch time, not registration time.
    router
        .get("/api/thing", [Some(RecordingHandler::new("route", log.clone()))])
        .unwrap();
    router.middleware_at("/api", [Some(RecordingHandler::new("scoped", log.clone()))]);
    router.middleware([Some(RecordingHandler::new("global", log.clone()))]);

    router
        .dispatch(common::get("/api/thing"), common::response())
        .await;

    assert_eq!(*log.lock().unwrap(), vec!["global", "scoped", "route"]);
}

#[tokio::test]
async fn order_within_each_category_is_preserved() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = common::router();

    router.middleware([
        Some(RecordingHandler::new("g1", log.clone())),
        Some(RecordingHandler::new("g2", log.clone())),
    ]);
    router.middleware_at("/api", [Some(RecordingHandler::new("s1", log.clone()))]);
    // A second registration for the same prefix accumulates after the first.
    router.middleware_at("/api", [Some(RecordingHandler::new("s2", log.clone()))]);
    router
        .get("/api/x", [Some(RecordingHandler::new("route", log.clone()))])
        .unwrap();

    router
        .dispatch(common::get("/api/x"), common::response())
        .await;

    assert_eq!(*log.lock().unwrap(), vec!["g1", "g2", "s1", "s2", "route"]);
}

#[tokio::test]
async fn scoped_middleware_rebases_the_request_exactly_once() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut router = common::router();

    let record_path = |seen: Arc<Mutex<Vec<String>>>| {
        sync_fn(move |req, _res| {
            seen.lock().unwrap().push(req.path.clone());
            Ok(Flow::Proceed)
        })
    };

    // Two registrations for one prefix share a single rebase handler.
    router.middleware_at("/api", [Some(record_path(seen.clone()))]);
    router.middleware_at("/api", [Some(record_path(seen.clone()))]);

    router
        .dispatch(common::get("/api/users/7"), common::response())
        .await;

    assert_eq!(*seen.lock().unwrap(), vec!["/users/7", "/users/7"]);
}

#[tokio::test]
async fn scoped_middleware_ignores_other_segments() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = common::router();

    router.middleware_at("/api", [Some(RecordingHandler::new("api", log.clone()))]);
    router.middleware([Some(RecordingHandler::new("global", log.clone()))]);

    router
        .dispatch(common::get("/other/path"), common::response())
        .await;

    assert_eq!(*log.lock().unwrap(), vec!["global"]);
}

#[tokio::test]
async fn root_prefix_middleware_is_global() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = common::router();

    router.middleware_at("/", [Some(RecordingHandler::new("root", log.clone()))]);

    router
        .dispatch(common::get("/anything"), common::response())
        .await;

    assert_eq!(*log.lock().unwrap(), vec!["root"]);
}
