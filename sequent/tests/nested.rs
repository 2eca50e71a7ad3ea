use http::StatusCode;
use sequent::testing::{EndHandler, FailingHandler, SkipHandler, StatusTerminal};
use sequent::Router;

mod common;

fn mounted(configure: impl FnOnce(&mut Router)) -> sequent::HandlerRef {
    let mut sub = Router::new(StatusTerminal);
    configure(&mut sub);
    sub.into_handler()
}

#[tokio::test]
async fn skip_inside_a_nested_router_falls_through_to_the_parent_sibling() {
    let mut parent = common::router();

    let sub = mounted(|sub| {
        sub.get("/item", [Some(SkipHandler::new())]).unwrap();
    });
    parent.middleware_at("/api", [Some(sub)]);
    parent
        .get("/api/item", [Some(EndHandler::new("parent"))])
        .unwrap();

    let (_, res) = parent
        .dispatch(common::get("/api/item"), common::response())
        .await;

    // The sub-router's terminal handler must not have produced a 404 here.
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body_text(), "parent");
}

#[tokio::test]
async fn nested_router_handles_its_own_matches() {
    let mut parent = common::router();

    let sub = mounted(|sub| {
        sub.get("/users", [Some(EndHandler::new("sub users"))]).unwrap();
    });
    parent.middleware_at("/api", [Some(sub)]);

    let (_, res) = parent
        .dispatch(common::get("/api/users"), common::response())
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body_text(), "sub users");
}

#[tokio::test]
async fn nested_router_miss_falls_through_to_parent_routes() {
    let mut parent = common::router();

    let sub = mounted(|sub| {
        sub.get("/only-this", [Some(EndHandler::new("sub"))]).unwrap();
    });
    parent.middleware_at("/api", [Some(sub)]);
    parent
        .get("/api/extra", [Some(EndHandler::new("parent extra"))])
        .unwrap();

    let (_, res) = parent
        .dispatch(common::get("/api/extra"), common::response())
        .await;

    assert_eq!(res.body_text(), "parent extra");
}

#[tokio::test]
async fn nested_router_errors_go_to_its_own_terminal() {
    let mut parent = common::router();

    let sub = mounted(|sub| {
        sub.get("/boom", [Some(FailingHandler::new("sub exploded"))])
            .unwrap();
    });
    parent.middleware_at("/api", [Some(sub)]);

    let (_, res) = parent
        .dispatch(common::get("/api/boom"), common::response())
        .await;

    // The sub-router's terminal produced the 500; the parent saw a
    // finalized response and stopped without consulting its own terminal.
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body_text(), "sub exploded");
}

#[tokio::test]
async fn nested_miss_with_no_parent_route_reaches_the_parent_terminal() {
    let mut parent = common::router();

    let sub = mounted(|sub| {
        sub.get("/known", [Some(EndHandler::new("sub"))]).unwrap();
    });
    parent.middleware_at("/api", [Some(sub)]);

    let (_, res) = parent
        .dispatch(common::get("/api/nothing-here"), common::response())
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn top_level_skip_is_treated_as_no_match() {
    let mut router = common::router();
    router.get("/s", [Some(SkipHandler::new())]).unwrap();

    let (_, res) = router
        .dispatch(common::get("/s"), common::response())
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.body_text(), "Not Found");
}
