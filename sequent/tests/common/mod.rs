use http::Method;
use sequent::testing::StatusTerminal;
use sequent::{Request, Response, Router};

pub fn router() -> Router {
    Router::new(StatusTerminal)
}

pub fn request(method: Method, url: &str) -> Request {
    Request::new(method, url)
}

pub fn get(url: &str) -> Request {
    request(Method::GET, url)
}

pub fn response() -> Response {
    Response::new()
}
