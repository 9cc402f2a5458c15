use axum::{body::Body, http::Request, response::Response};
use serde::de::DeserializeOwned;
use suroy_notifier::models::User;

pub fn build_post_request(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub fn build_get_request(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

pub async fn read_json<T: DeserializeOwned>(res: Response) -> T {
    let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn user(id: &str, first_name: &str, last_name: &str, tokens: &[&str]) -> User {
    User {
        id: id.to_owned(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        fcm_tokens: tokens.iter().map(|t| t.to_string()).collect(),
    }
}
