use std::time::Instant;

use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use futures::StreamExt;

use crate::error::{Error, PayloadError};
use crate::handlers;
use crate::id::Identifier;
use crate::store::Store;

async fn read_body(mut payload: web::Payload) -> Result<web::BytesMut, PayloadError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body)
}

async fn with_body(
    method: &Method,
    path: &str,
    payload: web::Payload,
    kv: &Store,
) -> Result<HttpResponse, Error> {
    let body = match read_body(payload).await {
        Ok(body) => body,
        Err(e) => {
            Identifier::from_path(path)?;
            return Err(e.into());
        }
    };
    match *method {
        Method::POST => handlers::post(kv, path, &body),
        Method::PUT => handlers::put(kv, path, &body),
        _ => handlers::patch(kv, path, &body),
    }
}

// Mounted as the default service so malformed paths still get a 400.
pub async fn dispatch(req: HttpRequest, payload: web::Payload, kv: web::Data<Store>) -> HttpResponse {
    let start = Instant::now();
    let method = req.method();
    let path = req.path();

    let result = match *method {
        Method::GET => handlers::get(&kv, path),
        Method::POST | Method::PUT | Method::PATCH => with_body(method, path, payload, &kv).await,
        Method::DELETE => handlers::delete(&kv, path),
        _ => Err(Error::MethodNotAllowed(method.clone())),
    };

    let resp = match result {
        Ok(resp) => resp,
        Err(e) => {
            let status = e.status_code().as_u16();
            match &e {
                Error::MalformedPath { path, .. } => {
                    log::warn!("[{}] {} Bad request : \"{}\"", method, status, path)
                }
                _ => log::warn!("[{}] {} {} : \"{}\"", method, status, e, path),
            }
            e.error_response()
        }
    };

    log::info!(
        "\tRequest took {:.2}ms to run.",
        start.elapsed().as_secs_f64() * 1000.0
    );
    resp
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::to(dispatch));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use serde_json::json;

    macro_rules! app {
        ($store:expr) => {
            test::init_service(App::new().app_data($store.clone()).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn full_lifecycle() {
        let store = web::Data::new(Store::new());
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/store/abc")
            .set_payload(r#"{"Value":"hello"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(test::read_body(resp).await.is_empty());

        let req = test::TestRequest::get().uri("/store/abc").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "abc": "hello" }));

        let req = test::TestRequest::post()
            .uri("/store/abc")
            .set_payload(r#"{"Value":"x"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::patch()
            .uri("/store/abc")
            .set_payload(r#"{"Value":"bye"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/store/abc").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "abc": "bye" }));

        let req = test::TestRequest::delete().uri("/store/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/store/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn bad_requests() {
        let store = web::Data::new(Store::new());
        let app = app!(store);

        let req = test::TestRequest::get().uri("/store/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("/store/{id}"));

        let req = test::TestRequest::put()
            .uri("/store/new")
            .set_payload("{}")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, "Value is empty.");

        let req = test::TestRequest::get().uri("/elsewhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn patch_on_missing_id_leaves_store_unchanged() {
        let store = web::Data::new(Store::new());
        let app = app!(store);

        let req = test::TestRequest::patch()
            .uri("/store/ghost")
            .set_payload(r#"{"Value":"boo"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn large_values_are_accepted() {
        let store = web::Data::new(Store::new());
        let app = app!(store);
        let value = "x".repeat(300 * 1024);
        let payload = json!({ "Value": value }).to_string();

        let req = test::TestRequest::put()
            .uri("/store/big")
            .set_payload(payload.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/store/big").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["big"].as_str().map(str::len), Some(value.len()));

        let req = test::TestRequest::post()
            .uri("/nowhere")
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn unknown_method_is_rejected() {
        let store = web::Data::new(Store::new());
        let app = app!(store);

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/store/abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            resp.headers().get(header::ALLOW).unwrap(),
            "GET, POST, PUT, PATCH, DELETE"
        );
    }
}
