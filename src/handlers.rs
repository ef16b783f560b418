use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, PayloadError};
use crate::id::Identifier;
use crate::store::Store;

#[derive(Deserialize)]
struct Payload {
    #[serde(rename = "Value", alias = "value", default)]
    value: String,
}

fn parse_value(body: &[u8]) -> Result<String, PayloadError> {
    let payload: Payload = serde_json::from_slice(body)?;
    if payload.value.is_empty() {
        return Err(PayloadError::EmptyValue);
    }
    Ok(payload.value)
}

fn done() -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::json()).finish()
}

pub fn get(store: &Store, path: &str) -> Result<HttpResponse, Error> {
    let id = Identifier::from_path(path)?;
    match store.get(&id) {
        Some(value) => {
            log::info!("[GET] 200 served id : {}", id);
            Ok(HttpResponse::Ok().json(json!({ id.as_str(): value })))
        }
        None => Err(Error::NotFound(id.to_string())),
    }
}

pub fn post(store: &Store, path: &str, body: &[u8]) -> Result<HttpResponse, Error> {
    let id = Identifier::from_path(path)?;
    let value = parse_value(body)?;
    let key = id.to_string();
    if !store.put_if_absent(id, value) {
        return Err(Error::Conflict(key));
    }
    log::info!("[POST] 200 created value for id : {}", key);
    Ok(done())
}

pub fn put(store: &Store, path: &str, body: &[u8]) -> Result<HttpResponse, Error> {
    let id = Identifier::from_path(path)?;
    let value = parse_value(body)?;
    let key = id.to_string();
    store.put(id, value);
    log::info!("[PUT] 200 created or updated value for id : {}", key);
    Ok(done())
}

pub fn patch(store: &Store, path: &str, body: &[u8]) -> Result<HttpResponse, Error> {
    let id = Identifier::from_path(path)?;
    let value = parse_value(body)?;
    if !store.update(&id, value) {
        return Err(Error::NotFound(id.to_string()));
    }
    log::info!("[PATCH] 200 updated value for id : {}", id);
    Ok(done())
}

pub fn delete(store: &Store, path: &str) -> Result<HttpResponse, Error> {
    let id = Identifier::from_path(path)?;
    if !store.delete(&id) {
        return Err(Error::NotFound(id.to_string()));
    }
    log::info!("[DELETE] 200 deleted id : {}", id);
    Ok(done())
}
