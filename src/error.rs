use actix_web::http::header::{self, ContentType};
use actix_web::http::{Method, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{reason}. Expected format : /store/{{id}}")]
    MalformedPath { path: String, reason: &'static str },

    #[error(transparent)]
    InvalidPayload(#[from] PayloadError),

    #[error("ID not found : '{0}'.")]
    NotFound(String),

    #[error("ID already exists : '{0}'.")]
    Conflict(String),

    #[error("Method {0} is not allowed on /store/{{id}}.")]
    MethodNotAllowed(Method),
}

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Error while parsing request body : {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Error while reading request body : {0}")]
    Read(#[from] actix_web::error::PayloadError),

    #[error("Value is empty.")]
    EmptyValue,
}

impl Error {
    pub fn malformed_path(path: &str, reason: &'static str) -> Error {
        Error::MalformedPath {
            path: path.to_string(),
            reason,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MalformedPath { .. } | Error::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        response.content_type(ContentType::plaintext());
        if let Error::MethodNotAllowed(_) = self {
            response.insert_header((header::ALLOW, "GET, POST, PUT, PATCH, DELETE"));
        }
        response.body(self.to_string())
    }
}
