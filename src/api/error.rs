use rocket::http::Status;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// The whole endpoint is disabled through configuration.
    FeatureDisabled,
    /// Bad caller input on the cache-clear endpoint.
    InvalidRequest(String),
}

impl<'r> rocket::response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        match self {
            ApiError::FeatureDisabled => {
                let body = json!({
                    "error": "Feature disabled",
                    "message": "The Instagram feed endpoint is disabled"
                })
                .to_string();

                rocket::Response::build()
                    .status(Status::ServiceUnavailable)
                    .header(rocket::http::ContentType::JSON)
                    .sized_body(None, std::io::Cursor::new(body))
                    .ok()
            }
            ApiError::InvalidRequest(message) => {
                let body = json!({
                    "error": "Invalid request",
                    "message": message
                })
                .to_string();

                rocket::Response::build()
                    .status(Status::BadRequest)
                    .header(rocket::http::ContentType::JSON)
                    .sized_body(None, std::io::Cursor::new(body))
                    .ok()
            }
        }
    }
}
