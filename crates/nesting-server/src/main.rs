//! The HTTP transport (L5, §4.6): a thin Rocket service exposing the
//! nesting core's L4 request handler over `/nest`, plus `/` and `/health`
//! liveness endpoints. Holds no state across requests.

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catch, catchers, get, post, routes, Request, Response};
use serde_json::{json, Value};

use nesting::request::{NestRequest, NestResponse};
use nesting::NestingError;

/// A permissive allow-all CORS fairing, attached to every response
/// (§4.6: demo-grade, no per-origin allowlist).
struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "permissive CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, POST, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        tracing::info!(
            method = %request.method(),
            path = %request.uri().path(),
            status = %response.status(),
            "request"
        );
    }
}

/// Wraps a [`NestingError`] into the documented `{success: false, message}`
/// error body, at a 4xx or 5xx status depending on its kind (§4.6). The
/// anomaly detail is logged server-side before the generic message is
/// handed to the client.
struct ApiError(NestingError);

impl From<NestingError> for ApiError {
    fn from(err: NestingError) -> Self {
        Self(err)
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'static> {
        let (status, message) = if self.0.is_client_error() {
            tracing::warn!(error = %self.0, "rejected nesting request");
            (Status::BadRequest, self.0.to_string())
        } else {
            tracing::error!(error = %self.0, "internal nesting anomaly");
            (Status::InternalServerError, "internal server error".to_string())
        };
        let body = json!({"success": false, "message": message});
        Response::build_from(Json(body).respond_to(req)?)
            .status(status)
            .ok()
    }
}

#[post("/nest", data = "<body>")]
fn nest(body: Json<NestRequest>) -> Result<Json<NestResponse>, ApiError> {
    let response = nesting::request::handle(&body)?;
    Ok(Json(response))
}

#[get("/")]
fn index() -> Json<Value> {
    Json(json!({
        "message": "nesting service is running",
        "version": nesting::VERSION,
    }))
}

#[get("/health")]
fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "nesting-api"}))
}

#[catch(400)]
fn bad_request(req: &Request) -> Json<Value> {
    tracing::warn!(path = %req.uri().path(), "malformed request body");
    Json(json!({"success": false, "message": "malformed request body"}))
}

#[catch(422)]
fn unprocessable(req: &Request) -> Json<Value> {
    tracing::warn!(path = %req.uri().path(), "malformed request body");
    Json(json!({"success": false, "message": "malformed request body"}))
}

#[catch(500)]
fn internal_error() -> Json<Value> {
    Json(json!({"success": false, "message": "internal server error"}))
}

#[rocket::launch]
fn rocket() -> _ {
    tracing_subscriber::fmt().with_target(false).init();
    rocket::build()
        .attach(Cors)
        .register("/", catchers![bad_request, unprocessable, internal_error])
        .mount("/", routes![index, health, nest])
}
