//! `GET /app-config`: runtime settings for the browser bundle.

use actix_web::web::{self, get, scope};
use actix_web::{HttpResponse, Responder, Scope};

use common::config::AppConfig;

pub fn configure_routes() -> Scope {
    scope("/app-config").route("", get().to(process))
}

pub async fn process(config: web::Data<AppConfig>) -> impl Responder {
    HttpResponse::Ok().json(config.get_ref())
}
