use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{debug, error};
use serde_json::json;

use crate::config::Settings;

/// Request headers relayed to the upstream. Hop-by-hop and host headers are dropped.
const FORWARDED_REQUEST_HEADERS: [&str; 4] = ["authorization", "content-type", "accept", "cookie"];
/// Response headers relayed back to the browser.
const FORWARDED_RESPONSE_HEADERS: [&str; 2] = ["content-type", "set-cookie"];

/// Upstream REST backend and the pooled client used to reach it.
#[derive(Clone)]
pub struct Upstream {
    client: reqwest::Client,
    base_url: String,
}

impl Upstream {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.upstream_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.upstream_url.clone(),
        })
    }
}

/// `<base>/<tail>[?query]` with exactly one slash at the join.
pub fn upstream_url(base: &str, tail: &str, query: &str) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), tail.trim_start_matches('/'));
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

fn bad_gateway(message: String) -> HttpResponse {
    HttpResponse::BadGateway().json(json!({ "message": message }))
}

pub async fn process(
    req: HttpRequest,
    body: web::Bytes,
    upstream: web::Data<Upstream>,
) -> impl Responder {
    let tail = req.match_info().query("tail");
    let url = upstream_url(&upstream.base_url, tail, req.query_string());

    let method = match reqwest::Method::from_bytes(req.method().as_str().as_bytes()) {
        Ok(method) => method,
        Err(_) => return HttpResponse::MethodNotAllowed().finish(),
    };
    debug!("forwarding {} {}", method, url);

    let mut request = upstream.client.request(method.clone(), &url);
    for name in FORWARDED_REQUEST_HEADERS {
        if let Some(value) = req.headers().get(name).and_then(|v| v.to_str().ok()) {
            request = request.header(name, value);
        }
    }
    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            error!("upstream {} {} failed: {}", method, url, e);
            return bad_gateway(format!("The case server could not be reached: {}", e));
        }
    };

    let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut reply = HttpResponse::build(status);
    for name in FORWARDED_RESPONSE_HEADERS {
        for value in response.headers().get_all(name) {
            if let Ok(value) = value.to_str() {
                reply.append_header((name, value.to_string()));
            }
        }
    }

    match response.bytes().await {
        Ok(bytes) => reply.body(bytes.to_vec()),
        Err(e) => {
            error!("reading upstream {} {} failed: {}", method, url, e);
            bad_gateway(format!("The case server sent an incomplete reply: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[::core::prelude::v1::test]
    fn joins_base_tail_and_query() {
        assert_eq!(
            upstream_url("http://127.0.0.1:8000/", "investigation/advisories/", ""),
            "http://127.0.0.1:8000/investigation/advisories/"
        );
        assert_eq!(
            upstream_url("http://backend", "investigation/alerts/", "page=2"),
            "http://backend/investigation/alerts/?page=2"
        );
    }

    #[actix_web::test]
    async fn unreachable_upstream_answers_bad_gateway_json() {
        let settings = Settings {
            upstream_url: "http://127.0.0.1:9".into(),
            upstream_timeout_secs: 2,
            ..Settings::default()
        };
        let upstream = Upstream::new(&settings).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(upstream))
                .service(crate::services::proxy::configure_routes("/api")),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/investigation/investigations/")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().starts_with("The case server could not be reached"));
    }
}
