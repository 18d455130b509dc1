mod config;
mod error;
mod services;

use std::thread;
use std::time::Duration;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};

use crate::config::Settings;
use crate::error::StartupError;
use crate::services::proxy::Upstream;

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::load()?;
    let upstream = Upstream::new(&settings)?;
    let url = settings.public_url();

    if settings.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(e) = webbrowser::open(&url) {
                warn!("could not open a browser at {}: {}", url, e);
            }
        });
    }

    let mount = settings.proxy_mount();
    match &mount {
        Some(mount) => info!("Forwarding {}/* to {}", mount, settings.upstream_url),
        None => info!("API base {} is absolute; not forwarding", settings.api_base),
    }
    info!("Server running at {}", url);

    let app_config = web::Data::new(settings.app_config());
    let upstream = web::Data::new(upstream);
    let body_limit = settings.json_limit_bytes;

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(Logger::default())
            .app_data(web::PayloadConfig::new(body_limit))
            .app_data(app_config.clone())
            .app_data(upstream.clone())
            .service(services::app_config::configure_routes());
        if let Some(mount) = &mount {
            app = app.service(services::proxy::configure_routes(mount));
        }
        app.default_service(web::route().to(services::static_files::process))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    Ok(())
}
