use actix_web::{web, App, HttpServer};
use clap::Parser;
use log::info;

use hotseat_chess::config::Config;
use hotseat_chess::models::AppState;
use hotseat_chess::routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::parse();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_level.as_str()));

    let (host, port) = config.bind_addr();
    info!("Starting chess server at http://{}:{}", host, port);
    info!(
        "Serving static files from {}, clock tick every {} ms",
        config.static_dir.display(),
        config.tick_ms
    );

    // Create shared application state
    let app_state = web::Data::new(AppState::new(config.tick_interval()));
    let static_dir = config.static_dir.clone();

    // Start HTTP server
    HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .app_data(app_state.clone())
            .configure(move |cfg| configure_routes(cfg, static_dir))
    })
    .bind((host, port))?
    .run()
    .await
}
