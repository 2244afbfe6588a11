mod config;
mod language;
mod model;
mod web;

use actix_files as fs;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};
use std::sync::Arc;
use tera::Tera;

use config::{AppConfig, WidgetSettings};
use model::{ConversationRelay, OpenAiClient};
use web::routes;

// App state structure
struct AppState {
    tera: Tera,
    relay: ConversationRelay,
    widget: WidgetSettings,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting sales chat widget server");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; chat requests will fail until it is");
    }

    let client = match OpenAiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to initialize generation service client: {}", e);
            std::process::exit(1);
        }
    };
    info!("Generating with model {} (max_tokens: {}, temperature: {})",
          config.model, config.max_tokens, config.temperature);

    // Initialize template engine
    let mut tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            error!("Template parsing error: {}", e);
            std::process::exit(1);
        }
    };
    tera.autoescape_on(vec![".html"]);

    let app_state = Data::new(AppState {
        tera,
        relay: ConversationRelay::new(Arc::new(client), &config),
        widget: config.widget.clone(),
    });

    info!("Listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(routes::configure)
            .service(fs::Files::new("/static", "./static"))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
