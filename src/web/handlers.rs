use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{debug, error, info, warn};
use serde_json::json;
use tera::Context;
use uuid::Uuid;

use crate::language::LanguageTag;
use crate::web::models::{ChatRequest, ChatResponse};
use crate::AppState;

/// User-facing text for any generation failure; details stay in the log.
pub const GENERATION_FAILURE_MESSAGE: &str = "AIとの通信でエラーが発生しました";

// Demo page with the widget embedded
pub async fn index(data: web::Data<AppState>) -> impl Responder {
    let mut context = Context::new();
    context.insert("widget", &data.widget.to_wire());
    match data.tera.render("index.html", &context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html").body(html),
        Err(e) => {
            error!("Template error: {}", e);
            HttpResponse::InternalServerError().body("Template error")
        }
    }
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn widget_config(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.widget.to_wire())
}

// Chat API endpoint
pub async fn chat(data: web::Data<AppState>, req: web::Json<ChatRequest>) -> impl Responder {
    let request_id = Uuid::new_v4();
    let req = req.into_inner();

    if req.message.trim().is_empty() {
        warn!("[{}] Rejected chat request with empty message", request_id);
        return HttpResponse::BadRequest().json(ChatResponse::failure("Message must not be empty"));
    }

    if let Some(code) = req.language.as_deref() {
        if LanguageTag::from_code(code).is_none() {
            warn!("[{}] Ignoring unrecognised language {:?}, detecting instead", request_id, code);
        }
    }

    info!(
        "[{}] Chat request from customer {:?} ({} prior messages)",
        request_id,
        req.customer_id,
        req.conversation_history.len()
    );
    debug!("[{}] Message: {}", request_id, req.message);

    match data
        .relay
        .relay(&req.message, &req.conversation_history, req.language.as_deref())
        .await
    {
        Ok(reply) => {
            info!(
                "[{}] Replied in {} ({} characters)",
                request_id,
                reply.language.display_name(),
                reply.reply.chars().count()
            );
            HttpResponse::Ok().json(ChatResponse::ok(reply.reply, reply.language, reply.usage))
        }
        Err(e) => {
            error!("[{}] Generation service error: {}", request_id, e);
            HttpResponse::InternalServerError().json(ChatResponse::failure(GENERATION_FAILURE_MESSAGE))
        }
    }
}

/// Turns JSON extractor failures into the same failure shape `/api/chat` uses.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Malformed chat request: {}", err);
    let response = HttpResponse::BadRequest().json(ChatResponse::failure("Invalid request body"));
    InternalError::from_response(err, response).into()
}
