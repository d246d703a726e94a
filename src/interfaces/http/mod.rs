use crate::domain::car::FormState;
use crate::domain::reference::ReferenceChoices;
use crate::interfaces::state::AppState;
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, Either, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub app_state: Arc<AppState>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Serialize)]
struct HomeResponse<'a> {
    prediction_text: Option<String>,
    model_loaded: bool,
    form: FormState,
    choices: &'a ReferenceChoices,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    choices_loaded: bool,
}

#[get("/")]
async fn home(data: web::Data<HttpState>) -> impl Responder {
    let state = &data.app_state;
    HttpResponse::Ok().json(HomeResponse {
        prediction_text: None,
        model_loaded: state.predict_use_case.is_enabled(),
        form: FormState::default(),
        choices: &state.choices,
    })
}

#[post("/predict")]
async fn predict(
    data: web::Data<HttpState>,
    body: Either<web::Form<HashMap<String, String>>, web::Json<HashMap<String, JsonValue>>>,
) -> impl Responder {
    let fields = match body {
        Either::Left(form) => form.into_inner(),
        Either::Right(json) => stringify_fields(json.into_inner()),
    };

    let state = &data.app_state;
    let response = state.predict_use_case.respond(&fields, &state.choices);

    match &response.error_kind {
        None => add_log(
            &data.logs,
            "INFO",
            "Predict",
            &format!("Prediction served: {}", response.prediction_text),
        ),
        Some(kind) => add_log(
            &data.logs,
            "WARN",
            "Predict",
            &format!("Prediction failed ({}): {}", kind, response.prediction_text),
        ),
    }

    HttpResponse::Ok().json(response)
}

#[get("/options")]
async fn options(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(&*data.app_state.choices)
}

#[get("/model")]
async fn model_info(data: web::Data<HttpState>) -> impl Responder {
    match &data.app_state.model_summary {
        Some(summary) => HttpResponse::Ok().json(summary),
        None => HttpResponse::NotFound().json(serde_json::json!({ "loaded": false })),
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data
        .logs
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    HttpResponse::Ok().json(&*logs)
}

#[get("/health")]
async fn health(data: web::Data<HttpState>) -> impl Responder {
    let state = &data.app_state;
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        model_loaded: state.predict_use_case.is_enabled(),
        choices_loaded: !state.choices.is_empty(),
    })
}

/// JSON clients may send numbers; the pipeline expects raw text either way.
fn stringify_fields(fields: HashMap<String, JsonValue>) -> HashMap<String, String> {
    fields
        .into_iter()
        .map(|(key, value)| {
            let raw = match value {
                JsonValue::String(text) => text,
                other => other.to_string(),
            };
            (key, raw)
        })
        .collect()
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }

    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(predict)
        .service(health)
        .service(
            web::scope("/api")
                .service(options)
                .service(model_info)
                .service(get_logs),
        );
}

pub fn start_server(
    app_state: Arc<AppState>,
    logs: Arc<Mutex<Vec<LogEntry>>>,
    host: &str,
    port: u16,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { app_state, logs });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
