use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use dotenv::dotenv;
use log::{error, info, warn};
use std::sync::Arc;

mod config;
mod domain;
mod models;
mod run_slot;
mod ui;

use crate::config::AppConfig;
use crate::domain::error::RunError;
use crate::domain::parameters::{SamplerType, VehicleType};
use crate::domain::run::{run_optimization, validate_trigger, RunOutcome};
use crate::domain::validate::validate_time_limit;
use crate::models::{
    CancelResponse, CollapseRequest, CollapseResponse, DashboardSettings, ErrorResponse,
    OptionEntry, RunRequest, RunResponse,
};
use crate::run_slot::RunSlot;

pub struct AppState {
    pub config: AppConfig,
    pub runs: Arc<RunSlot>,
}

// ---------- Route handlers ----------

/// POST /run
pub async fn run(state: web::Data<AppState>, req: web::Json<RunRequest>) -> impl Responder {
    let request = req.into_inner();

    // Incidental re-renders never claim the run slot.
    if validate_trigger(&request.trigger, request.clicks()).is_err() {
        return HttpResponse::Ok().json(RunResponse::NoUpdate);
    }

    if let Err(err) = validate_time_limit(request.time_limit, &state.config.solver_time) {
        return HttpResponse::BadRequest().json(ErrorResponse::new(err));
    }

    let lease = match state.runs.try_claim() {
        Some(lease) => lease,
        None => {
            return HttpResponse::Conflict()
                .json(ErrorResponse::new("An optimization run is already in progress"))
        }
    };

    // The lease rides along to the worker so the slot stays taken until it returns,
    // even if this request is dropped first.
    let result = web::block(move || {
        let outcome = run_optimization(&request, lease.token());
        drop(lease);
        outcome
    })
    .await;

    match result {
        Ok(outcome) => run_response(outcome),
        Err(err) => {
            error!("Run worker failed: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Something went wrong"))
        }
    }
}

fn run_response(outcome: Result<RunOutcome, RunError>) -> HttpResponse {
    match outcome {
        Ok(RunOutcome::Completed(bundle)) => {
            HttpResponse::Ok().json(RunResponse::Completed { result: bundle })
        }
        Ok(RunOutcome::NoUpdate) => HttpResponse::Ok().json(RunResponse::NoUpdate),
        Err(RunError::Cancelled) => HttpResponse::Ok().json(RunResponse::Cancelled),
        Err(err @ RunError::InvalidConfiguration(_)) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(err))
        }
        Err(err) => {
            error!("Run failed: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::new(err))
        }
    }
}

/// POST /cancel
pub async fn cancel(state: web::Data<AppState>) -> impl Responder {
    let cancelled = state.runs.cancel();
    if cancelled {
        warn!("Cancellation requested for the active run");
    }
    HttpResponse::Ok().json(CancelResponse { cancelled })
}

/// POST /collapse
pub async fn collapse(req: web::Json<CollapseRequest>) -> impl Responder {
    HttpResponse::Ok().json(CollapseResponse {
        class_name: ui::toggle_collapsed(&req.class_name),
    })
}

/// GET /config
pub async fn dashboard_config(state: web::Data<AppState>) -> impl Responder {
    let settings = DashboardSettings {
        app_title: state.config.app_title.clone(),
        solver_time: state.config.solver_time,
        sampler_options: SamplerType::ALL
            .iter()
            .map(|s| OptionEntry {
                label: s.label(),
                value: s.index(),
            })
            .collect(),
        vehicle_options: VehicleType::ALL
            .iter()
            .map(|v| OptionEntry {
                label: v.label(),
                value: v.index(),
            })
            .collect(),
        run_in_progress: state.runs.is_busy(),
    };
    HttpResponse::Ok().json(settings)
}

/// GET /assets/theme.css
pub async fn theme(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/css")
        .body(ui::theme_css(&state.config.theme))
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// GET /
pub async fn index(state: web::Data<AppState>) -> impl Responder {
    let page = include_str!("../static/index.html").replace("{{APP_TITLE}}", &state.config.app_title);
    HttpResponse::Ok().content_type("text/html").body(page)
}

// ---------- Server bootstrap ----------
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let config = AppConfig::from_env();

    let default_filter = if config.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let port = config.port;
    let json_limit = config.json_limit;
    let state = web::Data::new(AppState {
        config,
        runs: Arc::new(RunSlot::new()),
    });

    info!("Starting server on http://127.0.0.1:{}", port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(sentry_actix::Sentry::new())
            .app_data(state.clone())
            .app_data(
                web::JsonConfig::default()
                    .limit(json_limit)
                    .error_handler(|err, _| {
                        let err_string = err.to_string();
                        actix_web::error::InternalError::from_response(
                            err,
                            HttpResponse::BadRequest().json(ErrorResponse::new(err_string)),
                        )
                        .into()
                    }),
            )
            .route("/", web::get().to(index))
            .route("/assets/theme.css", web::get().to(theme))
            .route("/config", web::get().to(dashboard_config))
            .route("/run", web::post().to(run))
            .route("/cancel", web::post().to(cancel))
            .route("/collapse", web::post().to(collapse))
            .route("/health", web::get().to(health_check))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    fn test_state() -> web::Data<AppState> {
        web::Data::new(AppState {
            config: AppConfig::from_lookup(|_| None),
            runs: Arc::new(RunSlot::new()),
        })
    }

    fn run_body(run_clicks: Value) -> Value {
        json!({
            "trigger": "run-button",
            "run_clicks": run_clicks,
            "sampler_type": 1,
            "vehicle_type": 0,
            "num_vehicles": 3,
            "num_clients": 4,
            "time_limit": 10,
        })
    }

    #[actix_web::test]
    async fn test_run_while_busy_is_conflict() {
        let state = test_state();
        let _lease = state.runs.try_claim().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .route("/run", web::post().to(run)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/run")
            .set_json(run_body(json!(1)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert!(state.runs.is_busy());
    }

    #[actix_web::test]
    async fn test_finished_run_frees_the_slot() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .route("/run", web::post().to(run)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/run")
            .set_json(run_body(json!(1)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "completed");
        assert!(!state.runs.is_busy());
    }

    #[actix_web::test]
    async fn test_null_clicks_is_no_update() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .route("/run", web::post().to(run)),
        )
        .await;

        for clicks in [Value::Null, json!(0)] {
            let req = test::TestRequest::post()
                .uri("/run")
                .set_json(run_body(clicks))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body, json!({"status": "no_update"}));
        }
        assert!(!state.runs.is_busy());
    }

    #[actix_web::test]
    async fn test_cancelled_run_is_ok_without_bundle() {
        let resp = run_response(Err(RunError::Cancelled));
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "cancelled"}));
    }

    #[actix_web::test]
    async fn test_cancel_without_active_run() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .route("/cancel", web::post().to(cancel)),
        )
        .await;

        let req = test::TestRequest::post().uri("/cancel").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"cancelled": false}));
    }
}
