use actix_files::Files;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::catalog::SpotKind;
use crate::config::TierWeightConfig;
use crate::display::format_loop_duration;
use crate::error::Error;
use crate::export::{aggregate_airtime, playlist_to_csv};
use crate::playlist::{self, OrderingMode, Playlist};
use crate::storage::Store;

/// Shared application state: the persisted store plus the last generated
/// playlist (kept for the CSV download and the airtime chart).
pub struct AppState {
    pub store: Mutex<Store>,
    pub storage_path: PathBuf,
    pub last_playlist: Mutex<Option<Playlist>>,
    pub admin_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize)]
pub struct AddSpotRequest {
    name: String,
    duration_seconds: f64,
    kind: String,
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    ordering_mode: OrderingMode,
    /// Optional seed for reproducible interleaving.
    seed: Option<u64>,
}

/// Validates an add-spot request before it touches the catalog.
fn validate_spot(req: &AddSpotRequest) -> std::result::Result<SpotKind, String> {
    if req.name.trim().is_empty() {
        return Err("Spot name is required".to_string());
    }
    if !req.duration_seconds.is_finite() || req.duration_seconds <= 0.0 {
        return Err(format!(
            "Spot duration must be a positive number of seconds, got {}",
            req.duration_seconds
        ));
    }
    SpotKind::try_from(req.kind.clone())
        .map_err(|_| format!("Spot type must be S, M, L, XL or FILLER, got '{}'", req.kind))
}

fn is_authenticated(session: &Session) -> bool {
    session
        .get::<bool>("authenticated")
        .ok()
        .flatten()
        .unwrap_or(false)
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "success": false,
        "error": "Unauthorized"
    }))
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": message
    }))
}

/// Maps a core error onto an HTTP response: configuration and spot problems
/// are the client's fault, everything else is ours.
fn core_error_response(err: Error) -> HttpResponse {
    match err {
        Error::InvalidConfiguration(_) | Error::InvalidSpotDuration { .. } => {
            bad_request(err.to_string())
        }
        other => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": other.to_string()
        })),
    }
}

async fn login(
    req: web::Json<LoginRequest>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        session.insert("authenticated", true)?;
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized().json(serde_json::json!({
            "success": false,
            "error": "Invalid password"
        })))
    }
}

async fn logout(session: Session) -> Result<HttpResponse> {
    session.purge();
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

async fn list_spots(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !is_authenticated(&session) {
        return Ok(unauthorized());
    }
    let store = state.store.lock().unwrap();
    Ok(HttpResponse::Ok().json(&store.catalog.spots))
}

async fn add_spot(
    session: Session,
    req: web::Json<AddSpotRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_authenticated(&session) {
        return Ok(unauthorized());
    }
    let kind = match validate_spot(&req) {
        Ok(kind) => kind,
        Err(message) => return Ok(bad_request(message)),
    };
    let mut store = state.store.lock().unwrap();
    let id = store.catalog.add_spot(
        req.name.trim().to_string(),
        req.duration_seconds,
        kind,
        &mut rand::thread_rng(),
    );
    if let Err(e) = store.save(&state.storage_path) {
        return Ok(core_error_response(e));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "id": id})))
}

async fn delete_spot(
    session: Session,
    id: web::Path<u32>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_authenticated(&session) {
        return Ok(unauthorized());
    }
    let mut store = state.store.lock().unwrap();
    if !store.catalog.remove_spot(*id) {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": format!("No spot with id {}", id)
        })));
    }
    if let Err(e) = store.save(&state.storage_path) {
        return Ok(core_error_response(e));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

async fn get_config(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !is_authenticated(&session) {
        return Ok(unauthorized());
    }
    let store = state.store.lock().unwrap();
    Ok(HttpResponse::Ok().json(&store.config))
}

async fn update_config(
    session: Session,
    req: web::Json<TierWeightConfig>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_authenticated(&session) {
        return Ok(unauthorized());
    }
    let config = req.into_inner();
    if let Err(e) = config.validate() {
        return Ok(core_error_response(e));
    }
    let mut store = state.store.lock().unwrap();
    store.config = config;
    if let Err(e) = store.save(&state.storage_path) {
        return Ok(core_error_response(e));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

async fn generate_playlist(
    session: Session,
    req: web::Json<GenerateRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_authenticated(&session) {
        return Ok(unauthorized());
    }
    // Snapshot catalog and config so generation runs without holding the
    // store lock.
    let (catalog, config) = {
        let store = state.store.lock().unwrap();
        (store.catalog.clone(), store.config.clone())
    };
    let mut rng = match req.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    match playlist::generate(&catalog, &config, req.ordering_mode, &mut rng) {
        Ok(playlist) => {
            let response = serde_json::json!({
                "success": true,
                "loop_duration": format_loop_duration(playlist.loop_duration_seconds),
                "playlist": &playlist,
            });
            *state.last_playlist.lock().unwrap() = Some(playlist);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => Ok(core_error_response(e)),
    }
}

async fn export_csv(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !is_authenticated(&session) {
        return Ok(unauthorized());
    }
    let last = state.last_playlist.lock().unwrap();
    let Some(playlist) = last.as_ref() else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "No playlist generated yet"
        })));
    };
    match playlist_to_csv(playlist) {
        Ok(csv) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"playlist.csv\""))
            .body(csv)),
        Err(e) => Ok(core_error_response(e)),
    }
}

async fn airtime_stats(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !is_authenticated(&session) {
        return Ok(unauthorized());
    }
    let last = state.last_playlist.lock().unwrap();
    let Some(playlist) = last.as_ref() else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "No playlist generated yet"
        })));
    };
    Ok(HttpResponse::Ok().json(aggregate_airtime(playlist)))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

pub async fn start_server(
    port: u16,
    admin_password: String,
    storage_path: PathBuf,
) -> std::io::Result<()> {
    let store = Store::load(&storage_path);
    let app_state = web::Data::new(AppState {
        store: Mutex::new(store),
        storage_path,
        last_playlist: Mutex::new(None),
        admin_password,
    });
    // Sessions do not survive a restart; operators just log in again.
    let session_key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .service(Files::new("/static", "static"))
            .route("/", web::get().to(index))
            .route("/api/login", web::post().to(login))
            .route("/api/logout", web::post().to(logout))
            .route("/api/spots", web::get().to(list_spots))
            .route("/api/spots", web::post().to(add_spot))
            .route("/api/spots/{id}", web::delete().to(delete_spot))
            .route("/api/config", web::get().to(get_config))
            .route("/api/config", web::put().to(update_config))
            .route("/api/playlist", web::post().to(generate_playlist))
            .route("/api/playlist/export.csv", web::get().to(export_csv))
            .route("/api/playlist/airtime", web::get().to(airtime_stats))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, duration: f64, kind: &str) -> AddSpotRequest {
        AddSpotRequest {
            name: name.to_string(),
            duration_seconds: duration,
            kind: kind.to_string(),
        }
    }

    #[test]
    fn spot_validation_rejects_bad_input() {
        assert!(validate_spot(&request("", 10.0, "S")).is_err());
        assert!(validate_spot(&request("ok", 0.0, "S")).is_err());
        assert!(validate_spot(&request("ok", -4.0, "S")).is_err());
        assert!(validate_spot(&request("ok", 10.0, "XXL")).is_err());
    }

    #[test]
    fn spot_validation_accepts_every_kind() {
        for kind in ["S", "M", "L", "XL", "FILLER"] {
            assert!(validate_spot(&request("ok", 12.5, kind)).is_ok(), "{}", kind);
        }
    }
}
