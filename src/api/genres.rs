//! Genre API routes

use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::db::GenreTable;

/// Get every genre with its album count, most-tagged first
#[get("")]
pub async fn list_genres() -> impl Responder {
    match GenreTable::all_with_counts().await {
        Ok(genres) => {
            let body: Vec<_> = genres
                .into_iter()
                .map(|(name, album_count)| {
                    json!({
                        "name": name,
                        "album_count": album_count,
                    })
                })
                .collect();

            HttpResponse::Ok().json(json!({ "genres": body }))
        }
        Err(_) => HttpResponse::InternalServerError().json(json!({
            "error": "Database error"
        })),
    }
}

/// configure genre routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_genres);
}
