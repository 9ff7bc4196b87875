//! Artist API routes

use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use super::albums::AlbumResponse;
use super::auth::optional_user_id;
use crate::db::{AlbumTable, ArtistTable, GenreTable, LikeTable};

/// Get an artist with their albums, best ranked first
#[get("/{id}")]
pub async fn get_artist(req: HttpRequest, path: web::Path<i64>) -> impl Responder {
    let artist_id = path.into_inner();
    let user_id = optional_user_id(&req).await;

    let artist = match ArtistTable::get_by_id(artist_id).await {
        Ok(Some(artist)) => artist,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({
                "error": "Artist not found"
            }))
        }
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "error": "Database error"
            }))
        }
    };

    let albums = match AlbumTable::get_by_artist(artist_id).await {
        Ok(albums) => albums,
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "error": "Database error"
            }))
        }
    };

    let liked = match user_id {
        Some(uid) => LikeTable::album_ids_for_user(uid).await.unwrap_or_default(),
        None => Default::default(),
    };

    let mut album_responses = Vec::with_capacity(albums.len());
    for album in albums {
        let genres = GenreTable::tags_for_album(album.id).await.unwrap_or_default();
        let is_liked = liked.contains(&album.id);
        album_responses.push(AlbumResponse::new(album, genres, is_liked));
    }

    HttpResponse::Ok().json(json!({
        "id": artist.id,
        "name": artist.name,
        "albums": album_responses,
    }))
}

/// configure artist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_artist);
}
