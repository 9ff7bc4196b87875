//! Album API routes

use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::auth::{optional_user_id, require_user};
use crate::db::{AlbumTable, GenreTable, LikeTable};
use crate::models::Album;
use crate::ranking::{self, RankedAlbum};

const DEFAULT_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub genre: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// An album as serialized in API responses
#[derive(Debug, Serialize)]
pub struct AlbumResponse {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub artist_id: i64,
    pub rank: Option<i64>,
    pub rating: Option<f64>,
    pub ratings_count: Option<String>,
    pub release_year: Option<i32>,
    pub image: Option<String>,
    pub genres: Vec<String>,
    pub is_liked: bool,
    pub spotify_link: Option<String>,
    pub youtube_link: Option<String>,
    pub apple_music_link: Option<String>,
}

impl AlbumResponse {
    pub(crate) fn new(album: Album, genres: Vec<String>, is_liked: bool) -> Self {
        Self {
            id: album.id,
            title: album.title.clone(),
            artist: album.artist_name.clone(),
            artist_id: album.artist_id,
            rank: album.rank,
            rating: album.rating,
            ratings_count: album.ratings_count.clone(),
            release_year: album.release_year(),
            image: album.display_image(),
            genres,
            is_liked,
            spotify_link: album.spotify_link,
            youtube_link: album.youtube_link,
            apple_music_link: album.apple_music_link,
        }
    }

    fn from_ranked(ranked: RankedAlbum) -> Self {
        Self::new(ranked.album, ranked.genres, ranked.is_liked)
    }
}

/// Get the personalized album listing, paginated and optionally filtered
/// to one genre
#[get("")]
pub async fn list_albums(req: HttpRequest, query: web::Query<ListQuery>) -> impl Responder {
    let user_id = optional_user_id(&req).await;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = query.offset.unwrap_or(0);

    match ranking::rank_albums(user_id, query.genre.as_deref(), limit, offset).await {
        Ok(page) => {
            let albums: Vec<AlbumResponse> = page
                .albums
                .into_iter()
                .map(AlbumResponse::from_ranked)
                .collect();

            HttpResponse::Ok().json(json!({
                "albums": albums,
                "total": page.total,
                "limit": page.limit,
                "offset": page.offset,
                "has_more": page.has_more,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to rank albums: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to load albums"
            }))
        }
    }
}

/// Get a single album by id
#[get("/{id}")]
pub async fn get_album(req: HttpRequest, path: web::Path<i64>) -> impl Responder {
    let album_id = path.into_inner();
    let user_id = optional_user_id(&req).await;

    let album = match AlbumTable::get_by_id(album_id).await {
        Ok(Some(album)) => album,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({
                "error": "Album not found"
            }))
        }
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "error": "Database error"
            }))
        }
    };

    let genres = GenreTable::tags_for_album(album_id).await.unwrap_or_default();
    let is_liked = match user_id {
        Some(uid) => LikeTable::exists(uid, album_id).await.unwrap_or(false),
        None => false,
    };

    HttpResponse::Ok().json(AlbumResponse::new(album, genres, is_liked))
}

/// Toggle a like on an album; requires a logged in user
#[post("/{id}/like")]
pub async fn toggle_like(req: HttpRequest, path: web::Path<i64>) -> impl Responder {
    let album_id = path.into_inner();

    let user = match require_user(&req).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match AlbumTable::get_by_id(album_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({
                "error": "Album not found"
            }))
        }
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "error": "Database error"
            }))
        }
    }

    match LikeTable::toggle(user.id, album_id).await {
        Ok(liked) => HttpResponse::Ok().json(json!({
            "album_id": album_id,
            "liked": liked,
        })),
        Err(_) => HttpResponse::InternalServerError().json(json!({
            "error": "Failed to toggle like"
        })),
    }
}

/// configure album routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_albums).service(get_album).service(toggle_like);
}
