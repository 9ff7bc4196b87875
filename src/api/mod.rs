//! REST API routes

pub mod albums;
pub mod artists;
pub mod auth;
pub mod genres;

use actix_web::web;

/// Configure all API routes (mounted under /api)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/albums").configure(albums::configure))
        .service(web::scope("/artists").configure(artists::configure))
        .service(web::scope("/genres").configure(genres::configure))
        .service(web::scope("/auth").configure(auth::configure));
}
