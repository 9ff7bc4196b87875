//! Authentication API routes, cookie-based JWT sessions

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{get, post, put, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::config::ServerConfig;
use crate::db::UserTable;
use crate::models::User;
use crate::utils::auth::{create_jwt, hash_password, verify_jwt, verify_password, UserIdentity};

const SESSION_COOKIE: &str = "session_token";
const SESSION_MAX_AGE: i64 = 30 * 24 * 3600; // 30 days in seconds

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// register a new account and start a session
#[post("/register")]
pub async fn register(body: web::Json<CredentialsRequest>) -> impl Responder {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Username and password are required"
        }));
    }

    let config = match ServerConfig::load() {
        Ok(cfg) => cfg,
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "error": "Config error"
            }))
        }
    };

    if let Ok(Some(_)) = UserTable::get_by_username(body.username.trim()).await {
        return HttpResponse::BadRequest().json(json!({
            "error": "Username already taken"
        }));
    }

    let password_hash = hash_password(&body.password, config.server_id.as_bytes());
    let user = User::new(body.username.trim().to_string(), password_hash);

    let user_id = match UserTable::insert(&user).await {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "error": "Failed to create user"
            }))
        }
    };

    start_session(user_id, &user.username, &config)
}

/// login, sets the http-only session cookie
#[post("/login")]
pub async fn login(body: web::Json<CredentialsRequest>) -> impl Responder {
    let config = match ServerConfig::load() {
        Ok(cfg) => cfg,
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "error": "Config error"
            }))
        }
    };

    match UserTable::get_by_username(body.username.trim()).await {
        Ok(Some(user)) => {
            if verify_password(&body.password, &user.password, config.server_id.as_bytes()) {
                start_session(user.id, &user.username, &config)
            } else {
                HttpResponse::Unauthorized().json(json!({
                    "error": "Invalid password"
                }))
            }
        }
        Ok(None) => HttpResponse::NotFound().json(json!({
            "error": "User not found"
        })),
        Err(_) => HttpResponse::InternalServerError().json(json!({
            "error": "Database error"
        })),
    }
}

/// get the logged in user, empty object when anonymous
#[get("/user")]
pub async fn get_logged_in_user(req: HttpRequest) -> impl Responder {
    match optional_user(&req).await {
        Some(user) => HttpResponse::Ok().json(json!({
            "id": user.id,
            "username": user.username,
            "created_at": user.created_at,
            "settings": user.settings,
        })),
        None => HttpResponse::Ok().json(json!({})),
    }
}

/// replace the current user's settings blob
#[put("/settings")]
pub async fn update_settings(
    req: HttpRequest,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match UserTable::update_settings(user.id, &body).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "settings": body.into_inner() })),
        Err(_) => HttpResponse::InternalServerError().json(json!({
            "error": "Failed to save settings"
        })),
    }
}

/// logout, clears the session cookie
#[post("/logout")]
pub async fn logout() -> impl Responder {
    let cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .max_age(CookieDuration::seconds(0))
        .http_only(true)
        .finish();

    HttpResponse::Ok().cookie(cookie).json(json!({
        "msg": "Logged out"
    }))
}

// helpers, shared with the other route modules

fn start_session(user_id: i64, username: &str, config: &ServerConfig) -> HttpResponse {
    let identity = UserIdentity {
        id: user_id,
        username: username.to_string(),
    };

    match create_jwt(identity, &config.server_id, SESSION_MAX_AGE as u64) {
        Ok(token) => {
            let cookie = Cookie::build(SESSION_COOKIE, token.clone())
                .path("/")
                .http_only(true)
                .max_age(CookieDuration::seconds(SESSION_MAX_AGE))
                .finish();

            HttpResponse::Ok().cookie(cookie).json(json!({
                "id": user_id,
                "username": username,
                "token": token,
            }))
        }
        Err(_) => HttpResponse::InternalServerError().json(json!({
            "error": "Failed to create session"
        })),
    }
}

fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    let header = req.headers().get("Authorization")?;
    let header_str = header.to_str().ok()?.trim();
    let token = header_str.strip_prefix("Bearer ").unwrap_or(header_str);

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// resolve the requesting user's id, if any; invalid tokens count as
/// anonymous rather than failing the request
pub async fn optional_user_id(req: &HttpRequest) -> Option<i64> {
    let token = session_token(req)?;
    let config = ServerConfig::load().ok()?;
    let claims = verify_jwt(&token, &config.server_id).ok()?;
    Some(claims.sub.id)
}

async fn optional_user(req: &HttpRequest) -> Option<User> {
    let user_id = optional_user_id(req).await?;
    UserTable::get_by_id(user_id).await.ok().flatten()
}

/// resolve the requesting user or reply 401
pub async fn require_user(req: &HttpRequest) -> Result<User, HttpResponse> {
    match optional_user(req).await {
        Some(user) => Ok(user),
        None => Err(HttpResponse::Unauthorized().json(json!({
            "error": "Not authenticated"
        }))),
    }
}

/// configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(get_logged_in_user)
        .service(update_settings)
        .service(logout);
}
