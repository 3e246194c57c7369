use crate::{
    auth::{generate_token, hash_password, verify_password, Credentials, TokenResponse},
    error::AppError,
    store::{Store, StoreError},
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Sign up a new user
///
/// Creates a user account and returns a session token for it.
#[post("/signup")]
pub async fn signup(
    store: web::Data<dyn Store>,
    body: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    // Validate input
    body.validate()?;

    // Hash password
    let password_hash = hash_password(&body.password)?;

    // Insert the user; uniqueness is enforced by the store's constraint, so a
    // concurrent signup with the same name cannot slip past a pre-check here.
    let user = store
        .create_user(&body.username, &password_hash)
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => AppError::Conflict("Username already exists".into()),
            other => AppError::from(other),
        })?;

    // Mint token
    let token = generate_token(user.id)?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Log in a user
///
/// Verifies credentials and returns a fresh session token. An unknown
/// username and a wrong password are deliberately indistinguishable.
#[post("/login")]
pub async fn login(
    store: web::Data<dyn Store>,
    body: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    // Validate input
    body.validate()?;

    let user = store.find_user_by_username(&body.username).await?;

    match user {
        Some(user) if verify_password(&body.password, &user.password_hash)? => {
            let token = generate_token(user.id)?;
            Ok(HttpResponse::Ok().json(TokenResponse { token }))
        }
        _ => Err(AppError::BadRequest("Invalid credentials".into())),
    }
}
