pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::error::AppError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::signup).service(auth::login).service(
        web::scope("/tasks")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}

/// JSON extractor configuration shared by the binary and the test apps.
///
/// Deserialization failures (missing required fields, values outside an
/// enumerated set, malformed bodies) are shaped through `AppError` so their
/// responses carry the same `{"message": ...}` envelope as every other 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}
