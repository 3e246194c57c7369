use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use taskdeck::auth::AuthMiddleware;
use taskdeck::config::Config;
use taskdeck::routes;
use taskdeck::store::{pg, PgStore, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    // The pool is the explicit persistence handle: opened here, passed into
    // the app, closed after the server exits.
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    pg::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool.clone()));

    log::info!("Starting TaskDeck server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(store.clone()))
            .app_data(routes::json_config())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind(config.bind_addr())?
    .run()
    .await?;

    pool.close().await;

    Ok(())
}
