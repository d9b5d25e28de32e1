//! Authentication Server
//!
//! Wires the authority to PostgreSQL and serves it over actix-web.
//!
//! ## Endpoints
//!
//! - `POST /auth/login` — Exchange email and password for a session token
//! - `POST /auth/logout` — Revoke a session token
//! - `POST /auth/validate` — Check a session token
//! - `GET /health` — Database reachability
mod config;

pub use config::*;

use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use rms_auth::Authority;
use std::sync::Arc;
use tokio_postgres::Client;

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

/// Authentication endpoints, whatever stores back the authority.
pub fn api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auth").configure(rms_auth::routes));
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let client = rms_pg::connect(&config.database()).await?;
    rms_auth::migrate(&client).await?;
    if config.db_create_users {
        rms_auth::migrate_users(&client).await?;
    }
    let authority = Arc::new(
        Authority::new(client.clone(), client.clone(), config.crypto())
            .with_deadline(config.request_timeout()),
    );
    authority
        .bootstrap(&config.admin_email, &config.admin_password)
        .await?;
    if let Some(every) = config.purge_interval() {
        log::info!("purging expired revocations every {}s", every.as_secs());
        authority.start_purge_task(every);
    }
    let authority = web::Data::from(authority);
    let client = web::Data::new(client);
    let (host, port) = config.address();
    log::info!("starting auth server on {}:{}", host, port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .app_data(authority.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .configure(api)
    })
    .workers(config.workers)
    .bind(config.address())?
    .run()
    .await?;
    log::info!("auth server stopped");
    Ok(())
}
