use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web;
use anyhow::Context;
use shuttle_actix_web::ShuttleActixWeb;
use shuttle_runtime::SecretStore;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

mod completion;
mod config;
mod docs;
mod errors;
mod models;
mod plaid;
mod prompts;
mod routes;
mod store;
#[cfg(test)]
mod testing;
mod types;

use crate::completion::{CompletionService, OpenAICompletions};
use crate::config::AppConfig;
use crate::docs::ApiDoc;
use crate::models::Category;
use crate::plaid::{LinkTokenService, PlaidClient};
use crate::store::{PgStore, Store};

/// Process-wide handles shared by every request.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub completions: Arc<dyn CompletionService>,
    pub link_tokens: Arc<dyn LinkTokenService>,
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: SecretStore,
) -> ShuttleActixWeb<impl FnOnce(&mut web::ServiceConfig) + Send + Clone + 'static> {
    let app_config = Arc::new(AppConfig::new(&secrets)?);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&app_config.database_url)
        .await
        .context("Failed to connect to Postgres")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Category::seed_defaults(&pool)
        .await
        .context("Failed to seed categories")?;

    let app_state = Arc::new(AppState {
        store: Arc::new(PgStore::new(pool)),
        completions: Arc::new(OpenAICompletions::new(&app_config)),
        link_tokens: Arc::new(PlaidClient::new(&app_config)),
    });

    info!("Using chat model {}", app_config.chat_model);

    let config = move |cfg: &mut web::ServiceConfig| {
        let cors = Cors::default()
            .allowed_origin(&app_config.app_url)
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);

        cfg.app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_root)
            .service(Scalar::with_url("/scalar", ApiDoc::openapi()))
            .service(
                web::scope("/api")
                    .wrap(cors)
                    .wrap(Logger::default())
                    .configure(routes::configure),
            );
    };

    Ok(config.into())
}
