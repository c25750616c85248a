use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use employee_service::{
    config::Config,
    db,
    docs::ApiDoc,
    repository::{EmployeeRepository, MySqlEmployeeRepository},
    routes,
    usecase::EmployeeUsecase,
};

#[get("/")]
async fn index() -> impl Responder {
    "Hello World!"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load config")?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(app = %config.app_name, "Server starting...");

    let pool = db::init_db(&config.database_url)
        .await
        .context("failed to connect to database")?;
    db::migrate(&pool)
        .await
        .context("database migration failed")?;

    let repository: Arc<dyn EmployeeRepository> = Arc::new(MySqlEmployeeRepository::new(pool));
    let usecase = Data::new(EmployeeUsecase::new(repository));
    let config_data = Data::new(config.clone());
    let server_addr = config.server_addr.clone();

    info!(addr = %server_addr, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard so JS/CSS assets resolve
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(usecase.clone())
            .app_data(config_data.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(server_addr.as_str())
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run()
    .await?;

    info!("Shutting down ....");
    Ok(())
}
