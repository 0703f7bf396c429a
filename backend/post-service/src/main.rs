use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use post_service::config::Config;
use post_service::handlers::{self, AppState};
use post_service::middleware::{JwtAuthMiddleware, JwtVerifier};
use post_service::repository::{
    CommentStore, FsImageStore, ImageStore, PgCommentStore, PgPostStore, PgRatingStore,
    PgUserStore, PostStore, RatingStore, UserStore,
};
use post_service::services::{CommentService, Enricher, PostService, RatingService, UserService};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!("Starting post-service");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Configuration loaded: env={}, http_port={}, image_dir={}",
        config.app.env, config.app.http_port, config.images.dir
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    info!("Database pool created");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let posts: Arc<dyn PostStore> = Arc::new(PgPostStore::new(pool.clone()));
    let ratings: Arc<dyn RatingStore> = Arc::new(PgRatingStore::new(pool.clone()));
    let comments: Arc<dyn CommentStore> = Arc::new(PgCommentStore::new(pool.clone()));
    let images: Arc<dyn ImageStore> = Arc::new(FsImageStore::new(config.images.dir.clone()));

    let enricher = Enricher::new(users.clone(), ratings.clone())
        .with_concurrency(config.app.enrich_concurrency);

    let state = web::Data::new(AppState {
        posts: PostService::new(posts.clone(), images.clone(), enricher.clone()),
        ratings: RatingService::new(ratings),
        comments: CommentService::new(comments, posts, enricher),
        users: UserService::new(users),
        images,
        image_max_bytes: config.images.max_bytes,
    });
    let verifier = JwtVerifier::new(&config.auth.jwt_secret);

    let http_addr = format!("{}:{}", config.app.host, config.app.http_port);
    info!("Listening on http://{}", http_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(|| async { "OK" }))
            .service(
                web::scope("")
                    .wrap(JwtAuthMiddleware::new(verifier.clone()))
                    .configure(handlers::configure),
            )
    })
    .bind(&http_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    info!("post-service shut down");
    Ok(())
}
