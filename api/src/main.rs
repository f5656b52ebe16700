//! Dialog Review API Server
//!
//! Community moderation for a dialog-based argumentation system: users flag
//! or propose edits to statements, other users vote in review queues, and the
//! outcome feeds a reputation ledger.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    ConfiguredSearchClient, PostgresFlagRepository, PostgresIssueRepository,
    PostgresReputationEventRepository, PostgresReviewItemRepository, PostgresReviewVoteRepository,
    PostgresStatementRepository, PostgresUserRepository,
};
use app::{DiscussionService, ReputationService, ReviewService, UserService};
use config::Config;

type AppReputationService = ReputationService<PostgresUserRepository, PostgresReputationEventRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub discussion_service: Arc<
        DiscussionService<
            PostgresIssueRepository,
            PostgresStatementRepository,
            PostgresUserRepository,
            PostgresReputationEventRepository,
            ConfiguredSearchClient,
        >,
    >,
    pub review_service: Arc<
        ReviewService<
            PostgresUserRepository,
            PostgresStatementRepository,
            PostgresReviewItemRepository,
            PostgresReviewVoteRepository,
            PostgresFlagRepository,
            PostgresReputationEventRepository,
        >,
    >,
    pub reputation_service: Arc<AppReputationService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dialog_review_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Dialog Review API...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let issue_repo = Arc::new(PostgresIssueRepository::new(db.clone()));
    let statement_repo = Arc::new(PostgresStatementRepository::new(db.clone()));
    let review_item_repo = Arc::new(PostgresReviewItemRepository::new(db.clone()));
    let review_vote_repo = Arc::new(PostgresReviewVoteRepository::new(db.clone()));
    let flag_repo = Arc::new(PostgresFlagRepository::new(db.clone()));
    let reputation_event_repo = Arc::new(PostgresReputationEventRepository::new(db.clone()));

    let search_client = Arc::new(ConfiguredSearchClient::from_url(config.search_url.clone()));
    if config.search_url.is_none() {
        tracing::warn!("SEARCH_URL not set, search requests return no results");
    }

    // Create application services
    let user_service = Arc::new(UserService::new(
        user_repo.clone(),
        config.password_pepper.clone(),
    ));

    let reputation_service = Arc::new(ReputationService::new(
        user_repo.clone(),
        reputation_event_repo.clone(),
    ));

    let discussion_service = Arc::new(DiscussionService::new(
        issue_repo,
        statement_repo.clone(),
        reputation_service.clone(),
        search_client,
        config.review.deltas,
    ));

    let review_service = Arc::new(ReviewService::new(
        statement_repo,
        review_item_repo,
        review_vote_repo,
        flag_repo,
        reputation_service.clone(),
        config.review,
    ));

    if let (Some(nickname), Some(password)) = (&config.admin_nickname, &config.admin_password) {
        user_service
            .ensure_admin(nickname, password)
            .await
            .context("Failed to create admin account")?;
    }

    tracing::info!(
        quorum = config.review.policy.quorum,
        max_votes = config.review.policy.max_votes,
        "Review policy loaded"
    );

    let state = AppState {
        user_service,
        discussion_service,
        review_service,
        reputation_service,
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Rate-limited routes (registration, login)
    let rate_limited_routes = Router::new()
        .route("/users/register", post(handlers::register))
        .route("/ajax_user_login", post(handlers::login))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Protected routes
    let protected_routes = Router::new()
        .route("/ajax_user_logout", post(handlers::logout))
        .route("/issues", post(handlers::create_issue))
        .route("/discuss/:slug/statements", post(handlers::post_statement))
        .route("/review", get(handlers::overview))
        .route("/review/flag", post(handlers::flag))
        .route("/review/edit", post(handlers::propose_edit))
        // Queue names share the `:id` segment; matchit needs one param name per position
        .route("/review/:id", get(handlers::get_queue))
        .route("/review/:id/vote", post(handlers::vote))
        .route("/review/:id/cancel", post(handlers::cancel))
        .route("/review/:id/revoke", post(handlers::revoke))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public endpoints
        .route("/issues", get(handlers::list_issues))
        .route("/issues/lookup", get(handlers::lookup_issue))
        .route("/discuss/:slug", get(handlers::discuss))
        .route("/discuss/:slug/search", get(handlers::search))
        .route("/users/:id/reputation", get(handlers::get_reputation))
        .merge(rate_limited_routes)
        .merge(protected_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
