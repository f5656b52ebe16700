use std::env;
use std::str::FromStr;

use crate::app::review_config::{
    ReputationBorders, ReputationDeltas, ReviewConfig, DEFAULT_MAX_VOTES, DEFAULT_QUORUM,
};
use crate::domain::entities::QuorumPolicy;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Base URL of the search service; searches return nothing when unset
    pub search_url: Option<String>,
    /// Server-side secret mixed into every password hash
    pub password_pepper: String,
    /// Admin account created at startup when both are set
    pub admin_nickname: Option<String>,
    pub admin_password: Option<String>,
    pub review: ReviewConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let defaults = ReviewConfig::default();
        let review = ReviewConfig {
            policy: QuorumPolicy {
                quorum: env_or("REVIEW_QUORUM", DEFAULT_QUORUM)?,
                max_votes: env_or("REVIEW_MAX_VOTES", DEFAULT_MAX_VOTES)?,
            },
            deltas: ReputationDeltas {
                flag_accepted: env_or("REP_FLAG_ACCEPTED", defaults.deltas.flag_accepted)?,
                flag_rejected: env_or("REP_FLAG_REJECTED", defaults.deltas.flag_rejected)?,
                edit_accepted: env_or("REP_EDIT_ACCEPTED", defaults.deltas.edit_accepted)?,
                edit_rejected: env_or("REP_EDIT_REJECTED", defaults.deltas.edit_rejected)?,
                review_contributed: env_or(
                    "REP_REVIEW_CONTRIBUTED",
                    defaults.deltas.review_contributed,
                )?,
                first_position: env_or("REP_FIRST_POSITION", defaults.deltas.first_position)?,
                new_statement: env_or("REP_NEW_STATEMENT", defaults.deltas.new_statement)?,
            },
            borders: ReputationBorders {
                deletes: env_or("REP_BORDER_DELETES", defaults.borders.deletes)?,
                optimizations: env_or(
                    "REP_BORDER_OPTIMIZATIONS",
                    defaults.borders.optimizations,
                )?,
                edits: env_or("REP_BORDER_EDITS", defaults.borders.edits)?,
                duplicates: env_or("REP_BORDER_DUPLICATES", defaults.borders.duplicates)?,
                history: env_or("REP_BORDER_HISTORY", defaults.borders.history)?,
            },
        };

        if review.policy.quorum == 0 {
            anyhow::bail!("REVIEW_QUORUM must be at least 1");
        }
        if review.policy.max_votes < review.policy.quorum {
            anyhow::bail!("REVIEW_MAX_VOTES must not be smaller than REVIEW_QUORUM");
        }

        Ok(Self {
            database_url,
            port: env_or("PORT", 8080)?,
            search_url: env::var("SEARCH_URL").ok().filter(|s| !s.is_empty()),
            password_pepper: env::var("PASSWORD_PEPPER")
                .unwrap_or_else(|_| "dev-pepper-not-for-production".to_string()),
            admin_nickname: env::var("ADMIN_NICKNAME").ok().filter(|s| !s.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            review,
        })
    }
}

/// Read and parse an environment variable, falling back to `default` when unset
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}
