//! Reputation service
//!
//! All reputation changes go through this service to ensure audit logging
//! and consistency.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::app::locks::KeyedLocks;
use crate::domain::entities::{NewReputationEvent, ReputationEvent, ReputationEventType, UserId};
use crate::domain::ports::{ReputationEventRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// Result of a reputation change operation
#[derive(Debug, Clone, Serialize)]
pub struct ReputationChange {
    pub user_id: UserId,
    pub old_reputation: i32,
    pub new_reputation: i32,
    pub delta: i32,
    pub event_type: ReputationEventType,
}

/// Score and audit trail of one user
#[derive(Debug, Clone, Serialize)]
pub struct ReputationHistory {
    pub user_id: UserId,
    pub public_nickname: String,
    pub reputation: i32,
    pub events: Vec<ReputationEvent>,
}

/// Service for the reputation ledger
pub struct ReputationService<UR, RER>
where
    UR: UserRepository,
    RER: ReputationEventRepository,
{
    users: Arc<UR>,
    events: Arc<RER>,
    locks: KeyedLocks,
}

impl<UR, RER> ReputationService<UR, RER>
where
    UR: UserRepository,
    RER: ReputationEventRepository,
{
    pub fn new(users: Arc<UR>, events: Arc<RER>) -> Self {
        Self {
            users,
            events,
            locks: KeyedLocks::new(),
        }
    }

    /// Apply a reputation change with full audit logging.
    /// This is the single point through which all reputation modifications flow.
    pub async fn apply_reputation_change(
        &self,
        user_id: &UserId,
        delta: i32,
        event_type: ReputationEventType,
        reference_id: Option<Uuid>,
        details: Option<String>,
    ) -> Result<ReputationChange, AppError> {
        let _guard = self.locks.lock(user_id.0).await;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User not found: {}", user_id)))?;

        let old_reputation = user.reputation;
        let new_reputation = (old_reputation + delta).max(0); // never below 0

        self.users.update_reputation(user_id, new_reputation).await?;

        let event = NewReputationEvent {
            user_id: *user_id,
            event_type,
            delta,
            old_reputation,
            new_reputation,
            reference_id,
            details,
        };
        self.events.create(&event).await?;

        tracing::info!(
            user_id = %user_id,
            event_type = %event_type,
            old_reputation = old_reputation,
            new_reputation = new_reputation,
            delta = delta,
            "Reputation change applied"
        );

        Ok(ReputationChange {
            user_id: *user_id,
            old_reputation,
            new_reputation,
            delta,
            event_type,
        })
    }

    /// Undo every change caused by `reference_id` with compensating events
    pub async fn revert_reference(
        &self,
        reference_id: Uuid,
    ) -> Result<Vec<ReputationChange>, AppError> {
        let events = self.events.find_by_reference(reference_id).await?;
        let mut changes = Vec::new();

        for event in events {
            if event.event_type == ReputationEventType::ReviewRevoked {
                continue;
            }
            let applied = event.applied_delta();
            if applied == 0 {
                continue;
            }
            let change = self
                .apply_reputation_change(
                    &event.user_id,
                    -applied,
                    ReputationEventType::ReviewRevoked,
                    Some(reference_id),
                    Some(format!("Revoked {} ({:+})", event.event_type, applied)),
                )
                .await?;
            changes.push(change);
        }

        Ok(changes)
    }

    /// Current score plus a page of the audit trail, newest first
    pub async fn history(
        &self,
        user_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<ReputationHistory, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found: {}", user_id)))?;

        let events = self.events.find_by_user(user_id, limit, offset).await?;

        Ok(ReputationHistory {
            user_id: user.id,
            public_nickname: user.public_nickname,
            reputation: user.reputation,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        test_user_with_reputation, InMemoryReputationEventRepository, InMemoryUserRepository,
    };

    fn service(
        users: Arc<InMemoryUserRepository>,
        events: Arc<InMemoryReputationEventRepository>,
    ) -> ReputationService<InMemoryUserRepository, InMemoryReputationEventRepository> {
        ReputationService::new(users, events)
    }

    #[tokio::test]
    async fn positive_change_is_recorded() {
        let user = test_user_with_reputation(10);
        let users = Arc::new(InMemoryUserRepository::new().with_user(user.clone()));
        let events = Arc::new(InMemoryReputationEventRepository::new());
        let svc = service(users.clone(), events.clone());

        let change = svc
            .apply_reputation_change(
                &user.id,
                4,
                ReputationEventType::FlagAccepted,
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(change.old_reputation, 10);
        assert_eq!(change.new_reputation, 14);
        assert_eq!(users.find_by_id(&user.id).await.unwrap().unwrap().reputation, 14);

        let trail = events.find_by_user(&user.id, 10, 0).await.unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].event_type, ReputationEventType::FlagAccepted);
        assert_eq!(trail[0].delta, 4);
    }

    #[tokio::test]
    async fn reputation_is_floored_at_zero() {
        let user = test_user_with_reputation(1);
        let users = Arc::new(InMemoryUserRepository::new().with_user(user.clone()));
        let events = Arc::new(InMemoryReputationEventRepository::new());
        let svc = service(users.clone(), events);

        let change = svc
            .apply_reputation_change(
                &user.id,
                -2,
                ReputationEventType::FlagRejected,
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(change.new_reputation, 0);
        assert_eq!(users.find_by_id(&user.id).await.unwrap().unwrap().reputation, 0);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let svc = service(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryReputationEventRepository::new()),
        );

        let result = svc
            .apply_reputation_change(
                &UserId::new(),
                1,
                ReputationEventType::NewStatement,
                None,
                None,
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn revert_reference_compensates_applied_deltas() {
        let detector = test_user_with_reputation(1);
        let voter = test_user_with_reputation(50);
        let users = Arc::new(
            InMemoryUserRepository::new()
                .with_user(detector.clone())
                .with_user(voter.clone()),
        );
        let events = Arc::new(InMemoryReputationEventRepository::new());
        let svc = service(users.clone(), events.clone());
        let review = Uuid::new_v4();

        svc.apply_reputation_change(
            &detector.id,
            -2,
            ReputationEventType::FlagRejected,
            Some(review),
            None,
        )
        .await
        .unwrap();
        svc.apply_reputation_change(
            &voter.id,
            1,
            ReputationEventType::ReviewContributed,
            Some(review),
            None,
        )
        .await
        .unwrap();

        let changes = svc.revert_reference(review).await.unwrap();
        assert_eq!(changes.len(), 2);

        // Detector only lost 1 point because of the floor, so gets 1 back
        assert_eq!(users.find_by_id(&detector.id).await.unwrap().unwrap().reputation, 1);
        assert_eq!(users.find_by_id(&voter.id).await.unwrap().unwrap().reputation, 50);
    }

    #[tokio::test]
    async fn history_pages_newest_first() {
        let user = test_user_with_reputation(0);
        let users = Arc::new(InMemoryUserRepository::new().with_user(user.clone()));
        let events = Arc::new(InMemoryReputationEventRepository::new());
        let svc = service(users, events);

        for _ in 0..3 {
            svc.apply_reputation_change(
                &user.id,
                1,
                ReputationEventType::NewStatement,
                None,
                None,
            )
            .await
            .unwrap();
        }

        let history = svc.history(&user.id, 2, 0).await.unwrap();
        assert_eq!(history.reputation, 3);
        assert_eq!(history.events.len(), 2);
        assert_eq!(history.events[0].new_reputation, 3);

        let rest = svc.history(&user.id, 2, 2).await.unwrap();
        assert_eq!(rest.events.len(), 1);
        assert_eq!(rest.events[0].new_reputation, 1);
    }
}
