//! Reputation event domain entity
//!
//! Provides an audit trail for all reputation changes in the system.
//! Every change is logged with the review or statement that caused it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Unique identifier for a reputation event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReputationEventId(pub Uuid);

impl ReputationEventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReputationEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReputationEventId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReputationEventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type of reputation-affecting event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationEventType {
    /// Flag led to an accepted review
    FlagAccepted,
    /// Flag was rejected by the reviewers
    FlagRejected,
    /// Proposed edit was accepted
    EditAccepted,
    /// Proposed edit was rejected
    EditRejected,
    /// Vote matched the final outcome of a review
    ReviewContributed,
    /// First position ever posted by the user
    FirstPosition,
    /// Any further statement
    NewStatement,
    /// Compensation for an award whose review was revoked
    ReviewRevoked,
}

impl std::fmt::Display for ReputationEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReputationEventType::FlagAccepted => write!(f, "flag_accepted"),
            ReputationEventType::FlagRejected => write!(f, "flag_rejected"),
            ReputationEventType::EditAccepted => write!(f, "edit_accepted"),
            ReputationEventType::EditRejected => write!(f, "edit_rejected"),
            ReputationEventType::ReviewContributed => write!(f, "review_contributed"),
            ReputationEventType::FirstPosition => write!(f, "first_position"),
            ReputationEventType::NewStatement => write!(f, "new_statement"),
            ReputationEventType::ReviewRevoked => write!(f, "review_revoked"),
        }
    }
}

impl std::str::FromStr for ReputationEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flag_accepted" => Ok(ReputationEventType::FlagAccepted),
            "flag_rejected" => Ok(ReputationEventType::FlagRejected),
            "edit_accepted" => Ok(ReputationEventType::EditAccepted),
            "edit_rejected" => Ok(ReputationEventType::EditRejected),
            "review_contributed" => Ok(ReputationEventType::ReviewContributed),
            "first_position" => Ok(ReputationEventType::FirstPosition),
            "new_statement" => Ok(ReputationEventType::NewStatement),
            "review_revoked" => Ok(ReputationEventType::ReviewRevoked),
            _ => Err(format!("Unknown reputation event type: {}", s)),
        }
    }
}

/// A reputation change event for audit purposes
#[derive(Debug, Clone, Serialize)]
pub struct ReputationEvent {
    pub id: ReputationEventId,
    pub user_id: UserId,
    pub event_type: ReputationEventType,
    pub delta: i32,
    pub old_reputation: i32,
    pub new_reputation: i32,
    /// Review item or statement that triggered this event
    pub reference_id: Option<Uuid>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReputationEvent {
    /// Change actually applied after flooring at zero
    pub fn applied_delta(&self) -> i32 {
        self.new_reputation - self.old_reputation
    }
}

/// Data needed to create a new reputation event
#[derive(Debug, Clone)]
pub struct NewReputationEvent {
    pub user_id: UserId,
    pub event_type: ReputationEventType,
    pub delta: i32,
    pub old_reputation: i32,
    pub new_reputation: i32,
    pub reference_id: Option<Uuid>,
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_display() {
        assert_eq!(
            ReputationEventType::FlagAccepted.to_string(),
            "flag_accepted"
        );
        assert_eq!(
            ReputationEventType::ReviewContributed.to_string(),
            "review_contributed"
        );
        assert_eq!(
            ReputationEventType::FirstPosition.to_string(),
            "first_position"
        );
    }

    #[test]
    fn all_event_types_round_trip() {
        let types = [
            ReputationEventType::FlagAccepted,
            ReputationEventType::FlagRejected,
            ReputationEventType::EditAccepted,
            ReputationEventType::EditRejected,
            ReputationEventType::ReviewContributed,
            ReputationEventType::FirstPosition,
            ReputationEventType::NewStatement,
            ReputationEventType::ReviewRevoked,
        ];

        for event_type in types {
            let parsed: ReputationEventType = event_type.to_string().parse().unwrap();
            assert_eq!(parsed, event_type);
        }
        assert!("pr_merged".parse::<ReputationEventType>().is_err());
    }

    #[test]
    fn applied_delta_reflects_floor() {
        let event = ReputationEvent {
            id: ReputationEventId::new(),
            user_id: UserId::new(),
            event_type: ReputationEventType::FlagRejected,
            delta: -2,
            old_reputation: 1,
            new_reputation: 0,
            reference_id: None,
            details: None,
            created_at: Utc::now(),
        };
        assert_eq!(event.applied_delta(), -1);
    }
}
