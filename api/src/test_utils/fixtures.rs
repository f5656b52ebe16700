//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;

use crate::domain::entities::{
    slugify, Issue, IssueId, Statement, StatementId, StatementKind, User, UserGroup, UserId,
};

/// Create a regular test user with the given nickname and no reputation
pub fn test_user(nickname: &str) -> User {
    User {
        id: UserId::new(),
        nickname: nickname.to_string(),
        public_nickname: nickname.to_string(),
        password_hash: "salt$hash".to_string(),
        api_key_hash: Some(format!("hash-{}", nickname)),
        group: UserGroup::User,
        reputation: 0,
        created_at: Utc::now(),
        last_login_at: None,
    }
}

/// Create a regular test user with a specific reputation
pub fn test_user_with_reputation(reputation: i32) -> User {
    let id = UserId::new();
    User {
        id,
        reputation,
        nickname: format!("user-{}", id),
        public_nickname: format!("user-{}", id),
        api_key_hash: Some(format!("hash-{}", id)),
        ..test_user("unused")
    }
}

/// Create an admin user
pub fn test_admin() -> User {
    let id = UserId::new();
    User {
        id,
        nickname: format!("admin-{}", id),
        public_nickname: "admin".to_string(),
        api_key_hash: Some(format!("hash-admin-{}", id)),
        group: UserGroup::Admin,
        ..test_user("unused")
    }
}

/// Create an issue whose slug is derived from the title
pub fn test_issue(title: &str) -> Issue {
    Issue {
        id: IssueId::new(),
        slug: slugify(title),
        title: title.to_string(),
        info: String::new(),
        created_at: Utc::now(),
    }
}

/// Create an enabled position in a fresh issue
pub fn test_statement(text: &str) -> Statement {
    let now = Utc::now();
    Statement {
        id: StatementId::new(),
        issue_id: IssueId::new(),
        author_id: UserId::new(),
        kind: StatementKind::Position,
        text: text.to_string(),
        is_disabled: false,
        created_at: now,
        updated_at: now,
    }
}
