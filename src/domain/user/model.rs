use chrono::{DateTime, Utc};

/// User account, identified by email
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Opaque bearer token bound to exactly one user
#[derive(Clone, Debug)]
pub struct AuthToken {
    pub key: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}
