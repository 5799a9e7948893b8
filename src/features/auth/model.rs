use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::ROLE_ADMIN;

/// Principal resolved from a verified bearer credential
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Token subject - the owning user id for report scoping
    pub id: String,
    pub email: String,
    pub role: String,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Check if user can review and triage all reports
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}
