//! Catalog access control: permissions and groups.
//!
//! A user's effective permission set is the union of the permissions
//! granted to the groups they belong to. Admin-role users bypass the
//! lookup entirely.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{PERM_CAN_CREATE, PERM_CAN_DELETE, PERM_CAN_EDIT, PERM_CAN_VIEW};

/// Catalog permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    CanView,
    CanCreate,
    CanEdit,
    CanDelete,
}

impl Permission {
    /// Stable code stored in the permissions table
    pub fn code(&self) -> &'static str {
        match self {
            Permission::CanView => PERM_CAN_VIEW,
            Permission::CanCreate => PERM_CAN_CREATE,
            Permission::CanEdit => PERM_CAN_EDIT,
            Permission::CanDelete => PERM_CAN_DELETE,
        }
    }

    /// All permissions, in seeding order
    pub fn all() -> [Permission; 4] {
        [
            Permission::CanView,
            Permission::CanCreate,
            Permission::CanEdit,
            Permission::CanDelete,
        ]
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Access group domain entity
#[derive(Debug, Clone)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Group listing entry: name, granted permission codes, member count
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupSummary {
    #[schema(example = "editors")]
    pub name: String,
    #[schema(example = json!(["can_create", "can_edit"]))]
    pub permissions: Vec<String>,
    pub members: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_codes_match_seeded_rows() {
        assert_eq!(Permission::CanView.code(), "can_view");
        assert_eq!(Permission::CanCreate.code(), "can_create");
        assert_eq!(Permission::CanEdit.code(), "can_edit");
        assert_eq!(Permission::CanDelete.code(), "can_delete");
    }

    #[test]
    fn all_lists_four_distinct_permissions() {
        let all = Permission::all();
        assert_eq!(all.len(), 4);
        let codes: std::collections::HashSet<_> = all.iter().map(|p| p.code()).collect();
        assert_eq!(codes.len(), 4);
    }
}
