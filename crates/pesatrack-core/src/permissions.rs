//! # Staff Permissions
//!
//! The roster behind the user permissions screen: who can do what, when they
//! are logged out automatically, and whether they are still active.
//!
//! ## User Workflow
//! ```text
//! Roster ──► pick user ──► edit permission / auto-logout / status ──► save
//!                     ├──► "Set Dormant" ──► status = Dormant
//!                     └──► "Remove"      ──► gone from roster
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::validate_logout_time;

// =============================================================================
// Permission & Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    Admin,
    Editor,
    Viewer,
}

impl Permission {
    pub const ALL: [Permission; 3] = [Permission::Admin, Permission::Editor, Permission::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Admin => "Admin",
            Permission::Editor => "Editor",
            Permission::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "permission".to_string(),
                allowed: Permission::ALL.iter().map(|p| p.to_string()).collect(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffStatus {
    Active,
    Dormant,
    Sick,
    Leave,
    Suspension,
    Fired,
}

impl StaffStatus {
    pub const ALL: [StaffStatus; 6] = [
        StaffStatus::Active,
        StaffStatus::Dormant,
        StaffStatus::Sick,
        StaffStatus::Leave,
        StaffStatus::Suspension,
        StaffStatus::Fired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffStatus::Active => "Active",
            StaffStatus::Dormant => "Dormant",
            StaffStatus::Sick => "Sick",
            StaffStatus::Leave => "Leave",
            StaffStatus::Suspension => "Suspension",
            StaffStatus::Fired => "Fired",
        }
    }
}

impl fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StaffStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: StaffStatus::ALL.iter().map(|s| s.to_string()).collect(),
            })
    }
}

// =============================================================================
// Staff User
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUser {
    pub id: u64,
    pub name: String,
    pub permission: Permission,
    pub auto_logout: bool,
    /// `HH:MM`, 24-hour.
    pub logout_time: String,
    pub status: StaffStatus,
}

/// Edits applied from the permission dialog. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct StaffUpdate {
    pub permission: Option<Permission>,
    pub auto_logout: Option<bool>,
    pub logout_time: Option<String>,
    pub status: Option<StaffStatus>,
}

// =============================================================================
// Roster
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct StaffRoster {
    users: Vec<StaffUser>,
}

impl StaffRoster {
    /// The two starting accounts.
    pub fn seeded() -> Self {
        let user = |id, name: &str, permission| StaffUser {
            id,
            name: name.to_string(),
            permission,
            auto_logout: true,
            logout_time: "18:30".to_string(),
            status: StaffStatus::Active,
        };

        StaffRoster {
            users: vec![
                user(1, "John Doe", Permission::Admin),
                user(2, "Jane Smith", Permission::Editor),
            ],
        }
    }

    pub fn users(&self) -> &[StaffUser] {
        &self.users
    }

    pub fn get(&self, id: u64) -> CoreResult<&StaffUser> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or(CoreError::UserNotFound(id))
    }

    fn get_mut(&mut self, id: u64) -> CoreResult<&mut StaffUser> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(CoreError::UserNotFound(id))
    }

    /// Applies an edit. The logout time is validated before anything changes.
    pub fn update(&mut self, id: u64, update: StaffUpdate) -> CoreResult<&StaffUser> {
        let logout_time = update
            .logout_time
            .as_deref()
            .map(validate_logout_time)
            .transpose()?;

        let user = self.get_mut(id)?;
        if let Some(permission) = update.permission {
            user.permission = permission;
        }
        if let Some(auto_logout) = update.auto_logout {
            user.auto_logout = auto_logout;
        }
        if let Some(time) = logout_time {
            user.logout_time = time;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        Ok(user)
    }

    pub fn set_dormant(&mut self, id: u64) -> CoreResult<&StaffUser> {
        let user = self.get_mut(id)?;
        user.status = StaffStatus::Dormant;
        Ok(user)
    }

    pub fn remove(&mut self, id: u64) -> CoreResult<StaffUser> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(CoreError::UserNotFound(id))?;
        Ok(self.users.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_roster() {
        let roster = StaffRoster::seeded();
        assert_eq!(roster.users().len(), 2);
        assert_eq!(roster.get(1).unwrap().permission, Permission::Admin);
        assert_eq!(roster.get(2).unwrap().name, "Jane Smith");
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let mut roster = StaffRoster::seeded();
        let user = roster
            .update(
                2,
                StaffUpdate {
                    permission: Some(Permission::Viewer),
                    logout_time: Some("7:45".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(user.permission, Permission::Viewer);
        assert_eq!(user.logout_time, "07:45");
        assert!(user.auto_logout);
        assert_eq!(user.status, StaffStatus::Active);
    }

    #[test]
    fn test_bad_logout_time_changes_nothing() {
        let mut roster = StaffRoster::seeded();
        let result = roster.update(
            1,
            StaffUpdate {
                permission: Some(Permission::Viewer),
                logout_time: Some("half six".into()),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(roster.get(1).unwrap().permission, Permission::Admin);
    }

    #[test]
    fn test_set_dormant_and_remove() {
        let mut roster = StaffRoster::seeded();
        assert_eq!(roster.set_dormant(1).unwrap().status, StaffStatus::Dormant);

        let removed = roster.remove(2).unwrap();
        assert_eq!(removed.name, "Jane Smith");
        assert!(matches!(roster.remove(2), Err(CoreError::UserNotFound(2))));
    }

    #[test]
    fn test_parse_permission_and_status() {
        assert_eq!("editor".parse::<Permission>().unwrap(), Permission::Editor);
        assert_eq!("SICK".parse::<StaffStatus>().unwrap(), StaffStatus::Sick);
        assert!("Owner".parse::<Permission>().is_err());
        assert!("Retired".parse::<StaffStatus>().is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let roster = StaffRoster::seeded();
        let json = serde_json::to_value(&roster.users()[0]).unwrap();
        assert_eq!(json["logoutTime"], "18:30");
        assert_eq!(json["autoLogout"], true);
        assert_eq!(json["permission"], "Admin");
    }
}
