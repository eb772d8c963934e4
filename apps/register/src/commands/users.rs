//! # Staff Commands
//!
//! The permissions screen: list staff, edit a user's permission, auto-logout
//! and status, mark dormant, delete. The roster lives only in this process.

use pesatrack_core::permissions::{StaffUpdate, StaffUser};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::AdminState;

pub fn list_users(admin: &AdminState) -> Vec<StaffUser> {
    debug!("list_users command");
    admin.with_staff(|roster| roster.users().to_vec())
}

pub fn update_user(
    admin: &AdminState,
    id: u64,
    update: StaffUpdate,
) -> Result<StaffUser, ApiError> {
    debug!(id, ?update, "update_user command");
    let user = admin.with_staff(|roster| roster.update(id, update).cloned())?;
    info!(id, permission = %user.permission, status = %user.status, "Staff user updated");
    Ok(user)
}

pub fn set_dormant(admin: &AdminState, id: u64) -> Result<StaffUser, ApiError> {
    debug!(id, "set_dormant command");
    let user = admin.with_staff(|roster| roster.set_dormant(id).cloned())?;
    info!(id, "Staff user marked dormant");
    Ok(user)
}

pub fn remove_user(admin: &AdminState, id: u64) -> Result<StaffUser, ApiError> {
    debug!(id, "remove_user command");
    let user = admin.with_staff(|roster| roster.remove(id))?;
    warn!(id, name = %user.name, "Staff user removed");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pesatrack_core::permissions::{Permission, StaffStatus};

    #[test]
    fn test_update_and_dormant() {
        let admin = AdminState::seeded();
        let update = StaffUpdate {
            permission: Some(Permission::Viewer),
            logout_time: Some("17:00".into()),
            ..Default::default()
        };
        let user = update_user(&admin, 2, update).unwrap();
        assert_eq!(user.permission, Permission::Viewer);
        assert_eq!(user.logout_time, "17:00");

        let user = set_dormant(&admin, 2).unwrap();
        assert_eq!(user.status, StaffStatus::Dormant);
        assert_eq!(list_users(&admin)[1].status, StaffStatus::Dormant);
    }

    #[test]
    fn test_bad_logout_time_changes_nothing() {
        let admin = AdminState::seeded();
        let update = StaffUpdate {
            permission: Some(Permission::Viewer),
            logout_time: Some("25:99".into()),
            ..Default::default()
        };
        let err = update_user(&admin, 1, update).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(list_users(&admin)[0].permission, Permission::Admin);
    }

    #[test]
    fn test_remove_unknown_user() {
        let admin = AdminState::seeded();
        assert_eq!(remove_user(&admin, 1).unwrap().name, "John Doe");
        assert_eq!(list_users(&admin).len(), 1);
        assert_eq!(remove_user(&admin, 1).unwrap_err().code, ErrorCode::NotFound);
    }
}
