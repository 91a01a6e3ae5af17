//! Centralized capability checks.
//!
//! Role-based visibility used to be scattered inline string comparisons;
//! every authorization decision now goes through this module so handlers
//! only express *what* they need, not *which* role strings grant it.

use crate::roles::{ROLE_EMPLOYEE, ROLE_HR, ROLE_MANAGER};

/// A protected resource or view in the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// The HR/manager progress board listing all employees.
    ProgressBoard,
    /// Another employee's onboarding detail view.
    EmployeeDetail,
    /// The employee's own onboarding catalog and ledger.
    OwnOnboarding,
    /// Incoming job applications (review, status changes).
    Applications,
    /// Job posting administration.
    JobAdmin,
    /// Portal user administration (provisioning employees).
    UserAdmin,
    /// Department administration.
    DepartmentAdmin,
}

/// Whether `role` may view/operate on `resource`.
///
/// Roles are assumed to be canonical (see [`crate::roles::normalize_role`]).
pub fn can_view(role: &str, resource: Resource) -> bool {
    match resource {
        Resource::ProgressBoard | Resource::EmployeeDetail | Resource::Applications => {
            role == ROLE_HR || role == ROLE_MANAGER
        }
        Resource::OwnOnboarding => {
            role == ROLE_HR || role == ROLE_MANAGER || role == ROLE_EMPLOYEE
        }
        Resource::JobAdmin | Resource::UserAdmin | Resource::DepartmentAdmin => role == ROLE_HR,
    }
}

/// Whether `role` may edit onboarding steps in `scope`.
///
/// HR edits every scope (base and all departments); a manager edits only
/// their own department's scope. `viewer_dept` is the caller's department
/// id, if any.
pub fn can_manage_scope(role: &str, viewer_dept: Option<&str>, scope: &str) -> bool {
    match role {
        r if r == ROLE_HR => true,
        r if r == ROLE_MANAGER => scope != "base" && viewer_dept == Some(scope),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_APPLICANT, ROLE_EMPLOYEE, ROLE_HR, ROLE_MANAGER};

    #[test]
    fn hr_sees_everything() {
        for resource in [
            Resource::ProgressBoard,
            Resource::EmployeeDetail,
            Resource::OwnOnboarding,
            Resource::Applications,
            Resource::JobAdmin,
            Resource::UserAdmin,
            Resource::DepartmentAdmin,
        ] {
            assert!(can_view(ROLE_HR, resource), "{resource:?}");
        }
    }

    #[test]
    fn manager_sees_progress_but_not_admin() {
        assert!(can_view(ROLE_MANAGER, Resource::ProgressBoard));
        assert!(can_view(ROLE_MANAGER, Resource::Applications));
        assert!(!can_view(ROLE_MANAGER, Resource::JobAdmin));
        assert!(!can_view(ROLE_MANAGER, Resource::UserAdmin));
    }

    #[test]
    fn employee_sees_only_own_onboarding() {
        assert!(can_view(ROLE_EMPLOYEE, Resource::OwnOnboarding));
        assert!(!can_view(ROLE_EMPLOYEE, Resource::ProgressBoard));
        assert!(!can_view(ROLE_EMPLOYEE, Resource::EmployeeDetail));
    }

    #[test]
    fn applicant_sees_nothing_staff_facing() {
        assert!(!can_view(ROLE_APPLICANT, Resource::OwnOnboarding));
        assert!(!can_view(ROLE_APPLICANT, Resource::ProgressBoard));
    }

    #[test]
    fn scope_management() {
        assert!(can_manage_scope(ROLE_HR, None, "base"));
        assert!(can_manage_scope(ROLE_HR, None, "engineering"));
        assert!(can_manage_scope(ROLE_MANAGER, Some("engineering"), "engineering"));
        assert!(!can_manage_scope(ROLE_MANAGER, Some("engineering"), "sales"));
        assert!(!can_manage_scope(ROLE_MANAGER, Some("engineering"), "base"));
        assert!(!can_manage_scope(ROLE_MANAGER, None, "engineering"));
        assert!(!can_manage_scope(ROLE_EMPLOYEE, Some("engineering"), "engineering"));
    }
}
