//! Well-known role names and role normalization.
//!
//! Role strings in historical user documents are inconsistent
//! (`companyhr`, `company-hr`, `deptmanager`, ...). Everything entering
//! the system is normalized through [`normalize_role`] once, at the auth
//! boundary, so the rest of the code only ever sees the four canonical
//! names below.

pub const ROLE_HR: &str = "hr";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_APPLICANT: &str = "applicant";

/// All canonical role names.
pub const VALID_ROLES: &[&str] = &[ROLE_HR, ROLE_MANAGER, ROLE_EMPLOYEE, ROLE_APPLICANT];

/// Normalize a raw role string to one of the canonical role names.
///
/// Unknown or empty strings fall back to `employee`, matching how the
/// portal has always treated unrecognized staff roles. `applicant` is
/// preserved as-is since applicants must never see staff pages.
pub fn normalize_role(raw: &str) -> &'static str {
    match raw.trim().to_ascii_lowercase().as_str() {
        "hr" | "companyhr" | "company-hr" => ROLE_HR,
        "manager" | "departmentmanager" | "deptmanager" => ROLE_MANAGER,
        "applicant" => ROLE_APPLICANT,
        _ => ROLE_EMPLOYEE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_map_to_themselves() {
        for role in VALID_ROLES {
            assert_eq!(normalize_role(role), *role);
        }
    }

    #[test]
    fn legacy_aliases_normalize() {
        assert_eq!(normalize_role("companyhr"), ROLE_HR);
        assert_eq!(normalize_role("Company-HR"), ROLE_HR);
        assert_eq!(normalize_role("departmentmanager"), ROLE_MANAGER);
        assert_eq!(normalize_role("DeptManager"), ROLE_MANAGER);
    }

    #[test]
    fn unknown_roles_fall_back_to_employee() {
        assert_eq!(normalize_role(""), ROLE_EMPLOYEE);
        assert_eq!(normalize_role("intern"), ROLE_EMPLOYEE);
    }

    #[test]
    fn applicant_is_preserved() {
        assert_eq!(normalize_role("applicant"), ROLE_APPLICANT);
        assert_eq!(normalize_role("Applicant"), ROLE_APPLICANT);
    }
}
