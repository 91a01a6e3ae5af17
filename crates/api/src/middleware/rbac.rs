//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level. Fine-grained checks (department scopes,
//! per-resource visibility) go through `talenthub_core::authz` inside the
//! handler.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use talenthub_core::error::CoreError;
use talenthub_core::roles::{ROLE_APPLICANT, ROLE_HR, ROLE_MANAGER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `hr` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn hr_only(RequireHr(user): RequireHr) -> AppResult<Json<()>> {
///     // user is guaranteed to be HR here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireHr(pub AuthUser);

impl FromRequestParts<AppState> for RequireHr {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_HR {
            return Err(AppError::Core(CoreError::Forbidden(
                "HR role required".into(),
            )));
        }
        Ok(RequireHr(user))
    }
}

/// Requires `hr` or `manager` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn staff_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_HR && user.role != ROLE_MANAGER {
            return Err(AppError::Core(CoreError::Forbidden(
                "HR or manager role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}

/// Requires any staff-side role, i.e. everyone except applicants.
/// Applicants only see the careers surface, never the onboarding portal.
pub struct RequireEmployee(pub AuthUser);

impl FromRequestParts<AppState> for RequireEmployee {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role == ROLE_APPLICANT {
            return Err(AppError::Core(CoreError::Forbidden(
                "Employee role required".into(),
            )));
        }
        Ok(RequireEmployee(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
