//! Structured form submissions for form-type tasks.
//!
//! Form payloads arrive as free JSON from the portal and are validated
//! against a typed schema before they land in the ledger.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::task::TaskKind;

/// Personal details collected during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetailsForm {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 5, message = "Phone number is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "Emergency contact is required"))]
    pub emergency_contact: String,
}

/// Payroll bank details collected during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BankInfoForm {
    #[validate(length(min = 1, message = "Bank name is required"))]
    pub bank_name: String,
    #[validate(length(min = 4, message = "Account number is required"))]
    pub account_number: String,
    #[validate(length(min = 1, message = "Account holder is required"))]
    pub account_holder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

/// Validate a raw submission for a form task of `kind`.
///
/// Returns the canonicalized submission value on success so the ledger
/// stores a normalized shape rather than whatever the client sent.
pub fn validate_submission(
    kind: TaskKind,
    submission: &serde_json::Value,
) -> Result<serde_json::Value, CoreError> {
    match kind {
        TaskKind::PersonalDetails => {
            let form: PersonalDetailsForm = parse(submission)?;
            form.validate().map_err(validation_error)?;
            serde_json::to_value(&form).map_err(|e| CoreError::Internal(e.to_string()))
        }
        TaskKind::BankInfo => {
            let form: BankInfoForm = parse(submission)?;
            form.validate().map_err(validation_error)?;
            serde_json::to_value(&form).map_err(|e| CoreError::Internal(e.to_string()))
        }
        other => Err(CoreError::Validation(format!(
            "'{other}' is not a form kind"
        ))),
    }
}

fn parse<T: serde::de::DeserializeOwned>(value: &serde_json::Value) -> Result<T, CoreError> {
    serde_json::from_value(value.clone())
        .map_err(|e| CoreError::Validation(format!("Invalid form submission: {e}")))
}

fn validation_error(errors: validator::ValidationErrors) -> CoreError {
    CoreError::Validation(errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn valid_personal_details_pass() {
        let value = json!({
            "fullName": "Ada Lovelace",
            "phone": "+44 20 7946 0000",
            "address": "12 St James's Square, London",
            "emergencyContact": "Mary Somerville +44 20 7946 0001",
        });
        let canonical = validate_submission(TaskKind::PersonalDetails, &value).unwrap();
        assert_eq!(canonical["fullName"], "Ada Lovelace");
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let value = json!({
            "fullName": "Ada Lovelace",
            "phone": "+44 20 7946 0000",
        });
        assert!(validate_submission(TaskKind::PersonalDetails, &value).is_err());
    }

    #[test]
    fn empty_bank_name_is_rejected() {
        let value = json!({
            "bankName": "",
            "accountNumber": "DE89370400440532013000",
            "accountHolder": "Ada Lovelace",
        });
        let err = validate_submission(TaskKind::BankInfo, &value).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn bank_info_tax_id_is_optional() {
        let value = json!({
            "bankName": "Example Bank",
            "accountNumber": "DE89370400440532013000",
            "accountHolder": "Ada Lovelace",
        });
        assert!(validate_submission(TaskKind::BankInfo, &value).is_ok());
    }

    #[test]
    fn non_form_kinds_are_rejected() {
        let err = validate_submission(TaskKind::IdTax, &json!({})).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }
}
