//! Response envelope shared by every JSON handler.
//!
//! The portal's clients unwrap one `{ "data": ... }` layer for catalogs,
//! board rows, applications, and everything else, so handlers return
//! [`DataResponse`] rather than building the envelope with `json!` at
//! each call site.

use serde::Serialize;

/// The `{ "data": T }` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_payload_under_data() {
        let body = DataResponse {
            data: vec!["upload_id_tax", "form_personal_details"],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "data": ["upload_id_tax", "form_personal_details"] })
        );
    }
}
