//! Document types written to the firm and person indices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A firm as it is stored in the `firm_*` index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FirmDocument {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firm_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firm_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A person (client, deputy, donor, ...) as it is stored in the `person_*` index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonDocument {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    /// Discriminator from the source table (e.g. "lpa_donor", "actor_client").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_rec_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// Date of birth formatted as `DD/MM/YYYY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FirmDocument {
    /// The search document id for this firm.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }
}

impl PersonDocument {
    /// The search document id for this person.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firm_serialization_skips_missing_fields() {
        let doc = FirmDocument {
            id: 42,
            firm_name: Some("Acme Deputies".to_string()),
            firm_number: None,
            email: None,
            phone_number: None,
            address_line_1: None,
            town: Some("Leeds".to_string()),
            postcode: None,
            updated_at: None,
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["firm_name"], "Acme Deputies");
        assert_eq!(json["town"], "Leeds");
        assert!(json.get("email").is_none());
        assert!(json.get("updated_at").is_none());
        assert_eq!(doc.document_id(), "42");
    }

    #[test]
    fn test_person_deserialization() {
        let doc: PersonDocument = serde_json::from_str(
            r#"{"id": 7, "uid": 700000000047, "first_name": "Ada", "surname": "Lovelace"}"#,
        )
        .unwrap();

        assert_eq!(doc.id, 7);
        assert_eq!(doc.uid, Some(700000000047));
        assert_eq!(doc.surname.as_deref(), Some("Lovelace"));
        assert_eq!(doc.dob, None);
    }
}
