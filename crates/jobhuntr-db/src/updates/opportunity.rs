//! Opportunity update: the allow-list of patchable fields.
//!
//! `processes` and `id` are not patchable. A JSON patch naming any other key
//! is rejected rather than ignored.

use jobhuntr_core::entities::Opportunity;
use jobhuntr_core::errors::CoreError;
use jobhuntr_core::requests::{non_blank, require};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpportunityUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// `None`: leave as is. `Some(None)`: clear.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

/// Distinguish an explicit `null` from an absent key.
fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

impl OpportunityUpdate {
    /// Parse a JSON patch object.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for unknown keys or wrongly typed values.
    pub fn from_json(patch: serde_json::Value) -> Result<Self, CoreError> {
        serde_json::from_value(patch)
            .map_err(|e| CoreError::validation(format!("invalid opportunity patch: {e}")))
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.applicant.is_none()
            && self.company.is_none()
            && self.position.is_none()
            && self.description.is_none()
    }

    /// Required fields may be changed but never blanked.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the blank field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(applicant) = &self.applicant {
            require(applicant, "applicant must be defined")?;
        }
        if let Some(company) = &self.company {
            require(company, "company must be defined")?;
        }
        if let Some(position) = &self.position {
            require(position, "position must be defined")?;
        }
        Ok(())
    }

    /// Keep only the fields whose value differs from `current`.
    ///
    /// A blank description counts as clearing it.
    #[must_use]
    pub fn changes_from(&self, current: &Opportunity) -> Self {
        let differs = |new: &Option<String>, old: &String| new.as_ref().filter(|v| *v != old).cloned();
        let description = self
            .description
            .clone()
            .map(non_blank)
            .filter(|d| *d != current.description);

        Self {
            applicant: differs(&self.applicant, &current.applicant),
            company: differs(&self.company, &current.company),
            position: differs(&self.position, &current.position),
            description,
        }
    }
}

pub struct OpportunityUpdateBuilder(OpportunityUpdate);

impl OpportunityUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(OpportunityUpdate::default())
    }

    #[must_use]
    pub fn applicant(mut self, val: impl Into<String>) -> Self {
        self.0.applicant = Some(val.into());
        self
    }

    #[must_use]
    pub fn company(mut self, val: impl Into<String>) -> Self {
        self.0.company = Some(val.into());
        self
    }

    #[must_use]
    pub fn position(mut self, val: impl Into<String>) -> Self {
        self.0.position = Some(val.into());
        self
    }

    #[must_use]
    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> OpportunityUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn current() -> Opportunity {
        Opportunity {
            id: "opp-00000001".into(),
            applicant: "alice".into(),
            company: "Acme".into(),
            position: "Engineer".into(),
            description: Some("backend".into()),
            processes: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn absent_and_null_description_differ() {
        let absent = OpportunityUpdate::from_json(json!({"position": "Lead"})).unwrap();
        assert_eq!(absent.description, None);

        let null = OpportunityUpdate::from_json(json!({"description": null})).unwrap();
        assert_eq!(null.description, Some(None));
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = OpportunityUpdate::from_json(json!({"processes": []})).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = OpportunityUpdate::from_json(json!({"id": "opp-x"})).unwrap_err();
        assert!(err.to_string().contains("invalid opportunity patch"));
    }

    #[rstest]
    #[case(json!({"applicant": ""}), "applicant must be defined")]
    #[case(json!({"company": "  "}), "company must be defined")]
    #[case(json!({"position": "", "company": "Acme"}), "position must be defined")]
    fn blank_required_field_fails_validation(
        #[case] patch: serde_json::Value,
        #[case] expected: &str,
    ) {
        let update = OpportunityUpdate::from_json(patch).unwrap();
        assert_eq!(update.validate().unwrap_err().to_string(), expected);
    }

    #[test]
    fn changes_drop_equal_values() {
        let update = OpportunityUpdateBuilder::new()
            .company("Acme")
            .position("Lead")
            .description(Some("backend".into()))
            .build();
        let changes = update.changes_from(&current());
        assert_eq!(
            changes,
            OpportunityUpdate {
                position: Some("Lead".into()),
                ..OpportunityUpdate::default()
            }
        );
    }

    #[test]
    fn blank_description_clears() {
        let update = OpportunityUpdateBuilder::new()
            .description(Some(String::new()))
            .build();
        assert_eq!(update.changes_from(&current()).description, Some(None));
    }

    #[test]
    fn identical_patch_has_no_changes() {
        let update = OpportunityUpdateBuilder::new()
            .applicant("alice")
            .company("Acme")
            .build();
        assert!(update.changes_from(&current()).is_empty());
    }
}
