//! Request types for the create/attach operations, with required-field checks.
//!
//! Every string field defaults to empty when absent from a JSON body, so
//! "missing" and "empty" fail the same check. Blank (whitespace-only) values
//! count as missing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Fail with `CoreError::Validation(message)` if `value` is blank.
///
/// # Errors
///
/// Returns `CoreError::Validation` carrying `message`.
pub fn require(value: &str, message: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(message));
    }
    Ok(())
}

/// Collapse blank optional strings to `None`.
#[must_use]
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Input for `create` on the opportunity aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CreateOpportunity {
    pub applicant: String,
    pub company: String,
    pub position: String,
    pub description: Option<String>,
}

impl CreateOpportunity {
    #[must_use]
    pub fn new(
        applicant: impl Into<String>,
        company: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            applicant: applicant.into(),
            company: company.into(),
            position: position.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first blank required field.
    pub fn validate(&self) -> Result<(), CoreError> {
        require(&self.applicant, "applicant must be defined")?;
        require(&self.company, "company must be defined")?;
        require(&self.position, "position must be defined")
    }
}

/// Input for attaching an application to an opportunity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AttachApplication {
    pub opportunity_id: String,
    pub date: String,
    pub status: String,
}

impl AttachApplication {
    #[must_use]
    pub fn new(
        opportunity_id: impl Into<String>,
        date: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            opportunity_id: opportunity_id.into(),
            date: date.into(),
            status: status.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first blank required field,
    /// checked in the order date, opportunity id, status.
    pub fn validate(&self) -> Result<(), CoreError> {
        require(&self.date, "date is required")?;
        require(&self.opportunity_id, "opportunity id is required")?;
        require(&self.status, "status is required")
    }
}

/// Input for attaching an interview to an opportunity. Only `date` and
/// `opportunity_id` are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AttachInterview {
    pub opportunity_id: String,
    pub date: String,
    pub interviewer: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub url: Option<String>,
}

impl AttachInterview {
    #[must_use]
    pub fn new(opportunity_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            opportunity_id: opportunity_id.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn interviewer(mut self, val: impl Into<String>) -> Self {
        self.interviewer = Some(val.into());
        self
    }

    #[must_use]
    pub fn location(mut self, val: impl Into<String>) -> Self {
        self.location = Some(val.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, val: impl Into<String>) -> Self {
        self.notes = Some(val.into());
        self
    }

    #[must_use]
    pub fn url(mut self, val: impl Into<String>) -> Self {
        self.url = Some(val.into());
        self
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation`. A missing opportunity id is reported
    /// even when the date is also missing.
    pub fn validate(&self) -> Result<(), CoreError> {
        require(&self.opportunity_id, "opportunity id is required")?;
        require(&self.date, "date is required")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "Acme", "Engineer", "applicant must be defined")]
    #[case("alice", "", "Engineer", "company must be defined")]
    #[case("alice", "Acme", "", "position must be defined")]
    #[case("   ", "Acme", "Engineer", "applicant must be defined")]
    #[case("", "", "", "applicant must be defined")]
    fn create_opportunity_rejects_blank_fields(
        #[case] applicant: &str,
        #[case] company: &str,
        #[case] position: &str,
        #[case] expected: &str,
    ) {
        let err = CreateOpportunity::new(applicant, company, position)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m == expected), "{err}");
    }

    #[test]
    fn create_opportunity_missing_keys_default_to_empty() {
        let req: CreateOpportunity =
            serde_json::from_value(serde_json::json!({"applicant": "alice"})).unwrap();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "company must be defined");
    }

    #[rstest]
    #[case("", "opp-1", "applied", "date is required")]
    #[case("2024-01-10", "", "applied", "opportunity id is required")]
    #[case("2024-01-10", "opp-1", "", "status is required")]
    fn attach_application_rejects_blank_fields(
        #[case] date: &str,
        #[case] opportunity_id: &str,
        #[case] status: &str,
        #[case] expected: &str,
    ) {
        let err = AttachApplication::new(opportunity_id, date, status)
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn attach_interview_requires_only_date_and_opportunity() {
        assert!(AttachInterview::new("opp-1", "2024-01-10").validate().is_ok());
        assert_eq!(
            AttachInterview::new("opp-1", "").validate().unwrap_err().to_string(),
            "date is required"
        );
        assert_eq!(
            AttachInterview::new("", "").validate().unwrap_err().to_string(),
            "opportunity id is required"
        );
    }

    #[test]
    fn non_blank_drops_whitespace() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some("Bob".into())), Some("Bob".into()));
        assert_eq!(non_blank(None), None);
    }
}
