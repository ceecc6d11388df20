//! Campaign identifier validation applied at the request boundary.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("campana_id is required")]
    MissingCampaignId,
    #[error("campana_id cannot be empty")]
    EmptyCampaignId,
}

/// Check that a campaign identifier is present and not blank.
pub fn validate_campaign_id(id: Option<&str>) -> Result<&str, ValidationError> {
    match id {
        None => Err(ValidationError::MissingCampaignId),
        Some(id) if id.trim().is_empty() => Err(ValidationError::EmptyCampaignId),
        Some(id) => Ok(id),
    }
}
