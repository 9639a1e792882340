use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::coach_access;
use crate::error::AppError;

/// Request body for granting or revoking coach access.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CoachEmailRequest {
    #[schema(example = "coach@clubhouse.example")]
    pub coach_email: String,
}

/// Trim, lower-case, and validate a coach email.
///
/// The check is the same loose shape test the product has always used:
/// one `@`, no whitespace, a dot somewhere in the domain.
pub fn normalize_coach_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(AppError::Validation("Invalid email".into()))
    }
}

/// One grant row, as returned to the player.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CoachGrantResponse {
    #[schema(example = "coach@clubhouse.example")]
    pub coach_email: String,
    pub created_at: DateTime<Utc>,
}

impl From<coach_access::Model> for CoachGrantResponse {
    fn from(model: coach_access::Model) -> Self {
        Self {
            coach_email: model.coach_email,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CoachGrantListResponse {
    pub coaches: Vec<CoachGrantResponse>,
    pub total: u64,
}
