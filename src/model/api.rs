use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// The response when submitted form fields fail validation
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ValidationErrorDto {
    /// Always `Validation failed`
    pub error: String,
    /// Messages for each invalid field, keyed by field name
    pub errors: BTreeMap<String, Vec<String>>,
}

/// The response for operations that only report success
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusDto {
    pub status: String,
}

impl StatusDto {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}
