use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::filter::StageOutput;

/// DTO for previewing how a comment body will be displayed.
#[derive(Debug, Deserialize, Validate)]
pub struct RenderRequest {
    #[validate(length(max = 5000, message = "Content must be at most 5000 characters"))]
    pub content: String,

    /// Also return the output of every intermediate step.
    #[serde(default)]
    pub trace: bool,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub content: String,
    /// Step names in the order they were applied.
    pub steps: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<StageOutput>>,
}
