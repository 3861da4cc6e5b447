use serde::{Deserialize, Serialize};

use crate::domain::{Subject, SubjectId};

/// Request envelope posted to the subject service endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Action {
    #[serde(rename = "getSubjectIDs")]
    GetSubjectIds,
    #[serde(rename = "getSubjectInfo")]
    GetSubjectInfo { id: SubjectId },
    #[serde(rename = "update")]
    Update { json: Subject },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::GetSubjectIds => "getSubjectIDs",
            Action::GetSubjectInfo { .. } => "getSubjectInfo",
            Action::Update { .. } => "update",
        }
    }
}
