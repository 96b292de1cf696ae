use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of the matches endpoint
///
/// Both parameters are optional at the extractor level so a missing one is
/// reported as a validation failure instead of a query parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MatchesQuery {
    #[validate(length(min = 1))]
    #[serde(rename = "subjectId", alias = "userId", default)]
    pub subject_id: Option<String>,
    #[validate(length(min = 1))]
    #[serde(rename = "subjectType", alias = "userType", default)]
    pub subject_type: Option<String>,
}
