use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchParams {
    #[schemars(
        description = "Name for the new branch (e.g., 'investigate-error', 'check-database'). Names cannot be reused."
    )]
    pub branch_name: String,
}
