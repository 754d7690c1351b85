use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MergeBranchParams {
    #[schemars(description = "Name of the branch to merge")]
    pub branch_name: String,
}
