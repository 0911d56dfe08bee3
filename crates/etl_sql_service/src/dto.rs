use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key in the request body that carries the pipeline description.
pub const INPUT_JSON_KEY: &str = "inputJson";

/// Placeholder returned when the model's JSON reply has no `sql` key.
pub const NO_SQL_FOUND: &str = "No SQL found.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateSqlResponse {
    #[serde(rename = "Output")]
    pub output: Value,
}
