use etl_llm::{ChatMessage, LLMProvider};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

use crate::dto::{INPUT_JSON_KEY, NO_SQL_FOUND};
use crate::error::{AppError, Result};
use crate::services::system_instruction::system_message;

lazy_static! {
    // Opening fence (optionally tagged json) at a line start, closing fence at a line end.
    static ref CODE_FENCE: Regex =
        Regex::new(r"(?m)^```(?:json)?|```$").expect("Failed to compile code fence regex");
}

/// Outcome of reading the `sql` key from a well-formed JSON reply.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlExtraction {
    Found(Value),
    Absent,
}

impl SqlExtraction {
    pub fn into_output(self) -> Value {
        match self {
            SqlExtraction::Found(sql) => sql,
            SqlExtraction::Absent => Value::String(NO_SQL_FOUND.to_string()),
        }
    }
}

/// Pull the pipeline description out of a raw request body.
///
/// A string value is decoded as embedded JSON; any other value is used as-is.
pub fn normalize_input(body: &[u8]) -> Result<Value> {
    let body: Value = serde_json::from_slice(body).map_err(|_| AppError::InvalidRequestBody)?;

    let input = match body {
        Value::Object(mut map) => map
            .remove(INPUT_JSON_KEY)
            .ok_or(AppError::MissingInputJson)?,
        _ => return Err(AppError::MissingInputJson),
    };

    match input {
        Value::String(embedded) => {
            serde_json::from_str(&embedded).map_err(|e| AppError::InvalidInputJson {
                details: e.to_string(),
            })
        }
        other => Ok(other),
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// System instruction followed by the pipeline description as compact JSON.
pub fn build_messages(input: &Value) -> Result<Vec<ChatMessage>> {
    let user_content = serde_json::to_string(input)?;
    Ok(vec![system_message(), ChatMessage::user(user_content)])
}

pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw.trim(), "").trim().to_string()
}

/// Decode a model reply into the SQL it carries.
///
/// Only a JSON object without an `sql` key yields [`SqlExtraction::Absent`].
/// Unparsable text and JSON of any other shape are errors.
pub fn decode_completion(raw: &str) -> Result<SqlExtraction> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(AppError::EmptyCompletion);
    }

    let reply: Value =
        serde_json::from_str(&cleaned).map_err(|e| AppError::InvalidCompletionJson {
            raw_output: raw.to_string(),
            details: e.to_string(),
        })?;

    match reply {
        Value::Object(map) => Ok(match map.get("sql") {
            Some(sql) => SqlExtraction::Found(sql.clone()),
            None => SqlExtraction::Absent,
        }),
        other => Err(AppError::InvalidCompletionJson {
            raw_output: raw.to_string(),
            details: format!(
                "expected a JSON object with an \"sql\" key, found {}",
                json_type_name(&other)
            ),
        }),
    }
}

pub async fn generate_sql(provider: &dyn LLMProvider, input: &Value) -> Result<Value> {
    info!("inputJson: {}", input);
    info!("inputJson type: {}", json_type_name(input));

    let messages = build_messages(input)?;
    let reply = provider.chat_completion(&messages, None).await?;
    debug!("Completion reply received ({} bytes)", reply.len());

    decode_completion(&reply).map(SqlExtraction::into_output)
}
