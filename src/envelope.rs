//! Decoding of the Aura response envelope.
//!
//! The activity-search endpoint wraps its payload as
//! `{"actions":[{"state":"SUCCESS","returnValue":{"returnValue":[...]}}]}`.
//! Everything that depends on that shape lives here so that an upstream contract
//! change fails with a [`DecodeError::Structure`] instead of producing wrong records.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Response body is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Unexpected response envelope: {0}")]
    Structure(String),
}

/// An activity exactly as the upstream reports it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawActivity {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Activity_Name__c")]
    pub name: String,
    #[serde(rename = "Start_Date__c")]
    pub start_date: String,
    #[serde(rename = "End_Date__c")]
    pub end_date: String,
    #[serde(rename = "Description__c")]
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    actions: Vec<Action>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Action {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    return_value: Option<ActionResult>,
    #[serde(default)]
    error: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionResult {
    #[serde(default)]
    return_value: Option<Vec<RawActivity>>,
}

pub fn decode_activities(body: &str) -> Result<Vec<RawActivity>, DecodeError> {
    let value: Value = serde_json::from_str(body).map_err(DecodeError::Parse)?;
    let envelope: Envelope =
        serde_json::from_value(value).map_err(|err| DecodeError::Structure(err.to_string()))?;

    let action = envelope
        .actions
        .into_iter()
        .next()
        .ok_or_else(|| DecodeError::Structure("`actions` is empty".into()))?;

    if action.state.as_deref() == Some("ERROR") {
        let message = action
            .error
            .as_deref()
            .and_then(<[Value]>::first)
            .and_then(|err| err.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("no error message");
        return Err(DecodeError::Structure(format!(
            "upstream action failed: {message}"
        )));
    }

    action
        .return_value
        .and_then(|result| result.return_value)
        .ok_or_else(|| {
            DecodeError::Structure("missing `actions[0].returnValue.returnValue`".into())
        })
}
