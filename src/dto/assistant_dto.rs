use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

/// History is capped server side regardless of what the client sends.
pub const MAX_HISTORY_TURNS: usize = 10;
/// Rows returned by any assistant data query.
pub const MAX_RESULT_ROWS: i64 = 20;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AskPayload {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    #[serde(default)]
    pub query_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    PostedJobs,
    Applications,
    Interviews,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBucket {
    Today,
    ThisWeek,
    ThisMonth,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssistantFilters {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub date_range: Option<DateBucket>,
    #[serde(default)]
    pub candidate_name: Option<String>,
}

/// The model's classification reply. The shape is the strict JSON contract
/// from the prompt; anything else fails closed at deserialization.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct AssistantReply {
    pub intent: AssistantIntent,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub query_type: Option<QueryType>,
    #[serde(default)]
    pub filters: Option<AssistantFilters>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantIntent {
    Message,
    Data,
}

/// Client-facing assistant response. `data` responses always carry an empty
/// suggestions list; suggestions accompany chat and no-result replies only.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantResponse {
    pub response_type: AssistantIntent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
    pub suggestions: Vec<String>,
}

impl AssistantResponse {
    pub fn message(text: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            response_type: AssistantIntent::Message,
            message: Some(text.into()),
            data: None,
            suggestions,
        }
    }

    pub fn data(rows: JsonValue) -> Self {
        Self {
            response_type: AssistantIntent::Data,
            message: None,
            data: Some(rows),
            suggestions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_parses_the_documented_contract() {
        let raw = r#"{
            "intent": "data",
            "query_type": "applications",
            "filters": { "status": "pending", "date_range": "this_week" },
            "suggestions": []
        }"#;
        let reply: AssistantReply = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.intent, AssistantIntent::Data);
        assert_eq!(reply.query_type, Some(QueryType::Applications));
        assert_eq!(
            reply.filters.unwrap().date_range,
            Some(DateBucket::ThisWeek)
        );
    }

    #[test]
    fn unknown_fields_fail_closed() {
        let raw = r#"{ "intent": "data", "sql": "DROP TABLE users" }"#;
        assert!(serde_json::from_str::<AssistantReply>(raw).is_err());
    }

    #[test]
    fn unknown_enum_values_fail_closed() {
        let raw = r#"{ "intent": "data", "query_type": "all_users" }"#;
        assert!(serde_json::from_str::<AssistantReply>(raw).is_err());

        let raw = r#"{ "intent": "execute" }"#;
        assert!(serde_json::from_str::<AssistantReply>(raw).is_err());
    }

    #[test]
    fn data_response_never_carries_suggestions() {
        let resp = AssistantResponse::data(serde_json::json!([{"id": 1}]));
        assert!(resp.suggestions.is_empty());
        assert!(resp.data.is_some());
    }
}
