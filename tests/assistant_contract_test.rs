use serde_json::json;

use jobmatch_backend::dto::assistant_dto::{
    AssistantIntent, AssistantReply, AssistantResponse, DateBucket, QueryType,
};
use jobmatch_backend::dto::job_dto::JobMatchReply;
use jobmatch_backend::services::ai_service::parse_learning_path;
use jobmatch_backend::utils::mask::mask_email;

#[test]
fn classification_reply_follows_the_contract() {
    let raw = r#"{
        "intent": "data",
        "query_type": "interviews",
        "filters": {
            "status": null,
            "job_title": "Backend Engineer",
            "date_range": "today",
            "candidate_name": null
        },
        "suggestions": []
    }"#;

    let reply: AssistantReply = serde_json::from_str(raw).unwrap();
    assert_eq!(reply.intent, AssistantIntent::Data);
    assert_eq!(reply.query_type, Some(QueryType::Interviews));
    let filters = reply.filters.unwrap();
    assert_eq!(filters.date_range, Some(DateBucket::Today));
    assert_eq!(filters.job_title.as_deref(), Some("Backend Engineer"));
}

#[test]
fn replies_outside_the_contract_fail_closed() {
    // An extra field smells like the model drifting towards free-form SQL.
    let raw = r#"{ "intent": "data", "query_type": "applications", "where": "1=1" }"#;
    assert!(serde_json::from_str::<AssistantReply>(raw).is_err());

    // Unknown query types never reach the database layer.
    let raw = r#"{ "intent": "data", "query_type": "security_logs" }"#;
    assert!(serde_json::from_str::<AssistantReply>(raw).is_err());

    let raw = r#"{ "intent": "delete" }"#;
    assert!(serde_json::from_str::<AssistantReply>(raw).is_err());
}

#[test]
fn data_responses_carry_no_suggestions() {
    let resp = AssistantResponse::data(json!([{"title": "Backend Engineer"}]));
    assert!(resp.suggestions.is_empty());
    assert!(resp.message.is_none());

    let resp = AssistantResponse::message("Hello", vec!["Show my jobs".to_string()]);
    assert_eq!(resp.suggestions.len(), 1);
    assert!(resp.data.is_none());
}

#[test]
fn match_replies_reject_shape_drift() {
    let raw = r#"[
        {"jobId": "abc", "matchPercentage": 72, "reason": "skills overlap",
         "summaryAnalysis": "close fit"}
    ]"#;
    let parsed: Vec<JobMatchReply> = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed[0].match_percentage, 72);

    let raw = r#"[{"jobId": "abc", "matchPercentage": 72, "reason": "r", "score": 1}]"#;
    assert!(serde_json::from_str::<Vec<JobMatchReply>>(raw).is_err());
}

#[test]
fn learning_path_contract() {
    let raw = r#"```json
    {"milestones": [
        {"week": 1, "title": "Foundations", "description": "Core syntax",
         "resources": {"articles": ["https://example.com/a"], "videos": [], "projects": ["CLI tool"]}},
        {"week": 2, "title": "Web", "description": "HTTP basics",
         "resources": {"articles": [], "videos": ["https://example.com/v"], "projects": []}}
    ]}
    ```"#;
    let path = parse_learning_path(raw).unwrap();
    assert_eq!(path.milestones.len(), 2);
    assert_eq!(path.milestones[1].week, 2);

    let raw = r#"{"milestones": [{"week": 1, "title": "t", "description": "d",
        "resources": {"articles": [], "videos": [], "projects": []}, "cost": "free"}]}"#;
    assert!(parse_learning_path(raw).is_err());
}

#[test]
fn applicant_emails_are_masked() {
    assert_eq!(mask_email("candidate@jobs.example"), "c*****e@jobs.example");
    assert_eq!(mask_email("x@jobs.example"), "x*****@jobs.example");
    assert_eq!(mask_email("broken-address"), "*****");
}
