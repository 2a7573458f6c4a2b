use crate::dto::assistant_dto::{AssistantReply, ChatTurn};
use crate::dto::job_dto::{JobMatchReply, JobSummary, MatchProfile, RecommendedJob};
use crate::error::{Error, Result};
use crate::models::job::Job;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LearningPath {
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Milestone {
    pub week: i32,
    pub title: String,
    pub description: String,
    pub resources: MilestoneResources,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MilestoneResources {
    pub articles: Vec<String>,
    pub videos: Vec<String>,
    pub projects: Vec<String>,
}

#[derive(Clone)]
pub struct AiService {
    client: Client,
    api_key: String,
}

impl AiService {
    pub fn new(api_key: String, client: Client) -> Self {
        Self { client, api_key }
    }

    /// Rank the profile against the job list. One call, no retries; a reply
    /// that does not parse as the contracted array is an upstream failure
    /// carrying the raw text for diagnostics.
    pub async fn match_jobs(
        &self,
        profile: &MatchProfile,
        jobs: &[JobSummary],
    ) -> Result<Vec<JobMatchReply>> {
        let system_prompt = r#"Act as an expert job matching AI. Analyze the given jobs against the user profile.

User profile analysis factors:
1. Skills match
2. Experience level alignment
3. Location compatibility
4. Bio/keyword relevance
5. Job summary/content matching

Response requirements:
- Strict JSON array format, no markdown or backticks, no escaped characters
- Each element: {"jobId": "<id>", "matchPercentage": <0-100>, "reason": "<short explanation>", "summaryAnalysis": "<how the job content aligns>"}
- No other fields, no surrounding text."#;

        let user_content = serde_json::json!({
            "user_profile": profile,
            "jobs": jobs,
        });

        let payload = serde_json::json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": serde_json::to_string(&user_content)?}
            ],
            "temperature": 0.2
        });

        let raw = self.chat_text(payload).await?;
        serde_json::from_str::<Vec<JobMatchReply>>(raw.trim()).map_err(|_| {
            Error::AiResponse("Failed to parse model match response".to_string(), raw)
        })
    }

    /// Join match replies back onto stored jobs by stringified id, dropping
    /// matches for unknown ids, sorted by descending match percentage.
    pub fn join_matches(matches: Vec<JobMatchReply>, jobs: &[Job]) -> Vec<RecommendedJob> {
        let mut recommended: Vec<RecommendedJob> = matches
            .into_iter()
            .filter_map(|m| {
                let job = jobs.iter().find(|j| j.id.to_string() == m.job_id)?;
                Some(RecommendedJob {
                    job_id: job.id,
                    title: job.title.clone(),
                    company: job.company.clone(),
                    location: job.location.clone(),
                    match_percentage: m.match_percentage,
                    reason: m.reason,
                    skills: job.skills.clone(),
                    experience_level: job.experience_level.clone(),
                    salary_range: job.salary_range.clone(),
                    job_type: job.job_type.clone(),
                    posted_at: job.posted_at,
                })
            })
            .collect();
        recommended.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        recommended
    }

    pub async fn generate_learning_path(
        &self,
        goal: &str,
        skills: &[String],
        study_hours: u32,
    ) -> Result<LearningPath> {
        let system_prompt = r#"You are a JSON generator bot. Your ONLY job is to return valid JSON.

Create a detailed two-month learning path for the stated goal, given the
current skills and weekly study time.

Strict format:
{
  "milestones": [
    {
      "week": number,
      "title": string,
      "description": string,
      "resources": { "articles": string[], "videos": string[], "projects": string[] }
    }
  ]
}

Guidelines:
- Do NOT include ```json or ``` in the output, and no introductory text.
- All URLs must be real and valid (MDN, YouTube, freeCodeCamp, official docs).
- All fields must be filled properly, no placeholders."#;

        let user_content = serde_json::json!({
            "goal": goal,
            "current_skills": skills,
            "weekly_study_hours": study_hours,
        });

        let payload = serde_json::json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": serde_json::to_string(&user_content)?}
            ],
            "response_format": { "type": "json_object" }
        });

        let raw = self.chat_text(payload).await?;
        parse_learning_path(&raw)
            .map_err(|_| Error::BadRequest("Model returned invalid JSON format".to_string()))
    }

    /// Classify a recruiter question into the assistant's strict JSON
    /// contract: chat reply or one of the known parametrized data queries.
    pub async fn classify_question(
        &self,
        question: &str,
        history: &[ChatTurn],
    ) -> Result<AssistantReply> {
        let system_prompt = r#"You are a recruitment data assistant. Classify the recruiter's question and reply with ONE JSON object, nothing else.

Contract:
{
  "intent": "message" | "data",
  "message": string (only for intent "message"),
  "query_type": "posted_jobs" | "applications" | "interviews" (only for intent "data"),
  "filters": {
    "status": "pending" | "reviewed" | "accepted" | "rejected" | null,
    "job_title": string | null,
    "date_range": "today" | "this_week" | "this_month" | null,
    "candidate_name": string | null
  },
  "suggestions": string[] (up to 3 follow-up questions, only for intent "message")
}

Rules:
- "data" only when the recruiter asks about their own jobs, applications or interviews.
- Never invent other query types or filter values.
- Omit or null any filter the question does not mention.
- No markdown, no commentary, pure JSON."#;

        let user_content = serde_json::json!({
            "conversation_history": history,
            "question": question,
        });

        let payload = serde_json::json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": serde_json::to_string(&user_content)?}
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.1
        });

        let raw = self.chat_text(payload).await?;
        serde_json::from_str::<AssistantReply>(raw.trim())
            .map_err(|e| Error::Internal(format!("Assistant reply failed validation: {}", e)))
    }

    async fn chat_text(&self, payload: JsonValue) -> Result<String> {
        let res = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(Duration::from_secs(120))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("OpenAI API Error {}: {}", status, text).into());
        }

        let body: JsonValue = res.json().await?;
        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response format").into())
    }
}

/// Strip markdown fences the model sometimes adds, then deserialize the
/// milestone schema, rejecting any unexpected shape.
pub fn parse_learning_path(raw: &str) -> std::result::Result<LearningPath, serde_json::Error> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    serde_json::from_str(cleaned.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn job(title: &str) -> Job {
        Job {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.into(),
            company: "Acme".into(),
            location: "Remote".into(),
            skills: vec!["rust".into()],
            experience_level: Some("mid".into()),
            salary_range: None,
            job_type: Some("full_time".into()),
            posted_at: Utc::now(),
        }
    }

    fn reply(job_id: String, pct: i32) -> JobMatchReply {
        JobMatchReply {
            job_id,
            match_percentage: pct,
            reason: "skills overlap".into(),
            summary_analysis: None,
        }
    }

    #[test]
    fn join_drops_unknown_ids_and_sorts_descending() {
        let jobs = vec![job("Backend"), job("Frontend")];
        let matches = vec![
            reply(jobs[0].id.to_string(), 40),
            reply("not-a-real-id".into(), 99),
            reply(jobs[1].id.to_string(), 85),
        ];

        let joined = AiService::join_matches(matches, &jobs);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].match_percentage, 85);
        assert_eq!(joined[0].title, "Frontend");
        assert_eq!(joined[1].match_percentage, 40);
    }

    #[test]
    fn match_reply_rejects_unknown_fields() {
        let raw = r#"[{"jobId": "1", "matchPercentage": 90, "reason": "r", "rank": 1}]"#;
        assert!(serde_json::from_str::<Vec<JobMatchReply>>(raw).is_err());

        let raw = r#"[{"jobId": "1", "matchPercentage": 90, "reason": "r"}]"#;
        let parsed = serde_json::from_str::<Vec<JobMatchReply>>(raw).unwrap();
        assert_eq!(parsed[0].match_percentage, 90);
    }

    #[test]
    fn learning_path_parses_with_fences_stripped() {
        let raw = r#"```json
        {"milestones": [{"week": 1, "title": "Basics", "description": "d",
          "resources": {"articles": ["a"], "videos": [], "projects": []}}]}
        ```"#;
        let path = parse_learning_path(raw).unwrap();
        assert_eq!(path.milestones.len(), 1);
        assert_eq!(path.milestones[0].week, 1);
    }

    #[test]
    fn learning_path_rejects_missing_resources() {
        let raw = r#"{"milestones": [{"week": 1, "title": "t", "description": "d"}]}"#;
        assert!(parse_learning_path(raw).is_err());
    }
}
