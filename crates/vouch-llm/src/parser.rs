//! Parse generation payloads into an answer plus claims

use serde_json::Value;
use tracing::warn;
use vouch_domain::traits::ProviderError;
use vouch_domain::Claim;

/// Parse a model's response text into an answer and its claims.
///
/// Models sometimes wrap the JSON in markdown code fences; those are
/// stripped first. Malformed entries in the claims array are skipped with a
/// warning rather than failing the batch; a payload that parses to zero
/// claims is a valid (empty) generation, and the orchestrator turns it into
/// a no-results outcome.
pub fn parse_generation_payload(response: &str) -> Result<(String, Vec<Claim>), ProviderError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ProviderError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    let obj = json
        .as_object()
        .ok_or_else(|| ProviderError::InvalidResponse("Expected JSON object".to_string()))?;

    let answer = obj
        .get("answer")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let mut claims = Vec::new();
    if let Some(raw_claims) = obj.get("claims").and_then(|v| v.as_array()) {
        for (idx, raw) in raw_claims.iter().enumerate() {
            match serde_json::from_value::<Claim>(raw.clone()) {
                Ok(claim) if claim.text.trim().is_empty() => {
                    warn!(idx, "skipping claim with empty text");
                }
                Ok(claim) => claims.push(claim),
                Err(e) => {
                    warn!(idx, error = %e, "skipping malformed claim");
                }
            }
        }
    }

    Ok((answer, claims))
}

/// Strip a markdown code fence when present.
fn extract_json(response: &str) -> Result<String, ProviderError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ProviderError::InvalidResponse(
                "Empty code block".to_string(),
            ));
        }
        // Skip the opening ``` / ```json line and the closing ``` line
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_payload() {
        let payload = r#"{
            "answer": "The sky is blue.",
            "claims": [
                {"text": "The sky is blue", "source_ids": ["chunk_1"], "is_inference": false}
            ]
        }"#;

        let (answer, claims) = parse_generation_payload(payload).unwrap();
        assert_eq!(answer, "The sky is blue.");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].source_ids, vec!["chunk_1"]);
    }

    #[test]
    fn test_parse_fenced_payload() {
        let payload = "```json\n{\"answer\": \"ok\", \"claims\": []}\n```";
        let (answer, claims) = parse_generation_payload(payload).unwrap();
        assert_eq!(answer, "ok");
        assert!(claims.is_empty());
    }

    #[test]
    fn test_malformed_claims_are_skipped() {
        let payload = r#"{
            "answer": "partial",
            "claims": [
                {"text": "good", "source_ids": ["chunk_1"]},
                {"source_ids": ["chunk_2"]},
                {"text": "", "source_ids": ["chunk_1"]},
                {"text": "also good", "source_ids": ["chunk_1", "chunk_2"], "is_inference": true}
            ]
        }"#;

        let (_, claims) = parse_generation_payload(payload).unwrap();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].text, "good");
        assert!(claims[1].is_inference);
    }

    #[test]
    fn test_quality_overrides_survive_parsing() {
        let payload = r#"{
            "answer": "a",
            "claims": [
                {"text": "c", "source_ids": ["chunk_1"], "extractor_quality": 0.4,
                 "date_coherence": 0.8, "out_of_domain": true}
            ]
        }"#;

        let (_, claims) = parse_generation_payload(payload).unwrap();
        assert_eq!(claims[0].extractor_quality, Some(0.4));
        assert_eq!(claims[0].date_coherence, Some(0.8));
        assert!(claims[0].out_of_domain);
    }

    #[test]
    fn test_non_json_payload_is_an_error() {
        let result = parse_generation_payload("I could not find an answer.");
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_array_payload_is_an_error() {
        let result = parse_generation_payload("[1, 2, 3]");
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_missing_claims_key_yields_empty_set() {
        let (answer, claims) = parse_generation_payload(r#"{"answer": "just text"}"#).unwrap();
        assert_eq!(answer, "just text");
        assert!(claims.is_empty());
    }
}
