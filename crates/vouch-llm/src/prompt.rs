//! Prompt assembly for grounded generation

use vouch_domain::traits::GenerationOptions;
use vouch_domain::EvidenceChunk;

const GENERATION_INSTRUCTIONS: &str = r#"Answer the question using ONLY the numbered evidence chunks below.
Respond with a single JSON object in this exact shape:

{
  "answer": "<answer text>",
  "claims": [
    {
      "text": "<one atomic assertion>",
      "source_ids": ["chunk_1"],
      "is_inference": false
    }
  ]
}

Rules:
- Every claim must cite the chunks that support it by their chunk_N id.
- Cite only chunk ids that appear in the evidence below.
- Set is_inference to true when a claim combines chunks rather than
  restating one.
- If the evidence does not answer the question, return an empty claims
  array."#;

/// Builds the generation prompt handed to the claim-producing provider.
///
/// Evidence is rendered with the same `chunk_N` ordinal ids the retriever
/// assigned, so the provider's citations resolve against this call's
/// evidence set and nothing else.
pub struct GenerationPrompt {
    question: String,
    evidence: Vec<EvidenceChunk>,
    persona: Option<String>,
    constraints: Vec<String>,
}

impl GenerationPrompt {
    /// Create a prompt for a question over its retrieved evidence
    pub fn new(question: impl Into<String>, evidence: &[EvidenceChunk]) -> Self {
        Self {
            question: question.into(),
            evidence: evidence.to_vec(),
            persona: None,
            constraints: Vec::new(),
        }
    }

    /// Apply per-request options
    pub fn with_options(mut self, options: &GenerationOptions) -> Self {
        self.persona = options.persona.clone();
        self.constraints = options.constraints.clone();
        self
    }

    /// Render the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(GENERATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if let Some(persona) = &self.persona {
            prompt.push_str(&format!("Persona: {}\n", persona));
        }
        if !self.constraints.is_empty() {
            prompt.push_str(&format!("Hints: {}\n", self.constraints.join(", ")));
        }
        if self.persona.is_some() || !self.constraints.is_empty() {
            prompt.push('\n');
        }

        prompt.push_str("Evidence:\n");
        for chunk in &self.evidence {
            prompt.push_str(&format!(
                "[{}] (source: {}) {}\n",
                chunk.ordinal_id(),
                chunk.source.source_id,
                chunk.text
            ));
        }

        prompt.push_str("\nQuestion: ");
        prompt.push_str(&self.question);
        prompt.push('\n');

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_domain::SourceRef;

    fn chunk(ordinal: usize, text: &str) -> EvidenceChunk {
        EvidenceChunk {
            ordinal,
            text: text.to_string(),
            embedding: vec![0.0; 4],
            similarity: 0.9,
            source: SourceRef::new("doc-1"),
            tenant_id: "t1".to_string(),
        }
    }

    #[test]
    fn test_prompt_lists_ordinal_ids() {
        let prompt = GenerationPrompt::new(
            "what color is the sky?",
            &[chunk(1, "the sky is blue"), chunk(2, "grass is green")],
        )
        .build();

        assert!(prompt.contains("[chunk_1]"));
        assert!(prompt.contains("[chunk_2]"));
        assert!(prompt.contains("the sky is blue"));
        assert!(prompt.contains("Question: what color is the sky?"));
    }

    #[test]
    fn test_prompt_includes_persona_and_hints() {
        let options = GenerationOptions {
            persona: Some("support-agent".to_string()),
            constraints: vec!["order_by_recency".to_string()],
        };
        let prompt = GenerationPrompt::new("quando?", &[chunk(1, "nel 2020")])
            .with_options(&options)
            .build();

        assert!(prompt.contains("Persona: support-agent"));
        assert!(prompt.contains("order_by_recency"));
    }
}
