use std::sync::Arc;

use crate::application::ports::{ChatMessage, CompletionRequest, LlmClient, LlmClientError};
use crate::infrastructure::observability::sanitize_prompt;

/// Value the model is told to write for a field it cannot fill.
/// Mapped to `null` by the normalizer, never stored as-is.
pub const PROMPT_MISSING_SENTINEL: &str = "None";

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = r#"You are a helpful assistant that generates prescriptions from a doctor's description of a patient encounter. Always return the prescription in the following JSON format and nothing else. Warn the doctor in Description if you suspect any drug conflicts. If any information is missing, use 'None' as the value for that field.
{
    "Prescriptions": [
        {
            "DiagnosisInformation": { "Diagnosis": "<diagnosis>", "Medicine": "<medicine>" },
            "MedicationDetails": {
                "Dose": "<dose>",
                "DoseUnit": "<dose unit>",
                "DoseRoute": "<dose route>",
                "Frequency": "<frequency>",
                "FrequencyDuration": "<frequency duration>",
                "FrequencyUnit": "<frequency unit>",
                "Quantity": "<quantity>",
                "QuantityUnit": "<quantity unit>",
                "Refill": "<refill>",
                "Pharmacy": "<pharmacy>"
            },
            "Description": "<description>"
        }
    ]
}"#;

/// Instruction and sampling bounds sent with every generation request.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    pub system_instruction: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            max_tokens: 500,
            temperature: 0.1,
        }
    }
}

pub struct PrescriptionGenerator<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    prompt: PromptConfig,
}

impl<L> PrescriptionGenerator<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>, prompt: PromptConfig) -> Self {
        Self { llm_client, prompt }
    }

    pub fn prompt(&self) -> &PromptConfig {
        &self.prompt
    }

    pub fn build_request(&self, user_input: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                ChatMessage::system(self.prompt.system_instruction.clone()),
                ChatMessage::user(user_input),
            ],
            max_tokens: self.prompt.max_tokens,
            temperature: self.prompt.temperature,
        }
    }

    /// Returns the raw completion text. No parsing happens here.
    #[tracing::instrument(skip(self, user_input), fields(input_chars = user_input.len()))]
    pub async fn generate(&self, user_input: &str) -> Result<String, LlmClientError> {
        let request = self.build_request(user_input);

        let completion = self.llm_client.complete(&request).await.map_err(|e| {
            tracing::error!(error = %e, "Prescription generation request failed");
            e
        })?;

        tracing::info!(
            raw_completion = %sanitize_prompt(&completion),
            chars = completion.len(),
            "Received raw completion"
        );
        tracing::debug!(raw_completion = %completion, "Full raw completion");

        Ok(completion)
    }
}
