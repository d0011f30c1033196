use std::sync::Arc;

use rxscribe::application::ports::ChatRole;
use rxscribe::application::services::{
    PROMPT_MISSING_SENTINEL, PrescriptionGenerator, PromptConfig,
};

use crate::helpers::{CapturedLogs, ScriptedLlmClient};

#[tokio::test]
async fn given_input_when_generating_then_sends_system_and_user_messages() {
    let llm = Arc::new(ScriptedLlmClient::replying("{}"));
    let generator = PrescriptionGenerator::new(llm.clone(), PromptConfig::default());

    let raw = generator.generate("fever and cough").await.unwrap();

    assert_eq!(raw, "{}");
    let request = llm.last_request().unwrap();
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, ChatRole::System);
    assert_eq!(request.messages[1].role, ChatRole::User);
    assert_eq!(request.messages[1].content, "fever and cough");
    assert_eq!(request.max_tokens, 500);
    assert!(request.temperature <= 0.2);
}

#[test]
fn given_default_prompt_when_inspected_then_describes_schema_and_sentinel() {
    let prompt = PromptConfig::default();

    assert!(prompt.system_instruction.contains("\"Prescriptions\""));
    assert!(prompt.system_instruction.contains("\"Pharmacy\""));
    assert!(prompt.system_instruction.contains("drug conflicts"));
    assert!(
        prompt
            .system_instruction
            .contains(&format!("'{}'", PROMPT_MISSING_SENTINEL))
    );
}

#[tokio::test]
async fn given_custom_prompt_when_generating_then_uses_configured_bounds() {
    let llm = Arc::new(ScriptedLlmClient::replying("{}"));
    let generator = PrescriptionGenerator::new(
        llm.clone(),
        PromptConfig {
            system_instruction: "Return JSON.".to_string(),
            max_tokens: 128,
            temperature: 0.0,
        },
    );

    generator.generate("rash").await.unwrap();

    let request = llm.last_request().unwrap();
    assert_eq!(request.messages[0].content, "Return JSON.");
    assert_eq!(request.max_tokens, 128);
}

#[tokio::test]
async fn given_failing_client_when_generating_then_error_propagates() {
    let llm = Arc::new(ScriptedLlmClient::failing());
    let generator = PrescriptionGenerator::new(llm.clone(), PromptConfig::default());

    assert!(generator.generate("headache").await.is_err());
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn given_long_completion_when_generating_then_full_text_is_logged_at_debug() {
    let completion = format!(
        r#"{{"Prescriptions":[{{"Description":"{}","MedicationDetails":{{"Frequency": 1-2}}}}]}}"#,
        "x".repeat(200)
    );
    let llm = Arc::new(ScriptedLlmClient::replying(&completion));
    let generator = PrescriptionGenerator::new(llm, PromptConfig::default());
    let logs = CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(logs.subscriber());

    generator.generate("fever").await.unwrap();

    let output = logs.contents();
    assert!(output.contains("Full raw completion"));
    assert!(output.contains(r#""Frequency": 1-2"#));
}
