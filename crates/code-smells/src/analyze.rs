use anyhow::{Context, Result};
use tracing::debug;

use code_smells_analysis::{extract_fragment, AnalysisDocument, AnalysisPrompts};
use code_smells_llm::ModelClient;

/// Send one diff through the model and parse the structured response.
///
/// Either a complete, validated document comes back or an error does;
/// nothing partial crosses this boundary.
pub async fn analyze_diff(client: &dyn ModelClient, diff: &str) -> Result<AnalysisDocument> {
    let prompt = AnalysisPrompts::build_analysis_prompt(diff);

    let response = client
        .complete(&prompt)
        .await
        .context("Error analyzing code")?;

    debug!(
        backend = client.name(),
        response_len = response.len(),
        "Model response received"
    );

    let fragment = extract_fragment(&response).context("Failed to parse analysis response")?;
    let document = AnalysisDocument::parse(fragment).context("Failed to parse analysis response")?;

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use code_smells_llm::ClientError;

    /// Backend that returns a canned completion.
    struct CannedClient(&'static str);

    #[async_trait]
    impl ModelClient for CannedClient {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, ClientError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_valid_response_produces_document() {
        let client = CannedClient(
            "Sure, here it is:\n<output><analysis_process>ok</analysis_process><overall_assessment>Looks fine.</overall_assessment></output>",
        );

        let document = analyze_diff(&client, "+fn f() {}").await.unwrap();
        assert!(!document.has_flags());
        assert_eq!(document.overall_assessment(), "Looks fine.");
    }

    #[tokio::test]
    async fn test_unstructured_response_is_fatal() {
        let client = CannedClient("I'd rather chat about the weather.");
        let result = analyze_diff(&client, "+fn f() {}").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_fragment_is_fatal() {
        let client = CannedClient("<output><overall_assessment>fine</overall_assessment></output>");
        let result = analyze_diff(&client, "+fn f() {}").await;
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("analysis_process"));
    }
}
