use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config_manager::InferenceConfig;
use crate::error::ServiceError;

/// Client for the model hub and the hosted inference endpoint
#[derive(Debug, Clone)]
pub struct InferenceServiceClient {
    client: Client,
    hub_url: String,
    inference_url: String,
    api_token: Option<String>,
}

/// Model metadata returned by the hub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub pipeline_tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
    pub parameters: InferenceParameters,
    pub options: InferenceOptions,
}

#[derive(Debug, Serialize)]
pub struct InferenceParameters {
    /// Cut over-long inputs to the model's maximum length
    pub truncation: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InferenceOptions {
    pub wait_for_model: bool,
}

/// One generated sequence; the field name depends on the pipeline
#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    #[serde(alias = "translation_text", alias = "summary_text", alias = "generated_text")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Value,
}

impl InferenceServiceClient {
    pub fn new(config: &InferenceConfig) -> Self {
        Self {
            client: Client::new(),
            hub_url: config.hub_url.trim_end_matches('/').to_string(),
            inference_url: config.inference_url.trim_end_matches('/').to_string(),
            api_token: config.bearer_token().map(str::to_string),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Resolve a model on the hub. Fails with `ModelNotFound` when no such model exists.
    pub async fn fetch_model_info(&self, model: &str) -> Result<ModelInfo, ServiceError> {
        let url = format!("{}/api/models/{}", self.hub_url, model);
        debug!("Resolving model {}", model);

        let response = self.authorize(self.client.get(&url)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED => {
                return Err(ServiceError::ModelNotFound {
                    model: model.to_string(),
                })
            }
            status if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                return Err(ServiceError::Inference {
                    model: model.to_string(),
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let info: ModelInfo = response.json().await?;
        Ok(info)
    }

    /// Run a text-to-text model and return the first generated sequence
    pub async fn generate(&self, model: &str, text: &str) -> Result<String, ServiceError> {
        let url = format!("{}/models/{}", self.inference_url, model);
        let request = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                truncation: "only_first",
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ServiceError::ModelNotFound {
                model: model.to_string(),
            });
        }
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&raw)
                .map(|body| match body.error {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or(raw);
            warn!("Inference with {} failed: {} {}", model, status, message);
            return Err(ServiceError::Inference {
                model: model.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let outputs: Vec<GeneratedText> =
            response
                .json()
                .await
                .map_err(|e| ServiceError::UnexpectedResponse {
                    model: model.to_string(),
                    message: e.to_string(),
                })?;

        outputs
            .into_iter()
            .next()
            .map(|output| output.text)
            .ok_or_else(|| ServiceError::UnexpectedResponse {
                model: model.to_string(),
                message: "empty output list".to_string(),
            })
    }

    /// True when the given model resolves on the hub
    pub async fn health_check(&self, model: &str) -> Result<bool, ServiceError> {
        match self.fetch_model_info(model).await {
            Ok(_) => Ok(true),
            Err(ServiceError::ModelNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    fn client_for(server: &ServerGuard, token: Option<&str>) -> InferenceServiceClient {
        InferenceServiceClient::new(&InferenceConfig {
            hub_url: server.url(),
            inference_url: format!("{}/hf-inference/", server.url()),
            api_token: token.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn resolves_existing_model() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/models/Helsinki-NLP/opus-mt-fr-en")
            .with_status(200)
            .with_body(json!({"id": "Helsinki-NLP/opus-mt-fr-en", "pipeline_tag": "translation"}).to_string())
            .create_async()
            .await;

        let info = client_for(&server, None)
            .fetch_model_info("Helsinki-NLP/opus-mt-fr-en")
            .await
            .unwrap();
        assert_eq!(info.id, "Helsinki-NLP/opus-mt-fr-en");
        assert_eq!(info.pipeline_tag.as_deref(), Some("translation"));
    }

    #[tokio::test]
    async fn missing_model_is_reported_as_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/models/Helsinki-NLP/opus-mt-en-xx")
            .with_status(404)
            .with_body(json!({"error": "Repository not found"}).to_string())
            .create_async()
            .await;

        let err = client_for(&server, None)
            .fetch_model_info("Helsinki-NLP/opus-mt-en-xx")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ModelNotFound { ref model } if model == "Helsinki-NLP/opus-mt-en-xx"));
    }

    #[tokio::test]
    async fn generate_sends_truncated_input_with_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/hf-inference/models/google/pegasus-xsum")
            .match_header("authorization", "Bearer hf_secret")
            .match_body(Matcher::PartialJson(json!({
                "inputs": "A long article.",
                "parameters": {"truncation": "only_first"},
                "options": {"wait_for_model": true}
            })))
            .with_status(200)
            .with_body(json!([{"summary_text": "Short."}]).to_string())
            .create_async()
            .await;

        let summary = client_for(&server, Some("hf_secret"))
            .generate("google/pegasus-xsum", "A long article.")
            .await
            .unwrap();
        assert_eq!(summary, "Short.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn generate_reads_translation_field() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/hf-inference/models/Helsinki-NLP/opus-mt-fr-en")
            .with_status(200)
            .with_body(json!([{"translation_text": "Hello world"}]).to_string())
            .create_async()
            .await;

        let text = client_for(&server, None)
            .generate("Helsinki-NLP/opus-mt-fr-en", "Bonjour le monde")
            .await
            .unwrap();
        assert_eq!(text, "Hello world");
    }

    #[tokio::test]
    async fn generate_surfaces_service_error_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/hf-inference/models/google/pegasus-xsum")
            .with_status(503)
            .with_body(json!({"error": "Model is overloaded"}).to_string())
            .create_async()
            .await;

        let err = client_for(&server, None)
            .generate("google/pegasus-xsum", "text")
            .await
            .unwrap_err();
        match err {
            ServiceError::Inference { status, message, .. } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Model is overloaded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_output_is_unexpected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/hf-inference/models/google/pegasus-xsum")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let err = client_for(&server, None)
            .generate("google/pegasus-xsum", "text")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn health_check_is_false_for_missing_model() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/models/google/pegasus-xsum")
            .with_status(404)
            .create_async()
            .await;

        let healthy = client_for(&server, None)
            .health_check("google/pegasus-xsum")
            .await
            .unwrap();
        assert!(!healthy);
    }
}
