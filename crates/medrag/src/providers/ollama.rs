//! Ollama-backed providers for embeddings and answer generation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{EmbeddingConfig, LlmConfig};
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::{GeneratedText, GenerationProvider, Unavailable};

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    system: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: usize,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

async fn probe(client: &Client, base_url: &str) -> Result<bool> {
    let url = format!("{}/api/tags", base_url);
    match client.get(&url).send().await {
        Ok(response) => Ok(response.status().is_success()),
        Err(_) => Ok(false),
    }
}

/// Ollama embedding provider (nomic-embed-text or similar models)
pub struct OllamaEmbedder {
    client: Client,
    config: EmbeddingConfig,
}

impl OllamaEmbedder {
    /// Create a new embedder
    pub fn new(config: &EmbeddingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.config.base_url);
        let request = EmbedRequest {
            model: self.config.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::embedding(format!("HTTP {}", response.status())));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("invalid response: {}", e)))?;

        let mut vector = embed_response.embedding;
        if vector.len() != self.config.dimensions {
            return Err(Error::embedding(format!(
                "model returned {} dimensions, expected {}",
                vector.len(),
                self.config.dimensions
            )));
        }

        if self.config.normalize {
            normalize_in_place(&mut vector);
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn health_check(&self) -> Result<bool> {
        probe(&self.client, &self.config.base_url).await
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama generation provider
pub struct OllamaGenerator {
    client: Client,
    config: LlmConfig,
}

impl OllamaGenerator {
    /// Initialize the generation capability, probing the server first.
    ///
    /// Returns [`Unavailable`] when the server cannot be reached so the
    /// caller can deliberately fall back to simulation mode.
    pub async fn connect(config: &LlmConfig) -> std::result::Result<Self, Unavailable> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Unavailable {
                reason: format!("HTTP client: {}", e),
            })?;

        let generator = Self {
            client,
            config: config.clone(),
        };

        match probe(&generator.client, &generator.config.base_url).await {
            Ok(true) => Ok(generator),
            Ok(false) => Err(Unavailable {
                reason: format!("no Ollama server at {}", config.base_url),
            }),
            Err(e) => Err(Unavailable {
                reason: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl GenerationProvider for OllamaGenerator {
    async fn generate(&self, system: &str, user: &str) -> Result<GeneratedText> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model: self.config.model.clone(),
            system: system.to_string(),
            prompt: user.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        tracing::info!(model = %self.config.model, "generating answer");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::generation(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::generation(format!("HTTP {} - {}", status, body)));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::generation(format!("invalid response: {}", e)))?;

        Ok(GeneratedText::new(generate_response.response))
    }

    async fn health_check(&self) -> Result<bool> {
        probe(&self.client, &self.config.base_url).await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Scale a vector to unit length; zero vectors are left unchanged
fn normalize_in_place(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_scales_to_unit_length() {
        let mut vector = vec![3.0, 4.0];
        normalize_in_place(&mut vector);
        assert!((vector[0] - 0.6).abs() < 1e-6);
        assert!((vector[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        let mut vector = vec![0.0, 0.0];
        normalize_in_place(&mut vector);
        assert_eq!(vector, vec![0.0, 0.0]);
    }
}
