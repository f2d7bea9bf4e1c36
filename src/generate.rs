//! Text generation: the external collaborator that writes taglines.
//!
//! The assembler builds the prompt and parses the reply; a generator only
//! moves text. The production generator drives the `gemini` CLI as a
//! subprocess, so credentials and model access stay with that tool.

use std::io;
use std::process::Command;

use serde::Serialize;

use crate::model::{Asin, Persona};

/// Why a generation attempt produced nothing usable.
///
/// Never surfaced to the caller; the assembler falls back instead.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("text generator unavailable: {0}")]
    Unavailable(String),

    #[error("text generator exited with {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("malformed generator reply: {0}")]
    Malformed(String),

    #[error("I/O error talking to generator: {0}")]
    Io(#[from] io::Error),
}

/// What the generator is told about one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub asin: Asin,
    pub clean_name: String,
    pub regular_price: String,
    pub sale_price: String,
    pub has_code: bool,
    pub discount: String,
}

/// One generation call: the products in campaign order and the full prompt.
#[derive(Debug, Clone)]
pub struct TaglineRequest {
    pub persona: Persona,
    pub products: Vec<ProductSummary>,
    pub prompt: String,
}

/// Anything that can turn a prompt into raw reply text.
pub trait TextGenerator {
    fn generate(&self, request: &TaglineRequest) -> Result<String, GeneratorError>;
}

/// Generates text with the `gemini` command-line tool.
#[derive(Debug, Clone)]
pub struct GeminiCli {
    command: String,
    model: String,
}

impl GeminiCli {
    pub fn new(command: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            model: model.into(),
        }
    }
}

impl TextGenerator for GeminiCli {
    fn generate(&self, request: &TaglineRequest) -> Result<String, GeneratorError> {
        tracing::info!(
            command = %self.command,
            model = %self.model,
            persona = %request.persona,
            products = request.products.len(),
            "requesting taglines"
        );

        let output = match Command::new(&self.command)
            .args(["-p", &request.prompt, "-m", &self.model])
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GeneratorError::Unavailable(format!(
                    "'{}' not found on PATH",
                    self.command
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            return Err(GeneratorError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// A generator that never answers. Campaigns fall back to rule-table lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl TextGenerator for Offline {
    fn generate(&self, _request: &TaglineRequest) -> Result<String, GeneratorError> {
        Err(GeneratorError::Unavailable("offline mode".to_string()))
    }
}
