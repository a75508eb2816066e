// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading generator: turns a resolved outcome into a three-part reading.
//!
//! When a [`TextGenerator`] is configured the outcome and question are sent
//! to it once, and the first JSON object in the reply becomes the reading.
//! Any failure along that path is logged and replaced by the deterministic
//! [`fallback_reading`]; callers always get a [`Reading`].

use std::sync::{Arc, LazyLock};

use liuren_core::{GenerationRequest, LiurenError, Outcome, Reading, TextGenerator};
use regex::Regex;
use tracing::{debug, info, warn};

/// Default model identifier for DashScope text generation.
pub const DEFAULT_MODEL: &str = "qwen-turbo";

/// Default generation cap.
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

const FALLBACK_ADVICE: &str = "建议：顺其自然，把握时机。";

/// Greedy match from the first `{` to the last `}`, across newlines.
static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

/// Parameters passed with every generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// How a reading will be produced for one request.
#[derive(Clone)]
pub enum ReadingStrategy {
    /// No generator configured: use the fallback template without any I/O.
    DirectFallback,
    /// Make one generation attempt, falling back on failure.
    ExternalAttempt(Arc<dyn TextGenerator>),
}

impl ReadingStrategy {
    /// Label reported by the health endpoint.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::DirectFallback => "fallback",
            Self::ExternalAttempt(_) => "generated",
        }
    }
}

impl std::fmt::Debug for ReadingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectFallback => f.write_str("DirectFallback"),
            Self::ExternalAttempt(generator) => f
                .debug_tuple("ExternalAttempt")
                .field(&generator.name())
                .finish(),
        }
    }
}

/// Produces readings, optionally backed by an external text generator.
#[derive(Clone)]
pub struct ReadingGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
    settings: GenerationSettings,
}

impl ReadingGenerator {
    /// Creates a generator. `None` means fallback-only operation.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    /// A generator that never makes outbound calls.
    pub fn fallback_only() -> Self {
        Self::new(None, GenerationSettings::default())
    }

    /// Selects the strategy for the next request.
    pub fn strategy(&self) -> ReadingStrategy {
        match &self.generator {
            Some(generator) => ReadingStrategy::ExternalAttempt(Arc::clone(generator)),
            None => ReadingStrategy::DirectFallback,
        }
    }

    /// Produces a reading for `outcome`. Never fails.
    pub async fn generate(
        &self,
        question: &str,
        outcome: &Outcome,
        time_descriptor: &str,
    ) -> Reading {
        match self.strategy() {
            ReadingStrategy::DirectFallback => {
                debug!(outcome = outcome.name, "no generator configured, using fallback reading");
                fallback_reading(outcome)
            }
            ReadingStrategy::ExternalAttempt(generator) => {
                match self
                    .attempt(generator.as_ref(), question, outcome, time_descriptor)
                    .await
                {
                    Ok(reading) => {
                        info!(
                            generator = generator.name(),
                            outcome = outcome.name,
                            "reading generated"
                        );
                        reading
                    }
                    Err(e) => {
                        warn!(
                            generator = generator.name(),
                            outcome = outcome.name,
                            error = %e,
                            "reading generation failed, using fallback reading"
                        );
                        fallback_reading(outcome)
                    }
                }
            }
        }
    }

    async fn attempt(
        &self,
        generator: &dyn TextGenerator,
        question: &str,
        outcome: &Outcome,
        time_descriptor: &str,
    ) -> Result<Reading, LiurenError> {
        let request = GenerationRequest {
            model: self.settings.model.clone(),
            prompt: render_prompt(question, outcome, time_descriptor),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };
        let response = generator.generate(request).await?;
        debug!(
            request_id = response.request_id.as_deref().unwrap_or("-"),
            chars = response.text.chars().count(),
            "generation response received"
        );
        extract_reading(&response.text)
    }
}

impl std::fmt::Debug for ReadingGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadingGenerator")
            .field("strategy", &self.strategy())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Renders the generation prompt for a question and outcome.
pub fn render_prompt(question: &str, outcome: &Outcome, time_descriptor: &str) -> String {
    format!(
        r#"你是一位精通小六壬占卜的大师。请根据以下信息，为求签者提供详细、个性化的解答。

【求签者问题】：{question}

【占卜时间】：{time_descriptor}

【小六壬结果】：
- 神煞：{name}
- 含义：{meaning}
- 古诀：{detail}
- 总体判断：{result}

请用温暖、智慧的语言，从以下三个方面给出解答：

1. **卦象解析**：结合求签者的具体问题，解释这个卦象的含义（100-150字）

2. **事情预测**：预测事情的发展走向和可能的结果（100-150字）

3. **建议指引**：给出具体的行动建议和注意事项（80-120字）

请用JSON格式回复，格式如下：
{{
    "analysis": "卦象解析内容",
    "prediction": "事情预测内容",
    "advice": "建议指引内容"
}}

注意：语言要亲切自然，避免过于玄奥，要结合求签者的具体问题来分析。"#,
        name = outcome.name,
        meaning = outcome.meaning,
        detail = outcome.detail,
        result = outcome.result,
    )
}

/// Extracts a reading from free model output.
///
/// The model may wrap its JSON in commentary, so the span from the first `{`
/// to the last `}` is parsed. All three keys must be present as strings.
pub fn extract_reading(text: &str) -> Result<Reading, LiurenError> {
    let matched = JSON_OBJECT.find(text).ok_or_else(|| LiurenError::Parse {
        message: "no JSON object found in generated text".into(),
    })?;

    serde_json::from_str(matched.as_str()).map_err(|e| LiurenError::Parse {
        message: format!("generated JSON is not a reading: {e}"),
    })
}

/// The deterministic reading used when generation is unavailable or fails.
pub fn fallback_reading(outcome: &Outcome) -> Reading {
    Reading {
        analysis: format!(
            "根据小六壬推算，您所问之事得「{}」之象。{}。",
            outcome.name, outcome.meaning
        ),
        prediction: format!("此事{}，{}", outcome.result, outcome.detail),
        advice: FALLBACK_ADVICE.to_string(),
    }
}
