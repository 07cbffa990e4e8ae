// Copyright 2024 The indic-pos Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Rendering of tagging responses
//! Human-readable text for terminals, and JSON for other programs.

use crate::common::error::TaggerError;
use crate::pipelines::common::Strategy;
use crate::pipelines::pos_tagging::TaggingResponse;
use crate::pipelines::strategy::StrategyOutcome;
use std::fmt;

const DICTIONARY_FALLBACK_WARNING: &str =
    "Dictionary tagging failed. Falling back to transformer model.";

/// Text form of a response, see `render_text`.
pub struct TextRendering<'a>(pub &'a TaggingResponse);

impl fmt::Display for TextRendering<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.0;
        let language = match &response.language {
            Some(language) => language,
            None => {
                if let StrategyOutcome::Failure { reason } = &response.outcome {
                    writeln!(f, "warning: {}", reason.message())?;
                }
                return Ok(());
            }
        };
        let label = language.label();
        writeln!(f, "Detected language: {label} ({})", language.code)?;

        match &response.outcome {
            StrategyOutcome::Success(tagged) => {
                match tagged.strategy {
                    Strategy::Dictionary => {
                        writeln!(f, "POS tags using dictionary tagger ({label})")?;
                    }
                    Strategy::Fallback if tagged.dictionary_fell_back() => {
                        writeln!(f, "POS tags using dictionary tagger ({label})")?;
                        writeln!(f, "warning: {DICTIONARY_FALLBACK_WARNING}")?;
                    }
                    Strategy::Fallback => writeln!(f, "POS tags using transformer model")?,
                }
                if tagged.tags.is_empty() {
                    writeln!(f, "(no tags)")?;
                }
                for pair in &tagged.tags {
                    writeln!(f, "{}\t{}", pair.token, pair.tag)?;
                }
            }
            StrategyOutcome::Failure { reason } => {
                writeln!(f, "POS tags using transformer model")?;
                writeln!(f, "error: {}", reason.message())?;
            }
        }
        Ok(())
    }
}

/// Renders a response as text: detected language, strategy heading, warnings and one
/// `token<TAB>tag` line per tag.
pub fn render_text(response: &TaggingResponse) -> String {
    TextRendering(response).to_string()
}

/// Renders a response as a single line of JSON.
pub fn render_json(response: &TaggingResponse) -> Result<String, TaggerError> {
    Ok(serde_json::to_string(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::common::TagPair;
    use crate::pipelines::language_detection::DetectedLanguage;
    use crate::pipelines::strategy::{FailureReason, FallbackReason, Tagged};

    fn response(language: Option<&str>, outcome: StrategyOutcome) -> TaggingResponse {
        TaggingResponse {
            text: "text".to_string(),
            language: language.map(|code| DetectedLanguage::new(code, 0.9)),
            outcome,
        }
    }

    #[test]
    fn renders_dictionary_tags() {
        let output = render_text(&response(
            Some("hi"),
            StrategyOutcome::Success(Tagged {
                tags: vec![TagPair::new("घर", "NN"), TagPair::new("।", "SYM")],
                strategy: Strategy::Dictionary,
                fallback_reason: None,
            }),
        ));
        assert_eq!(
            output,
            "Detected language: Hindi (hi)\n\
             POS tags using dictionary tagger (Hindi)\n\
             घर\tNN\n\
             ।\tSYM\n"
        );
    }

    #[test]
    fn renders_dictionary_fallback_warning() {
        let output = render_text(&response(
            Some("gu"),
            StrategyOutcome::Success(Tagged {
                tags: vec![],
                strategy: Strategy::Fallback,
                fallback_reason: Some(FallbackReason::DictionaryFailed("missing".to_string())),
            }),
        ));
        assert!(output.contains("warning: Dictionary tagging failed."));
        assert!(output.ends_with("(no tags)\n"));
    }

    #[test]
    fn renders_failures() {
        let invalid = render_text(&response(
            None,
            StrategyOutcome::failure(FailureReason::InvalidInput),
        ));
        assert_eq!(invalid, "warning: Please enter a valid sentence.\n");

        let total = render_text(&response(
            Some("ta"),
            StrategyOutcome::failure(FailureReason::TotalFailure),
        ));
        assert!(total.starts_with("Detected language: Tamil (ta)\n"));
        assert!(total.ends_with("error: POS tagging failed. Please check your sentence.\n"));
    }

    #[test]
    fn renders_json() {
        let json = render_json(&response(
            Some("te"),
            StrategyOutcome::Success(Tagged {
                tags: vec![TagPair::new("హైదరాబాద్", "LOC")],
                strategy: Strategy::Fallback,
                fallback_reason: Some(FallbackReason::UnsupportedLanguage),
            }),
        ))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["language"]["code"], "te");
        assert_eq!(value["outcome"]["status"], "success");
        assert_eq!(value["outcome"]["strategy"], "fallback");
        assert_eq!(
            value["outcome"]["fallback_reason"]["kind"],
            "unsupported_language"
        );
    }
}
