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

//! # Tagging strategy selection
//! Routes a text to the dictionary tagger when a corpus exists for its language, and to the
//! fallback tagger otherwise. A dictionary attempt that errors or yields nothing is followed by
//! exactly one fallback attempt. The selector itself never fails.
//!
//! ```
//! use indic_pos::pipelines::common::{Strategy, TagPair};
//! use indic_pos::pipelines::dictionary_tagging::{CorpusConfig, DictionaryTagger};
//! use indic_pos::pipelines::fallback_tagging::FallbackTagger;
//! use indic_pos::pipelines::strategy::{FallbackReason, StrategySelector};
//! use indic_pos::TaggerError;
//!
//! struct Broken;
//! impl DictionaryTagger for Broken {
//!     fn tag(&self, _: &str, corpus: &CorpusConfig) -> Result<Vec<TagPair>, TaggerError> {
//!         Err(TaggerError::CorpusError(format!("{} missing", corpus.file_name)))
//!     }
//! }
//!
//! struct Spans;
//! impl FallbackTagger for Spans {
//!     fn tag(&self, text: &str) -> Vec<TagPair> {
//!         vec![TagPair::new(text, "MISC")]
//!     }
//! }
//!
//! let selector = StrategySelector::new(&Broken, &Spans);
//! let tagged = selector.select("મારું નામ", "gu");
//! assert_eq!(tagged.strategy, Strategy::Fallback);
//! assert!(matches!(tagged.fallback_reason, Some(FallbackReason::DictionaryFailed(_))));
//! ```

use crate::pipelines::common::{Strategy, TagPair};
use crate::pipelines::dictionary_tagging::{CorpusConfig, DictionaryTagger};
use crate::pipelines::fallback_tagging::FallbackTagger;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

lazy_static! {
    /// Languages with a dictionary corpus, and the corpus used for each
    pub static ref DICTIONARY_LANGUAGES: HashMap<&'static str, CorpusConfig> = [
        ("hi", CorpusConfig { file_name: "hindi.pos" }),
        ("mr", CorpusConfig { file_name: "marathi.pos" }),
        ("gu", CorpusConfig { file_name: "gujarati.pos" }),
    ]
    .into_iter()
    .collect();
}

/// Returns the dictionary corpus configured for a language code, if any.
pub fn dictionary_corpus(language_code: &str) -> Option<&'static CorpusConfig> {
    DICTIONARY_LANGUAGES.get(language_code)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
/// # Reason a result was produced by the fallback tagger
pub enum FallbackReason {
    /// No dictionary corpus exists for the language
    UnsupportedLanguage,
    /// The dictionary tagger returned an error
    DictionaryFailed(String),
    /// The dictionary tagger ran but produced no tags
    DictionaryEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// # Tags produced by one of the strategies
pub struct Tagged {
    /// Ordered (token, tag) pairs, possibly empty for the fallback strategy
    pub tags: Vec<TagPair>,
    /// Strategy that produced `tags`
    pub strategy: Strategy,
    /// Set when `strategy` is `Fallback`
    pub fallback_reason: Option<FallbackReason>,
}

impl Tagged {
    /// True when the dictionary path was attempted for a supported language and did not deliver
    pub fn dictionary_fell_back(&self) -> bool {
        matches!(
            self.fallback_reason,
            Some(FallbackReason::DictionaryFailed(_)) | Some(FallbackReason::DictionaryEmpty)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// # Reason a request produced no result
pub enum FailureReason {
    /// Blank or whitespace-only input, rejected before detection
    InvalidInput,
    /// No strategy produced any tag for a valid input
    TotalFailure,
}

impl FailureReason {
    /// User-facing message for the failure
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::InvalidInput => "Please enter a valid sentence.",
            FailureReason::TotalFailure => "POS tagging failed. Please check your sentence.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
/// # Outcome of a tagging request
pub enum StrategyOutcome {
    Success(Tagged),
    Failure { reason: FailureReason },
}

impl StrategyOutcome {
    pub fn failure(reason: FailureReason) -> StrategyOutcome {
        StrategyOutcome::Failure { reason }
    }

    pub fn tags(&self) -> Option<&[TagPair]> {
        match self {
            StrategyOutcome::Success(tagged) => Some(&tagged.tags),
            StrategyOutcome::Failure { .. } => None,
        }
    }

    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            StrategyOutcome::Success(tagged) => Some(tagged.strategy),
            StrategyOutcome::Failure { .. } => None,
        }
    }
}

impl From<Tagged> for StrategyOutcome {
    fn from(tagged: Tagged) -> Self {
        StrategyOutcome::Success(tagged)
    }
}

/// # Two-tier strategy selector
pub struct StrategySelector<'a> {
    dictionary_tagger: &'a dyn DictionaryTagger,
    fallback_tagger: &'a dyn FallbackTagger,
}

impl<'a> StrategySelector<'a> {
    pub fn new(
        dictionary_tagger: &'a dyn DictionaryTagger,
        fallback_tagger: &'a dyn FallbackTagger,
    ) -> StrategySelector<'a> {
        StrategySelector {
            dictionary_tagger,
            fallback_tagger,
        }
    }

    /// Tags `text` with the strategy matching `language_code`.
    ///
    /// # Arguments
    ///
    /// * `text` - non-blank input text
    /// * `language_code` - detected language code
    ///
    /// # Returns
    ///
    /// * `Tagged` result. The dictionary strategy is only reported with a non-empty sequence; a
    ///   fallback result may be empty.
    pub fn select(&self, text: &str, language_code: &str) -> Tagged {
        let corpus = match dictionary_corpus(language_code) {
            Some(corpus) => corpus,
            None => {
                log::debug!("no dictionary corpus for `{language_code}`, using fallback tagger");
                return self.fallback(text, FallbackReason::UnsupportedLanguage);
            }
        };

        match self.dictionary_tagger.tag(text, corpus) {
            Ok(tags) if !tags.is_empty() => Tagged {
                tags,
                strategy: Strategy::Dictionary,
                fallback_reason: None,
            },
            Ok(_) => {
                log::warn!(
                    "dictionary tagger returned no tags for `{language_code}`, falling back"
                );
                self.fallback(text, FallbackReason::DictionaryEmpty)
            }
            Err(error) => {
                log::warn!("dictionary tagger failed for `{language_code}`: {error}, falling back");
                self.fallback(text, FallbackReason::DictionaryFailed(error.to_string()))
            }
        }
    }

    fn fallback(&self, text: &str, reason: FallbackReason) -> Tagged {
        Tagged {
            tags: self.fallback_tagger.tag(text),
            strategy: Strategy::Fallback,
            fallback_reason: Some(reason),
        }
    }
}
