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

//! # Part Of Speech pipeline
//! Detects the language of a sentence and extracts Part of Speech tags for it. Hindi, Marathi and
//! Gujarati are tagged with a dictionary tagger trained on the NLTK `indian` corpus; other
//! languages (and dictionary failures) go through the fallback tagger.
//!
//! The example below illustrate how to run the pipeline:
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use indic_pos::pipelines::pos_tagging::POSTaggingPipeline;
//! let pipeline = POSTaggingPipeline::new(Default::default())?;
//!
//! let response = pipeline.tag("मैं स्कूल जा रहा हूँ।");
//! # Ok(())
//! # }
//! ```
//! Output: \
//! ```no_run
//! # use indic_pos::pipelines::common::{Strategy, TagPair};
//! # use indic_pos::pipelines::language_detection::DetectedLanguage;
//! # use indic_pos::pipelines::pos_tagging::TaggingResponse;
//! # use indic_pos::pipelines::strategy::{StrategyOutcome, Tagged};
//! # let output =
//! TaggingResponse {
//!     text: String::from("मैं स्कूल जा रहा हूँ।"),
//!     language: Some(DetectedLanguage {
//!         code: String::from("hi"),
//!         confidence: 1.0,
//!     }),
//!     outcome: StrategyOutcome::Success(Tagged {
//!         tags: vec![
//!             TagPair::new("मैं", "PRP"),
//!             TagPair::new("स्कूल", "NN"),
//!             TagPair::new("जा", "VM"),
//!             TagPair::new("रहा", "VAUX"),
//!             TagPair::new("हूँ", "VAUX"),
//!             TagPair::new("।", "SYM"),
//!         ],
//!         strategy: Strategy::Dictionary,
//!         fallback_reason: None,
//!     }),
//! }
//! # ;
//! ```

use crate::common::error::TaggerError;
use crate::common::Config;
use crate::pipelines::dictionary_tagging::{CorpusDictionaryTagger, DictionaryTagger, DEFAULT_TAG};
use crate::pipelines::fallback_tagging::{FallbackModelConfig, FallbackTagger, NoopFallbackTagger};
use crate::pipelines::language_detection::{DetectedLanguage, LanguageDetector, WhatlangDetector};
use crate::pipelines::strategy::{
    FailureReason, FallbackReason, StrategyOutcome, StrategySelector,
};
use crate::resources::LocalResource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(feature = "remote")]
use crate::resources::{CorpusResources, RemoteResource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// # Configuration for POSTaggingPipeline
pub struct POSTaggingConfig {
    /// Directory holding the tagged corpora (default: NLTK `indian` corpus, downloaded on first use)
    pub corpus_dir: Option<PathBuf>,
    /// Tag assigned by the dictionary tagger to words absent from its corpus
    pub default_tag: String,
    /// Only accept detections the detector considers reliable
    pub reliable_detection_only: bool,
    /// Load the transformer fallback model (requires the `transformer` feature)
    pub use_fallback_model: bool,
    /// Local fallback model (default: pretrained multilingual model)
    pub fallback_model: Option<FallbackModelConfig>,
}

impl Default for POSTaggingConfig {
    fn default() -> POSTaggingConfig {
        POSTaggingConfig {
            corpus_dir: None,
            default_tag: DEFAULT_TAG.to_string(),
            reliable_detection_only: false,
            use_fallback_model: true,
            fallback_model: None,
        }
    }
}

impl Config for POSTaggingConfig {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// # Result of tagging one input
pub struct TaggingResponse {
    /// Input text as submitted
    pub text: String,
    /// Detected language, absent when the input was rejected before detection
    pub language: Option<DetectedLanguage>,
    /// Tags or failure
    pub outcome: StrategyOutcome,
}

impl TaggingResponse {
    /// Response for an input rejected before detection.
    pub fn invalid_input(text: &str) -> TaggingResponse {
        TaggingResponse {
            text: text.to_string(),
            language: None,
            outcome: StrategyOutcome::failure(FailureReason::InvalidInput),
        }
    }
}

/// # POSTaggingPipeline to detect the language of a text and tag it
pub struct POSTaggingPipeline {
    detector: Box<dyn LanguageDetector>,
    dictionary_tagger: Box<dyn DictionaryTagger>,
    fallback_tagger: Box<dyn FallbackTagger>,
}

impl POSTaggingPipeline {
    /// Build a new `POSTaggingPipeline`. The fallback model (if any) is loaded here, once; the
    /// dictionary corpora are read lazily on first use of each language.
    ///
    /// # Arguments
    ///
    /// * `config` - `POSTaggingConfig` object containing the corpus location and fallback model
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> anyhow::Result<()> {
    /// use indic_pos::pipelines::pos_tagging::{POSTaggingConfig, POSTaggingPipeline};
    ///
    /// let config = POSTaggingConfig {
    ///     corpus_dir: Some("path/to/nltk_data/corpora".into()),
    ///     use_fallback_model: false,
    ///     ..Default::default()
    /// };
    /// let pipeline = POSTaggingPipeline::new(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: POSTaggingConfig) -> Result<POSTaggingPipeline, TaggerError> {
        let detector = WhatlangDetector {
            reliable_only: config.reliable_detection_only,
        };
        let dictionary_tagger = build_dictionary_tagger(&config)?;
        Ok(POSTaggingPipeline {
            detector: Box::new(detector),
            dictionary_tagger: Box::new(dictionary_tagger),
            fallback_tagger: build_fallback_tagger(&config),
        })
    }

    /// Assembles a pipeline from its collaborators.
    pub fn from_parts<D, T, F>(detector: D, dictionary_tagger: T, fallback_tagger: F) -> Self
    where
        D: LanguageDetector + 'static,
        T: DictionaryTagger + 'static,
        F: FallbackTagger + 'static,
    {
        POSTaggingPipeline {
            detector: Box::new(detector),
            dictionary_tagger: Box::new(dictionary_tagger),
            fallback_tagger: Box::new(fallback_tagger),
        }
    }

    /// Replaces the language detector, e.g. to force a known language.
    pub fn with_detector<D: LanguageDetector + 'static>(mut self, detector: D) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Detects the language of `text` and tags it.
    ///
    /// Blank input is rejected without running detection or tagging. A valid input in a language
    /// without dictionary corpus for which the fallback tagger finds nothing is reported as a
    /// total failure. An empty fallback result after a failed dictionary attempt is reported as a
    /// success with no tags.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> anyhow::Result<()> {
    /// # use indic_pos::pipelines::pos_tagging::POSTaggingPipeline;
    /// let pipeline = POSTaggingPipeline::new(Default::default())?;
    /// let response = pipeline.tag("நான் பள்ளிக்கு போகிறேன்.");
    /// # Ok(())
    /// # }
    /// ```
    pub fn tag(&self, text: &str) -> TaggingResponse {
        if text.trim().is_empty() {
            return TaggingResponse::invalid_input(text);
        }

        let language = self
            .detector
            .detect(text)
            .unwrap_or_else(DetectedLanguage::undetermined);
        log::debug!(
            "detected language `{}` (confidence {:.3})",
            language.code,
            language.confidence
        );

        let selector = StrategySelector::new(
            self.dictionary_tagger.as_ref(),
            self.fallback_tagger.as_ref(),
        );
        let tagged = selector.select(text, &language.code);

        let outcome = if tagged.tags.is_empty()
            && tagged.fallback_reason == Some(FallbackReason::UnsupportedLanguage)
        {
            StrategyOutcome::failure(FailureReason::TotalFailure)
        } else {
            StrategyOutcome::Success(tagged)
        };

        TaggingResponse {
            text: text.to_string(),
            language: Some(language),
            outcome,
        }
    }
}

fn build_dictionary_tagger(config: &POSTaggingConfig) -> Result<CorpusDictionaryTagger, TaggerError> {
    if let Some(corpus_dir) = &config.corpus_dir {
        return Ok(CorpusDictionaryTagger::new(
            LocalResource::from(corpus_dir.clone()),
            &config.default_tag,
        ));
    }
    #[cfg(feature = "remote")]
    {
        Ok(CorpusDictionaryTagger::new(
            RemoteResource::from_pretrained(CorpusResources::NLTK_INDIAN),
            &config.default_tag,
        ))
    }
    #[cfg(not(feature = "remote"))]
    {
        Err(TaggerError::InvalidConfigurationError(
            "no corpus directory configured and remote resources are disabled".to_string(),
        ))
    }
}

#[cfg(feature = "transformer")]
fn build_fallback_tagger(config: &POSTaggingConfig) -> Box<dyn FallbackTagger> {
    use crate::pipelines::fallback_tagging::{TransformerTagger, TransformerTaggerConfig};

    if !config.use_fallback_model {
        log::info!("fallback model disabled, fallback tagging will return no tags");
        return Box::new(NoopFallbackTagger);
    }
    let model_config = match &config.fallback_model {
        Some(model) => TransformerTaggerConfig::from(model),
        None => TransformerTaggerConfig::default(),
    };
    match TransformerTagger::new(model_config) {
        Ok(tagger) => Box::new(tagger),
        Err(error) => {
            log::warn!("could not load fallback model: {error}, fallback tagging will return no tags");
            Box::new(NoopFallbackTagger)
        }
    }
}

#[cfg(not(feature = "transformer"))]
fn build_fallback_tagger(config: &POSTaggingConfig) -> Box<dyn FallbackTagger> {
    if config.use_fallback_model {
        log::warn!(
            "built without the `transformer` feature, fallback tagging will return no tags"
        );
    }
    Box::new(NoopFallbackTagger)
}
