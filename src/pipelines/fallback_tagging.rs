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

//! # Fallback tagging
//! Language-agnostic tagger used when no dictionary corpus is available for the detected
//! language, or when the dictionary tagger fails. The fallback never fails: any error in the
//! underlying model results in an empty tag sequence.
//!
//! With the `transformer` feature, `TransformerTagger` runs a pretrained token classification
//! model (by default XLM-RoBERTa fine-tuned on English NER, or any converted checkpoint described
//! by a `FallbackModelConfig`). Sub-word predictions are consolidated into words, and consecutive words
//! sharing a `B-`/`I-` label are merged into a single span.
//!
//! ```no_run
//! # #[cfg(feature = "transformer")]
//! # fn main() -> anyhow::Result<()> {
//! use indic_pos::pipelines::fallback_tagging::{FallbackTagger, TransformerTagger};
//!
//! let tagger = TransformerTagger::new(Default::default())?;
//! let output = tagger.tag("सचिन तेंदुलकर मुंबई में रहते हैं।");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "transformer"))]
//! # fn main() {}
//! ```
//! Output: \
//! ```no_run
//! # use indic_pos::pipelines::common::TagPair;
//! # let output =
//! [
//!     TagPair::new("सचिन तेंदुलकर", "PER"),
//!     TagPair::new("मुंबई", "LOC"),
//! ]
//! # ;
//! ```

use crate::pipelines::common::TagPair;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// # Fallback tagging capability
/// Maps a text to an ordered list of (span, label) pairs. Implementations never propagate errors
/// and return an empty sequence on any failure.
pub trait FallbackTagger {
    fn tag(&self, text: &str) -> Vec<TagPair>;
}

#[derive(Debug, Clone, Copy, Default)]
/// # Fallback tagger used when no model is available
/// Always returns an empty sequence.
pub struct NoopFallbackTagger;

impl FallbackTagger for NoopFallbackTagger {
    fn tag(&self, _text: &str) -> Vec<TagPair> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// # Architectures supported for the fallback model
pub enum FallbackModelType {
    Bert,
    DistilBert,
    Roberta,
    XlmRoberta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// # Device placement for the fallback model
pub enum DeviceOption {
    /// CUDA when available, CPU otherwise
    #[default]
    Auto,
    Cpu,
    Cuda,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// # Serializable description of a converted fallback model on disk
/// Weights are expected in the `tch` format produced by the conversion utilities of `rust-bert`.
pub struct FallbackModelConfig {
    pub model_type: FallbackModelType,
    pub model_path: PathBuf,
    pub config_path: PathBuf,
    pub vocab_path: PathBuf,
    #[serde(default)]
    pub merges_path: Option<PathBuf>,
    #[serde(default)]
    pub lower_case: bool,
    #[serde(default)]
    pub device: DeviceOption,
}

impl FallbackModelConfig {
    /// Configuration for a converted multilingual BERT NER checkpoint
    /// (e.g. `Davlan/bert-base-multilingual-cased-ner-hrl`) stored in `model_dir` as
    /// `rust_model.ot`, `config.json` and `vocab.txt`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use indic_pos::pipelines::fallback_tagging::FallbackModelConfig;
    /// use indic_pos::pipelines::pos_tagging::POSTaggingConfig;
    ///
    /// let config = POSTaggingConfig {
    ///     fallback_model: Some(FallbackModelConfig::multilingual_bert(
    ///         "models/bert-base-multilingual-cased-ner-hrl",
    ///     )),
    ///     ..Default::default()
    /// };
    /// ```
    pub fn multilingual_bert<P: AsRef<Path>>(model_dir: P) -> FallbackModelConfig {
        let model_dir = model_dir.as_ref();
        FallbackModelConfig {
            model_type: FallbackModelType::Bert,
            model_path: model_dir.join("rust_model.ot"),
            config_path: model_dir.join("config.json"),
            vocab_path: model_dir.join("vocab.txt"),
            merges_path: None,
            lower_case: false,
            device: DeviceOption::Auto,
        }
    }
}

#[cfg(feature = "transformer")]
pub use transformer::{TransformerTagger, TransformerTaggerConfig};

#[cfg(feature = "transformer")]
mod transformer {
    use super::{DeviceOption, FallbackModelConfig, FallbackModelType, FallbackTagger};
    use crate::common::error::TaggerError;
    use crate::pipelines::common::TagPair;
    use rust_bert::pipelines::common::{ModelResource, ModelType};
    use rust_bert::pipelines::ner::NERModel;
    use rust_bert::pipelines::token_classification::{
        LabelAggregationOption, TokenClassificationConfig,
    };
    use rust_bert::resources::{LocalResource, RemoteResource, ResourceProvider};
    use rust_bert::roberta::{
        RobertaConfigResources, RobertaModelResources, RobertaVocabResources,
    };
    use std::panic::{self, AssertUnwindSafe};
    use std::path::PathBuf;
    use tch::Device;

    impl From<FallbackModelType> for ModelType {
        fn from(model_type: FallbackModelType) -> Self {
            match model_type {
                FallbackModelType::Bert => ModelType::Bert,
                FallbackModelType::DistilBert => ModelType::DistilBert,
                FallbackModelType::Roberta => ModelType::Roberta,
                FallbackModelType::XlmRoberta => ModelType::XLMRoberta,
            }
        }
    }

    /// # Configuration for TransformerTagger
    /// Contains the resources of the model to load and the device to place it on.
    pub struct TransformerTaggerConfig {
        /// Model type
        pub model_type: FallbackModelType,
        /// Model weights resource (default: multilingual XLM-RoBERTa NER model)
        pub model_resource: Box<dyn ResourceProvider + Send>,
        /// Config resource (default: multilingual XLM-RoBERTa NER model)
        pub config_resource: Box<dyn ResourceProvider + Send>,
        /// Vocab resource (default: multilingual XLM-RoBERTa NER model)
        pub vocab_resource: Box<dyn ResourceProvider + Send>,
        /// Merges resource, only needed for BPE tokenizers (RoBERTa)
        pub merges_resource: Option<Box<dyn ResourceProvider + Send>>,
        /// Automatically lower case all input upon tokenization (assumes a lower-cased model)
        pub lower_case: bool,
        /// Device to place the model on (default: CUDA/GPU when available)
        pub device: Device,
    }

    impl TransformerTaggerConfig {
        /// Configuration pointing to a converted model on the local file system.
        ///
        /// # Arguments
        ///
        /// * `model_type` - architecture of the converted checkpoint
        /// * `model_path` - weights (e.g. `rust_model.ot`)
        /// * `config_path` - model configuration (e.g. `config.json`)
        /// * `vocab_path` - tokenizer vocabulary (e.g. `vocab.txt`, `sentencepiece.bpe.model`)
        /// * `merges_path` - BPE merges, only needed for RoBERTa
        pub fn from_local(
            model_type: FallbackModelType,
            model_path: PathBuf,
            config_path: PathBuf,
            vocab_path: PathBuf,
            merges_path: Option<PathBuf>,
        ) -> TransformerTaggerConfig {
            TransformerTaggerConfig {
                model_type,
                model_resource: Box::new(LocalResource {
                    local_path: model_path,
                }),
                config_resource: Box::new(LocalResource {
                    local_path: config_path,
                }),
                vocab_resource: Box::new(LocalResource {
                    local_path: vocab_path,
                }),
                merges_resource: merges_path
                    .map(|local_path| Box::new(LocalResource { local_path }) as Box<_>),
                lower_case: false,
                device: Device::cuda_if_available(),
            }
        }
    }

    impl From<DeviceOption> for Device {
        fn from(device: DeviceOption) -> Self {
            match device {
                DeviceOption::Auto => Device::cuda_if_available(),
                DeviceOption::Cpu => Device::Cpu,
                DeviceOption::Cuda => Device::Cuda(0),
            }
        }
    }

    impl From<&FallbackModelConfig> for TransformerTaggerConfig {
        fn from(model_config: &FallbackModelConfig) -> Self {
            let mut config = TransformerTaggerConfig::from_local(
                model_config.model_type,
                model_config.model_path.clone(),
                model_config.config_path.clone(),
                model_config.vocab_path.clone(),
                model_config.merges_path.clone(),
            );
            config.lower_case = model_config.lower_case;
            config.device = model_config.device.into();
            config
        }
    }

    impl Default for TransformerTaggerConfig {
        /// Provides an XLM-RoBERTa token classification model fine-tuned on English (CoNLL-03) NER.
        /// The multilingual encoder transfers to other scripts with reduced accuracy; see
        /// `FallbackModelConfig::multilingual_bert` for a checkpoint trained on more languages.
        fn default() -> TransformerTaggerConfig {
            TransformerTaggerConfig {
                model_type: FallbackModelType::XlmRoberta,
                model_resource: Box::new(RemoteResource::from_pretrained(
                    RobertaModelResources::XLM_ROBERTA_NER_EN,
                )),
                config_resource: Box::new(RemoteResource::from_pretrained(
                    RobertaConfigResources::XLM_ROBERTA_NER_EN,
                )),
                vocab_resource: Box::new(RemoteResource::from_pretrained(
                    RobertaVocabResources::XLM_ROBERTA_NER_EN,
                )),
                merges_resource: None,
                lower_case: false,
                device: Device::cuda_if_available(),
            }
        }
    }

    impl From<TransformerTaggerConfig> for TokenClassificationConfig {
        fn from(config: TransformerTaggerConfig) -> Self {
            let mut token_classification_config = TokenClassificationConfig::new(
                config.model_type.into(),
                ModelResource::Torch(config.model_resource),
                config.config_resource,
                config.vocab_resource,
                config.merges_resource,
                config.lower_case,
                None,
                None,
                LabelAggregationOption::First,
            );
            token_classification_config.device = config.device;
            token_classification_config
        }
    }

    /// # Fallback tagger backed by a pretrained token classification model
    /// The model is loaded once and only used for inference afterwards.
    pub struct TransformerTagger {
        model: NERModel,
    }

    impl TransformerTagger {
        /// Loads the model described by `config`, downloading remote resources if needed.
        pub fn new(config: TransformerTaggerConfig) -> Result<TransformerTagger, TaggerError> {
            log::info!("loading fallback model ({:?})", config.model_type);
            let model = NERModel::new(config.into())?;
            Ok(TransformerTagger { model })
        }
    }

    impl FallbackTagger for TransformerTagger {
        fn tag(&self, text: &str) -> Vec<TagPair> {
            let input = [text];
            match panic::catch_unwind(AssertUnwindSafe(|| {
                self.model.predict_full_entities(&input)
            })) {
                Ok(output) => output
                    .into_iter()
                    .flatten()
                    .map(|entity| TagPair::new(entity.word, entity.label))
                    .collect(),
                Err(_) => {
                    log::error!("fallback model failed on input, returning no tags");
                    Vec::new()
                }
            }
        }
    }
}
