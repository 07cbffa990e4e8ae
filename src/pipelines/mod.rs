//! # Ready-to-use tagging pipelines
//!
//! The end-to-end pipeline (`pos_tagging`) combines the following building blocks, each usable on
//! its own:
//!
//! #### 1. Language detection
//! Identifies the language of a text and returns a short language code.
//! ```no_run
//! use indic_pos::pipelines::language_detection::{LanguageDetector, WhatlangDetector};
//! let language = WhatlangDetector::default().detect("મારું નામ અમી છે.");
//! ```
//!
//! #### 2. Dictionary tagging
//! Unigram lookup tagger trained on a POS-tagged corpus, with a default label for unknown words.
//! Available for Hindi, Marathi and Gujarati.
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use indic_pos::pipelines::dictionary_tagging::{CorpusDictionaryTagger, DictionaryTagger};
//! use indic_pos::pipelines::strategy::dictionary_corpus;
//! use indic_pos::resources::LocalResource;
//! use std::path::PathBuf;
//!
//! let tagger = CorpusDictionaryTagger::new(LocalResource::from(PathBuf::from("corpora")), "NN");
//! let corpus = dictionary_corpus("mr").unwrap();
//! let output = tagger.tag("मी शाळेत जातो.", corpus)?;
//! # Ok(())
//! # }
//! ```
//!
//! #### 3. Fallback tagging
//! Pretrained multilingual token classification model (`transformer` feature), used for all
//! other languages and whenever the dictionary tagger does not deliver.
//!
//! #### 4. Strategy selection
//! Routes a text to one of the two taggers based on its language, falling back once on failure.

pub mod common;
pub mod dictionary_tagging;
pub mod fallback_tagging;
pub mod language_detection;
pub mod pos_tagging;
pub mod strategy;
pub mod tokenization;
