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

//! # Dictionary (unigram) part-of-speech tagger
//! Tags tokens with the tag they most frequently carry in a POS-tagged training corpus, using a
//! constant default label for tokens absent from the corpus. Training corpora follow the format
//! of the NLTK `indian` corpus: one sentence per line, each token written as `word_TAG`.
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use indic_pos::pipelines::dictionary_tagging::{
//!     CorpusConfig, CorpusDictionaryTagger, DictionaryTagger,
//! };
//! use indic_pos::resources::LocalResource;
//! use std::path::PathBuf;
//!
//! let tagger = CorpusDictionaryTagger::new(
//!     LocalResource::from(PathBuf::from("path/to/indian")),
//!     "NN",
//! );
//! let hindi = CorpusConfig {
//!     file_name: "hindi.pos",
//! };
//! let output = tagger.tag("मैं स्कूल जा रहा हूँ।", &hindi)?;
//! # Ok(())
//! # }
//! ```
//! Output: \
//! ```no_run
//! # use indic_pos::pipelines::common::TagPair;
//! # let output =
//! [
//!     TagPair::new("मैं", "PRP"),
//!     TagPair::new("स्कूल", "NN"),
//!     TagPair::new("जा", "VM"),
//!     TagPair::new("रहा", "VAUX"),
//!     TagPair::new("हूँ", "VAUX"),
//!     TagPair::new("।", "SYM"),
//! ]
//! # ;
//! ```

use crate::common::error::TaggerError;
use crate::pipelines::common::TagPair;
use crate::pipelines::tokenization::wordpunct_tokenize;
use crate::resources::ResourceProvider;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Default label assigned to tokens that do not appear in the training corpus
pub const DEFAULT_TAG: &str = "NN";

/// A sentence of (word, tag) pairs read from a tagged corpus
pub type TaggedSentence = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// # Per-language dictionary tagger configuration
pub struct CorpusConfig {
    /// Name of the tagged corpus file (e.g. `hindi.pos`)
    pub file_name: &'static str,
}

/// # Dictionary tagger capability
/// Produces one tag per token for a text, using the corpus identified by `corpus`. Any failure
/// (missing corpus, unreadable corpus...) is returned as an error so that callers may fall back
/// to another strategy.
pub trait DictionaryTagger {
    fn tag(&self, text: &str, corpus: &CorpusConfig) -> Result<Vec<TagPair>, TaggerError>;
}

/// Parses sentences in the `word_TAG` format from a reader.
///
/// Lines starting with `<` are markup and are skipped, as are blank lines. Each token is split
/// at its last underscore and the tag is upper-cased. Tokens without an underscore carry no tag
/// and are dropped.
pub fn parse_tagged_sentences<R: BufRead>(reader: R) -> Result<Vec<TaggedSentence>, TaggerError> {
    let mut sentences = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('<') {
            continue;
        }
        let sentence = line
            .split_whitespace()
            .filter_map(|item| {
                let (word, tag) = item.rsplit_once('_')?;
                if word.is_empty() || tag.is_empty() {
                    return None;
                }
                Some((word.to_string(), tag.to_uppercase()))
            })
            .collect::<TaggedSentence>();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
    }
    Ok(sentences)
}

/// Reads and parses a tagged corpus file.
pub fn read_tagged_sentences(path: &Path) -> Result<Vec<TaggedSentence>, TaggerError> {
    let file = File::open(path).map_err(|e| {
        TaggerError::CorpusError(format!("could not open corpus {}: {e}", path.display()))
    })?;
    parse_tagged_sentences(BufReader::new(file))
}

#[derive(Debug, Clone)]
/// # Unigram lookup tagger with a default-label backoff
pub struct UnigramTagger {
    table: HashMap<String, String>,
    default_tag: String,
}

impl UnigramTagger {
    /// Builds the lookup table from tagged sentences. For each word, the most frequent tag is
    /// kept; ties go to the tag that was seen first in the corpus.
    ///
    /// # Arguments
    ///
    /// * `sentences` - tagged training sentences
    /// * `default_tag` - label returned for words absent from the corpus
    ///
    /// # Example
    ///
    /// ```
    /// use indic_pos::pipelines::dictionary_tagging::UnigramTagger;
    ///
    /// let sentences = vec![vec![
    ///     ("राम".to_string(), "NNP".to_string()),
    ///     ("गया".to_string(), "VM".to_string()),
    /// ]];
    /// let tagger = UnigramTagger::train(&sentences, "NN");
    /// assert_eq!(tagger.tag_token("गया"), "VM");
    /// assert_eq!(tagger.tag_token("सीता"), "NN");
    /// ```
    pub fn train<'a, I>(sentences: I, default_tag: &str) -> UnigramTagger
    where
        I: IntoIterator<Item = &'a TaggedSentence>,
    {
        // (tag, count, first seen position) per word
        let mut counts: HashMap<&str, Vec<(&str, usize, usize)>> = HashMap::new();
        let mut position = 0usize;
        for sentence in sentences {
            for (word, tag) in sentence {
                let tag_counts = counts.entry(word.as_str()).or_default();
                match tag_counts.iter_mut().find(|(t, _, _)| *t == tag.as_str()) {
                    Some((_, count, _)) => *count += 1,
                    None => tag_counts.push((tag.as_str(), 1, position)),
                }
                position += 1;
            }
        }

        let table = counts
            .into_iter()
            .filter_map(|(word, tag_counts)| {
                tag_counts
                    .into_iter()
                    .max_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)))
                    .map(|(tag, _, _)| (word.to_string(), tag.to_string()))
            })
            .collect::<HashMap<String, String>>();

        UnigramTagger {
            table,
            default_tag: default_tag.to_string(),
        }
    }

    /// Number of distinct words in the lookup table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn default_tag(&self) -> &str {
        &self.default_tag
    }

    pub fn tag_token(&self, token: &str) -> &str {
        self.table
            .get(token)
            .map(String::as_str)
            .unwrap_or(&self.default_tag)
    }

    /// Tags pre-tokenized input, one tag per token in input order.
    pub fn tag_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<TagPair> {
        tokens
            .iter()
            .map(|token| {
                let token = token.as_ref();
                TagPair::new(token, self.tag_token(token))
            })
            .collect()
    }

    /// Tokenizes the text with the word/punctuation rule and tags every token.
    pub fn tag(&self, text: &str) -> Vec<TagPair> {
        self.tag_tokens(&wordpunct_tokenize(text))
    }
}

/// # Dictionary tagger backed by tagged corpus files
/// The corpus resource points either to a directory holding the `<language>.pos` files (directly
/// or in an `indian/` subdirectory, as laid out by the NLTK archive) or to a single corpus file.
/// Lookup tables are built on first use for each corpus and cached for the lifetime of the tagger.
pub struct CorpusDictionaryTagger {
    corpus_resource: Box<dyn ResourceProvider + Send + Sync>,
    default_tag: String,
    taggers: RwLock<HashMap<&'static str, Arc<UnigramTagger>>>,
}

impl CorpusDictionaryTagger {
    /// Build a new `CorpusDictionaryTagger`. Nothing is read until the first request.
    ///
    /// # Arguments
    ///
    /// * `corpus_resource` - `ResourceProvider` pointing to the corpus directory or file
    /// * `default_tag` - label returned for words absent from the corpus
    pub fn new<R>(corpus_resource: R, default_tag: &str) -> CorpusDictionaryTagger
    where
        R: ResourceProvider + Send + Sync + 'static,
    {
        CorpusDictionaryTagger {
            corpus_resource: Box::new(corpus_resource),
            default_tag: default_tag.to_string(),
            taggers: RwLock::new(HashMap::new()),
        }
    }

    fn corpus_path(&self, corpus: &CorpusConfig) -> Result<PathBuf, TaggerError> {
        let root = self.corpus_resource.get_local_path()?;
        if root.is_file() {
            return if root.file_name() == Some(OsStr::new(corpus.file_name)) {
                Ok(root)
            } else {
                Err(TaggerError::CorpusError(format!(
                    "corpus resource {} is not {}",
                    root.display(),
                    corpus.file_name
                )))
            };
        }
        [
            root.join(corpus.file_name),
            root.join("indian").join(corpus.file_name),
        ]
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            TaggerError::CorpusError(format!(
                "corpus {} not found under {}",
                corpus.file_name,
                root.display()
            ))
        })
    }

    /// Returns the lookup tagger for a corpus, building it if needed.
    pub fn get_tagger(&self, corpus: &CorpusConfig) -> Result<Arc<UnigramTagger>, TaggerError> {
        if let Some(tagger) = self
            .taggers
            .read()
            .ok()
            .and_then(|taggers| taggers.get(corpus.file_name).cloned())
        {
            return Ok(tagger);
        }

        let path = self.corpus_path(corpus)?;
        log::info!("building dictionary tagger from {}", path.display());
        let sentences = read_tagged_sentences(&path)?;
        let tagger = UnigramTagger::train(&sentences, &self.default_tag);
        if tagger.is_empty() {
            return Err(TaggerError::CorpusError(format!(
                "corpus {} contains no tagged tokens",
                path.display()
            )));
        }
        log::debug!(
            "{} sentences, {} distinct words in {}",
            sentences.len(),
            tagger.len(),
            corpus.file_name
        );

        let tagger = Arc::new(tagger);
        let mut taggers = self
            .taggers
            .write()
            .map_err(|_| TaggerError::CorpusError("tagger cache poisoned".to_string()))?;
        Ok(match taggers.entry(corpus.file_name) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(tagger).clone(),
        })
    }
}

impl DictionaryTagger for CorpusDictionaryTagger {
    fn tag(&self, text: &str, corpus: &CorpusConfig) -> Result<Vec<TagPair>, TaggerError> {
        Ok(self.get_tagger(corpus)?.tag(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::LocalResource;
    use std::io::Cursor;

    const CORPUS: &str = "<Corpora type=\"Monolingual-Tagged\" Language=\"Hindi\">\n\
        मैं_PRP स्कूल_NN जा_VM रहा_VAUX हूँ_VAUX ।_SYM\n\
        \n\
        वह_PRP घर_NN जा_VM रहा_VAUX है_VAUX ।_SYM\n\
        जा_nn\n\
        नमस्ते\n\
        </Corpora>\n";

    #[test]
    fn parses_corpus_lines() {
        let sentences = parse_tagged_sentences(Cursor::new(CORPUS)).unwrap();
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0][0], ("मैं".to_string(), "PRP".to_string()));
        assert_eq!(sentences[0][5], ("।".to_string(), "SYM".to_string()));
        // tags are upper-cased
        assert_eq!(sentences[2], vec![("जा".to_string(), "NN".to_string())]);
    }

    #[test]
    fn splits_on_last_underscore() {
        let sentences = parse_tagged_sentences(Cursor::new("a_b_NN c_VM")).unwrap();
        assert_eq!(sentences[0][0], ("a_b".to_string(), "NN".to_string()));
    }

    #[test]
    fn most_frequent_tag_wins() {
        let sentences = parse_tagged_sentences(Cursor::new(CORPUS)).unwrap();
        let tagger = UnigramTagger::train(&sentences, DEFAULT_TAG);
        assert_eq!(tagger.tag_token("जा"), "VM");
        assert_eq!(tagger.tag_token("हूँ"), "VAUX");
    }

    #[test]
    fn ties_go_to_first_seen_tag() {
        let sentences = vec![
            vec![("x".to_string(), "JJ".to_string())],
            vec![("x".to_string(), "NN".to_string())],
        ];
        let tagger = UnigramTagger::train(&sentences, DEFAULT_TAG);
        assert_eq!(tagger.tag_token("x"), "JJ");
    }

    #[test]
    fn unknown_tokens_get_default_tag() {
        let sentences = parse_tagged_sentences(Cursor::new(CORPUS)).unwrap();
        let tagger = UnigramTagger::train(&sentences, DEFAULT_TAG);
        let output = tagger.tag("मैं बाज़ार जा रहा हूँ।");
        assert_eq!(
            output,
            vec![
                TagPair::new("मैं", "PRP"),
                TagPair::new("बाज़ार", "NN"),
                TagPair::new("जा", "VM"),
                TagPair::new("रहा", "VAUX"),
                TagPair::new("हूँ", "VAUX"),
                TagPair::new("।", "SYM"),
            ]
        );
    }

    #[test]
    fn corpus_tagger_reads_nested_directory_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("indian")).unwrap();
        std::fs::write(dir.path().join("indian").join("hindi.pos"), CORPUS).unwrap();

        let tagger =
            CorpusDictionaryTagger::new(LocalResource::from(dir.path().to_path_buf()), "NN");
        let hindi = CorpusConfig {
            file_name: "hindi.pos",
        };
        let first = tagger.get_tagger(&hindi).unwrap();
        let second = tagger.get_tagger(&hindi).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            tagger.tag("स्कूल", &hindi).unwrap(),
            vec![TagPair::new("स्कूल", "NN")]
        );
    }

    #[test]
    fn missing_corpus_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let tagger =
            CorpusDictionaryTagger::new(LocalResource::from(dir.path().to_path_buf()), "NN");
        let gujarati = CorpusConfig {
            file_name: "gujarati.pos",
        };
        assert!(matches!(
            tagger.tag("હું શાળાએ જાઉં છું", &gujarati),
            Err(TaggerError::CorpusError(_))
        ));
    }

    #[test]
    fn corpus_without_tags_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marathi.pos"), "<Corpora>\nनमस्ते\n</Corpora>\n").unwrap();
        let tagger =
            CorpusDictionaryTagger::new(LocalResource::from(dir.path().to_path_buf()), "NN");
        let marathi = CorpusConfig {
            file_name: "marathi.pos",
        };
        assert!(tagger.tag("मी शाळेत जातो", &marathi).is_err());
    }

    #[test]
    fn single_file_resource_only_serves_its_own_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let hindi_path = dir.path().join("hindi.pos");
        std::fs::write(&hindi_path, CORPUS).unwrap();
        let tagger = CorpusDictionaryTagger::new(LocalResource::from(hindi_path), "NN");

        let hindi = CorpusConfig {
            file_name: "hindi.pos",
        };
        let marathi = CorpusConfig {
            file_name: "marathi.pos",
        };
        assert_eq!(
            tagger.tag("स्कूल", &hindi).unwrap(),
            vec![TagPair::new("स्कूल", "NN")]
        );
        assert!(matches!(
            tagger.tag("मैं स्कूल", &marathi),
            Err(TaggerError::CorpusError(_))
        ));
    }
}
