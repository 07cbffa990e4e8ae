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

//! # Common types shared by the tagging backends
//! Tag sequences produced by either backend are expressed as ordered `TagPair`s, and every
//! successful result records the `Strategy` that produced it.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// # Token and its part-of-speech label
pub struct TagPair {
    /// Token (dictionary tagger) or word span (fallback tagger) as it appears in the input
    pub token: String,
    /// Tag label (e.g. NN, VM, PSP for the dictionary tagger)
    pub tag: String,
}

impl TagPair {
    pub fn new(token: impl Into<String>, tag: impl Into<String>) -> TagPair {
        TagPair {
            token: token.into(),
            tag: tag.into(),
        }
    }
}

impl<T: Into<String>, L: Into<String>> From<(T, L)> for TagPair {
    fn from(pair: (T, L)) -> Self {
        TagPair::new(pair.0, pair.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// # Tagging backend used to produce a result
pub enum Strategy {
    /// Unigram lookup tagger trained on a per-language tagged corpus
    Dictionary,
    /// Pretrained multilingual sequence-labeling model
    Fallback,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Dictionary => "dictionary",
            Strategy::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_labels() {
        assert_eq!(Strategy::Dictionary.to_string(), "dictionary");
        assert_eq!(Strategy::Fallback.to_string(), "fallback");
        assert_eq!(
            serde_json::to_string(&Strategy::Fallback).unwrap(),
            "\"fallback\""
        );
    }

    #[test]
    fn tag_pair_from_tuple() {
        let pair: TagPair = ("स्कूल", "NN").into();
        assert_eq!(pair, TagPair::new("स्कूल", "NN"));
    }
}
