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

//! # Word/punctuation tokenizer
//! Splits a text into maximal runs of word characters and maximal runs of punctuation
//! (anything that is neither a word character nor whitespace). Word characters follow the Unicode
//! definition, so the combining vowel signs of Indic scripts stay attached to their word:
//!
//! ```
//! use indic_pos::pipelines::tokenization::wordpunct_tokenize;
//!
//! let tokens = wordpunct_tokenize("मैं स्कूल जा रहा हूँ।");
//! assert_eq!(tokens, ["मैं", "स्कूल", "जा", "रहा", "हूँ", "।"]);
//! ```

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORDPUNCT: Regex = Regex::new(r"\w+|[^\w\s]+").unwrap();
}

/// Tokenizes a text into words and punctuation runs, preserving input order.
pub fn wordpunct_tokenize(text: &str) -> Vec<&str> {
    WORDPUNCT.find_iter(text).map(|m| m.as_str()).collect()
}
