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

//! # Language detection
//! Identifies the language of an input text and exposes it as a short language code (ISO-639-1
//! where one exists, ISO-639-3 otherwise). Detection is statistical and best-effort: short or
//! mixed-language inputs may be misidentified.
//!
//! ```no_run
//! use indic_pos::pipelines::language_detection::{LanguageDetector, WhatlangDetector};
//!
//! let detector = WhatlangDetector::default();
//! let language = detector.detect("मैं स्कूल जा रहा हूँ।");
//! ```
//! Output: \
//! ```no_run
//! # use indic_pos::pipelines::language_detection::DetectedLanguage;
//! # let output =
//! Some(DetectedLanguage {
//!     code: String::from("hi"),
//!     confidence: 1.0,
//! })
//! # ;
//! ```

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Code used when no language could be identified
pub const UNDETERMINED: &str = "und";

lazy_static! {
    /// Display names for the languages this tool is typically used with
    static ref LANGUAGE_LABELS: HashMap<&'static str, &'static str> = [
        ("hi", "Hindi"),
        ("mr", "Marathi"),
        ("gu", "Gujarati"),
        ("ta", "Tamil"),
        ("te", "Telugu"),
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// # Language identified for an input text
pub struct DetectedLanguage {
    /// Short language code (e.g. `hi`, `ta`, `und`)
    pub code: String,
    /// Detector confidence in [0, 1]
    pub confidence: f64,
}

impl DetectedLanguage {
    pub fn new(code: impl Into<String>, confidence: f64) -> DetectedLanguage {
        DetectedLanguage {
            code: code.into(),
            confidence,
        }
    }

    pub fn undetermined() -> DetectedLanguage {
        DetectedLanguage::new(UNDETERMINED, 0.0)
    }

    /// Human readable name of the language, or the upper-cased code when it has no display name.
    pub fn label(&self) -> String {
        language_label(&self.code)
    }
}

/// Display name for a language code (`hi` -> `Hindi`), falling back to the upper-cased code.
pub fn language_label(code: &str) -> String {
    LANGUAGE_LABELS
        .get(code)
        .map(|label| label.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

/// # Language detection capability
pub trait LanguageDetector {
    /// Returns the detected language, or `None` when the text carries no usable signal.
    fn detect(&self, text: &str) -> Option<DetectedLanguage>;
}

#[derive(Debug, Clone, Default)]
/// # Trigram-based detector backed by `whatlang`
pub struct WhatlangDetector {
    /// Reject detections that `whatlang` does not consider reliable
    pub reliable_only: bool,
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<DetectedLanguage> {
        let info = whatlang::detect(text)?;
        if self.reliable_only && !info.is_reliable() {
            log::debug!(
                "discarding unreliable detection {} ({:.3})",
                info.lang().code(),
                info.confidence()
            );
            return None;
        }
        Some(DetectedLanguage::new(
            iso_639_1(info.lang().code()),
            info.confidence(),
        ))
    }
}

#[derive(Debug, Clone)]
/// # Detector that always reports the same language
/// Used when the language of the input is known beforehand.
pub struct FixedLanguageDetector {
    code: String,
}

impl FixedLanguageDetector {
    pub fn new(code: &str) -> FixedLanguageDetector {
        FixedLanguageDetector {
            code: code.trim().to_lowercase(),
        }
    }
}

impl LanguageDetector for FixedLanguageDetector {
    fn detect(&self, _text: &str) -> Option<DetectedLanguage> {
        Some(DetectedLanguage::new(self.code.clone(), 1.0))
    }
}

/// Maps an ISO-639-3 code to its ISO-639-1 equivalent, when there is one.
pub fn iso_639_1(code: &str) -> &str {
    match code {
        "hin" => "hi",
        "mar" => "mr",
        "guj" => "gu",
        "tam" => "ta",
        "tel" => "te",
        "ben" => "bn",
        "pan" => "pa",
        "kan" => "kn",
        "mal" => "ml",
        "ori" => "or",
        "urd" => "ur",
        "nep" => "ne",
        "sin" => "si",
        "eng" => "en",
        "cmn" => "zh",
        "spa" => "es",
        "por" => "pt",
        "fra" => "fr",
        "deu" => "de",
        "ita" => "it",
        "rus" => "ru",
        "ukr" => "uk",
        "ara" => "ar",
        "pes" => "fa",
        "jpn" => "ja",
        "kor" => "ko",
        "tha" => "th",
        "vie" => "vi",
        "ind" => "id",
        "tur" => "tr",
        "nld" => "nl",
        "pol" => "pl",
        "heb" => "he",
        "ell" => "el",
        "mya" => "my",
        "khm" => "km",
        other => other,
    }
}
