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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("Endpoint not available error: {0}")]
    FileDownloadError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Corpus error: {0}")]
    CorpusError(String),

    #[error("Invalid configuration error: {0}")]
    InvalidConfigurationError(String),

    #[error("Model error: {0}")]
    ModelError(String),
}

#[cfg(feature = "remote")]
impl From<cached_path::Error> for TaggerError {
    fn from(error: cached_path::Error) -> Self {
        TaggerError::FileDownloadError(error.to_string())
    }
}

impl From<std::io::Error> for TaggerError {
    fn from(error: std::io::Error) -> Self {
        TaggerError::IOError(error.to_string())
    }
}

impl From<serde_json::Error> for TaggerError {
    fn from(error: serde_json::Error) -> Self {
        TaggerError::InvalidConfigurationError(error.to_string())
    }
}

#[cfg(feature = "transformer")]
impl From<rust_bert::RustBertError> for TaggerError {
    fn from(error: rust_bert::RustBertError) -> Self {
        TaggerError::ModelError(error.to_string())
    }
}

#[cfg(feature = "transformer")]
impl From<tch::TchError> for TaggerError {
    fn from(error: tch::TchError) -> Self {
        TaggerError::ModelError(error.to_string())
    }
}
