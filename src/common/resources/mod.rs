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

//! # Resource definitions for tagged corpora
//!
//! The dictionary tagger reads its training data through Resources. Two types of resources are
//! pre-defined:
//! - LocalResource: points to a local file or directory
//! - RemoteResource: points to a remote file or archive via a URL (requires the `remote` feature)
//!
//! For both types of resources, the local location can be retrieved using `get_local_path`,
//! allowing to reference the corpus location regardless if it is a remote or local resource.
//! Remote archives (such as the NLTK `indian` corpus) are extracted into the cache on first use.

mod local;

use crate::common::error::TaggerError;
pub use local::LocalResource;
use std::path::PathBuf;

/// # Resource Trait that can provide the location of a corpus
pub trait ResourceProvider {
    /// Provides the local path for a resource.
    ///
    /// # Returns
    ///
    /// * `PathBuf` pointing to the resource file or directory
    ///
    /// # Example
    ///
    /// ```no_run
    /// use indic_pos::resources::{LocalResource, ResourceProvider};
    /// use std::path::PathBuf;
    /// let corpus_resource = LocalResource {
    ///     local_path: PathBuf::from("path/to/indian"),
    /// };
    /// let corpus_path = corpus_resource.get_local_path();
    /// ```
    fn get_local_path(&self) -> Result<PathBuf, TaggerError>;
}

#[cfg(feature = "remote")]
mod remote;
#[cfg(feature = "remote")]
pub use remote::RemoteResource;

/// # Pretrained corpus resources
pub struct CorpusResources;

impl CorpusResources {
    /// Shared under the NLTK data license. POS-tagged sentences for Bangla, Hindi, Marathi and Telugu
    /// (the `indian` corpus of the NLTK data collection).
    pub const NLTK_INDIAN: (&'static str, &'static str) = (
        "nltk-indian",
        "https://raw.githubusercontent.com/nltk/nltk_data/gh-pages/packages/corpora/indian.zip",
    );
}
