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

use super::*;
use crate::common::error::TaggerError;
use cached_path::{Cache, Options, ProgressBar};
use dirs::cache_dir;
use std::path::PathBuf;

/// # Remote resource that will be downloaded and cached locally on demand
#[derive(Debug, PartialEq, Clone)]
pub struct RemoteResource {
    /// Remote path/url for the resource
    pub url: String,
    /// Local subdirectory of the cache root where this resource is saved
    pub cache_subdir: String,
    /// Extract the downloaded archive (zip, tar.gz) and return the extraction directory
    pub extract: bool,
}

impl RemoteResource {
    /// Creates a new RemoteResource from an URL and a custom local path. Note that this does not
    /// download the resource (only declares the remote and local locations)
    ///
    /// # Arguments
    ///
    /// * `url` - `&str` Location of the remote resource
    /// * `cache_subdir` - `&str` Local subdirectory of the cache root to save the resource to
    ///
    /// # Example
    ///
    /// ```no_run
    /// use indic_pos::resources::RemoteResource;
    /// let corpus_resource = RemoteResource::new("http://corpus_location/hindi.pos", "corpora");
    /// ```
    pub fn new(url: &str, cache_subdir: &str) -> RemoteResource {
        RemoteResource {
            url: url.to_string(),
            cache_subdir: cache_subdir.to_string(),
            extract: false,
        }
    }

    /// Creates a new RemoteResource pointing to an archive from a (name, URL) tuple. The archive is
    /// extracted under `<cache root>/<name>` on first access.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use indic_pos::resources::{CorpusResources, RemoteResource};
    /// let corpus_resource = RemoteResource::from_pretrained(CorpusResources::NLTK_INDIAN);
    /// ```
    pub fn from_pretrained(name_url_tuple: (&str, &str)) -> RemoteResource {
        RemoteResource {
            url: name_url_tuple.1.to_string(),
            cache_subdir: name_url_tuple.0.to_string(),
            extract: true,
        }
    }
}

impl ResourceProvider for RemoteResource {
    /// Gets the local path for a remote resource.
    ///
    /// The remote resource is downloaded and cached (and extracted if it is an archive). Then the
    /// path to the local cache is returned.
    fn get_local_path(&self) -> Result<PathBuf, TaggerError> {
        let cache = Cache::builder()
            .dir(get_cache_directory()?)
            .progress_bar(Some(ProgressBar::Light))
            .build()?;
        let mut options = Options::default().subdir(&self.cache_subdir);
        if self.extract {
            options = options.extract();
        }
        log::info!("resolving remote resource {}", self.url);
        Ok(cache.cached_path_with_options(&self.url, &options)?)
    }
}

/// # Global cache directory
/// If the environment variable `INDIC_POS_CACHE` is set, will save the cached corpus files at that
/// location. Otherwise defaults to `$XDG_CACHE_HOME/.indic-pos`, or corresponding user cache for
/// the current system.
pub fn get_cache_directory() -> Result<PathBuf, TaggerError> {
    match std::env::var("INDIC_POS_CACHE") {
        Ok(value) => Ok(PathBuf::from(value)),
        Err(_) => {
            let mut home = cache_dir().ok_or_else(|| {
                TaggerError::InvalidConfigurationError(
                    "no user cache directory available, set INDIC_POS_CACHE".to_string(),
                )
            })?;
            home.push(".indic-pos");
            Ok(home)
        }
    }
}
