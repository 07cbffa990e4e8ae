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

use crate::common::error::TaggerError;
use crate::resources::ResourceProvider;
use std::path::PathBuf;

/// # Local resource
#[derive(Debug, PartialEq, Clone)]
pub struct LocalResource {
    /// Local path for the resource
    pub local_path: PathBuf,
}

impl ResourceProvider for LocalResource {
    /// Gets the path for a local resource. The path is checked for existence so that a missing
    /// corpus is reported before any parsing is attempted.
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
    fn get_local_path(&self) -> Result<PathBuf, TaggerError> {
        if self.local_path.exists() {
            Ok(self.local_path.clone())
        } else {
            Err(TaggerError::IOError(format!(
                "resource not found at {}",
                self.local_path.display()
            )))
        }
    }
}

impl From<PathBuf> for LocalResource {
    fn from(local_path: PathBuf) -> Self {
        Self { local_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_local_resource_is_reported() {
        let resource = LocalResource::from(PathBuf::from("/definitely/not/a/corpus"));
        assert!(matches!(
            resource.get_local_path(),
            Err(TaggerError::IOError(_))
        ));
    }

    #[test]
    fn existing_local_resource_resolves() {
        let dir = std::env::temp_dir();
        let resource = LocalResource::from(dir.clone());
        assert_eq!(resource.get_local_path().unwrap(), dir);
    }
}
