//! Model asset discovery for the model library panel

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read model directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can enumerate placeable model files
pub trait AssetSource {
    /// Asset URLs of all available models, sorted
    fn list_models(&self) -> Result<Vec<String>, AssetError>;
}

/// glTF files in one directory, published under a URL prefix
#[derive(Debug, Clone)]
pub struct DirectoryAssetSource {
    dir: PathBuf,
    url_prefix: String,
}

impl DirectoryAssetSource {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }
}

fn is_model_file(name: &str) -> bool {
    name.ends_with(".glb") || name.ends_with(".gltf")
}

impl AssetSource for DirectoryAssetSource {
    fn list_models(&self) -> Result<Vec<String>, AssetError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let io_err = |source| AssetError::Io {
            path: self.dir.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_model_file(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names
            .into_iter()
            .map(|name| format!("{}/{name}", self.url_prefix))
            .collect())
    }
}

/// Model list for the UI; a failing source degrades to an empty list
pub fn available_models(source: &dyn AssetSource) -> Vec<String> {
    match source.list_models() {
        Ok(models) => models,
        Err(e) => {
            tracing::warn!("Model listing failed: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scene-editor-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    struct Failing;

    impl AssetSource for Failing {
        fn list_models(&self) -> Result<Vec<String>, AssetError> {
            Err(AssetError::Io {
                path: PathBuf::from("/broken"),
                source: std::io::Error::other("boom"),
            })
        }
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let src = DirectoryAssetSource::new("/definitely/not/here", "/assets/models");
        assert_eq!(src.list_models().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_lists_gltf_files_sorted() {
        let dir = scratch_dir("list");
        for f in ["b.glb", "a.gltf", "notes.txt", "c.GLB.bak"] {
            std::fs::write(dir.join(f), b"").unwrap();
        }
        std::fs::create_dir_all(dir.join("nested.glb")).unwrap();

        let src = DirectoryAssetSource::new(&dir, "/assets/models/house/");
        let models = src.list_models().unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(
            models,
            vec![
                "/assets/models/house/a.gltf".to_string(),
                "/assets/models/house/b.glb".to_string(),
            ]
        );
    }

    #[test]
    fn test_available_models_swallows_errors() {
        assert!(available_models(&Failing).is_empty());
    }
}
