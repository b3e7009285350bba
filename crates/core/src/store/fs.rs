use super::{PostStore, RawPost};
use crate::constants::{TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};
use crate::error::{PostError, PostResult};
use crate::validation::validate_post_id;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Posts stored as individual files in one directory.
#[derive(Debug, Clone)]
pub struct FsPostStore {
    dir: PathBuf,
}

impl FsPostStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn post_path(&self, id: &str) -> PostResult<PathBuf> {
        validate_post_id(id)?;
        Ok(self.dir.join(id))
    }
}

impl PostStore for FsPostStore {
    fn list_raw(&self) -> PostResult<Vec<RawPost>> {
        let mut posts = Vec::new();

        for entry in fs::read_dir(&self.dir).map_err(PostError::DirRead)? {
            let entry = entry.map_err(PostError::DirRead)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(id) = path.file_name().and_then(|os| os.to_str()) else {
                tracing::warn!("skipping post with non UTF-8 file name: {}", path.display());
                continue;
            };
            if id.starts_with('.') {
                continue;
            }

            match fs::read(&path) {
                Ok(bytes) => posts.push(RawPost {
                    id: id.to_string(),
                    content: decode(&path, bytes),
                }),
                Err(e) => tracing::warn!("failed to read post {}: {}", path.display(), e),
            }
        }

        posts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(posts)
    }

    fn read_raw(&self, id: &str) -> PostResult<Option<String>> {
        let path = self.post_path(id)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(decode(&path, bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PostError::FileRead(e)),
        }
    }

    fn contains(&self, id: &str) -> PostResult<bool> {
        Ok(self.post_path(id)?.is_file())
    }

    fn create_raw(&self, id: &str, content: &str) -> PostResult<()> {
        let path = self.post_path(id)?;
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(PostError::Conflict(id.to_string()))
            }
            Err(e) => return Err(PostError::FileWrite(e)),
        };
        file.write_all(content.as_bytes())
            .map_err(PostError::FileWrite)?;
        Ok(())
    }

    fn write_raw(&self, id: &str, content: &str) -> PostResult<()> {
        let path = self.post_path(id)?;
        if !path.is_file() {
            return Err(PostError::NotFound(id.to_string()));
        }

        // Write to a dot-file first so a crash never leaves a half-written post in the listing.
        let tmp_path = self
            .dir
            .join(format!("{TEMP_FILE_PREFIX}{id}{TEMP_FILE_SUFFIX}"));
        fs::write(&tmp_path, content).map_err(PostError::FileWrite)?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(PostError::FileWrite(e));
        }
        Ok(())
    }

    fn delete_raw(&self, id: &str) -> PostResult<()> {
        let path = self.post_path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PostError::NotFound(id.to_string())),
            Err(e) => Err(PostError::FileDelete(e)),
        }
    }
}

/// Post text with invalid UTF-8 sequences replaced by U+FFFD.
fn decode(path: &Path, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("post {} is not valid UTF-8; decoding lossily", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
