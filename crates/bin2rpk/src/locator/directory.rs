//! Bin files lying next to each other in a directory

use std::fs;
use std::path::{Path, PathBuf};

use super::{ImageSource, non_utf8_name};
use crate::common::RpkResult;

pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Source for the directory containing `path`, and the file name of `path`
    pub fn for_file(path: &Path) -> RpkResult<(Self, String)> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| non_utf8_name(path))?
            .to_string();
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok((Self::new(dir), name))
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl ImageSource for DirectorySource {
    fn describe(&self, name: &str) -> String {
        self.path(name).display().to_string()
    }

    fn contains(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    fn read(&mut self, name: &str) -> RpkResult<Vec<u8>> {
        Ok(fs::read(self.path(name))?)
    }
}
