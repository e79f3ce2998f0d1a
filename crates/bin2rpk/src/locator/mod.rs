//! Image sources
//!
//! The loader asks an [`ImageSource`] for files by plain name. Two sources
//! exist: the directory a bin file lives in, and a zip archive in which a
//! single main bin file has to be picked first.

mod archive;
mod directory;

pub use archive::{ArchiveSource, find_main_entry};
pub use directory::DirectorySource;

use std::fs::File;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::common::{RpkError, RpkResult};
use crate::image::ImageKind;

/// A place bin files are read from
pub trait ImageSource {
    /// Human readable location of `name`, for log output
    fn describe(&self, name: &str) -> String;

    fn contains(&self, name: &str) -> bool;

    /// Read the whole file
    fn read(&mut self, name: &str) -> RpkResult<Vec<u8>>;
}

/// A source together with the bin file loading starts from
pub struct Located {
    pub source: Box<dyn ImageSource>,
    pub start: String,
}

/// Open `path` as a zip archive if it is one, as a plain bin file otherwise.
pub fn open(path: &Path) -> RpkResult<Located> {
    let file = File::open(path)?;
    match ZipArchive::new(file) {
        Ok(archive) => {
            let (source, start) = ArchiveSource::new(path.display().to_string(), archive)?;
            Ok(Located {
                source: Box::new(source),
                start,
            })
        }
        Err(ZipError::Io(err)) => Err(err.into()),
        Err(err) => {
            debug!("{} is not a zip archive: {err}", path.display());
            let (source, start) = DirectorySource::for_file(path)?;
            Ok(Located {
                source: Box::new(source),
                start,
            })
        }
    }
}

/// Split `name` into a directory prefix (with trailing separator) and file name.
pub(crate) fn split_file_name(name: &str, separator: char) -> (&str, &str) {
    match name.rfind(separator) {
        Some(pos) => name.split_at(pos + separator.len_utf8()),
        None => ("", name),
    }
}

fn non_utf8_name(path: &Path) -> RpkError {
    RpkError::unknown_filename(path.display().to_string(), ImageKind::Rom)
}
