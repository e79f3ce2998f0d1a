//! Bin files inside a zip archive

use std::collections::HashMap;
use std::io::{Read, Seek};

use tracing::debug;
use zip::ZipArchive;

use super::{ImageSource, split_file_name};
use crate::common::{RpkError, RpkResult};
use crate::image::{ImageKind, classify};

const BIN_EXTENSION: &str = ".bin";

/// Pick the main bin file among archive entry names.
///
/// A single GROM wins, then a single primary ROM. Anything else is ambiguous.
pub fn find_main_entry<'a>(
    archive: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> RpkResult<&'a str> {
    let mut candidates: HashMap<ImageKind, Vec<&'a str>> = HashMap::new();
    for name in names {
        if name.to_ascii_lowercase().ends_with(BIN_EXTENSION) {
            candidates.entry(classify(name)).or_default().push(name);
        }
    }

    let mut take_single = |kind: ImageKind| match candidates.remove(&kind) {
        Some(names) if names.len() == 1 => Ok(names[0]),
        Some(names) => Err(names.len()),
        None => Err(0),
    };
    match (take_single(ImageKind::Grom), take_single(ImageKind::Rom)) {
        (Ok(name), _) | (Err(_), Ok(name)) => Ok(name),
        (Err(groms), Err(roms)) => Err(RpkError::ambiguous_archive(archive, groms, roms)),
    }
}

/// Entries of one directory inside a zip archive
pub struct ArchiveSource<R> {
    label: String,
    dir: String,
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> ArchiveSource<R> {
    /// Wrap `archive`, returning the source and the name of its main bin file.
    pub fn new(label: String, archive: ZipArchive<R>) -> RpkResult<(Self, String)> {
        let main = find_main_entry(&label, archive.file_names())?.to_string();
        debug!("main bin in {label} is {main}");
        let (dir, name) = split_file_name(&main, '/');
        let source = Self {
            dir: dir.to_string(),
            label,
            archive,
        };
        Ok((source, name.to_string()))
    }

    fn entry_name(&self, name: &str) -> String {
        format!("{}{name}", self.dir)
    }
}

impl<R: Read + Seek> ImageSource for ArchiveSource<R> {
    fn describe(&self, name: &str) -> String {
        format!("{}/{}", self.label, self.entry_name(name))
    }

    fn contains(&self, name: &str) -> bool {
        let entry = self.entry_name(name);
        self.archive.file_names().any(|candidate| candidate == entry)
    }

    fn read(&mut self, name: &str) -> RpkResult<Vec<u8>> {
        let entry = self.entry_name(name);
        let mut file = self.archive.by_name(&entry)?;
        let mut data = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
        file.read_to_end(&mut data)?;
        Ok(data)
    }
}
