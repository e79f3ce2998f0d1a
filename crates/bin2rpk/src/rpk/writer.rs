//! Zip container writer

use std::fs::OpenOptions;
use std::io::{Cursor, ErrorKind, Write};
use std::path::Path;

use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{ContainerConfig, Layout};
use crate::cartridge::Cartridge;
use crate::common::{RpkError, RpkResult};

/// Writes validated cartridges as RPK containers
#[derive(Debug, Clone, Default)]
pub struct RpkWriter {
    config: ContainerConfig,
}

impl RpkWriter {
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    fn file_options(&self) -> FileOptions {
        FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(self.config.compression_level)
    }

    /// Build the complete container in memory.
    pub fn build(&self, cart: &Cartridge) -> RpkResult<Vec<u8>> {
        let layout = Layout::for_cartridge(cart, &self.config)?;
        let options = self.file_options();
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for (kind, data) in cart.present_images() {
            let name = self.config.member_name(kind);
            debug!("adding {name} ({} bytes)", data.len());
            zip.start_file(name, options)?;
            zip.write_all(data)?;
        }

        zip.start_file(self.config.layout_name.as_str(), options)?;
        zip.write_all(layout.to_xml().as_bytes())?;

        Ok(zip.finish()?.into_inner())
    }

    /// Write the container to a new file at `path`.
    ///
    /// Existing files are never replaced. Nothing is created if building
    /// the container fails.
    pub fn write_to(&self, cart: &Cartridge, path: &Path) -> RpkResult<()> {
        let archive = self.build(cart)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => RpkError::OutputExists {
                    path: path.to_path_buf(),
                },
                _ => err.into(),
            })?;
        file.write_all(&archive)?;
        Ok(())
    }
}
