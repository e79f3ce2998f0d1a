//! RPK container output
//!
//! An RPK is a zip archive holding the cartridge images and a
//! `layout.xml` that tells the emulator which PCB to use and which image
//! goes into which socket.

mod layout;
mod writer;

pub use layout::{Layout, LayoutEntry};
pub use writer::RpkWriter;

use crate::image::ImageKind;

/// Container settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Member name of the GROM image
    pub grom_name: String,
    /// Member name of the primary ROM
    pub rom_name: String,
    /// Member name of the secondary paged ROM
    pub paged_rom_name: String,
    /// Member name of the layout file (fixed by the emulator)
    pub layout_name: String,
    /// Deflate level, `None` for the zip library default
    pub compression_level: Option<i32>,
}

impl ContainerConfig {
    pub fn member_name(&self, kind: ImageKind) -> &str {
        match kind {
            ImageKind::Rom => &self.rom_name,
            ImageKind::PagedRom => &self.paged_rom_name,
            ImageKind::Grom => &self.grom_name,
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            grom_name: ImageKind::Grom.canonical_name().to_string(),
            rom_name: ImageKind::Rom.canonical_name().to_string(),
            paged_rom_name: ImageKind::PagedRom.canonical_name().to_string(),
            layout_name: "layout.xml".to_string(),
            compression_level: Some(9),
        }
    }
}
