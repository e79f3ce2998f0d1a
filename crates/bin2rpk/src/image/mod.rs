//! Cartridge image kinds and the bin filename convention
//!
//! A cartridge dump is split over up to three files that only differ in
//! the last character before the `.bin` extension:
//! - `...c.bin` - primary ROM
//! - `...d.bin` - secondary paged ROM
//! - `...g.bin` - GROM

mod name;

pub use name::{banking_hint, classify, rename_for_kind};

use std::fmt;

/// The three kinds of image a cartridge may consist of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// Primary ROM (`c.bin`)
    Rom,
    /// Secondary paged ROM (`d.bin`)
    PagedRom,
    /// GROM (`g.bin`)
    Grom,
}

impl ImageKind {
    /// All kinds, in the order images are stored in a container.
    pub const ALL: [ImageKind; 3] = [ImageKind::Grom, ImageKind::Rom, ImageKind::PagedRom];

    /// Filename letter identifying this kind
    pub fn letter(self) -> char {
        match self {
            ImageKind::Rom => 'c',
            ImageKind::PagedRom => 'd',
            ImageKind::Grom => 'g',
        }
    }

    /// Conventional member name inside an RPK container
    pub fn canonical_name(self) -> &'static str {
        match self {
            ImageKind::Rom => "c.bin",
            ImageKind::PagedRom => "d.bin",
            ImageKind::Grom => "g.bin",
        }
    }

    /// Resource id referenced from the layout
    pub fn resource_id(self) -> &'static str {
        match self {
            ImageKind::Rom => "romimage",
            ImageKind::PagedRom => "rom2image",
            ImageKind::Grom => "gromimage",
        }
    }

    /// Cartridge connector the image is plugged into
    pub fn socket_id(self) -> &'static str {
        match self {
            ImageKind::Rom => "rom_socket",
            ImageKind::PagedRom => "rom2_socket",
            ImageKind::Grom => "grom_socket",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}
