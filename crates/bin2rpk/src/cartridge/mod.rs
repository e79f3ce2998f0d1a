//! Cartridge model
//!
//! A [`Cartridge`] holds the images of one conversion run. It is filled
//! once by the loader, gets its PCB type from the selector (which may merge
//! d.bin into c.bin), and is then handed to the container writer.

mod load;

use std::path::Path;

use crate::common::{RpkError, RpkResult};
use crate::image::ImageKind;
use crate::locator;
use crate::pcb::{self, PcbType};

/// Borrowed view of the images of a cartridge
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSet<'a> {
    pub rom: Option<&'a [u8]>,
    pub paged_rom: Option<&'a [u8]>,
    pub grom: Option<&'a [u8]>,
}

impl<'a> ImageSet<'a> {
    pub fn get(&self, kind: ImageKind) -> Option<&'a [u8]> {
        match kind {
            ImageKind::Rom => self.rom,
            ImageKind::PagedRom => self.paged_rom,
            ImageKind::Grom => self.grom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cartridge {
    c_bin: Option<Vec<u8>>,
    d_bin: Option<Vec<u8>>,
    g_bin: Option<Vec<u8>>,
    banking_hint: Option<char>,
    pcb_type: Option<PcbType>,
}

impl Cartridge {
    /// Build a cartridge from already loaded images.
    ///
    /// Rejects a d.bin without c.bin and a cartridge with neither c.bin
    /// nor g.bin.
    pub fn new(
        c_bin: Option<Vec<u8>>,
        d_bin: Option<Vec<u8>>,
        g_bin: Option<Vec<u8>>,
        banking_hint: Option<char>,
    ) -> RpkResult<Self> {
        if d_bin.is_some() && c_bin.is_none() {
            return Err(RpkError::PagedRomWithoutRom);
        }
        if c_bin.is_none() && g_bin.is_none() {
            return Err(RpkError::MissingMainImage);
        }
        Ok(Self {
            c_bin,
            d_bin,
            g_bin,
            banking_hint,
            pcb_type: None,
        })
    }

    /// Locate and load the images starting from `path`.
    ///
    /// `path` is either one of the bin files or a zip archive holding them.
    pub fn open(path: &Path) -> RpkResult<Self> {
        let mut located = locator::open(path)?;
        Self::load(located.source.as_mut(), &located.start)
    }

    pub fn rom(&self) -> Option<&[u8]> {
        self.c_bin.as_deref()
    }

    pub fn paged_rom(&self) -> Option<&[u8]> {
        self.d_bin.as_deref()
    }

    pub fn grom(&self) -> Option<&[u8]> {
        self.g_bin.as_deref()
    }

    pub fn images(&self) -> ImageSet<'_> {
        ImageSet {
            rom: self.rom(),
            paged_rom: self.paged_rom(),
            grom: self.grom(),
        }
    }

    /// The image the cartridge header lives in: g.bin if present, else c.bin
    pub fn main_image(&self) -> RpkResult<&[u8]> {
        self.grom()
            .or_else(|| self.rom())
            .ok_or(RpkError::MissingMainImage)
    }

    pub fn banking_hint(&self) -> Option<char> {
        self.banking_hint
    }

    pub fn pcb_type(&self) -> Option<PcbType> {
        self.pcb_type
    }

    /// Present images in container order (g.bin, c.bin, d.bin)
    pub fn present_images(&self) -> impl Iterator<Item = (ImageKind, &[u8])> {
        let images = self.images();
        ImageKind::ALL
            .into_iter()
            .filter_map(move |kind| images.get(kind).map(|data| (kind, data)))
    }

    /// Infer (or take `forced`) and validate the PCB type.
    pub fn select_pcb_type(&mut self, forced: Option<PcbType>) -> RpkResult<PcbType> {
        pcb::select_pcb_type(self, forced)
    }

    pub(crate) fn set_pcb_type(&mut self, pcb: PcbType) {
        self.pcb_type = Some(pcb);
    }

    /// Append d.bin to c.bin and drop d.bin.
    pub(crate) fn merge_paged_rom(&mut self) {
        if let Some(paged) = self.d_bin.take() {
            self.c_bin.get_or_insert_with(Vec::new).extend_from_slice(&paged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paged_rom_without_rom() {
        let err = Cartridge::new(None, Some(vec![1; 8192]), Some(vec![0; 6144]), None).unwrap_err();
        assert!(matches!(err, RpkError::PagedRomWithoutRom));
    }

    #[test]
    fn test_missing_main_image() {
        let err = Cartridge::new(None, None, None, None).unwrap_err();
        assert!(matches!(err, RpkError::MissingMainImage));
    }

    #[test]
    fn test_main_image_prefers_grom() {
        let cart = Cartridge::new(Some(vec![1; 16]), None, Some(vec![2; 16]), None).unwrap();
        assert_eq!(cart.main_image().unwrap(), &[2u8; 16][..]);

        let cart = Cartridge::new(Some(vec![1; 16]), None, None, None).unwrap();
        assert_eq!(cart.main_image().unwrap(), &[1u8; 16][..]);
    }

    #[test]
    fn test_present_images_order() {
        let cart = Cartridge::new(Some(vec![1]), Some(vec![2]), Some(vec![3]), None).unwrap();
        let kinds: Vec<_> = cart.present_images().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![ImageKind::Grom, ImageKind::Rom, ImageKind::PagedRom]);
    }

    #[test]
    fn test_merge_paged_rom() {
        let mut cart = Cartridge::new(Some(vec![1; 4]), Some(vec![2; 4]), None, None).unwrap();
        cart.merge_paged_rom();
        assert_eq!(cart.rom().unwrap(), &[1u8, 1, 1, 1, 2, 2, 2, 2][..]);
        assert_eq!(cart.paged_rom(), None);
    }
}
