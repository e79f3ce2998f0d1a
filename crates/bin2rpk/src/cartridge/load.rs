//! Loading the images of a cartridge from an image source

use tracing::{debug, info};

use super::Cartridge;
use crate::common::{RpkError, RpkResult};
use crate::image::{ImageKind, banking_hint, rename_for_kind};
use crate::locator::ImageSource;

impl Cartridge {
    /// Load all images that belong to the bin file `start` in `source`.
    ///
    /// Siblings are found by swapping the kind letter of `start`; siblings
    /// that do not exist, or whose name cannot be derived, are simply absent.
    pub fn load(source: &mut dyn ImageSource, start: &str) -> RpkResult<Self> {
        let mut hint = None;
        let c_bin = load_image(source, start, ImageKind::Rom, &mut hint)?;
        let d_bin = load_image(source, start, ImageKind::PagedRom, &mut hint)?;
        let g_bin = load_image(source, start, ImageKind::Grom, &mut hint)?;
        Cartridge::new(c_bin, d_bin, g_bin, hint)
    }
}

fn load_image(
    source: &mut dyn ImageSource,
    start: &str,
    kind: ImageKind,
    hint: &mut Option<char>,
) -> RpkResult<Option<Vec<u8>>> {
    let name = match rename_for_kind(start, kind) {
        Ok(name) => name,
        Err(err @ RpkError::UnknownFilename { .. }) => {
            debug!("no {kind}: {err}");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    if name != start && !source.contains(&name) {
        debug!("no {kind}: {} does not exist", source.describe(&name));
        return Ok(None);
    }

    if kind == ImageKind::Rom {
        *hint = banking_hint(&name);
    }

    info!("Loading {}", source.describe(&name));
    source.read(&name).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// In-memory image source
    struct MemorySource(HashMap<String, Vec<u8>>);

    impl MemorySource {
        fn new(files: &[(&str, usize)]) -> Self {
            Self(
                files
                    .iter()
                    .map(|(name, len)| ((*name).to_string(), vec![0x11; *len]))
                    .collect(),
            )
        }
    }

    impl ImageSource for MemorySource {
        fn describe(&self, name: &str) -> String {
            format!("mem:{name}")
        }

        fn contains(&self, name: &str) -> bool {
            self.0.contains_key(name)
        }

        fn read(&mut self, name: &str) -> RpkResult<Vec<u8>> {
            self.0.get(name).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, name.to_string()).into()
            })
        }
    }

    #[test]
    fn test_load_siblings() {
        let mut source = MemorySource::new(&[
            ("phm3000c.bin", 8192),
            ("phm3000d.bin", 8192),
            ("phm3000g.bin", 6144),
        ]);
        let cart = Cartridge::load(&mut source, "phm3000g.bin").unwrap();
        assert_eq!(cart.rom().map(<[u8]>::len), Some(8192));
        assert_eq!(cart.paged_rom().map(<[u8]>::len), Some(8192));
        assert_eq!(cart.grom().map(<[u8]>::len), Some(6144));
        assert_eq!(cart.banking_hint(), Some('c'));
    }

    #[test]
    fn test_load_single_rom_without_letter() {
        let mut source = MemorySource::new(&[("megademo8.bin", 65536)]);
        let cart = Cartridge::load(&mut source, "megademo8.bin").unwrap();
        assert_eq!(cart.rom().map(<[u8]>::len), Some(65536));
        assert_eq!(cart.grom(), None);
        assert_eq!(cart.banking_hint(), Some('8'));
    }

    #[test]
    fn test_load_grom_only() {
        let mut source = MemorySource::new(&[("gameg.bin", 6144)]);
        let cart = Cartridge::load(&mut source, "gameg.bin").unwrap();
        assert_eq!(cart.rom(), None);
        assert_eq!(cart.banking_hint(), None);
    }

    #[test]
    fn test_paged_rom_without_rom() {
        let mut source = MemorySource::new(&[("gamed.bin", 8192), ("gameg.bin", 6144)]);
        let err = Cartridge::load(&mut source, "gameg.bin").unwrap_err();
        assert!(matches!(err, RpkError::PagedRomWithoutRom));
    }

    #[test]
    fn test_missing_start_file() {
        let mut source = MemorySource::new(&[]);
        let err = Cartridge::load(&mut source, "gamec.bin").unwrap_err();
        assert!(matches!(err, RpkError::Io(_)));
    }
}
