//! PCB type inference and validation
//!
//! Inference looks at image sizes, the GROM contents and the banking hint
//! taken from the c.bin filename. Validation checks the chosen type, inferred
//! or forced, against its [`PcbLimits`](super::PcbLimits) entry.

use std::fmt;

use tracing::{debug, info};

use super::{NATIVE_GROM_LIMIT, PagedRomUse, PcbType};
use crate::cartridge::{Cartridge, ImageSet};
use crate::common::{ByteSize, PcbViolation, RpkError, RpkResult};
use crate::grom::needs_grom_emulation;
use crate::image::ImageKind;

/// Offset of the FinalGROM mode byte in the main image
const MODE_BYTE_OFFSET: usize = 3;

/// FinalGROM 99 advanced modes ('R'AM, 'G'ROM, 'X' extended)
const ADVANCED_MODES: [u8; 3] = [b'R', b'G', b'X'];

const ROM_4K: usize = 0x1000;
const ROM_8K: usize = 0x2000;
const ROM_512K: usize = 0x8_0000;

/// Why inference picked a PCB type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    GromData,
    RomIs4K,
    RomIs8K,
    NoBanking,
    NameHint(char),
    LargeRom,
    Fallback,
    Forced,
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionReason::GromData => f.write_str("because of 8K/GROM data"),
            SelectionReason::RomIs4K => f.write_str("because c.bin is 4K"),
            SelectionReason::RomIs8K => f.write_str("because c.bin is 8K"),
            SelectionReason::NoBanking => f.write_str("because no bank switching is needed"),
            SelectionReason::NameHint(hint) => write!(f, "because name ends with a {hint}"),
            SelectionReason::LargeRom => f.write_str("because c.bin is larger than 512K"),
            SelectionReason::Fallback => f.write_str("as default for unlabeled paged ROMs"),
            SelectionReason::Forced => f.write_str("as requested"),
        }
    }
}

/// Outcome of PCB type inference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inference {
    pub pcb: PcbType,
    pub reason: SelectionReason,
}

impl Inference {
    fn new(pcb: PcbType, reason: SelectionReason) -> Self {
        Self { pcb, reason }
    }
}

/// What validation asks the caller to do with the images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Validation {
    /// d.bin has to be appended to c.bin
    pub merge_paged_rom: bool,
}

/// Reject images using FinalGROM advanced modes.
pub fn check_advanced_mode(main: &[u8]) -> RpkResult<()> {
    match main.get(MODE_BYTE_OFFSET) {
        Some(&mode) if ADVANCED_MODES.contains(&mode) => Err(RpkError::AdvancedMode {
            marker: char::from(mode),
        }),
        _ => Ok(()),
    }
}

/// Guess the PCB type from the images and the banking hint.
pub fn infer_pcb_type(images: ImageSet<'_>, hint: Option<char>) -> Result<Inference, PcbViolation> {
    if needs_grom_emulation(images.grom) {
        return Ok(Inference::new(PcbType::GromEmu, SelectionReason::GromData));
    }

    if images.paged_rom.is_some() {
        return match images.rom.map_or(0, <[u8]>::len) {
            ROM_4K => Ok(Inference::new(PcbType::Paged12k, SelectionReason::RomIs4K)),
            ROM_8K => Ok(Inference::new(PcbType::Paged, SelectionReason::RomIs8K)),
            len => Err(PcbViolation::InconsistentRom { len }),
        };
    }

    let rom_len = match images.rom {
        Some(rom) if rom.len() > ROM_8K => rom.len(),
        _ => return Ok(Inference::new(PcbType::Standard, SelectionReason::NoBanking)),
    };

    let inference = match hint {
        Some(hint @ ('3' | '9')) => Inference::new(PcbType::Paged379i, SelectionReason::NameHint(hint)),
        Some(hint @ '7') => Inference::new(PcbType::Paged377, SelectionReason::NameHint(hint)),
        Some(hint @ '8') => Inference::new(PcbType::Paged378, SelectionReason::NameHint(hint)),
        _ if rom_len > ROM_512K => Inference::new(PcbType::Paged377, SelectionReason::LargeRom),
        _ => Inference::new(PcbType::Paged378, SelectionReason::Fallback),
    };
    Ok(inference)
}

fn check_size(
    pcb: PcbType,
    image: ImageKind,
    len: Option<usize>,
    max: Option<usize>,
) -> Result<(), PcbViolation> {
    match (len, max) {
        (Some(len), Some(max)) if len > max => Err(PcbViolation::TooLarge {
            pcb,
            image,
            len,
            max: ByteSize(max),
        }),
        _ => Ok(()),
    }
}

/// Check that `pcb` can hold `images`.
pub fn validate_pcb_type(pcb: PcbType, images: ImageSet<'_>) -> Result<Validation, PcbViolation> {
    let limits = pcb.limits();

    if needs_grom_emulation(images.grom) && !limits.emulated_grom {
        return Err(PcbViolation::NeedsGromEmulation { pcb });
    }
    if images.grom.is_some_and(|grom| grom.len() > NATIVE_GROM_LIMIT) && !limits.large_grom {
        return Err(PcbViolation::GromTooLarge { pcb });
    }
    match (images.paged_rom, limits.paged_rom) {
        (Some(_), PagedRomUse::Rejected) => return Err(PcbViolation::PagedRomNotSupported { pcb }),
        (None, PagedRomUse::Required) => return Err(PcbViolation::PagedRomRequired { pcb }),
        _ => {}
    }
    if images.rom.is_none() && limits.requires_rom {
        return Err(PcbViolation::RomRequired { pcb });
    }

    let mut rom_len = images.rom.map(<[u8]>::len);
    let mut paged_len = images.paged_rom.map(<[u8]>::len);
    let mut validation = Validation::default();

    if let (Some(paged), PagedRomUse::MergedIntoRom) = (paged_len, limits.paged_rom) {
        let len = rom_len.unwrap_or(0);
        if len != ROM_8K {
            return Err(PcbViolation::MergeNeeds8K { len });
        }
        rom_len = Some(len + paged);
        paged_len = None;
        validation.merge_paged_rom = true;
    }

    check_size(pcb, ImageKind::Grom, images.grom.map(<[u8]>::len), limits.max_grom)?;
    check_size(pcb, ImageKind::Rom, rom_len, limits.max_rom)?;
    check_size(pcb, ImageKind::PagedRom, paged_len, limits.max_paged_rom)?;
    Ok(validation)
}

/// Assign a PCB type to `cart` and bring its images in line with it.
///
/// `forced` skips inference but not validation.
pub fn select_pcb_type(cart: &mut Cartridge, forced: Option<PcbType>) -> RpkResult<PcbType> {
    check_advanced_mode(cart.main_image()?)?;

    let Inference { pcb, reason } = match forced {
        Some(pcb) => Inference::new(pcb, SelectionReason::Forced),
        None => infer_pcb_type(cart.images(), cart.banking_hint())?,
    };
    info!("Selected pcbtype {pcb} {reason}");
    cart.set_pcb_type(pcb);

    let validation = validate_pcb_type(pcb, cart.images())?;
    if validation.merge_paged_rom {
        debug!("appending d.bin to c.bin for pcbtype {pcb}");
        cart.merge_paged_rom();
    }
    Ok(pcb)
}
