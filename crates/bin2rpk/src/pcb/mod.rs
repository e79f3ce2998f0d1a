//! PCB types and their hardware constraints
//!
//! Each PCB type names a banking scheme understood by the emulator's
//! cartridge connector. What a type can hold is described by a
//! [`PcbLimits`] entry; the selector in [`select`] only consults that table.

pub mod select;

pub use select::{Inference, SelectionReason, infer_pcb_type, select_pcb_type, validate_pcb_type};

use std::fmt;
use std::str::FromStr;

use crate::common::{RpkError, RpkResult};

/// Banking scheme of a cartridge board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcbType {
    /// Plain 8K ROM and/or GROMs, no bank switching
    Standard,
    /// GROM space backed by RAM/flash (FinalGROM style boards)
    GromEmu,
    /// 2 x 8K banks, switched by writes to >6000/>6002 (TI "7" boards)
    Paged7,
    /// 4K fixed c.bin plus 8K paged d.bin
    Paged12k,
    /// 8K c.bin and 8K d.bin, paged into one window
    Paged,
    /// Up to 2M behind a 74LS377 bank latch
    Paged377,
    /// Up to 512K behind a 74LS378 bank latch
    Paged378,
    /// Up to 128K behind a 74LS379 latch, inverted bank numbers
    Paged379i,
}

/// How a PCB type treats a secondary paged ROM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagedRomUse {
    Rejected,
    Required,
    /// Appended to an 8K c.bin to form one ROM
    MergedIntoRom,
}

/// Hardware constraints of one PCB type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcbLimits {
    /// Serves GROM data that needs emulation
    pub emulated_grom: bool,
    /// Accepts more than 40K of GROM data
    pub large_grom: bool,
    pub paged_rom: PagedRomUse,
    /// Cannot work without a c.bin
    pub requires_rom: bool,
    pub max_rom: Option<usize>,
    pub max_paged_rom: Option<usize>,
    pub max_grom: Option<usize>,
}

/// GROM size a native GROM port can address (5 x 8K windows)
pub const NATIVE_GROM_LIMIT: usize = 40960;

impl PcbLimits {
    const PAGED: PcbLimits = PcbLimits {
        emulated_grom: false,
        large_grom: false,
        paged_rom: PagedRomUse::Rejected,
        requires_rom: true,
        max_rom: None,
        max_paged_rom: None,
        max_grom: None,
    };
}

impl PcbType {
    pub const ALL: [PcbType; 8] = [
        PcbType::Standard,
        PcbType::GromEmu,
        PcbType::Paged7,
        PcbType::Paged12k,
        PcbType::Paged,
        PcbType::Paged377,
        PcbType::Paged378,
        PcbType::Paged379i,
    ];

    /// Identifier used in the layout file
    pub fn name(self) -> &'static str {
        match self {
            PcbType::Standard => "standard",
            PcbType::GromEmu => "gromemu",
            PcbType::Paged7 => "paged7",
            PcbType::Paged12k => "paged12k",
            PcbType::Paged => "paged",
            PcbType::Paged377 => "paged377",
            PcbType::Paged378 => "paged378",
            PcbType::Paged379i => "paged379i",
        }
    }

    pub fn limits(self) -> PcbLimits {
        match self {
            PcbType::Standard => PcbLimits {
                requires_rom: false,
                max_rom: Some(0x2000),
                ..PcbLimits::PAGED
            },
            PcbType::GromEmu => PcbLimits {
                emulated_grom: true,
                paged_rom: PagedRomUse::MergedIntoRom,
                requires_rom: false,
                max_rom: Some(0x200_0000),
                ..PcbLimits::PAGED
            },
            PcbType::Paged7 => PcbLimits {
                max_rom: Some(0x4000),
                ..PcbLimits::PAGED
            },
            PcbType::Paged12k => PcbLimits {
                paged_rom: PagedRomUse::Required,
                max_rom: Some(0x1000),
                max_paged_rom: Some(0x2000),
                ..PcbLimits::PAGED
            },
            PcbType::Paged => PcbLimits {
                paged_rom: PagedRomUse::Required,
                max_rom: Some(0x2000),
                max_paged_rom: Some(0x2000),
                ..PcbLimits::PAGED
            },
            PcbType::Paged377 => PcbLimits {
                max_rom: Some(0x20_0000),
                ..PcbLimits::PAGED
            },
            // Accepted past the generic GROM gate, but only up to the same 40K
            PcbType::Paged378 => PcbLimits {
                large_grom: true,
                max_rom: Some(0x8_0000),
                max_grom: Some(NATIVE_GROM_LIMIT),
                ..PcbLimits::PAGED
            },
            PcbType::Paged379i => PcbLimits {
                max_rom: Some(0x2_0000),
                ..PcbLimits::PAGED
            },
        }
    }
}

impl fmt::Display for PcbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PcbType {
    type Err = RpkError;

    fn from_str(s: &str) -> RpkResult<Self> {
        PcbType::ALL
            .into_iter()
            .find(|pcb| pcb.name() == s)
            .ok_or_else(|| RpkError::unhandled_pcb(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_round_trip() {
        for pcb in PcbType::ALL {
            assert_eq!(pcb.name().parse::<PcbType>().unwrap(), pcb);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "paged16k".parse::<PcbType>().unwrap_err();
        assert!(matches!(err, RpkError::UnhandledPcb { ref name } if name == "paged16k"));
    }

    #[test]
    fn test_paged_types_require_rom() {
        for pcb in PcbType::ALL {
            assert_eq!(pcb.limits().requires_rom, pcb.name().starts_with("paged"), "{pcb}");
        }
    }

    #[test]
    fn test_paged_rom_users() {
        let users: Vec<_> = PcbType::ALL
            .into_iter()
            .filter(|pcb| pcb.limits().paged_rom != PagedRomUse::Rejected)
            .collect();
        assert_eq!(users, vec![PcbType::GromEmu, PcbType::Paged12k, PcbType::Paged]);
    }
}
