//! bin2rpk - TI-99/4A cartridge container builder
//!
//! Turns raw cartridge dumps (`c.bin`, `d.bin`, `g.bin` style files, loose
//! or inside a zip) into an RPK container for the emulator.
//!
//! ## Architecture
//!
//! - **Image** (`image/`): filename convention and banking hints
//! - **Locator** (`locator/`): directory and zip image sources
//! - **Cartridge** (`cartridge/`): loaded images and their invariants
//! - **GROM** (`grom`): detection of GROM data that needs emulation
//! - **PCB** (`pcb/`): PCB types, inference and validation
//! - **RPK** (`rpk/`): layout file and zip container output
//! - **Driver** (`driver/`): the end-to-end pipeline
//! - **Common** (`common/`): errors and diagnostics

pub mod cartridge;
pub mod common;
pub mod driver;
pub mod grom;
pub mod image;
pub mod locator;
pub mod pcb;
pub mod rpk;

// Re-exports for convenience
pub use cartridge::Cartridge;
pub use common::{DiagnosticReporter, PcbViolation, RpkError, RpkResult};
pub use driver::{Conversion, Pipeline, PipelineConfig};
pub use image::ImageKind;
pub use pcb::PcbType;
pub use rpk::{ContainerConfig, RpkWriter};
