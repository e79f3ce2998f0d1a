//! Conversion pipeline: locate, load, select PCB type, write

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cartridge::Cartridge;
use crate::common::{RpkError, RpkResult};
use crate::pcb::PcbType;
use crate::rpk::{ContainerConfig, RpkWriter};

/// Options of one conversion
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Skip inference and use this PCB type (still validated)
    pub forced_pcb: Option<PcbType>,
    pub container: ContainerConfig,
}

/// Result of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub pcb: PcbType,
    pub output: PathBuf,
}

/// Pipeline turning bin files into an RPK container
pub struct Pipeline {
    config: PipelineConfig,
    writer: RpkWriter,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let writer = RpkWriter::new(config.container.clone());
        Self { config, writer }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the cartridge at `input` and select its PCB type
    pub fn prepare(&self, input: &Path) -> RpkResult<Cartridge> {
        let mut cart = Cartridge::open(input)?;
        cart.select_pcb_type(self.config.forced_pcb)?;
        Ok(cart)
    }

    /// Convert `input` into an RPK written to `output`
    /// (next to `input` when not given).
    pub fn convert(&self, input: &Path, output: Option<&Path>) -> RpkResult<Conversion> {
        let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);
        let cart = self.prepare(input)?;
        let pcb = cart.pcb_type().ok_or(RpkError::NoPcbType)?;

        info!("Writing RPK to {}", output.display());
        self.writer.write_to(&cart, &output)?;

        Ok(Conversion { pcb, output })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// `game.bin` -> `game.rpk`, in the same directory
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("rpk")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_output_path() {
        assert_eq!(default_output_path(Path::new("roms/parsecg.bin")), PathBuf::from("roms/parsecg.rpk"));
        assert_eq!(default_output_path(Path::new("parsec.zip")), PathBuf::from("parsec.rpk"));
        assert_eq!(default_output_path(Path::new("demo")), PathBuf::from("demo.rpk"));
    }
}
