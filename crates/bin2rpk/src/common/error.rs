//! Error types and diagnostic reporting

use std::fmt;
use std::path::PathBuf;

use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;

use crate::image::ImageKind;
use crate::pcb::PcbType;

/// Errors raised while turning bin dumps into an RPK container.
///
/// Every variant is fatal: a conversion either produces a complete
/// container or nothing at all.
#[derive(Error, Debug)]
pub enum RpkError {
    #[error("found d.bin without c.bin")]
    PagedRomWithoutRom,

    #[error("missing main bin")]
    MissingMainImage,

    #[error("FinalGROM advanced modes not supported (mode `{marker}`)")]
    AdvancedMode { marker: char },

    #[error("unable to guess main bin in {archive} ({groms} GROM and {roms} ROM candidates)")]
    AmbiguousArchive {
        archive: String,
        groms: usize,
        roms: usize,
    },

    #[error("cannot determine {kind} filename from `{name}`")]
    UnknownFilename { name: String, kind: ImageKind },

    #[error(transparent)]
    Pcb(#[from] PcbViolation),

    #[error("unhandled pcbtype `{name}`")]
    UnhandledPcb { name: String },

    #[error("no pcbtype selected for cartridge")]
    NoPcbType,

    #[error("refusing to overwrite existing file {}", .path.display())]
    OutputExists { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl RpkError {
    pub fn unknown_filename(name: impl Into<String>, kind: ImageKind) -> Self {
        Self::UnknownFilename {
            name: name.into(),
            kind,
        }
    }

    pub fn unhandled_pcb(name: impl Into<String>) -> Self {
        Self::UnhandledPcb { name: name.into() }
    }

    pub fn ambiguous_archive(archive: impl Into<String>, groms: usize, roms: usize) -> Self {
        Self::AmbiguousArchive {
            archive: archive.into(),
            groms,
            roms,
        }
    }
}

pub type RpkResult<T> = Result<T, RpkError>;

/// A cartridge that cannot be represented by a PCB type.
///
/// Covers both inference dead ends and failed validation of an inferred
/// or forced type; callers see no difference between the two.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PcbViolation {
    #[error("d.bin found together with a c.bin that is neither 4K nor 8K ({len} bytes)")]
    InconsistentRom { len: usize },

    #[error("8K/GROM data can not be used with pcbtype {pcb}")]
    NeedsGromEmulation { pcb: PcbType },

    #[error(">40K GROM data can not be used with pcbtype {pcb}")]
    GromTooLarge { pcb: PcbType },

    #[error("d.bin can not be used with pcbtype {pcb}")]
    PagedRomNotSupported { pcb: PcbType },

    #[error("pcbtype {pcb} requires d.bin")]
    PagedRomRequired { pcb: PcbType },

    #[error("pcbtype {pcb} requires c.bin")]
    RomRequired { pcb: PcbType },

    #[error("can't use d.bin with pcbtype gromemu unless c.bin is 8K ({len} bytes)")]
    MergeNeeds8K { len: usize },

    #[error("pcbtype {pcb} can not handle {image} larger than {max} ({len} bytes)")]
    TooLarge {
        pcb: PcbType,
        image: ImageKind,
        len: usize,
        max: ByteSize,
    },
}

/// Size limit rendered the way cartridge sizes are usually quoted (8K, 2M).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSize(pub usize);

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const K: usize = 1024;
        const M: usize = 1024 * K;
        match self.0 {
            n if n >= M && n % M == 0 => write!(f, "{}M", n / M),
            n if n >= K && n % K == 0 => write!(f, "{}K", n / K),
            n => write!(f, "{n} bytes"),
        }
    }
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    /// Build the diagnostic for a failed conversion.
    ///
    /// The message carries the whole context chain on one line; with
    /// `verbose` every cause is listed as a separate note as well.
    pub fn diagnostic(error: &anyhow::Error, verbose: bool) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::error().with_message(format!("{error:#}"));
        if !verbose {
            return diagnostic;
        }
        let notes = error
            .chain()
            .skip(1)
            .map(|cause| format!("caused by: {cause}"))
            .collect();
        diagnostic.with_notes(notes)
    }

    pub fn report_error(&self, error: &anyhow::Error, verbose: bool) {
        let diagnostic = Self::diagnostic(error, verbose);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_byte_size_display() {
        assert_eq!(ByteSize(8192).to_string(), "8K");
        assert_eq!(ByteSize(40960).to_string(), "40K");
        assert_eq!(ByteSize(33554432).to_string(), "32M");
        assert_eq!(ByteSize(1000).to_string(), "1000 bytes");
    }

    #[test]
    fn test_violation_messages() {
        let err = RpkError::from(PcbViolation::TooLarge {
            pcb: PcbType::Standard,
            image: ImageKind::Rom,
            len: 20000,
            max: ByteSize(8192),
        });
        assert_eq!(
            err.to_string(),
            "pcbtype standard can not handle c.bin larger than 8K (20000 bytes)"
        );
        let err = RpkError::from(PcbViolation::PagedRomRequired { pcb: PcbType::Paged12k });
        assert_eq!(err.to_string(), "pcbtype paged12k requires d.bin");
    }

    #[test]
    fn test_diagnostic_notes_only_when_verbose() {
        let error = anyhow::Error::new(RpkError::MissingMainImage).context("converting foo.bin");
        let quiet = DiagnosticReporter::diagnostic(&error, false);
        assert_eq!(quiet.message, "converting foo.bin: missing main bin");
        assert!(quiet.notes.is_empty());

        let loud = DiagnosticReporter::diagnostic(&error, true);
        assert_eq!(loud.notes, vec!["caused by: missing main bin".to_string()]);
    }
}
