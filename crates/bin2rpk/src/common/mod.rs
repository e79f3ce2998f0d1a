//! Common infrastructure shared by the loader, the PCB selector and the writer

mod error;

pub use error::{ByteSize, DiagnosticReporter, PcbViolation, RpkError, RpkResult};
