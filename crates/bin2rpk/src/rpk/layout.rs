//! `layout.xml` generation

use std::fmt::Write;

use super::ContainerConfig;
use crate::cartridge::Cartridge;
use crate::common::{RpkError, RpkResult};
use crate::image::ImageKind;
use crate::pcb::PcbType;

const INDENT: &str = "   ";

/// One image referenced by the layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    pub kind: ImageKind,
    /// Member name inside the container
    pub file: String,
}

/// Resource and socket description of a cartridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub pcb: PcbType,
    pub entries: Vec<LayoutEntry>,
}

impl Layout {
    pub fn new(pcb: PcbType) -> Self {
        Self {
            pcb,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, kind: ImageKind, file: impl Into<String>) {
        self.entries.push(LayoutEntry {
            kind,
            file: file.into(),
        });
    }

    /// Layout for a cartridge whose PCB type has been selected
    pub fn for_cartridge(cart: &Cartridge, config: &ContainerConfig) -> RpkResult<Self> {
        let pcb = cart.pcb_type().ok_or(RpkError::NoPcbType)?;
        let mut layout = Self::new(pcb);
        for (kind, _) in cart.present_images() {
            layout.add(kind, config.member_name(kind));
        }
        Ok(layout)
    }

    /// Render the layout as XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        // Writing into a String cannot fail
        let _ = self.write_xml(&mut xml);
        xml
    }

    fn write_xml(&self, out: &mut String) -> std::fmt::Result {
        let pad = |level: usize| INDENT.repeat(level);

        writeln!(out, "<?xml version='1.0' encoding='utf-8'?>")?;
        writeln!(out, "<romset version=\"1.0\">")?;

        writeln!(out, "{}<resources>", pad(1))?;
        for entry in &self.entries {
            writeln!(
                out,
                "{}<rom id=\"{}\" file=\"{}\" />",
                pad(2),
                entry.kind.resource_id(),
                escape_attr(&entry.file)
            )?;
        }
        writeln!(out, "{}</resources>", pad(1))?;

        writeln!(out, "{}<configuration>", pad(1))?;
        writeln!(out, "{}<pcb type=\"{}\">", pad(2), self.pcb)?;
        for entry in &self.entries {
            writeln!(
                out,
                "{}<socket id=\"{}\" uses=\"{}\" />",
                pad(3),
                entry.kind.socket_id(),
                entry.kind.resource_id()
            )?;
        }
        writeln!(out, "{}</pcb>", pad(2))?;
        writeln!(out, "{}</configuration>", pad(1))?;

        writeln!(out, "</romset>")
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}
