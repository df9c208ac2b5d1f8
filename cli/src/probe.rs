use serde::Serialize;
use std::io::Write;
use truernd_types::{Arch, Instruction};

use crate::error::CliError;

/// What `truernd probe` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub arch: Arch,
    pub instruction: Option<Instruction>,
    pub supported: bool,
    pub max_retries: u32,
}

impl ProbeReport {
    pub fn current() -> Self {
        let arch = Arch::current();
        Self {
            arch,
            instruction: arch.instruction(),
            supported: truernd::is_supported(),
            max_retries: truernd::MAX_RETRIES,
        }
    }

    pub fn render<W: Write>(&self, out: &mut W, json: bool) -> Result<(), CliError> {
        if json {
            serde_json::to_writer_pretty(&mut *out, self)?;
            writeln!(out)?;
            return Ok(());
        }
        let instruction = self
            .instruction
            .map_or_else(|| "none".to_string(), |i| i.to_string());
        writeln!(out, "Architecture: {} ({}-bit)", self.arch, self.arch.word_bits())?;
        writeln!(out, "Instruction:  {instruction}")?;
        writeln!(out, "Supported:    {}", if self.supported { "yes" } else { "no" })?;
        writeln!(out, "Max retries:  {}", self.max_retries)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_is_consistent() {
        let report = ProbeReport::current();
        assert_eq!(report.instruction, report.arch.instruction());
        if report.instruction.is_none() {
            assert!(!report.supported);
        }
    }

    #[test]
    fn renders_json() {
        let report = ProbeReport {
            arch: Arch::Aarch64,
            instruction: Some(Instruction::Rndr),
            supported: true,
            max_retries: 10,
        };
        let mut out = Vec::new();
        report.render(&mut out, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["arch"], "Aarch64");
        assert_eq!(value["instruction"], "Rndr");
        assert_eq!(value["supported"], true);
        assert_eq!(value["max_retries"], 10);
    }

    #[test]
    fn renders_text() {
        let report = ProbeReport {
            arch: Arch::Arm,
            instruction: None,
            supported: false,
            max_retries: 4,
        };
        let mut out = Vec::new();
        report.render(&mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Architecture: arm (32-bit)"));
        assert!(text.contains("Instruction:  none"));
        assert!(text.contains("Supported:    no"));
    }
}
