use defmt::Format;

#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticRecord {
    source: &'static str,
    line: u32,
}

impl DiagnosticRecord {
    pub const fn new(source: &'static str, line: u32) -> Self {
        Self { source, line }
    }

    pub const fn source(&self) -> &'static str {
        self.source
    }

    pub const fn line(&self) -> u32 {
        self.line
    }
}
