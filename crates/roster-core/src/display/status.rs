//! Status badges, the status legend and operation feedback messages.

use std::fmt;

use crate::{
    appearance::{appearance, band_appearance, legend},
    models::{EntityKind, Status},
    progress::Progress,
};

/// A status label drawn with its glyph, e.g. `✓ Confirmed`.
///
/// Raw labels outside the kind's enumeration get the neutral badge.
pub struct StatusBadge<'a> {
    pub kind: EntityKind,
    pub label: &'a str,
}

impl<'a> StatusBadge<'a> {
    pub fn new(kind: EntityKind, label: &'a str) -> Self {
        Self { kind, label }
    }

    pub fn of(status: &'a Status) -> Self {
        Self {
            kind: status.kind(),
            label: status.label(),
        }
    }
}

impl fmt::Display for StatusBadge<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let look = appearance(self.kind, self.label);
        write!(f, "{} {}", look.icon.glyph(), self.label)
    }
}

/// Progress with its band glyph, e.g. `! 4/6 (66%, Attention Needed)`.
pub struct ProgressBadge(pub Progress);

impl fmt::Display for ProgressBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let look = band_appearance(self.0.band());
        write!(f, "{} {}", look.icon.glyph(), self.0)
    }
}

/// Markdown table of every status of a kind and how it is drawn.
pub struct StatusLegend(pub EntityKind);

impl fmt::Display for StatusLegend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} statuses", capitalize(self.0.as_str()))?;
        writeln!(f)?;
        writeln!(f, "| Status | Tone | Icon |")?;
        writeln!(f, "|:-|:-|:-|")?;
        for (status, look) in legend(self.0) {
            writeln!(
                f,
                "| {} | {} | {} |",
                StatusBadge::of(&status),
                look.tone.as_str(),
                look.icon.as_str()
            )?;
        }
        Ok(())
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Wrapper type for displaying operation confirmation messages.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )
    }
}
