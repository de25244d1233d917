//! Centralized status and progress display mapping.
//!
//! Every presentation layer asks this module how a status badge looks instead
//! of keeping its own lookup table. The mapping is display-neutral: a
//! semantic [`Tone`] and an [`Icon`] identifier, which front ends translate
//! into their own colors and glyphs.
//!
//! Lookups by raw label never fail. A label outside the kind's enumeration
//! gets [`Appearance::NEUTRAL`] and a warning is logged.
//!
//! ```rust
//! use roster_core::{appearance::{appearance, Icon, Tone}, models::EntityKind};
//!
//! let confirmed = appearance(EntityKind::Ticket, "Confirmed");
//! assert_eq!(confirmed.tone, Tone::Green);
//! assert_eq!(confirmed.icon, Icon::CheckCircle);
//!
//! let unknown = appearance(EntityKind::Ticket, "Rerouted");
//! assert_eq!(unknown.tone, Tone::Gray);
//! ```

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    models::{DocumentStatus, EntityKind, Status, TaskStatus, TicketStatus, WorkerStatus},
    progress::ProgressBand,
};

/// Semantic badge color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Gray,
    Green,
    Blue,
    Amber,
    Orange,
    Red,
    Purple,
    Teal,
    Indigo,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Gray => "gray",
            Tone::Green => "green",
            Tone::Blue => "blue",
            Tone::Amber => "amber",
            Tone::Orange => "orange",
            Tone::Red => "red",
            Tone::Purple => "purple",
            Tone::Teal => "teal",
            Tone::Indigo => "indigo",
        }
    }
}

/// Badge icon identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    HelpCircle,
    CheckCircle,
    XCircle,
    AlertCircle,
    AlertTriangle,
    Clock,
    Loader,
    PlaneTakeoff,
    PlaneLanding,
    Globe,
    CalendarPlus,
    CalendarX,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::HelpCircle => "help-circle",
            Icon::CheckCircle => "check-circle",
            Icon::XCircle => "x-circle",
            Icon::AlertCircle => "alert-circle",
            Icon::AlertTriangle => "alert-triangle",
            Icon::Clock => "clock",
            Icon::Loader => "loader",
            Icon::PlaneTakeoff => "plane-takeoff",
            Icon::PlaneLanding => "plane-landing",
            Icon::Globe => "globe",
            Icon::CalendarPlus => "calendar-plus",
            Icon::CalendarX => "calendar-x",
        }
    }

    /// Single-character glyph for plain terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::HelpCircle => "?",
            Icon::CheckCircle => "✓",
            Icon::XCircle => "✗",
            Icon::AlertCircle | Icon::AlertTriangle => "!",
            Icon::Clock => "○",
            Icon::Loader => "➤",
            Icon::PlaneTakeoff => "↗",
            Icon::PlaneLanding => "↘",
            Icon::Globe => "◉",
            Icon::CalendarPlus => "+",
            Icon::CalendarX => "×",
        }
    }
}

/// How a badge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Appearance {
    pub tone: Tone,
    pub icon: Icon,
}

impl Appearance {
    /// Fallback for labels outside every enumeration.
    pub const NEUTRAL: Appearance = Appearance::new(Tone::Gray, Icon::HelpCircle);

    pub const fn new(tone: Tone, icon: Icon) -> Self {
        Self { tone, icon }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tone.as_str(), self.icon.as_str())
    }
}

/// Appearance of a known status.
pub fn status_appearance(status: Status) -> Appearance {
    use Icon::*;
    use Tone::*;

    let (tone, icon) = match status {
        Status::Worker(s) => match s {
            WorkerStatus::Waiting => (Amber, Clock),
            WorkerStatus::InProcess => (Blue, Loader),
            WorkerStatus::TodayFlying => (Purple, PlaneTakeoff),
            WorkerStatus::Abroad => (Green, Globe),
            WorkerStatus::Return => (Teal, PlaneLanding),
            WorkerStatus::Extend => (Indigo, CalendarPlus),
            WorkerStatus::Terminate => (Red, XCircle),
            WorkerStatus::Missing => (Red, AlertTriangle),
        },
        Status::Document(s) => match s {
            DocumentStatus::PendingReview => (Amber, Clock),
            DocumentStatus::Approved => (Green, CheckCircle),
            DocumentStatus::Rejected => (Red, XCircle),
            DocumentStatus::NeedsCorrection => (Orange, AlertCircle),
            DocumentStatus::Expired => (Red, CalendarX),
            DocumentStatus::Processing => (Blue, Loader),
        },
        Status::Ticket(s) => match s {
            TicketStatus::Confirmed => (Green, CheckCircle),
            TicketStatus::Pending => (Amber, Clock),
            TicketStatus::Cancelled => (Red, XCircle),
            TicketStatus::Completed => (Blue, PlaneLanding),
        },
        Status::Task(s) => match s {
            TaskStatus::Pending => (Amber, Clock),
            TaskStatus::InProgress => (Blue, Loader),
            TaskStatus::Completed => (Green, CheckCircle),
            TaskStatus::Overdue => (Red, AlertTriangle),
        },
    };
    Appearance::new(tone, icon)
}

/// Appearance of a raw status label of `kind`.
///
/// Labels outside the enumeration map to [`Appearance::NEUTRAL`] and are
/// reported through `log::warn!`.
pub fn appearance(kind: EntityKind, label: &str) -> Appearance {
    match Status::lookup(kind, label) {
        Some(status) => status_appearance(status),
        None => {
            warn!("Unknown {} status '{label}', using neutral badge", kind.as_str());
            Appearance::NEUTRAL
        }
    }
}

/// Appearance of a progress band.
pub fn band_appearance(band: ProgressBand) -> Appearance {
    match band {
        ProgressBand::Complete => Appearance::new(Tone::Green, Icon::CheckCircle),
        ProgressBand::InProgress => Appearance::new(Tone::Blue, Icon::Loader),
        ProgressBand::AttentionNeeded => Appearance::new(Tone::Amber, Icon::AlertTriangle),
    }
}

/// The full mapping table of `kind`, in enumeration order.
pub fn legend(kind: EntityKind) -> Vec<(Status, Appearance)> {
    Status::all(kind)
        .into_iter()
        .map(|status| (status, status_appearance(status)))
        .collect()
}
