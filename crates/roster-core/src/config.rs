//! Key-value settings and the dashboard layout stored in them.
//!
//! UI state lives behind [`ConfigStore`] so it can be swapped between the
//! SQLite `settings` table and [`MemoryConfigStore`] in tests.

use std::{collections::BTreeMap, fmt, str::FromStr};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Settings key holding the serialized [`DashboardLayout`].
pub const LAYOUT_KEY: &str = "dashboard.layout";

/// Persistent string settings.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`, returning whether it was present.
    fn remove(&mut self, key: &str) -> Result<bool>;
}

/// Settings held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    values: BTreeMap<String, String>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.values.remove(key).is_some())
    }
}

/// Dashboard panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Widget {
    WorkerStats,
    StatusBreakdown,
    RecentActivity,
    ExpiringDocuments,
    UpcomingFlights,
    PendingTasks,
}

impl Widget {
    /// Default order.
    pub const ALL: [Widget; 6] = [
        Widget::WorkerStats,
        Widget::StatusBreakdown,
        Widget::RecentActivity,
        Widget::ExpiringDocuments,
        Widget::UpcomingFlights,
        Widget::PendingTasks,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Widget::WorkerStats => "worker-stats",
            Widget::StatusBreakdown => "status-breakdown",
            Widget::RecentActivity => "recent-activity",
            Widget::ExpiringDocuments => "expiring-documents",
            Widget::UpcomingFlights => "upcoming-flights",
            Widget::PendingTasks => "pending-tasks",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Widget::WorkerStats => "Worker Statistics",
            Widget::StatusBreakdown => "Status Breakdown",
            Widget::RecentActivity => "Recent Activity",
            Widget::ExpiringDocuments => "Expiring Documents",
            Widget::UpcomingFlights => "Upcoming Flights",
            Widget::PendingTasks => "Pending Tasks",
        }
    }
}

impl FromStr for Widget {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Widget::ALL
            .into_iter()
            .find(|w| w.id() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Widget::ALL.iter().map(Widget::id).collect();
                TrackerError::invalid_input("widget").with_reason(format!(
                    "Unknown widget: {s}. Must be one of: {}",
                    known.join(", ")
                ))
            })
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One position on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSlot {
    pub widget: Widget,
    pub visible: bool,
}

#[derive(Deserialize)]
struct StoredSlot {
    widget: String,
    #[serde(default = "visible_by_default")]
    visible: bool,
}

fn visible_by_default() -> bool {
    true
}

/// Ordered widget slots with visibility.
///
/// Every [`Widget`] appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardLayout {
    slots: Vec<WidgetSlot>,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            slots: Widget::ALL
                .into_iter()
                .map(|widget| WidgetSlot {
                    widget,
                    visible: true,
                })
                .collect(),
        }
    }
}

impl DashboardLayout {
    /// Reads the layout from `store`, or the default when none is saved.
    ///
    /// Unknown or repeated widgets in the stored value are dropped and
    /// missing ones are appended visible. An unreadable value is replaced by
    /// the default layout.
    pub fn load(store: &impl ConfigStore) -> Result<Self> {
        let Some(raw) = store.get(LAYOUT_KEY)? else {
            return Ok(Self::default());
        };

        let stored: Vec<StoredSlot> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Ignoring unreadable dashboard layout: {e}");
                return Ok(Self::default());
            }
        };

        let mut slots: Vec<WidgetSlot> = Vec::with_capacity(Widget::ALL.len());
        for slot in stored {
            match slot.widget.parse::<Widget>() {
                Ok(widget) if !slots.iter().any(|s| s.widget == widget) => {
                    slots.push(WidgetSlot {
                        widget,
                        visible: slot.visible,
                    });
                }
                Ok(_) => {}
                Err(_) => warn!("Dropping unknown dashboard widget '{}'", slot.widget),
            }
        }
        for widget in Widget::ALL {
            if !slots.iter().any(|s| s.widget == widget) {
                slots.push(WidgetSlot {
                    widget,
                    visible: true,
                });
            }
        }
        Ok(Self { slots })
    }

    /// Writes the layout to `store`.
    pub fn save(&self, store: &mut impl ConfigStore) -> Result<()> {
        let value = serde_json::to_string(&self.slots)?;
        store.set(LAYOUT_KEY, &value)
    }

    pub fn slots(&self) -> &[WidgetSlot] {
        &self.slots
    }

    /// Visible widgets in display order.
    pub fn visible(&self) -> impl Iterator<Item = Widget> + '_ {
        self.slots.iter().filter(|s| s.visible).map(|s| s.widget)
    }

    /// Moves `widget` to the 1-based `position`, shifting the others.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` for a position outside
    /// `1..=slots().len()`.
    pub fn move_widget(&mut self, widget: Widget, position: usize) -> Result<()> {
        if position == 0 || position > self.slots.len() {
            return Err(TrackerError::invalid_input("position").with_reason(format!(
                "Position must be between 1 and {}",
                self.slots.len()
            )));
        }
        let from = self.index_of(widget)?;
        let slot = self.slots.remove(from);
        self.slots.insert(position - 1, slot);
        Ok(())
    }

    /// Flips visibility of `widget` and returns the new value.
    pub fn toggle(&mut self, widget: Widget) -> Result<bool> {
        let index = self.index_of(widget)?;
        let slot = &mut self.slots[index];
        slot.visible = !slot.visible;
        Ok(slot.visible)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn index_of(&self, widget: Widget) -> Result<usize> {
        self.slots
            .iter()
            .position(|s| s.widget == widget)
            .ok_or_else(|| {
                TrackerError::invalid_input("widget")
                    .with_reason(format!("Widget {widget} is not on the dashboard"))
            })
    }
}

impl fmt::Display for DashboardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Dashboard Layout\n")?;
        for (i, slot) in self.slots.iter().enumerate() {
            let mark = if slot.visible { "shown" } else { "hidden" };
            writeln!(
                f,
                "{}. **{}** (`{}`) - {mark}",
                i + 1,
                slot.widget.title(),
                slot.widget.id()
            )?;
        }
        Ok(())
    }
}
