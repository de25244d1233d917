//! Display formatting wrappers and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as "created", "deleted" or page
//! metadata. All output is markdown, rendered by the CLI's terminal renderer
//! or returned verbatim by the MCP server.
//!
//! Status labels are drawn through [`StatusBadge`], which asks
//! [`crate::appearance`] for the glyph so the mapping stays in one table.
//!
//! ```rust
//! use roster_core::display::OperationStatus;
//!
//! let done = OperationStatus::success("Layout reset".to_string());
//! assert_eq!(done.to_string(), "Success: Layout reset\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{EntityPage, HistoryEntries};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::{OperationStatus, ProgressBadge, StatusBadge, StatusLegend};
