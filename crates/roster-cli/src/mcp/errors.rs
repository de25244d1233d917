//! Error handling utilities for MCP server

use roster_core::TrackerError;
use rmcp::ErrorData;

/// Converts a tracker error into an MCP error.
///
/// Errors caused by the request (unknown IDs, labels, rejected transitions)
/// are reported as invalid parameters so the client can correct the call;
/// storage failures are internal errors.
pub fn to_mcp_error(message: &str, error: &TrackerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        TrackerError::EntityNotFound { .. }
        | TrackerError::MilestoneNotFound { .. }
        | TrackerError::DuplicateMilestone { .. }
        | TrackerError::TransitionRejected { .. }
        | TrackerError::InvalidInput { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
