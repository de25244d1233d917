//! MCP server implementation for Roster
//!
//! Exposes the tracker's record, status, milestone and history operations as
//! Model Context Protocol tools, so AI assistants can keep the agency's
//! records up to date.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use roster_core::Tracker;
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use handlers::{
    AddNote, ChangeStatus, CreateEntity, DeleteEntity, Id, ListEntities, McpResult, MilestoneRef,
    OfKind, SetMilestone, UpdateEntity,
};

/// MCP server for Roster
///
/// Tool calls share one tracker. Each call opens its own connection and
/// writes inside an IMMEDIATE transaction, so overlapping writes wait on
/// SQLite's busy timeout and apply in turn.
#[derive(Clone)]
pub struct RosterMcpServer {
    tracker: Arc<Tracker>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RosterMcpServer {
    /// Create a new Roster MCP server
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(tracker),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.tracker.clone())
    }

    #[tool(
        name = "create_entity",
        description = "Register a new record. `kind` is worker, document, ticket or task; `name` is required. The record starts in its kind's first status (worker Waiting, document pending_review, ticket Pending, task pending) unless `status` is given, with the kind's standard checklist unless `milestones` lists the labels. Kind-specific attributes (passport_number, destination, reference_number, expires_on, airline, flight_number, departure_date, assignee, due_date...) may be set; dates are YYYY-MM-DD. Returns the new record ID."
    )]
    async fn create_entity(&self, params: Parameters<CreateEntity>) -> McpResult {
        self.handlers().create_entity(params).await
    }

    #[tool(
        name = "list_entities",
        description = "List records through the filter view. All criteria combine with AND: `kind`, `search` (case-insensitive substring of id and name, plus any `search_fields` such as passport_number or destination), `status` (label or 'all'), `entity_type` (or 'all'), and an inclusive `from`/`to` date range on `date_field` (default: last update). Without `sort` the most recently updated records come first; `sort` accepts name, updated, status or progress. Use `page`/`per_page` to page through long lists."
    )]
    async fn list_entities(&self, params: Parameters<ListEntities>) -> McpResult {
        self.handlers().list_entities(params).await
    }

    #[tool(
        name = "show_entity",
        description = "Show one record: kind, status, progress band, attributes, timestamps and the milestone checklist with each item's state."
    )]
    async fn show_entity(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_entity(params).await
    }

    #[tool(
        name = "update_entity",
        description = "Edit a record's name, type and kind-specific attributes. Only the given fields change; attributes of another kind are rejected. Status and milestones have their own tools."
    )]
    async fn update_entity(&self, params: Parameters<UpdateEntity>) -> McpResult {
        self.handlers().update_entity(params).await
    }

    #[tool(
        name = "delete_entity",
        description = "Permanently delete a record together with its milestones and history. Requires `confirmed` true. This cannot be undone."
    )]
    async fn delete_entity(&self, params: Parameters<DeleteEntity>) -> McpResult {
        self.handlers().delete_entity(params).await
    }

    #[tool(
        name = "change_status",
        description = "Move a record to another status of its kind and append a history entry with the optional `note` and `actor`. Labels match ignoring case, spaces and dashes ('today flying' = 'Today Flying'). Setting the current status again is still recorded. Progress is not affected."
    )]
    async fn change_status(&self, params: Parameters<ChangeStatus>) -> McpResult {
        self.handlers().change_status(params).await
    }

    #[tool(
        name = "status_legend",
        description = "List every status of a kind in lifecycle order with the tone and icon it is drawn with."
    )]
    async fn status_legend(&self, params: Parameters<OfKind>) -> McpResult {
        self.handlers().status_legend(params).await
    }

    #[tool(
        name = "status_breakdown",
        description = "Count the records of a kind per status, including statuses with no records."
    )]
    async fn status_breakdown(&self, params: Parameters<OfKind>) -> McpResult {
        self.handlers().status_breakdown(params).await
    }

    #[tool(
        name = "add_milestone",
        description = "Append a new, unsatisfied item to a record's checklist. Labels are unique per record, ignoring case."
    )]
    async fn add_milestone(&self, params: Parameters<MilestoneRef>) -> McpResult {
        self.handlers().add_milestone(params).await
    }

    #[tool(
        name = "set_milestone",
        description = "Mark a checklist item satisfied (`satisfied` true) or not (false); leave `satisfied` out to flip it. Returns the record's new progress. Statuses are never changed by checklist edits."
    )]
    async fn set_milestone(&self, params: Parameters<SetMilestone>) -> McpResult {
        self.handlers().set_milestone(params).await
    }

    #[tool(
        name = "remove_milestone",
        description = "Remove an item from a record's checklist. The order of the remaining items is kept."
    )]
    async fn remove_milestone(&self, params: Parameters<MilestoneRef>) -> McpResult {
        self.handlers().remove_milestone(params).await
    }

    #[tool(
        name = "show_history",
        description = "Show a record's history, newest first: each entry's time, status, actor and note."
    )]
    async fn show_history(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_history(params).await
    }

    #[tool(
        name = "add_note",
        description = "Append a note to a record's history, stamped with its current status. The status does not change."
    )]
    async fn add_note(&self, params: Parameters<AddNote>) -> McpResult {
        self.handlers().add_note(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for RosterMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "roster".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Roster tracks the records of a recruitment agency that places workers abroad.

## Core Concepts
- **Records** come in four kinds: workers, documents, tickets and tasks
- **Status**: each kind has a fixed status set. Workers move through Waiting, In Process, Today Flying, Abroad, Return, Extend, Terminate, Missing
- **Milestones**: each record has an ordered checklist (a worker's is visa, passport, medical, contract, insurance, orientation). Progress is the share of satisfied items: below 70% needs attention, 70% and above is in progress, 100% is complete
- **History**: every status change and note is kept, newest first

Status and progress are independent: completing a checklist never changes a status, and a status change never touches the checklist.

## Typical Workflow
1. Find the record with `list_entities` (search, status, type and date filters combine)
2. Read it with `show_entity`
3. Tick checklist items with `set_milestone`
4. Move the status with `change_status`, always with a note explaining why
5. Review what happened with `show_history`

## Tool Categories
- **Records**: create_entity, list_entities, show_entity, update_entity, delete_entity
- **Statuses**: change_status, status_legend, status_breakdown
- **Checklists**: add_milestone, set_milestone, remove_milestone
- **History**: show_history, add_note"#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: RosterMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Roster MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
