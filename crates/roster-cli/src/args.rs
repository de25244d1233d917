//! Command-line argument definitions using clap.
//!
//! Every subcommand has a thin `...Args` wrapper carrying the clap derives
//! and help text, converted into the matching `roster_core::params` type:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```
//!
//! Core parameter types stay free of clap attributes so the MCP server can
//! share them unchanged.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use roster_core::params::*;

/// Track workers, documents, tickets and tasks of a recruitment agency
///
/// Every record carries a status from its kind's fixed set, a milestone
/// checklist whose completion drives its progress, and a history of status
/// changes and notes. Records can be listed through a combined search,
/// status, type and date filter. The same operations are available to AI
/// assistants through the MCP server (`roster serve`).
#[derive(Parser)]
#[command(version, about, name = "roster")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/roster/roster.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Name recorded as the author of history entries
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Only allow the documented worker lifecycle transitions
    #[arg(long, global = true)]
    pub strict_transitions: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
///
/// Without a command the workers are listed, most recently updated first.
#[derive(Subcommand)]
pub enum Commands {
    /// Register, list, show, edit and delete records
    #[command(alias = "e")]
    Entity {
        #[command(subcommand)]
        command: EntityCommands,
    },
    /// Change statuses and inspect the status sets
    #[command(alias = "st")]
    Status {
        #[command(subcommand)]
        command: StatusCommands,
    },
    /// Manage a record's milestone checklist
    #[command(alias = "m")]
    Milestone {
        #[command(subcommand)]
        command: MilestoneCommands,
    },
    /// Show a record's history or add a note to it
    #[command(alias = "h")]
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Arrange the dashboard widgets
    Layout {
        #[command(subcommand)]
        command: LayoutCommands,
    },
    /// Start the MCP server
    Serve,
}

// ============================================================================
// Shared arguments
// ============================================================================

/// A record identified by its ID.
#[derive(ClapArgs)]
pub struct EntityIdArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
}

impl From<EntityIdArgs> for Id {
    fn from(val: EntityIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// A record kind.
#[derive(ClapArgs)]
pub struct KindArgs {
    #[arg(help = "Record kind: worker, document, ticket or task")]
    pub kind: String,
}

impl From<KindArgs> for OfKind {
    fn from(val: KindArgs) -> Self {
        OfKind { kind: val.kind }
    }
}

/// Kind-specific attributes.
///
/// Only the options belonging to the record's kind are accepted; the core
/// rejects the others.
#[derive(ClapArgs, Default)]
pub struct AttributeArgs {
    /// Worker passport number
    #[arg(long, help_heading = "Worker")]
    pub passport_number: Option<String>,
    /// Worker nationality
    #[arg(long, help_heading = "Worker")]
    pub nationality: Option<String>,
    /// Destination country
    #[arg(long, help_heading = "Worker")]
    pub destination: Option<String>,
    /// Employer abroad
    #[arg(long, help_heading = "Worker")]
    pub employer: Option<String>,
    /// Responsible agent
    #[arg(long, help_heading = "Worker")]
    pub agent: Option<String>,
    /// Contract start (YYYY-MM-DD)
    #[arg(long, help_heading = "Worker")]
    pub contract_start: Option<String>,
    /// Contract end (YYYY-MM-DD)
    #[arg(long, help_heading = "Worker")]
    pub contract_end: Option<String>,
    /// ID of the worker a document or ticket belongs to
    #[arg(long, help_heading = "Document / Ticket")]
    pub worker_id: Option<u64>,
    /// Document reference number
    #[arg(long, help_heading = "Document")]
    pub reference_number: Option<String>,
    /// Issue date (YYYY-MM-DD)
    #[arg(long, help_heading = "Document")]
    pub issued_on: Option<String>,
    /// Expiry date (YYYY-MM-DD)
    #[arg(long, help_heading = "Document")]
    pub expires_on: Option<String>,
    /// Airline
    #[arg(long, help_heading = "Ticket")]
    pub airline: Option<String>,
    /// Flight number
    #[arg(long, help_heading = "Ticket")]
    pub flight_number: Option<String>,
    /// Departure date (YYYY-MM-DD)
    #[arg(long, help_heading = "Ticket")]
    pub departure_date: Option<String>,
    /// Person the task is assigned to
    #[arg(long, help_heading = "Task")]
    pub assignee: Option<String>,
    /// Task priority
    #[arg(long, help_heading = "Task")]
    pub priority: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long, help_heading = "Task")]
    pub due_date: Option<String>,
}

impl From<AttributeArgs> for AttributeFields {
    fn from(val: AttributeArgs) -> Self {
        AttributeFields {
            passport_number: val.passport_number,
            nationality: val.nationality,
            destination: val.destination,
            employer: val.employer,
            agent: val.agent,
            contract_start: val.contract_start,
            contract_end: val.contract_end,
            worker_id: val.worker_id,
            reference_number: val.reference_number,
            issued_on: val.issued_on,
            expires_on: val.expires_on,
            airline: val.airline,
            flight_number: val.flight_number,
            departure_date: val.departure_date,
            assignee: val.assignee,
            priority: val.priority,
            due_date: val.due_date,
        }
    }
}

// ============================================================================
// Entity commands
// ============================================================================

/// Register a new record
///
/// The record starts in its kind's first status (or `--status`) with the
/// kind's standard checklist (or `--milestones`). Registration is written to
/// the record's history.
#[derive(ClapArgs)]
pub struct CreateEntityArgs {
    #[arg(help = "Record kind: worker, document, ticket or task")]
    pub kind: String,
    /// Display name
    pub name: String,
    #[arg(long, help = "Initial status; defaults to the kind's first status")]
    pub status: Option<String>,
    #[arg(
        long = "type",
        help = "Job category, document type, trip type or task category"
    )]
    pub entity_type: Option<String>,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Checklist labels as comma-separated list"
    )]
    pub milestones: Option<Vec<String>>,
    #[command(flatten)]
    pub attributes: AttributeArgs,
}

impl From<CreateEntityArgs> for CreateEntity {
    fn from(val: CreateEntityArgs) -> Self {
        CreateEntity {
            kind: val.kind,
            name: val.name,
            status: val.status,
            entity_type: val.entity_type,
            milestones: val.milestones,
            fields: val.attributes.into(),
            actor: None,
        }
    }
}

/// List records through the filter view
///
/// All criteria combine: a record is listed when it matches the search
/// text, the status, the type and the date range. Without sorting, records
/// keep the most-recently-updated-first order.
#[derive(ClapArgs, Default)]
pub struct ListEntitiesArgs {
    #[arg(short, long, help = "Only list records of this kind")]
    pub kind: Option<String>,
    #[arg(short, long, help = "Case-insensitive text searched in id and name")]
    pub search: Option<String>,
    #[arg(
        long = "search-field",
        value_delimiter = ',',
        help = "Extra fields to search, e.g. passport,destination,flight-number"
    )]
    pub search_fields: Vec<String>,
    #[arg(long, help = "Status label, or 'all'")]
    pub status: Option<String>,
    #[arg(long = "type", help = "Type attribute, or 'all'")]
    pub entity_type: Option<String>,
    #[arg(long, help = "Start of the date range (YYYY-MM-DD, inclusive)")]
    pub from: Option<String>,
    #[arg(long, help = "End of the date range (YYYY-MM-DD, inclusive)")]
    pub to: Option<String>,
    #[arg(
        long,
        help = "Date the range applies to: updated, created, contract-start, expires, departure, due"
    )]
    pub date_field: Option<String>,
    #[arg(long, help = "Sort key: name, updated, status or progress")]
    pub sort: Option<String>,
    #[arg(long = "desc", help = "Sort descending")]
    pub descending: bool,
    #[arg(long, help = "1-based page number")]
    pub page: Option<usize>,
    #[arg(long, help = "Records per page (default 20)")]
    pub per_page: Option<usize>,
}

impl From<ListEntitiesArgs> for ListEntities {
    fn from(val: ListEntitiesArgs) -> Self {
        ListEntities {
            kind: val.kind,
            search: val.search,
            search_fields: val.search_fields,
            status: val.status,
            entity_type: val.entity_type,
            from: val.from,
            to: val.to,
            date_field: val.date_field,
            sort: val.sort,
            descending: val.descending,
            page: val.page,
            per_page: val.per_page,
        }
    }
}

/// Edit a record's name and attributes
#[derive(ClapArgs)]
pub struct UpdateEntityArgs {
    #[arg(help = "Unique identifier of the record to update")]
    pub id: u64,
    #[arg(long, help = "New display name")]
    pub name: Option<String>,
    #[arg(long = "type", help = "New type attribute")]
    pub entity_type: Option<String>,
    #[command(flatten)]
    pub attributes: AttributeArgs,
}

impl From<UpdateEntityArgs> for UpdateEntity {
    fn from(val: UpdateEntityArgs) -> Self {
        UpdateEntity {
            id: val.id,
            name: val.name,
            entity_type: val.entity_type,
            fields: val.attributes.into(),
        }
    }
}

/// Delete a record permanently
#[derive(ClapArgs)]
pub struct DeleteEntityArgs {
    #[arg(help = "Unique identifier of the record to permanently delete")]
    pub id: u64,
    /// Confirm the deletion; milestones and history are removed too
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteEntityArgs> for DeleteEntity {
    fn from(val: DeleteEntityArgs) -> Self {
        DeleteEntity {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum EntityCommands {
    /// Register a new record
    #[command(alias = "c")]
    Create(CreateEntityArgs),
    /// List records through the filter view
    #[command(aliases = ["l", "ls"])]
    List(ListEntitiesArgs),
    /// Show a record with its attributes and checklist
    #[command(alias = "s")]
    Show(EntityIdArgs),
    /// Edit a record's name and attributes
    #[command(alias = "u")]
    Update(UpdateEntityArgs),
    /// Delete a record permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteEntityArgs),
}

// ============================================================================
// Status commands
// ============================================================================

/// Change a record's status
///
/// Every change is written to the record's history, including a change to
/// the status it already has.
#[derive(ClapArgs)]
pub struct SetStatusArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
    #[arg(help = "New status label, e.g. 'Today Flying' or today_flying")]
    pub status: String,
    #[arg(short, long, help = "Note stored with the history entry")]
    pub note: Option<String>,
}

impl From<SetStatusArgs> for ChangeStatus {
    fn from(val: SetStatusArgs) -> Self {
        ChangeStatus {
            id: val.id,
            status: val.status,
            note: val.note,
            actor: None,
        }
    }
}

#[derive(Subcommand)]
pub enum StatusCommands {
    /// Change a record's status
    #[command(alias = "s")]
    Set(SetStatusArgs),
    /// Show every status of a kind with its tone and icon
    #[command(alias = "l")]
    Legend(KindArgs),
    /// Count the records of a kind per status
    #[command(alias = "b")]
    Breakdown(KindArgs),
}

// ============================================================================
// Milestone commands
// ============================================================================

/// A milestone of a record.
#[derive(ClapArgs)]
pub struct MilestoneArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
    #[arg(help = "Milestone label (case-insensitive)")]
    pub label: String,
}

impl From<MilestoneArgs> for MilestoneRef {
    fn from(val: MilestoneArgs) -> Self {
        MilestoneRef {
            id: val.id,
            label: val.label,
        }
    }
}

/// Mark a milestone as satisfied, or as pending with `--undone`
#[derive(ClapArgs)]
pub struct SetMilestoneArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
    #[arg(help = "Milestone label (case-insensitive)")]
    pub label: String,
    /// Mark the milestone as not satisfied
    #[arg(long)]
    pub undone: bool,
}

impl From<SetMilestoneArgs> for SetMilestone {
    fn from(val: SetMilestoneArgs) -> Self {
        SetMilestone {
            id: val.id,
            label: val.label,
            satisfied: Some(!val.undone),
        }
    }
}

#[derive(Subcommand)]
pub enum MilestoneCommands {
    /// Show a record's checklist and progress
    #[command(aliases = ["l", "ls"])]
    List(EntityIdArgs),
    /// Append a milestone to a record's checklist
    #[command(alias = "a")]
    Add(MilestoneArgs),
    /// Mark a milestone as satisfied or pending
    #[command(aliases = ["s", "check"])]
    Set(SetMilestoneArgs),
    /// Flip a milestone
    #[command(alias = "t")]
    Toggle(MilestoneArgs),
    /// Remove a milestone from a record's checklist
    #[command(aliases = ["d", "rm"])]
    Remove(MilestoneArgs),
}

// ============================================================================
// History commands
// ============================================================================

/// Add a note to a record's history
///
/// The entry is stamped with the record's current status; the status itself
/// doesn't change.
#[derive(ClapArgs)]
pub struct AddNoteArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
    /// Note text
    pub note: String,
}

impl From<AddNoteArgs> for AddNote {
    fn from(val: AddNoteArgs) -> Self {
        AddNote {
            id: val.id,
            note: val.note,
            actor: None,
        }
    }
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Show a record's history, newest first
    #[command(aliases = ["l", "ls", "show"])]
    List(EntityIdArgs),
    /// Add a note to a record's history
    #[command(alias = "n")]
    Note(AddNoteArgs),
}

// ============================================================================
// Layout commands
// ============================================================================

/// Move a dashboard widget
#[derive(ClapArgs)]
pub struct MoveWidgetArgs {
    #[arg(help = "Widget id, e.g. recent-activity")]
    pub widget: String,
    #[arg(help = "New 1-based position")]
    pub position: usize,
}

impl From<MoveWidgetArgs> for MoveWidget {
    fn from(val: MoveWidgetArgs) -> Self {
        MoveWidget {
            widget: val.widget,
            position: val.position,
        }
    }
}

/// A dashboard widget.
#[derive(ClapArgs)]
pub struct WidgetArgs {
    #[arg(help = "Widget id, e.g. recent-activity")]
    pub widget: String,
}

impl From<WidgetArgs> for WidgetRef {
    fn from(val: WidgetArgs) -> Self {
        WidgetRef { widget: val.widget }
    }
}

#[derive(Subcommand)]
pub enum LayoutCommands {
    /// Show the widget order and visibility
    #[command(alias = "s")]
    Show,
    /// Move a widget to a new position
    #[command(alias = "mv")]
    Move(MoveWidgetArgs),
    /// Show or hide a widget
    #[command(alias = "t")]
    Toggle(WidgetArgs),
    /// Restore the default layout
    Reset,
}
