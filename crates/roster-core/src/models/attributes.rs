//! Kind-specific attribute records.
//!
//! Each entity kind carries its own attribute record. The progress
//! calculator and the status mapping never look at these; they exist for
//! search, date filtering and display.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{DateField, EntityKind, SearchField};

/// Attributes of a registered worker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    /// Trade the worker is recruited for; acts as the worker "type"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_category: Option<String>,
    /// Destination country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer: Option<String>,
    /// Sub-agent who referred the worker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_start: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_end: Option<Date>,
}

/// Attributes of an uploaded document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentAttributes {
    /// Passport, visa, medical, police clearance, ... (required)
    pub document_type: String,
    /// Worker the document belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<Date>,
}

/// Attributes of a travel ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<u64>,
    /// One-way, return, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<Date>,
}

/// Attributes of a staff task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
}

/// Attribute record of an entity, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Attributes {
    Worker(WorkerAttributes),
    Document(DocumentAttributes),
    Ticket(TicketAttributes),
    Task(TaskAttributes),
}

impl Attributes {
    /// An attribute record of `kind` with every field unset.
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Worker => Attributes::Worker(WorkerAttributes::default()),
            EntityKind::Document => Attributes::Document(DocumentAttributes::default()),
            EntityKind::Ticket => Attributes::Ticket(TicketAttributes::default()),
            EntityKind::Task => Attributes::Task(TaskAttributes::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Attributes::Worker(_) => EntityKind::Worker,
            Attributes::Document(_) => EntityKind::Document,
            Attributes::Ticket(_) => EntityKind::Ticket,
            Attributes::Task(_) => EntityKind::Task,
        }
    }

    /// The kind-specific "type" used by the type filter.
    pub fn type_label(&self) -> Option<&str> {
        match self {
            Attributes::Worker(a) => a.job_category.as_deref(),
            Attributes::Document(a) => Some(a.document_type.as_str()).filter(|t| !t.is_empty()),
            Attributes::Ticket(a) => a.trip_type.as_deref(),
            Attributes::Task(a) => a.category.as_deref(),
        }
    }

    /// Text value of a searchable domain field, if this kind has it and it is
    /// set. `Id` and `Name` live on the entity itself and return `None`.
    pub fn text(&self, field: SearchField) -> Option<String> {
        match (self, field) {
            (Attributes::Worker(a), SearchField::PassportNumber) => a.passport_number.clone(),
            (Attributes::Worker(a), SearchField::Nationality) => a.nationality.clone(),
            (Attributes::Worker(a), SearchField::Destination) => a.destination.clone(),
            (Attributes::Worker(a), SearchField::Employer) => a.employer.clone(),
            (Attributes::Worker(a), SearchField::Agent) => a.agent.clone(),
            (Attributes::Document(a), SearchField::ReferenceNumber) => a.reference_number.clone(),
            (Attributes::Ticket(a), SearchField::Airline) => a.airline.clone(),
            (Attributes::Ticket(a), SearchField::FlightNumber) => a.flight_number.clone(),
            (Attributes::Ticket(a), SearchField::Destination) => a.destination.clone(),
            (Attributes::Task(a), SearchField::Assignee) => a.assignee.clone(),
            (_, SearchField::Type) => self.type_label().map(String::from),
            _ => None,
        }
    }

    /// Value of a domain date field, if this kind has it and it is set.
    pub fn date(&self, field: DateField) -> Option<Date> {
        match (self, field) {
            (Attributes::Worker(a), DateField::ContractStart) => a.contract_start,
            (Attributes::Worker(a), DateField::ContractEnd) => a.contract_end,
            (Attributes::Document(a), DateField::IssuedOn) => a.issued_on,
            (Attributes::Document(a), DateField::ExpiresOn) => a.expires_on,
            (Attributes::Ticket(a), DateField::Departure) => a.departure_date,
            (Attributes::Task(a), DateField::Due) => a.due_date,
            _ => None,
        }
    }

    /// Set fields as `(name, value)` pairs in declaration order, for display.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        fn push<T: ToString>(out: &mut Vec<(&'static str, String)>, name: &'static str, v: &Option<T>) {
            if let Some(v) = v {
                out.push((name, v.to_string()));
            }
        }

        let mut out = Vec::new();
        match self {
            Attributes::Worker(a) => {
                push(&mut out, "Passport", &a.passport_number);
                push(&mut out, "Nationality", &a.nationality);
                push(&mut out, "Job category", &a.job_category);
                push(&mut out, "Destination", &a.destination);
                push(&mut out, "Employer", &a.employer);
                push(&mut out, "Agent", &a.agent);
                push(&mut out, "Contract start", &a.contract_start);
                push(&mut out, "Contract end", &a.contract_end);
            }
            Attributes::Document(a) => {
                out.push(("Document type", a.document_type.clone()));
                push(&mut out, "Worker", &a.worker_id);
                push(&mut out, "Reference", &a.reference_number);
                push(&mut out, "Issued", &a.issued_on);
                push(&mut out, "Expires", &a.expires_on);
            }
            Attributes::Ticket(a) => {
                push(&mut out, "Worker", &a.worker_id);
                push(&mut out, "Trip type", &a.trip_type);
                push(&mut out, "Airline", &a.airline);
                push(&mut out, "Flight", &a.flight_number);
                push(&mut out, "Destination", &a.destination);
                push(&mut out, "Departure", &a.departure_date);
            }
            Attributes::Task(a) => {
                push(&mut out, "Category", &a.category);
                push(&mut out, "Assignee", &a.assignee);
                push(&mut out, "Priority", &a.priority);
                push(&mut out, "Due", &a.due_date);
            }
        }
        out
    }
}
