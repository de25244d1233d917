//! Parameter structures shared by the CLI and the MCP server.
//!
//! These are plain data carriers: strings as the user typed them, optional
//! fields left unset. Each interface wraps them with its own derives (clap
//! `Args`, `schemars::JsonSchema` behind the `schema` feature) and the
//! [`crate::Tracker`] turns them into validated model types.
//!
//! ```rust
//! use roster_core::{models::EntityKind, params::CreateEntity};
//!
//! let params = CreateEntity {
//!     kind: "worker".to_string(),
//!     name: "Amina Hassan".to_string(),
//!     entity_type: Some("Housemaid".to_string()),
//!     ..Default::default()
//! };
//! let new = params.to_new_entity()?;
//! assert_eq!(new.attributes.kind(), EntityKind::Worker);
//! assert_eq!(new.milestones.len(), 6);
//! # roster_core::Result::<()>::Ok(())
//! ```

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    config::Widget,
    error::{Result, TrackerError},
    models::{
        Attributes, DateField, DateRange, DocumentAttributes, EntityFilter, EntityKind,
        MilestoneSet, NewEntity, Page, SearchField, Selection, SortDirection, SortKey, Status,
        TaskAttributes, TicketAttributes, UpdateEntityRequest, WorkerAttributes,
    },
};

/// Actor recorded when the caller doesn't name one.
pub const DEFAULT_ACTOR: &str = "system";

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the entity to operate on
    pub id: u64,
}

/// Optional kind-specific attribute values.
///
/// Only the fields belonging to the entity's kind may be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AttributeFields {
    /// Worker passport number
    #[serde(default)]
    pub passport_number: Option<String>,
    /// Worker nationality
    #[serde(default)]
    pub nationality: Option<String>,
    /// Worker or ticket destination
    #[serde(default)]
    pub destination: Option<String>,
    /// Worker employer
    #[serde(default)]
    pub employer: Option<String>,
    /// Worker referring agent
    #[serde(default)]
    pub agent: Option<String>,
    /// Worker contract start (YYYY-MM-DD)
    #[serde(default)]
    pub contract_start: Option<String>,
    /// Worker contract end (YYYY-MM-DD)
    #[serde(default)]
    pub contract_end: Option<String>,
    /// Worker a document or ticket belongs to
    #[serde(default)]
    pub worker_id: Option<u64>,
    /// Document reference number
    #[serde(default)]
    pub reference_number: Option<String>,
    /// Document issue date (YYYY-MM-DD)
    #[serde(default)]
    pub issued_on: Option<String>,
    /// Document expiry date (YYYY-MM-DD)
    #[serde(default)]
    pub expires_on: Option<String>,
    /// Ticket airline
    #[serde(default)]
    pub airline: Option<String>,
    /// Ticket flight number
    #[serde(default)]
    pub flight_number: Option<String>,
    /// Ticket departure date (YYYY-MM-DD)
    #[serde(default)]
    pub departure_date: Option<String>,
    /// Task assignee
    #[serde(default)]
    pub assignee: Option<String>,
    /// Task priority
    #[serde(default)]
    pub priority: Option<String>,
    /// Task due date (YYYY-MM-DD)
    #[serde(default)]
    pub due_date: Option<String>,
}

impl AttributeFields {
    fn set_fields(&self) -> Vec<&'static str> {
        let flags = [
            ("passport_number", self.passport_number.is_some()),
            ("nationality", self.nationality.is_some()),
            ("destination", self.destination.is_some()),
            ("employer", self.employer.is_some()),
            ("agent", self.agent.is_some()),
            ("contract_start", self.contract_start.is_some()),
            ("contract_end", self.contract_end.is_some()),
            ("worker_id", self.worker_id.is_some()),
            ("reference_number", self.reference_number.is_some()),
            ("issued_on", self.issued_on.is_some()),
            ("expires_on", self.expires_on.is_some()),
            ("airline", self.airline.is_some()),
            ("flight_number", self.flight_number.is_some()),
            ("departure_date", self.departure_date.is_some()),
            ("assignee", self.assignee.is_some()),
            ("priority", self.priority.is_some()),
            ("due_date", self.due_date.is_some()),
        ];
        flags
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }

    fn allowed(kind: EntityKind) -> &'static [&'static str] {
        match kind {
            EntityKind::Worker => &[
                "passport_number",
                "nationality",
                "destination",
                "employer",
                "agent",
                "contract_start",
                "contract_end",
            ],
            EntityKind::Document => &["worker_id", "reference_number", "issued_on", "expires_on"],
            EntityKind::Ticket => &[
                "worker_id",
                "destination",
                "airline",
                "flight_number",
                "departure_date",
            ],
            EntityKind::Task => &["assignee", "priority", "due_date"],
        }
    }

    fn check_kind(&self, kind: EntityKind) -> Result<()> {
        let allowed = Self::allowed(kind);
        match self.set_fields().into_iter().find(|f| !allowed.contains(f)) {
            Some(field) => Err(TrackerError::invalid_input(field)
                .with_reason(format!("Field does not apply to {} entities", kind.as_str()))),
            None => Ok(()),
        }
    }

    /// Builds the attribute record of `kind`, with `entity_type` as its type
    /// attribute.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` for fields of another kind,
    /// unparseable dates, or a document without a type.
    pub fn to_attributes(&self, kind: EntityKind, entity_type: Option<&str>) -> Result<Attributes> {
        self.check_kind(kind)?;
        let entity_type = non_empty(entity_type);

        Ok(match kind {
            EntityKind::Worker => Attributes::Worker(WorkerAttributes {
                passport_number: self.passport_number.clone(),
                nationality: self.nationality.clone(),
                job_category: entity_type,
                destination: self.destination.clone(),
                employer: self.employer.clone(),
                agent: self.agent.clone(),
                contract_start: parse_date("contract_start", self.contract_start.as_deref())?,
                contract_end: parse_date("contract_end", self.contract_end.as_deref())?,
            }),
            EntityKind::Document => Attributes::Document(DocumentAttributes {
                document_type: entity_type.ok_or_else(|| {
                    TrackerError::invalid_input("entity_type")
                        .with_reason("Documents require a document type")
                })?,
                worker_id: self.worker_id,
                reference_number: self.reference_number.clone(),
                issued_on: parse_date("issued_on", self.issued_on.as_deref())?,
                expires_on: parse_date("expires_on", self.expires_on.as_deref())?,
            }),
            EntityKind::Ticket => Attributes::Ticket(TicketAttributes {
                worker_id: self.worker_id,
                trip_type: entity_type,
                airline: self.airline.clone(),
                flight_number: self.flight_number.clone(),
                destination: self.destination.clone(),
                departure_date: parse_date("departure_date", self.departure_date.as_deref())?,
            }),
            EntityKind::Task => Attributes::Task(TaskAttributes {
                category: entity_type,
                assignee: self.assignee.clone(),
                priority: self.priority.clone(),
                due_date: parse_date("due_date", self.due_date.as_deref())?,
            }),
        })
    }

    /// Overlays the set fields (and `entity_type`) onto `current`.
    pub fn merge_into(&self, current: &Attributes, entity_type: Option<&str>) -> Result<Attributes> {
        let kind = current.kind();
        self.check_kind(kind)?;
        let entity_type = non_empty(entity_type);

        fn keep<T: Clone>(new: Option<T>, old: &Option<T>) -> Option<T> {
            new.or_else(|| old.clone())
        }

        Ok(match current {
            Attributes::Worker(a) => Attributes::Worker(WorkerAttributes {
                passport_number: keep(self.passport_number.clone(), &a.passport_number),
                nationality: keep(self.nationality.clone(), &a.nationality),
                job_category: keep(entity_type, &a.job_category),
                destination: keep(self.destination.clone(), &a.destination),
                employer: keep(self.employer.clone(), &a.employer),
                agent: keep(self.agent.clone(), &a.agent),
                contract_start: keep(
                    parse_date("contract_start", self.contract_start.as_deref())?,
                    &a.contract_start,
                ),
                contract_end: keep(
                    parse_date("contract_end", self.contract_end.as_deref())?,
                    &a.contract_end,
                ),
            }),
            Attributes::Document(a) => Attributes::Document(DocumentAttributes {
                document_type: entity_type.unwrap_or_else(|| a.document_type.clone()),
                worker_id: self.worker_id.or(a.worker_id),
                reference_number: keep(self.reference_number.clone(), &a.reference_number),
                issued_on: keep(parse_date("issued_on", self.issued_on.as_deref())?, &a.issued_on),
                expires_on: keep(
                    parse_date("expires_on", self.expires_on.as_deref())?,
                    &a.expires_on,
                ),
            }),
            Attributes::Ticket(a) => Attributes::Ticket(TicketAttributes {
                worker_id: self.worker_id.or(a.worker_id),
                trip_type: keep(entity_type, &a.trip_type),
                airline: keep(self.airline.clone(), &a.airline),
                flight_number: keep(self.flight_number.clone(), &a.flight_number),
                destination: keep(self.destination.clone(), &a.destination),
                departure_date: keep(
                    parse_date("departure_date", self.departure_date.as_deref())?,
                    &a.departure_date,
                ),
            }),
            Attributes::Task(a) => Attributes::Task(TaskAttributes {
                category: keep(entity_type, &a.category),
                assignee: keep(self.assignee.clone(), &a.assignee),
                priority: keep(self.priority.clone(), &a.priority),
                due_date: keep(parse_date("due_date", self.due_date.as_deref())?, &a.due_date),
            }),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.set_fields().is_empty()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

fn parse_date(field: &str, value: Option<&str>) -> Result<Option<Date>> {
    match non_empty(value) {
        None => Ok(None),
        Some(v) => v.parse::<Date>().map(Some).map_err(|e| {
            TrackerError::invalid_input(field).with_reason(format!("Invalid date '{v}': {e}"))
        }),
    }
}

fn parse_kind(kind: &str) -> Result<EntityKind> {
    kind.parse::<EntityKind>()
        .map_err(|e| TrackerError::invalid_input("kind").with_reason(e))
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::invalid_input("name").with_reason("Name cannot be empty"));
    }
    Ok(name.to_string())
}

/// Parameters for registering a new entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateEntity {
    /// Entity kind: worker, document, ticket or task
    pub kind: String,
    /// Display name (required)
    pub name: String,
    /// Initial status; defaults to the kind's first status
    #[serde(default)]
    pub status: Option<String>,
    /// Job category, document type, trip type or task category
    #[serde(default)]
    pub entity_type: Option<String>,
    /// Checklist labels; defaults to the kind's standard checklist
    #[serde(default)]
    pub milestones: Option<Vec<String>>,
    /// Kind-specific attributes
    #[serde(flatten)]
    pub fields: AttributeFields,
    /// Who registers the entity
    #[serde(default)]
    pub actor: Option<String>,
}

impl CreateEntity {
    /// Validates the parameters into a [`NewEntity`].
    pub fn to_new_entity(&self) -> Result<NewEntity> {
        let kind = parse_kind(&self.kind)?;
        let status = match non_empty(self.status.as_deref()) {
            Some(label) => Status::parse(kind, &label)?,
            None => Status::initial(kind),
        };
        let milestones = match &self.milestones {
            Some(labels) => MilestoneSet::from_labels(labels)?,
            None => MilestoneSet::for_kind(kind),
        };
        Ok(NewEntity {
            name: validate_name(&self.name)?,
            status,
            attributes: self.fields.to_attributes(kind, self.entity_type.as_deref())?,
            milestones,
        })
    }

    pub fn actor(&self) -> &str {
        actor_or_default(self.actor.as_deref())
    }
}

/// Parameters for editing an entity's name and attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateEntity {
    /// The ID of the entity to update
    pub id: u64,
    /// New display name
    #[serde(default)]
    pub name: Option<String>,
    /// New type attribute
    #[serde(default)]
    pub entity_type: Option<String>,
    /// Attribute values to overwrite
    #[serde(flatten)]
    pub fields: AttributeFields,
}

impl UpdateEntity {
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.entity_type.is_some() || !self.fields.is_empty()
    }

    /// Builds the update request against the entity's current attributes.
    pub fn to_request(&self, current: &Attributes) -> Result<UpdateEntityRequest> {
        let name = self.name.as_deref().map(validate_name).transpose()?;
        let attributes = if self.entity_type.is_some() || !self.fields.is_empty() {
            Some(self.fields.merge_into(current, self.entity_type.as_deref())?)
        } else {
            None
        };
        Ok(UpdateEntityRequest { name, attributes })
    }

    /// Human-readable list of what this update touches.
    pub fn describe_changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            changes.push(format!("Renamed to '{}'", name.trim()));
        }
        if let Some(entity_type) = &self.entity_type {
            changes.push(format!("Set type to '{}'", entity_type.trim()));
        }
        for field in self.fields.set_fields() {
            changes.push(format!("Updated {field}"));
        }
        changes
    }
}

/// Parameters for listing, filtering and paging entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListEntities {
    /// Restrict to one kind; all kinds when unset
    #[serde(default)]
    pub kind: Option<String>,
    /// Case-insensitive text search
    #[serde(default)]
    pub search: Option<String>,
    /// Extra fields searched besides id and name
    #[serde(default)]
    pub search_fields: Vec<String>,
    /// Status label, or "all"
    #[serde(default)]
    pub status: Option<String>,
    /// Type attribute, or "all"
    #[serde(default)]
    pub entity_type: Option<String>,
    /// Start of the date range (YYYY-MM-DD, inclusive)
    #[serde(default)]
    pub from: Option<String>,
    /// End of the date range (YYYY-MM-DD, inclusive)
    #[serde(default)]
    pub to: Option<String>,
    /// Date the range applies to; defaults to the last update
    #[serde(default)]
    pub date_field: Option<String>,
    /// Sort key: name, updated, status or progress
    #[serde(default)]
    pub sort: Option<String>,
    /// Sort descending
    #[serde(default)]
    pub descending: bool,
    /// 1-based page number; everything on one page when unset
    #[serde(default)]
    pub page: Option<usize>,
    /// Page size (default 20)
    #[serde(default)]
    pub per_page: Option<usize>,
}

/// Validated form of [`ListEntities`].
#[derive(Debug, Clone, Default)]
pub struct EntityQuery {
    pub kind: Option<EntityKind>,
    pub filter: EntityFilter,
    /// No sorting when unset; the store's order is kept
    pub sort: Option<(SortKey, SortDirection)>,
    pub page: Option<Page>,
}

impl ListEntities {
    /// Parameters listing every entity of `kind`.
    pub fn of_kind(kind: EntityKind) -> Self {
        Self {
            kind: Some(kind.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn to_query(&self) -> Result<EntityQuery> {
        let kind = non_empty(self.kind.as_deref())
            .map(|k| parse_kind(&k))
            .transpose()?;

        let search_fields = self
            .search_fields
            .iter()
            .map(|f| {
                f.parse::<SearchField>()
                    .map_err(|e| TrackerError::invalid_input("search_fields").with_reason(e))
            })
            .collect::<Result<Vec<_>>>()?;

        let date_range = match (
            parse_date("from", self.from.as_deref())?,
            parse_date("to", self.to.as_deref())?,
        ) {
            (None, None) => Selection::All,
            (from, to) => Selection::Only(DateRange::new(
                from.unwrap_or(Date::MIN),
                to.unwrap_or(Date::MAX),
            )?),
        };

        let date_field = match non_empty(self.date_field.as_deref()) {
            Some(field) => field
                .parse::<DateField>()
                .map_err(|e| TrackerError::invalid_input("date_field").with_reason(e))?,
            None => DateField::default(),
        };

        let filter = EntityFilter {
            text: self.search.clone(),
            status: Selection::from_input(self.status.as_deref()),
            entity_type: Selection::from_input(self.entity_type.as_deref()),
            date_range,
            date_field,
            ..Default::default()
        }
        .searching(search_fields);

        let sort = match non_empty(self.sort.as_deref()) {
            Some(key) => {
                let key = key
                    .parse::<SortKey>()
                    .map_err(|e| TrackerError::invalid_input("sort").with_reason(e))?;
                let direction = if self.descending {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                Some((key, direction))
            }
            None => None,
        };

        let page = match (self.page, self.per_page) {
            (None, None) => None,
            (number, size) => Some(Page::new(
                number.unwrap_or(1),
                size.unwrap_or(Page::default().size),
            )?),
        };

        Ok(EntityQuery {
            kind,
            filter,
            sort,
            page,
        })
    }
}

/// Parameters naming an entity kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OfKind {
    /// Entity kind: worker, document, ticket or task
    pub kind: String,
}

impl OfKind {
    pub fn kind(&self) -> Result<EntityKind> {
        parse_kind(&self.kind)
    }
}

/// Parameters for changing an entity's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ChangeStatus {
    /// The ID of the entity
    pub id: u64,
    /// New status label of the entity's kind
    pub status: String,
    /// Note stored in the history entry
    #[serde(default)]
    pub note: Option<String>,
    /// Who makes the change
    #[serde(default)]
    pub actor: Option<String>,
}

impl ChangeStatus {
    pub fn note(&self) -> &str {
        self.note.as_deref().map(str::trim).unwrap_or_default()
    }

    pub fn actor(&self) -> &str {
        actor_or_default(self.actor.as_deref())
    }
}

/// Parameters naming one milestone of an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MilestoneRef {
    /// The ID of the entity
    pub id: u64,
    /// Milestone label (case-insensitive)
    pub label: String,
}

/// Parameters for marking a milestone satisfied or not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetMilestone {
    /// The ID of the entity
    pub id: u64,
    /// Milestone label (case-insensitive)
    pub label: String,
    /// New value; flips the current value when unset
    #[serde(default)]
    pub satisfied: Option<bool>,
}

/// Parameters for appending a note to an entity's history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddNote {
    /// The ID of the entity
    pub id: u64,
    /// Note text
    pub note: String,
    /// Who writes the note
    #[serde(default)]
    pub actor: Option<String>,
}

impl AddNote {
    pub fn actor(&self) -> &str {
        actor_or_default(self.actor.as_deref())
    }
}

/// Parameters for permanently deleting an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteEntity {
    /// The ID of the entity to delete
    pub id: u64,
    /// Must be true; deletion removes milestones and history too
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for moving a dashboard widget.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveWidget {
    /// Widget id, e.g. `recent-activity`
    pub widget: String,
    /// New 1-based position
    pub position: usize,
}

impl MoveWidget {
    pub fn widget(&self) -> Result<Widget> {
        self.widget.parse()
    }
}

/// Parameters naming one dashboard widget.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WidgetRef {
    /// Widget id, e.g. `recent-activity`
    pub widget: String,
}

impl WidgetRef {
    pub fn widget(&self) -> Result<Widget> {
        self.widget.parse()
    }
}

fn actor_or_default(actor: Option<&str>) -> &str {
    actor
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_ACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_status_and_checklist() {
        let params = CreateEntity {
            kind: "ticket".to_string(),
            name: "  DOH flight ".to_string(),
            ..Default::default()
        };
        let new = params.to_new_entity().unwrap();
        assert_eq!(new.name, "DOH flight");
        assert_eq!(new.status.label(), "Pending");
        assert_eq!(new.milestones.len(), 3);
        assert_eq!(params.actor(), "system");
    }

    #[test]
    fn test_create_rejects_foreign_fields() {
        let params = CreateEntity {
            kind: "task".to_string(),
            name: "Call embassy".to_string(),
            fields: AttributeFields {
                airline: Some("QR".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = params.to_new_entity().unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput { ref field, .. } if field == "airline"));
    }

    #[test]
    fn test_document_requires_type() {
        let params = CreateEntity {
            kind: "document".to_string(),
            name: "Passport scan".to_string(),
            ..Default::default()
        };
        assert!(params.to_new_entity().is_err());

        let params = CreateEntity {
            entity_type: Some("Passport".to_string()),
            ..params
        };
        let new = params.to_new_entity().unwrap();
        assert_eq!(new.attributes.type_label(), Some("Passport"));
    }

    #[test]
    fn test_create_rejects_unknown_status_and_bad_dates() {
        let params = CreateEntity {
            kind: "worker".to_string(),
            name: "Amina".to_string(),
            status: Some("Rerouted".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.to_new_entity(),
            Err(TrackerError::InvalidInput { .. })
        ));

        let params = CreateEntity {
            status: None,
            fields: AttributeFields {
                contract_start: Some("2024-13-01".to_string()),
                ..Default::default()
            },
            ..params
        };
        assert!(params.to_new_entity().is_err());
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let current = Attributes::Worker(WorkerAttributes {
            passport_number: Some("P123".to_string()),
            job_category: Some("Driver".to_string()),
            ..Default::default()
        });
        let update = UpdateEntity {
            id: 1,
            fields: AttributeFields {
                destination: Some("Kuwait".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let request = update.to_request(&current).unwrap();
        let Some(Attributes::Worker(merged)) = request.attributes else {
            panic!("expected worker attributes");
        };
        assert_eq!(merged.passport_number.as_deref(), Some("P123"));
        assert_eq!(merged.job_category.as_deref(), Some("Driver"));
        assert_eq!(merged.destination.as_deref(), Some("Kuwait"));
        assert_eq!(update.describe_changes(), ["Updated destination"]);
    }

    #[test]
    fn test_list_query_defaults_pass_through() {
        let query = ListEntities::default().to_query().unwrap();
        assert!(query.filter.is_pass_through());
        assert!(query.kind.is_none());
        assert!(query.sort.is_none());
        assert!(query.page.is_none());
    }

    #[test]
    fn test_list_query_parses_everything() {
        let params = ListEntities {
            kind: Some("workers".to_string()),
            search: Some("amina".to_string()),
            search_fields: vec!["passport".to_string()],
            status: Some("all".to_string()),
            from: Some("2024-01-01".to_string()),
            sort: Some("progress".to_string()),
            descending: true,
            per_page: Some(5),
            ..Default::default()
        };
        let query = params.to_query().unwrap();
        assert_eq!(query.kind, Some(EntityKind::Worker));
        assert!(query.filter.status.is_all());
        assert!(query
            .filter
            .search_fields
            .contains(&SearchField::PassportNumber));
        assert_eq!(
            query.sort,
            Some((SortKey::Progress, SortDirection::Descending))
        );
        assert_eq!(query.page, Some(Page { number: 1, size: 5 }));
        let range = query.filter.date_range.as_only().copied().unwrap();
        assert_eq!(range.to(), Date::MAX);
    }

    #[test]
    fn test_list_query_rejects_inverted_range() {
        let params = ListEntities {
            from: Some("2024-05-01".to_string()),
            to: Some("2024-04-01".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.to_query(),
            Err(TrackerError::InvalidInput { .. })
        ));
    }
}
