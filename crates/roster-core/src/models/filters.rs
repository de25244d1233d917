//! Filter types for querying entity collections.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Either every value, or exactly one.
///
/// Parsed from user input where the literal `"all"` (any case) or an empty
/// string means [`Selection::All`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

impl Selection<String> {
    /// Reads an optional user-supplied value where `None`, `""` and `"all"`
    /// pass everything through.
    pub fn from_input(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None => Selection::All,
            Some(v) if v.is_empty() || v.eq_ignore_ascii_case("all") => Selection::All,
            Some(v) => Selection::Only(v.to_string()),
        }
    }
}

/// Inclusive civil date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    from: Date,
    to: Date,
}

impl DateRange {
    /// Creates a range covering `from..=to`.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` when `from` is after `to`.
    pub fn new(from: Date, to: Date) -> Result<Self> {
        if from > to {
            return Err(TrackerError::invalid_input("date_range")
                .with_reason(format!("Start date {from} is after end date {to}")));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> Date {
        self.from
    }

    pub fn to(&self) -> Date {
        self.to
    }

    pub fn contains(&self, date: Date) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Fields the text search can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Id,
    Name,
    Type,
    PassportNumber,
    Nationality,
    Destination,
    Employer,
    Agent,
    ReferenceNumber,
    Airline,
    FlightNumber,
    Assignee,
}

impl SearchField {
    /// Fields searched when none are configured.
    pub const DEFAULT: [SearchField; 2] = [SearchField::Id, SearchField::Name];
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "id" => Ok(SearchField::Id),
            "name" => Ok(SearchField::Name),
            "type" => Ok(SearchField::Type),
            "passport" | "passport_number" => Ok(SearchField::PassportNumber),
            "nationality" => Ok(SearchField::Nationality),
            "destination" => Ok(SearchField::Destination),
            "employer" => Ok(SearchField::Employer),
            "agent" => Ok(SearchField::Agent),
            "reference" | "reference_number" => Ok(SearchField::ReferenceNumber),
            "airline" => Ok(SearchField::Airline),
            "flight" | "flight_number" => Ok(SearchField::FlightNumber),
            "assignee" => Ok(SearchField::Assignee),
            _ => Err(format!("Invalid search field: {s}")),
        }
    }
}

/// Date fields a date range can be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    Created,
    #[default]
    Updated,
    ContractStart,
    ContractEnd,
    IssuedOn,
    ExpiresOn,
    Departure,
    Due,
}

impl FromStr for DateField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "created" | "created_at" => Ok(DateField::Created),
            "updated" | "updated_at" => Ok(DateField::Updated),
            "contract_start" => Ok(DateField::ContractStart),
            "contract_end" => Ok(DateField::ContractEnd),
            "issued" | "issued_on" => Ok(DateField::IssuedOn),
            "expires" | "expires_on" => Ok(DateField::ExpiresOn),
            "departure" | "departure_date" => Ok(DateField::Departure),
            "due" | "due_date" => Ok(DateField::Due),
            _ => Err(format!("Invalid date field: {s}")),
        }
    }
}

/// Conjunctive filter over an entity collection.
///
/// The default filter passes every entity through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityFilter {
    /// Case-insensitive substring matched against `search_fields`
    pub text: Option<String>,

    /// Status label equality (canonical comparison)
    pub status: Selection<String>,

    /// Equality on the kind-specific type attribute
    pub entity_type: Selection<String>,

    /// Inclusive bounds on `date_field`
    pub date_range: Selection<DateRange>,

    /// Fields consulted by the text search
    pub search_fields: Vec<SearchField>,

    /// Date the range applies to
    pub date_field: DateField,
}

impl Default for EntityFilter {
    fn default() -> Self {
        Self {
            text: None,
            status: Selection::All,
            entity_type: Selection::All,
            date_range: Selection::All,
            search_fields: SearchField::DEFAULT.to_vec(),
            date_field: DateField::default(),
        }
    }
}

impl EntityFilter {
    /// Filter matching `text` over the default search fields.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Adds domain fields to the text search, keeping id and name.
    pub fn searching(mut self, fields: impl IntoIterator<Item = SearchField>) -> Self {
        for field in fields {
            if !self.search_fields.contains(&field) {
                self.search_fields.push(field);
            }
        }
        self
    }

    /// Whether no predicate is active.
    pub fn is_pass_through(&self) -> bool {
        self.active_text().is_none()
            && self.status.is_all()
            && self.entity_type.is_all()
            && self.date_range.is_all()
    }

    /// The lowercase search needle, if text search is active.
    pub(crate) fn active_text(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

/// Keys an entity list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    #[default]
    Updated,
    Status,
    Progress,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "updated" | "updated_at" => Ok(SortKey::Updated),
            "status" => Ok(SortKey::Status),
            "progress" => Ok(SortKey::Progress),
            _ => Err(format!("Invalid sort key: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` for page number or size zero.
    pub fn new(number: usize, size: usize) -> Result<Self> {
        if number == 0 {
            return Err(TrackerError::invalid_input("page")
                .with_reason("Page numbers start at 1"));
        }
        if size == 0 {
            return Err(TrackerError::invalid_input("per_page")
                .with_reason("Page size must be at least 1"));
        }
        Ok(Self { number, size })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: 20,
        }
    }
}
