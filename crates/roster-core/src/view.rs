//! Filter, sort and paginate entity collections.
//!
//! Filtering keeps the input order. Sorting and pagination are separate
//! steps a caller applies before or after filtering.
//!
//! ```rust
//! use roster_core::models::EntityFilter;
//! # use roster_core::models::{Attributes, Entity, EntityKind, MilestoneSet, Status};
//! # use jiff::Timestamp;
//! # fn worker(id: u64, name: &str) -> Entity {
//! #     Entity {
//! #         id,
//! #         kind: EntityKind::Worker,
//! #         name: name.to_string(),
//! #         status: Status::initial(EntityKind::Worker),
//! #         attributes: Attributes::empty(EntityKind::Worker),
//! #         milestones: MilestoneSet::default(),
//! #         created_at: Timestamp::UNIX_EPOCH,
//! #         updated_at: Timestamp::UNIX_EPOCH,
//! #     }
//! # }
//!
//! let workers = vec![worker(1, "Amina Hassan"), worker(2, "Fatima Omar")];
//! let found = EntityFilter::text("amina").apply(&workers);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].name, "Amina Hassan");
//! ```

use std::cmp::Ordering;

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use serde::Serialize;

use crate::models::{
    canonical_label, DateField, Entity, EntityFilter, Page, SearchField, Selection, SortDirection,
    SortKey,
};

/// A record the filter view can inspect.
pub trait Filterable {
    /// Text of `field`, if the record has it.
    fn field_text(&self, field: SearchField) -> Option<String>;

    /// Current status label.
    fn status_label(&self) -> &str;

    /// Kind-specific type, if set.
    fn type_label(&self) -> Option<&str>;

    /// Civil date of `field`, if the record has it.
    fn date(&self, field: DateField) -> Option<Date>;
}

impl Filterable for Entity {
    fn field_text(&self, field: SearchField) -> Option<String> {
        match field {
            SearchField::Id => Some(self.id.to_string()),
            SearchField::Name => Some(self.name.clone()),
            other => self.attributes.text(other),
        }
    }

    fn status_label(&self) -> &str {
        self.status.label()
    }

    fn type_label(&self) -> Option<&str> {
        self.attributes.type_label()
    }

    fn date(&self, field: DateField) -> Option<Date> {
        match field {
            DateField::Created => Some(utc_date(self.created_at)),
            DateField::Updated => Some(utc_date(self.updated_at)),
            other => self.attributes.date(other),
        }
    }
}

fn utc_date(timestamp: Timestamp) -> Date {
    timestamp.to_zoned(TimeZone::UTC).date()
}

impl EntityFilter {
    /// Whether `item` passes every active predicate.
    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        self.matches_with(item, self.active_text().as_deref())
    }

    fn matches_with<T: Filterable>(&self, item: &T, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let hit = self.search_fields.iter().any(|field| {
                item.field_text(*field)
                    .is_some_and(|text| text.to_lowercase().contains(needle))
            });
            if !hit {
                return false;
            }
        }

        if let Selection::Only(status) = &self.status {
            if canonical_label(item.status_label()) != canonical_label(status) {
                return false;
            }
        }

        if let Selection::Only(wanted) = &self.entity_type {
            let wanted = wanted.trim().to_lowercase();
            match item.type_label() {
                Some(actual) if actual.trim().to_lowercase() == wanted => {}
                _ => return false,
            }
        }

        if let Selection::Only(range) = &self.date_range {
            match item.date(self.date_field) {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }

        true
    }

    /// Items passing every active predicate, in input order.
    pub fn apply<'a, T: Filterable>(&self, items: &'a [T]) -> Vec<&'a T> {
        let needle = self.active_text();
        items
            .iter()
            .filter(|item| self.matches_with(*item, needle.as_deref()))
            .collect()
    }
}

/// Stable sort of entity references.
pub fn sort_entities(entities: &mut [&Entity], key: SortKey, direction: SortDirection) {
    entities.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare(a: &Entity, b: &Entity, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Updated => a.updated_at.cmp(&b.updated_at),
        SortKey::Status => status_rank(a).cmp(&status_rank(b)),
        SortKey::Progress => {
            let (pa, pb) = (a.progress(), b.progress());
            // Cross-multiplied to compare ratios without floating point.
            (pa.completed * pb.total.max(1)).cmp(&(pb.completed * pa.total.max(1)))
        }
    }
}

fn status_rank(entity: &Entity) -> usize {
    crate::models::Status::all(entity.kind)
        .iter()
        .position(|s| *s == entity.status)
        .unwrap_or(usize::MAX)
}

/// One page of a larger result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// Requested page, 1-based
    pub page: usize,
    pub per_page: usize,
    /// Items across all pages
    pub total: usize,
}

impl<T> PageSlice<T> {
    /// Number of pages, at least 1.
    pub fn pages(&self) -> usize {
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }
}

/// Cuts `items` into the requested page. A page past the end is empty.
pub fn paginate<T>(items: Vec<T>, page: Page) -> PageSlice<T> {
    let total = items.len();
    let start = (page.number - 1).saturating_mul(page.size);
    let items = items.into_iter().skip(start).take(page.size).collect();
    PageSlice {
        items,
        page: page.number,
        per_page: page.size,
        total,
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{
        Attributes, DateRange, EntityKind, Milestone, MilestoneSet, Status, TicketStatus,
        WorkerAttributes, WorkerStatus,
    };

    fn worker(id: u64, name: &str, status: WorkerStatus, category: Option<&str>) -> Entity {
        Entity {
            id,
            kind: EntityKind::Worker,
            name: name.to_string(),
            status: Status::Worker(status),
            attributes: Attributes::Worker(WorkerAttributes {
                job_category: category.map(String::from),
                destination: Some("Qatar".to_string()),
                contract_start: Some(date(2024, 3, id as i8)),
                ..Default::default()
            }),
            milestones: MilestoneSet::default(),
            created_at: Timestamp::from_second(1_700_000_000).unwrap(),
            updated_at: Timestamp::from_second(1_700_000_000 + id as i64 * 86_400).unwrap(),
        }
    }

    fn roster() -> Vec<Entity> {
        vec![
            worker(1, "Amina Hassan", WorkerStatus::Waiting, Some("Housemaid")),
            worker(2, "Fatima Omar", WorkerStatus::Abroad, Some("Cleaner")),
            worker(3, "Hamid Ali", WorkerStatus::Waiting, None),
            worker(4, "Zainab Amin", WorkerStatus::InProcess, Some("housemaid")),
        ]
    }

    fn names<'a>(items: &[&'a Entity]) -> Vec<&'a str> {
        items.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_text_search_matches_name_case_insensitively() {
        let all = roster();
        let found = EntityFilter::text("amina").apply(&all);
        assert_eq!(names(&found), ["Amina Hassan"]);
    }

    #[test]
    fn test_text_search_matches_id() {
        let all = roster();
        let found = EntityFilter::text("3").apply(&all);
        assert_eq!(names(&found), ["Hamid Ali"]);
    }

    #[test]
    fn test_domain_fields_are_opt_in() {
        let all = roster();
        assert!(EntityFilter::text("qatar").apply(&all).is_empty());

        let found = EntityFilter::text("qatar")
            .searching([SearchField::Destination])
            .apply(&all);
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn test_default_filter_returns_collection_unchanged() {
        let all = roster();
        let filter = EntityFilter {
            text: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_pass_through());
        let found = filter.apply(&all);
        assert_eq!(found.len(), all.len());
        for (found, original) in found.iter().zip(&all) {
            assert_eq!(*found, original);
        }
    }

    #[test]
    fn test_filters_are_conjunctive_and_order_preserving() {
        let all = roster();
        let filter = EntityFilter {
            text: Some("am".to_string()),
            status: Selection::from_input(Some("waiting")),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&all)), ["Amina Hassan", "Hamid Ali"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let all = roster();
        let filter = EntityFilter {
            status: Selection::Only("Waiting".to_string()),
            ..Default::default()
        };
        let once: Vec<Entity> = filter.apply(&all).into_iter().cloned().collect();
        let twice = filter.apply(&once);
        assert_eq!(names(&twice), ["Amina Hassan", "Hamid Ali"]);
    }

    #[test]
    fn test_status_filter_uses_canonical_labels() {
        let all = roster();
        let filter = EntityFilter {
            status: Selection::Only("in_process".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&all)), ["Zainab Amin"]);
    }

    #[test]
    fn test_type_filter_skips_entities_without_type() {
        let all = roster();
        let filter = EntityFilter {
            entity_type: Selection::from_input(Some("Housemaid")),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&all)), ["Amina Hassan", "Zainab Amin"]);
    }

    #[test]
    fn test_type_filter_folds_non_ascii_case() {
        let all = vec![
            worker(1, "Amina Hassan", WorkerStatus::Waiting, Some("Électricien")),
            worker(2, "Fatima Omar", WorkerStatus::Waiting, Some("Cleaner")),
        ];
        let filter = EntityFilter {
            entity_type: Selection::from_input(Some("ÉLECTRICIEN")),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&all)), ["Amina Hassan"]);

        let filter = EntityFilter {
            entity_type: Selection::from_input(Some("électricien")),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&all)), ["Amina Hassan"]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let all = roster();
        let filter = EntityFilter {
            date_range: Selection::Only(
                DateRange::new(date(2024, 3, 2), date(2024, 3, 3)).unwrap(),
            ),
            date_field: DateField::ContractStart,
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&all)), ["Fatima Omar", "Hamid Ali"]);
    }

    #[test]
    fn test_date_range_on_missing_field_excludes() {
        let all = roster();
        let filter = EntityFilter {
            date_range: Selection::Only(
                DateRange::new(date(2000, 1, 1), date(2100, 1, 1)).unwrap(),
            ),
            date_field: DateField::Departure,
            ..Default::default()
        };
        assert!(filter.apply(&all).is_empty());
    }

    #[test]
    fn test_sort_by_name_and_status() {
        let all = roster();
        let mut refs: Vec<&Entity> = all.iter().collect();
        sort_entities(&mut refs, SortKey::Name, SortDirection::Descending);
        assert_eq!(
            names(&refs),
            ["Zainab Amin", "Hamid Ali", "Fatima Omar", "Amina Hassan"]
        );

        sort_entities(&mut refs, SortKey::Status, SortDirection::Ascending);
        // Stable: the two Waiting workers keep their previous relative order.
        assert_eq!(
            names(&refs),
            ["Hamid Ali", "Amina Hassan", "Zainab Amin", "Fatima Omar"]
        );
    }

    #[test]
    fn test_sort_by_progress() {
        let mut done = worker(1, "Done", WorkerStatus::Abroad, None);
        done.milestones = MilestoneSet::new(vec![Milestone::done("visa")]).unwrap();
        let mut half = worker(2, "Half", WorkerStatus::Abroad, None);
        half.milestones =
            MilestoneSet::new(vec![Milestone::done("visa"), Milestone::pending("medical")])
                .unwrap();
        let empty = worker(3, "Empty", WorkerStatus::Waiting, None);

        let all = vec![done, half, empty];
        let mut refs: Vec<&Entity> = all.iter().collect();
        sort_entities(&mut refs, SortKey::Progress, SortDirection::Ascending);
        assert_eq!(names(&refs), ["Empty", "Half", "Done"]);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=7).collect();
        let first = paginate(items.clone(), Page::new(1, 3).unwrap());
        assert_eq!(first.items, [1, 2, 3]);
        assert_eq!(first.pages(), 3);
        assert!(first.has_next());

        let last = paginate(items.clone(), Page::new(3, 3).unwrap());
        assert_eq!(last.items, [7]);
        assert!(!last.has_next());

        let beyond = paginate(items, Page::new(9, 3).unwrap());
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 7);
    }

    #[test]
    fn test_filter_over_tickets() {
        let ticket = Entity {
            id: 10,
            kind: EntityKind::Ticket,
            name: "DOH flight".to_string(),
            status: Status::Ticket(TicketStatus::Confirmed),
            attributes: Attributes::empty(EntityKind::Ticket),
            milestones: MilestoneSet::for_kind(EntityKind::Ticket),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };
        let all = vec![ticket];
        let filter = EntityFilter {
            status: Selection::Only("confirmed".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&all).len(), 1);
    }
}
