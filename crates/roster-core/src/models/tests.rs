#[cfg(test)]
mod model_tests {
    use jiff::{civil::date, Timestamp};

    use crate::{
        error::TrackerError,
        models::{
            canonical_label, Attributes, DateField, DateRange, DocumentStatus, Entity,
            EntityFilter, EntityKind, EntitySummary, Milestone, MilestoneSet, Page, SearchField,
            Selection, SortKey, Status, StatusBreakdown, TaskStatus, TicketStatus,
            WorkerAttributes, WorkerStatus,
        },
        progress::ProgressBand,
    };

    fn create_test_worker(status: WorkerStatus, done: usize) -> Entity {
        let mut milestones = MilestoneSet::for_kind(EntityKind::Worker);
        let labels: Vec<String> = milestones.iter().map(|m| m.label.clone()).collect();
        for label in labels.iter().take(done) {
            milestones.set(label, true).unwrap();
        }
        Entity {
            id: 12,
            kind: EntityKind::Worker,
            name: "Amina Hassan".to_string(),
            status: Status::Worker(status),
            attributes: Attributes::Worker(WorkerAttributes {
                passport_number: Some("P998877".to_string()),
                job_category: Some("Housemaid".to_string()),
                contract_start: Some(date(2024, 3, 1)),
                ..Default::default()
            }),
            milestones,
            created_at: Timestamp::from_second(1704067200).unwrap(), // 2024-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1706745600).unwrap(), // 2024-02-01 00:00:00 UTC
        }
    }

    #[test]
    fn test_milestone_labels_are_unique_ignoring_case() {
        let mut set = MilestoneSet::from_labels(["Visa", "Passport"]).unwrap();
        match set.add("  visa ") {
            Err(TrackerError::DuplicateMilestone { label }) => assert_eq!(label, "visa"),
            other => panic!("Expected DuplicateMilestone, got {other:?}"),
        }
        assert_eq!(set.len(), 2);

        assert!(matches!(
            MilestoneSet::from_labels(["a", "A"]),
            Err(TrackerError::DuplicateMilestone { .. })
        ));
        assert!(matches!(
            MilestoneSet::from_labels(["  "]),
            Err(TrackerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_milestone_order_is_preserved() {
        let mut set = MilestoneSet::from_labels(["booked", "paid", "issued"]).unwrap();
        set.set("PAID", true).unwrap();
        set.add("boarded").unwrap();
        set.remove("booked").unwrap();

        let labels: Vec<&str> = set.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["paid", "issued", "boarded"]);
        assert!(set.get("paid").unwrap().satisfied);
        assert_eq!(set.position("boarded"), Some(2));
    }

    #[test]
    fn test_milestone_unknown_label() {
        let mut set = MilestoneSet::for_kind(EntityKind::Ticket);
        assert!(matches!(
            set.set("stamped", true),
            Err(TrackerError::MilestoneNotFound { .. })
        ));
        assert!(matches!(
            set.toggle("stamped"),
            Err(TrackerError::MilestoneNotFound { .. })
        ));
        assert!(matches!(
            set.remove("stamped"),
            Err(TrackerError::MilestoneNotFound { .. })
        ));
    }

    #[test]
    fn test_milestone_toggle_flips() {
        let mut set = MilestoneSet::for_kind(EntityKind::Document);
        assert!(set.toggle("verified").unwrap());
        assert!(!set.toggle("Verified").unwrap());
        assert_eq!(set.completed_count(), 0);
    }

    #[test]
    fn test_milestone_set_rejects_duplicates_when_deserialized() {
        let json = r#"[{"label":"visa","satisfied":true},{"label":"VISA"}]"#;
        assert!(serde_json::from_str::<MilestoneSet>(json).is_err());

        let json = r#"[{"label":"visa","satisfied":true},{"label":"medical"}]"#;
        let set: MilestoneSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.completed_count(), 1);
        assert_eq!(
            set.iter().cloned().collect::<Vec<_>>(),
            vec![Milestone::done("visa"), Milestone::pending("medical")]
        );
    }

    #[test]
    fn test_default_checklists() {
        assert_eq!(MilestoneSet::for_kind(EntityKind::Worker).len(), 6);
        assert_eq!(MilestoneSet::for_kind(EntityKind::Document).len(), 3);
        assert_eq!(MilestoneSet::for_kind(EntityKind::Ticket).len(), 3);
        assert!(MilestoneSet::for_kind(EntityKind::Task).is_empty());
    }

    #[test]
    fn test_entity_progress_follows_milestones() {
        let worker = create_test_worker(WorkerStatus::InProcess, 4);
        let progress = worker.progress();
        assert_eq!(progress.completed, 4);
        assert_eq!(progress.total, 6);
        assert_eq!(progress.percent(), 66);
        assert_eq!(progress.band(), ProgressBand::AttentionNeeded);

        // Status is independent of progress.
        let done = create_test_worker(WorkerStatus::Waiting, 6);
        assert_eq!(done.progress().band(), ProgressBand::Complete);
    }

    #[test]
    fn test_status_enumerations() {
        assert_eq!(Status::all(EntityKind::Worker).len(), 8);
        assert_eq!(Status::all(EntityKind::Document).len(), 6);
        assert_eq!(Status::all(EntityKind::Ticket).len(), 4);
        assert_eq!(Status::all(EntityKind::Task).len(), 4);

        for kind in EntityKind::ALL {
            assert_eq!(Status::initial(kind).kind(), kind);
            for status in Status::all(kind) {
                assert_eq!(status.kind(), kind);
            }
        }
    }

    #[test]
    fn test_status_parse_is_canonical() {
        assert_eq!(
            Status::parse(EntityKind::Worker, "today-flying").unwrap(),
            Status::Worker(WorkerStatus::TodayFlying)
        );
        assert_eq!(
            Status::parse(EntityKind::Document, "Needs Correction").unwrap(),
            Status::Document(DocumentStatus::NeedsCorrection)
        );
        assert_eq!(
            Status::parse(EntityKind::Task, "IN_PROGRESS").unwrap(),
            Status::Task(TaskStatus::InProgress)
        );
        assert_eq!(canonical_label(" In Process "), "in_process");
    }

    #[test]
    fn test_status_parse_rejects_other_kinds() {
        // "Abroad" is a worker status, not a ticket status.
        let err = Status::parse(EntityKind::Ticket, "Abroad").unwrap_err();
        match err {
            TrackerError::InvalidInput { field, reason } => {
                assert_eq!(field, "status");
                assert!(reason.contains("Confirmed, Pending, Cancelled, Completed"));
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
        assert_eq!(Status::lookup(EntityKind::Ticket, "Rerouted"), None);
    }

    #[test]
    fn test_status_serde_uses_labels() {
        let status = Status::Ticket(TicketStatus::Confirmed);
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"ticket":"Confirmed"}"#);

        let worker: Status = serde_json::from_str(r#"{"worker":"Today Flying"}"#).unwrap();
        assert_eq!(worker, Status::Worker(WorkerStatus::TodayFlying));
    }

    #[test]
    fn test_selection_from_input() {
        assert!(Selection::from_input(None).is_all());
        assert!(Selection::from_input(Some("")).is_all());
        assert!(Selection::from_input(Some("ALL")).is_all());
        assert_eq!(
            Selection::from_input(Some(" Abroad ")).as_only(),
            Some(&"Abroad".to_string())
        );
    }

    #[test]
    fn test_date_range_bounds() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));

        let single = DateRange::new(date(2024, 5, 5), date(2024, 5, 5)).unwrap();
        assert!(single.contains(date(2024, 5, 5)));

        assert!(matches!(
            DateRange::new(date(2024, 2, 1), date(2024, 1, 1)),
            Err(TrackerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_filter_defaults() {
        let filter = EntityFilter::default();
        assert!(filter.is_pass_through());
        assert_eq!(filter.search_fields, SearchField::DEFAULT.to_vec());
        assert_eq!(filter.date_field, DateField::Updated);

        // Blank text keeps the filter inactive.
        assert!(EntityFilter::text("   ").is_pass_through());
        assert!(!EntityFilter::text("amina").is_pass_through());

        let widened = EntityFilter::text("doha")
            .searching([SearchField::Destination, SearchField::Name]);
        assert_eq!(
            widened.search_fields,
            vec![SearchField::Id, SearchField::Name, SearchField::Destination]
        );
    }

    #[test]
    fn test_parse_filter_keys() {
        assert_eq!("passport".parse::<SearchField>(), Ok(SearchField::PassportNumber));
        assert_eq!("flight-number".parse::<SearchField>(), Ok(SearchField::FlightNumber));
        assert_eq!("expires".parse::<DateField>(), Ok(DateField::ExpiresOn));
        assert_eq!("Progress".parse::<SortKey>(), Ok(SortKey::Progress));
        assert!("salary".parse::<SearchField>().is_err());
    }

    #[test]
    fn test_page_validation() {
        assert_eq!(Page::default(), Page { number: 1, size: 20 });
        assert!(Page::new(0, 10).is_err());
        assert!(Page::new(1, 0).is_err());
    }

    #[test]
    fn test_attributes_lookup() {
        let worker = create_test_worker(WorkerStatus::Waiting, 0);
        assert_eq!(worker.attributes.type_label(), Some("Housemaid"));
        assert_eq!(
            worker.attributes.text(SearchField::PassportNumber).as_deref(),
            Some("P998877")
        );
        // Fields of other kinds are simply absent.
        assert_eq!(worker.attributes.text(SearchField::Airline), None);
        assert_eq!(
            worker.attributes.date(DateField::ContractStart),
            Some(date(2024, 3, 1))
        );
        assert_eq!(worker.attributes.date(DateField::Due), None);

        let details = worker.attributes.details();
        assert_eq!(details[0], ("Passport", "P998877".to_string()));
        assert!(details.iter().any(|(name, v)| *name == "Contract start" && v == "2024-03-01"));
    }

    #[test]
    fn test_document_without_type_has_no_type_label() {
        assert_eq!(Attributes::empty(EntityKind::Document).type_label(), None);
    }

    #[test]
    fn test_summary_from_entity() {
        let worker = create_test_worker(WorkerStatus::Abroad, 5);
        let summary = EntitySummary::from(&worker);
        assert_eq!(summary.id, 12);
        assert_eq!(summary.entity_type.as_deref(), Some("Housemaid"));
        assert_eq!(summary.progress.completed, 5);
        assert_eq!(summary.progress.band(), ProgressBand::InProgress);
    }

    #[test]
    fn test_status_breakdown_lists_every_status() {
        let workers = [
            create_test_worker(WorkerStatus::Abroad, 0),
            create_test_worker(WorkerStatus::Abroad, 1),
            create_test_worker(WorkerStatus::Missing, 2),
        ];
        let breakdown = StatusBreakdown::tally(EntityKind::Worker, &workers);
        assert_eq!(breakdown.counts.len(), 8);
        assert_eq!(breakdown.total(), 3);
        assert_eq!(
            breakdown.counts[3],
            (Status::Worker(WorkerStatus::Abroad), 2)
        );
        assert_eq!(
            breakdown.counts[7],
            (Status::Worker(WorkerStatus::Missing), 1)
        );
        assert_eq!(breakdown.counts[0].1, 0);
    }
}
