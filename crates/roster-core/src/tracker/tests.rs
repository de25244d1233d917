//! Tests for the tracker module.

use tempfile::TempDir;

use super::*;
use crate::{
    config::Widget,
    db::entity_queries::REGISTERED_NOTE,
    models::{EntityKind, Status, WorkerStatus},
    params::{
        AddNote, AttributeFields, ChangeStatus, CreateEntity, DeleteEntity, Id, ListEntities,
        MilestoneRef, MoveWidget, SetMilestone, UpdateEntity, WidgetRef,
    },
    progress::ProgressBand,
    transition::TransitionTable,
};

/// Helper function to create a test tracker
async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

async fn create_worker(tracker: &Tracker, name: &str) -> crate::models::Entity {
    tracker
        .create_entity(&CreateEntity {
            kind: "worker".to_string(),
            name: name.to_string(),
            entity_type: Some("Housemaid".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create worker")
}

#[tokio::test]
async fn test_create_entity_registers_history() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let worker = create_worker(&tracker, "Amina Hassan").await;
    assert_eq!(worker.kind, EntityKind::Worker);
    assert_eq!(worker.status, Status::Worker(WorkerStatus::Waiting));
    assert_eq!(worker.milestones.len(), 6);

    let history = tracker
        .history(&Id { id: worker.id })
        .await
        .expect("Failed to load history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, "Waiting");
    assert_eq!(history[0].note, REGISTERED_NOTE);
    assert_eq!(history[0].actor, "system");
}

#[tokio::test]
async fn test_progress_tracks_milestones() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let worker = create_worker(&tracker, "Amina Hassan").await;

    for label in ["visa", "Passport", "MEDICAL", "contract"] {
        tracker
            .set_milestone(&SetMilestone {
                id: worker.id,
                label: label.to_string(),
                satisfied: Some(true),
            })
            .await
            .expect("Failed to set milestone");
    }

    let entity = tracker
        .require_entity(&Id { id: worker.id })
        .await
        .expect("Failed to load worker");
    let progress = entity.progress();
    assert_eq!((progress.completed, progress.total), (4, 6));
    assert_eq!(progress.band(), ProgressBand::AttentionNeeded);

    let (entity, now) = tracker
        .toggle_milestone(&MilestoneRef {
            id: worker.id,
            label: "insurance".to_string(),
        })
        .await
        .expect("Failed to toggle milestone");
    assert!(now);
    assert_eq!(entity.progress().band(), ProgressBand::InProgress);

    // Setting milestones never moves the status.
    assert_eq!(entity.status, Status::Worker(WorkerStatus::Waiting));
}

#[tokio::test]
async fn test_set_milestone_without_value_toggles() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let worker = create_worker(&tracker, "Amina Hassan").await;

    let params = SetMilestone {
        id: worker.id,
        label: "visa".to_string(),
        satisfied: None,
    };
    let (_, first) = tracker.set_milestone(&params).await.unwrap();
    let (_, second) = tracker.set_milestone(&params).await.unwrap();
    assert!(first);
    assert!(!second);
}

#[tokio::test]
async fn test_add_and_remove_milestones() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let worker = create_worker(&tracker, "Amina Hassan").await;

    let entity = tracker
        .add_milestone(&MilestoneRef {
            id: worker.id,
            label: "biometrics".to_string(),
        })
        .await
        .expect("Failed to add milestone");
    assert_eq!(entity.milestones.len(), 7);
    assert_eq!(entity.milestones.position("biometrics"), Some(6));

    let duplicate = tracker
        .add_milestone(&MilestoneRef {
            id: worker.id,
            label: "VISA".to_string(),
        })
        .await;
    assert!(matches!(
        duplicate,
        Err(TrackerError::DuplicateMilestone { .. })
    ));

    let entity = tracker
        .remove_milestone(&MilestoneRef {
            id: worker.id,
            label: "orientation".to_string(),
        })
        .await
        .expect("Failed to remove milestone");
    assert_eq!(entity.milestones.len(), 6);
    assert!(entity.milestones.get("orientation").is_none());

    let missing = tracker
        .remove_milestone(&MilestoneRef {
            id: worker.id,
            label: "orientation".to_string(),
        })
        .await;
    assert!(matches!(
        missing,
        Err(TrackerError::MilestoneNotFound { .. })
    ));
}

#[tokio::test]
async fn test_change_status_appends_history() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let worker = create_worker(&tracker, "Amina Hassan").await;

    let change = tracker
        .change_status(&ChangeStatus {
            id: worker.id,
            status: "in process".to_string(),
            note: Some("Medical booked".to_string()),
            actor: Some("front-desk".to_string()),
        })
        .await
        .expect("Failed to change status");
    assert_eq!(change.from, Status::Worker(WorkerStatus::Waiting));
    assert_eq!(change.to, Status::Worker(WorkerStatus::InProcess));
    assert!(change.is_change());
    assert_eq!(change.entry.status, "In Process");

    let history = tracker.history(&Id { id: worker.id }).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].status, "In Process");
    assert_eq!(history[0].note, "Medical booked");
    assert_eq!(history[0].actor, "front-desk");
    assert_eq!(history[1].note, REGISTERED_NOTE);
}

#[tokio::test]
async fn test_change_status_to_same_status_still_logged() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let worker = create_worker(&tracker, "Amina Hassan").await;

    let change = tracker
        .change_status(&ChangeStatus {
            id: worker.id,
            status: "Waiting".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!change.is_change());
    assert_eq!(tracker.history(&Id { id: worker.id }).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_change_status_rejects_foreign_label() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let ticket = tracker
        .create_entity(&CreateEntity {
            kind: "ticket".to_string(),
            name: "DOH one-way".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let result = tracker
        .change_status(&ChangeStatus {
            id: ticket.id,
            status: "Abroad".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));

    // Nothing was recorded.
    assert_eq!(tracker.history(&Id { id: ticket.id }).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_strict_policy_refuses_skipped_steps() {
    let temp_dir = TempDir::new().unwrap();
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("strict.db")))
        .with_transition_policy(TransitionTable::worker_lifecycle())
        .build()
        .await
        .unwrap();
    let worker = create_worker(&tracker, "Amina Hassan").await;

    let result = tracker
        .change_status(&ChangeStatus {
            id: worker.id,
            status: "Abroad".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(
        result,
        Err(TrackerError::TransitionRejected { .. })
    ));

    let entity = tracker.require_entity(&Id { id: worker.id }).await.unwrap();
    assert_eq!(entity.status, Status::Worker(WorkerStatus::Waiting));
    assert_eq!(tracker.history(&Id { id: worker.id }).await.unwrap().len(), 1);

    tracker
        .change_status(&ChangeStatus {
            id: worker.id,
            status: "In Process".to_string(),
            ..Default::default()
        })
        .await
        .expect("Allowed transition should pass");
}

#[tokio::test]
async fn test_add_note_uses_current_status() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let worker = create_worker(&tracker, "Amina Hassan").await;

    let entry = tracker
        .add_note(&AddNote {
            id: worker.id,
            note: "  Called family ".to_string(),
            actor: Some("ops".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(entry.status, "Waiting");
    assert_eq!(entry.note, "Called family");

    let empty = tracker
        .add_note(&AddNote {
            id: worker.id,
            note: "   ".to_string(),
            actor: None,
        })
        .await;
    assert!(matches!(empty, Err(TrackerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_operations_on_missing_entity() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    assert!(tracker.get_entity(&Id { id: 99 }).await.unwrap().is_none());
    assert!(matches!(
        tracker.require_entity(&Id { id: 99 }).await,
        Err(TrackerError::EntityNotFound { id: 99 })
    ));
    assert!(matches!(
        tracker.history(&Id { id: 99 }).await,
        Err(TrackerError::EntityNotFound { id: 99 })
    ));
    assert!(matches!(
        tracker.milestones(&Id { id: 99 }).await,
        Err(TrackerError::EntityNotFound { id: 99 })
    ));
    assert!(matches!(
        tracker
            .change_status(&ChangeStatus {
                id: 99,
                status: "Waiting".to_string(),
                ..Default::default()
            })
            .await,
        Err(TrackerError::EntityNotFound { id: 99 })
    ));
}

#[tokio::test]
async fn test_update_entity() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let worker = create_worker(&tracker, "Amina Hassan").await;

    let updated = tracker
        .update_entity(&UpdateEntity {
            id: worker.id,
            name: Some("Amina H. Ali".to_string()),
            fields: AttributeFields {
                destination: Some("Qatar".to_string()),
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Amina H. Ali");
    assert_eq!(updated.attributes.type_label(), Some("Housemaid"));
    assert_eq!(updated.status, worker.status);
    assert_eq!(updated.milestones, worker.milestones);

    let nothing = tracker
        .update_entity(&UpdateEntity {
            id: worker.id,
            ..Default::default()
        })
        .await;
    assert!(matches!(nothing, Err(TrackerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_list_entities_summary_filters() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let amina = create_worker(&tracker, "Amina Hassan").await;
    create_worker(&tracker, "Joseph Mensah").await;
    tracker
        .create_entity(&CreateEntity {
            kind: "document".to_string(),
            name: "Amina passport".to_string(),
            entity_type: Some("Passport".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    tracker
        .change_status(&ChangeStatus {
            id: amina.id,
            status: "Abroad".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let all = tracker
        .list_entities_summary(&ListEntities::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let workers = tracker
        .list_entities_summary(&ListEntities::of_kind(EntityKind::Worker))
        .await
        .unwrap();
    assert_eq!(workers.len(), 2);

    let amina_only = tracker
        .list_entities_summary(&ListEntities {
            kind: Some("worker".to_string()),
            search: Some("AMINA".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(amina_only.len(), 1);
    assert_eq!(amina_only[0].id, amina.id);

    let abroad = tracker
        .list_entities_summary(&ListEntities {
            status: Some("abroad".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(abroad.len(), 1);

    let passports = tracker
        .list_entities_summary(&ListEntities {
            entity_type: Some("Passport".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(passports.len(), 1);
    assert_eq!(passports[0].kind, EntityKind::Document);
}

#[tokio::test]
async fn test_list_entities_summary_sorts_and_pages() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    for name in ["Carla", "Amina", "Bashir"] {
        create_worker(&tracker, name).await;
    }

    let page = tracker
        .list_entities_summary(&ListEntities {
            sort: Some("name".to_string()),
            page: Some(1),
            per_page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<&str> = page.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Amina", "Bashir"]);
    assert_eq!(page.total(), 3);
    assert!(page.0.has_next());

    let last = tracker
        .list_entities_summary(&ListEntities {
            sort: Some("name".to_string()),
            page: Some(2),
            per_page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].name, "Carla");
}

#[tokio::test]
async fn test_show_history_and_breakdown() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let worker = create_worker(&tracker, "Amina Hassan").await;
    create_worker(&tracker, "Joseph Mensah").await;
    tracker
        .change_status(&ChangeStatus {
            id: worker.id,
            status: "Missing".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let history = tracker.show_history(&Id { id: worker.id }).await.unwrap();
    assert_eq!(history.kind, EntityKind::Worker);
    assert_eq!(history.len(), 2);

    let breakdown = tracker.status_breakdown(EntityKind::Worker).await.unwrap();
    assert_eq!(breakdown.total(), 2);
    assert_eq!(breakdown.counts[0], (Status::Worker(WorkerStatus::Waiting), 1));
    assert_eq!(breakdown.counts[7], (Status::Worker(WorkerStatus::Missing), 1));
}

#[tokio::test]
async fn test_delete_entity_requires_confirmation() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let worker = create_worker(&tracker, "Amina Hassan").await;

    let refused = tracker
        .delete_entity(&DeleteEntity {
            id: worker.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(refused, Err(TrackerError::InvalidInput { .. })));
    assert!(tracker.get_entity(&Id { id: worker.id }).await.unwrap().is_some());

    let deleted = tracker
        .delete_entity(&DeleteEntity {
            id: worker.id,
            confirmed: true,
        })
        .await
        .unwrap()
        .expect("Entity should have been deleted");
    assert_eq!(deleted.name, "Amina Hassan");

    assert!(tracker.get_entity(&Id { id: worker.id }).await.unwrap().is_none());
    assert!(matches!(
        tracker.history(&Id { id: worker.id }).await,
        Err(TrackerError::EntityNotFound { .. })
    ));
    assert!(tracker
        .delete_entity_by_id(&Id { id: worker.id })
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_layout_persists() {
    let (temp_dir, tracker) = create_test_tracker().await;

    let layout = tracker.layout().await.unwrap();
    assert_eq!(layout.slots().len(), Widget::ALL.len());

    tracker
        .move_widget(&MoveWidget {
            widget: "pending-tasks".to_string(),
            position: 1,
        })
        .await
        .unwrap();
    tracker
        .toggle_widget(&WidgetRef {
            widget: "upcoming-flights".to_string(),
        })
        .await
        .unwrap();

    // A second tracker on the same file sees the saved layout.
    let reopened = TrackerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .unwrap();
    let layout = reopened.layout().await.unwrap();
    assert_eq!(layout.slots()[0].widget, Widget::PendingTasks);
    assert!(!layout.visible().any(|w| w == Widget::UpcomingFlights));

    let reset = reopened.reset_layout().await.unwrap();
    assert_eq!(reset.visible().count(), Widget::ALL.len());

    let unknown = reopened
        .toggle_widget(&WidgetRef {
            widget: "weather".to_string(),
        })
        .await;
    assert!(matches!(unknown, Err(TrackerError::InvalidInput { .. })));
}
