//! Command handlers for the terminal interface.
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! [`Tracker`] and renders the markdown result.

use anyhow::{bail, Context, Result};
use roster_core::{
    display::{
        CreateResult, DeleteResult, OperationStatus, ProgressBadge, StatusLegend, UpdateResult,
    },
    models::Entity,
    params::*,
    Tracker,
};

use crate::{
    args::{EntityCommands, HistoryCommands, LayoutCommands, MilestoneCommands, StatusCommands},
    renderer::TerminalRenderer,
};

/// Runs one CLI command against a tracker.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
    actor: Option<String>,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer, actor: Option<String>) -> Self {
        Self {
            tracker,
            renderer,
            actor,
        }
    }

    pub async fn handle_entity_command(&self, command: EntityCommands) -> Result<()> {
        match command {
            EntityCommands::Create(args) => self.create_entity(args.into()).await,
            EntityCommands::List(args) => self.list_entities(&args.into()).await,
            EntityCommands::Show(args) => self.show_entity(&args.into()).await,
            EntityCommands::Update(args) => self.update_entity(&args.into()).await,
            EntityCommands::Delete(args) => self.delete_entity(&args.into()).await,
        }
    }

    pub async fn handle_status_command(&self, command: StatusCommands) -> Result<()> {
        match command {
            StatusCommands::Set(args) => self.change_status(args.into()).await,
            StatusCommands::Legend(args) => self.status_legend(&args.into()),
            StatusCommands::Breakdown(args) => self.status_breakdown(&args.into()).await,
        }
    }

    pub async fn handle_milestone_command(&self, command: MilestoneCommands) -> Result<()> {
        match command {
            MilestoneCommands::List(args) => self.list_milestones(&args.into()).await,
            MilestoneCommands::Add(args) => self.add_milestone(&args.into()).await,
            MilestoneCommands::Set(args) => self.set_milestone(&args.into()).await,
            MilestoneCommands::Toggle(args) => self.toggle_milestone(&args.into()).await,
            MilestoneCommands::Remove(args) => self.remove_milestone(&args.into()).await,
        }
    }

    pub async fn handle_history_command(&self, command: HistoryCommands) -> Result<()> {
        match command {
            HistoryCommands::List(args) => self.show_history(&args.into()).await,
            HistoryCommands::Note(args) => self.add_note(args.into()).await,
        }
    }

    pub async fn handle_layout_command(&self, command: LayoutCommands) -> Result<()> {
        let (layout, message) = match command {
            LayoutCommands::Show => (self.tracker.layout().await?, None),
            LayoutCommands::Move(args) => {
                let params: MoveWidget = args.into();
                let layout = self
                    .tracker
                    .move_widget(&params)
                    .await
                    .context("Failed to move widget")?;
                let message = format!("Moved {} to position {}", params.widget, params.position);
                (layout, Some(message))
            }
            LayoutCommands::Toggle(args) => {
                let params: WidgetRef = args.into();
                let layout = self
                    .tracker
                    .toggle_widget(&params)
                    .await
                    .context("Failed to toggle widget")?;
                (layout, Some(format!("Toggled {}", params.widget)))
            }
            LayoutCommands::Reset => {
                let layout = self
                    .tracker
                    .reset_layout()
                    .await
                    .context("Failed to reset layout")?;
                (layout, Some("Layout reset".to_string()))
            }
        };

        let mut output = String::new();
        if let Some(message) = message {
            output.push_str(&OperationStatus::success(message).to_string());
            output.push('\n');
        }
        output.push_str(&layout.to_string());
        self.renderer.render(&output)
    }

    // Entities

    async fn create_entity(&self, mut params: CreateEntity) -> Result<()> {
        params.actor = self.actor.clone();
        let entity = self
            .tracker
            .create_entity(&params)
            .await
            .context("Failed to create entity")?;
        self.renderer.render(&CreateResult::new(entity).to_string())
    }

    pub async fn list_entities(&self, params: &ListEntities) -> Result<()> {
        let page = self
            .tracker
            .list_entities_summary(params)
            .await
            .context("Failed to list entities")?;
        self.renderer.render(&page.to_string())
    }

    async fn show_entity(&self, params: &Id) -> Result<()> {
        let entity = self.require_entity(params).await?;
        self.renderer.render(&entity.to_string())
    }

    async fn update_entity(&self, params: &UpdateEntity) -> Result<()> {
        let entity = self
            .tracker
            .update_entity(params)
            .await
            .with_context(|| format!("Failed to update entity {}", params.id))?;
        let result = UpdateResult::with_changes(entity, params.describe_changes());
        self.renderer.render(&result.to_string())
    }

    async fn delete_entity(&self, params: &DeleteEntity) -> Result<()> {
        match self.tracker.delete_entity(params).await? {
            Some(entity) => self.renderer.render(&DeleteResult::new(entity).to_string()),
            None => bail!("Entity with ID {} not found", params.id),
        }
    }

    // Statuses

    async fn change_status(&self, mut params: ChangeStatus) -> Result<()> {
        params.actor = self.actor.clone();
        let change = self
            .tracker
            .change_status(&params)
            .await
            .with_context(|| format!("Failed to change status of entity {}", params.id))?;
        self.renderer.render(&change.to_string())
    }

    fn status_legend(&self, params: &OfKind) -> Result<()> {
        let kind = params.kind()?;
        self.renderer.render(&StatusLegend(kind).to_string())
    }

    async fn status_breakdown(&self, params: &OfKind) -> Result<()> {
        let breakdown = self.tracker.status_breakdown(params.kind()?).await?;
        self.renderer.render(&breakdown.to_string())
    }

    // Milestones

    async fn list_milestones(&self, params: &Id) -> Result<()> {
        let entity = self.require_entity(params).await?;
        let output = format!(
            "# {}. {}\n\nProgress: {}\n\n{}",
            entity.id,
            entity.name,
            ProgressBadge(entity.progress()),
            entity.milestones
        );
        self.renderer.render(&output)
    }

    async fn add_milestone(&self, params: &MilestoneRef) -> Result<()> {
        let entity = self
            .tracker
            .add_milestone(params)
            .await
            .context("Failed to add milestone")?;
        let message = format!("Added milestone '{}' to {}", params.label.trim(), entity.name);
        self.render_progress(message, &entity)
    }

    async fn set_milestone(&self, params: &SetMilestone) -> Result<()> {
        let (entity, satisfied) = self
            .tracker
            .set_milestone(params)
            .await
            .context("Failed to update milestone")?;
        self.render_milestone_state(&params.label, satisfied, &entity)
    }

    async fn toggle_milestone(&self, params: &MilestoneRef) -> Result<()> {
        let (entity, satisfied) = self
            .tracker
            .toggle_milestone(params)
            .await
            .context("Failed to toggle milestone")?;
        self.render_milestone_state(&params.label, satisfied, &entity)
    }

    async fn remove_milestone(&self, params: &MilestoneRef) -> Result<()> {
        let entity = self
            .tracker
            .remove_milestone(params)
            .await
            .context("Failed to remove milestone")?;
        let message = format!("Removed milestone '{}' from {}", params.label.trim(), entity.name);
        self.render_progress(message, &entity)
    }

    fn render_milestone_state(&self, label: &str, satisfied: bool, entity: &Entity) -> Result<()> {
        let state = if satisfied { "done" } else { "pending" };
        let message = format!("Milestone '{}' is now {state}", label.trim());
        self.render_progress(message, entity)
    }

    fn render_progress(&self, message: String, entity: &Entity) -> Result<()> {
        let output = format!(
            "{}\nProgress: {}\n",
            OperationStatus::success(message),
            ProgressBadge(entity.progress())
        );
        self.renderer.render(&output)
    }

    // History

    async fn show_history(&self, params: &Id) -> Result<()> {
        let history = self
            .tracker
            .show_history(params)
            .await
            .with_context(|| format!("Failed to load history of entity {}", params.id))?;
        self.renderer.render(&history.to_string())
    }

    async fn add_note(&self, mut params: AddNote) -> Result<()> {
        params.actor = self.actor.clone();
        let entry = self
            .tracker
            .add_note(&params)
            .await
            .context("Failed to add note")?;
        self.renderer.render(&CreateResult::new(entry).to_string())
    }

    async fn require_entity(&self, params: &Id) -> Result<Entity> {
        self.tracker
            .get_entity(params)
            .await?
            .with_context(|| format!("Entity with ID {} not found", params.id))
    }
}
