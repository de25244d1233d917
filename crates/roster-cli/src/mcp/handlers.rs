//! MCP tool handlers implementation

use std::{fmt::Write, sync::Arc};

use log::debug;
use roster_core::{
    display::{
        CreateResult, DeleteResult, OperationStatus, ProgressBadge, StatusLegend, UpdateResult,
    },
    params as core, Tracker,
};
use rmcp::{
    handler::server::tool::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, JsonObject,
        ListPromptsResult, PaginatedRequestParam, Prompt, PromptArgument, PromptMessage,
        PromptMessageContent, PromptMessageRole,
    },
    service::RequestContext,
    ErrorData, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{
    errors::to_mcp_error,
    prompts::{get_prompt_templates, PromptTemplate},
};

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types only derive JsonSchema behind the `schema` feature.
// The transparent wrapper gives rmcp the Deserialize + JsonSchema pair it
// needs without naming every core type twice.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type OfKind = McpParams<core::OfKind>;
pub type CreateEntity = McpParams<core::CreateEntity>;
pub type UpdateEntity = McpParams<core::UpdateEntity>;
pub type ListEntities = McpParams<core::ListEntities>;
pub type DeleteEntity = McpParams<core::DeleteEntity>;
pub type ChangeStatus = McpParams<core::ChangeStatus>;
pub type MilestoneRef = McpParams<core::MilestoneRef>;
pub type SetMilestone = McpParams<core::SetMilestone>;
pub type AddNote = McpParams<core::AddNote>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    tracker: Arc<Tracker>,
}

impl McpHandlers {
    pub fn new(tracker: Arc<Tracker>) -> Self {
        Self { tracker }
    }

    pub async fn create_entity(&self, Parameters(params): Parameters<CreateEntity>) -> McpResult {
        debug!("create_entity: {params:?}");

        let entity = self
            .tracker
            .create_entity(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create entity", &e))?;

        text_result(CreateResult::new(entity).to_string())
    }

    pub async fn list_entities(&self, Parameters(params): Parameters<ListEntities>) -> McpResult {
        debug!("list_entities: {params:?}");

        let page = self
            .tracker
            .list_entities_summary(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list entities", &e))?;

        text_result(page.to_string())
    }

    pub async fn show_entity(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_entity: {params:?}");

        let entity = self
            .tracker
            .require_entity(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to show entity", &e))?;

        text_result(entity.to_string())
    }

    pub async fn update_entity(&self, Parameters(params): Parameters<UpdateEntity>) -> McpResult {
        debug!("update_entity: {params:?}");

        let params = params.as_ref();
        let entity = self
            .tracker
            .update_entity(params)
            .await
            .map_err(|e| to_mcp_error("Failed to update entity", &e))?;

        text_result(UpdateResult::with_changes(entity, params.describe_changes()).to_string())
    }

    pub async fn delete_entity(&self, Parameters(params): Parameters<DeleteEntity>) -> McpResult {
        debug!("delete_entity: {params:?}");

        let deleted = self
            .tracker
            .delete_entity(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete entity", &e))?;

        match deleted {
            Some(entity) => text_result(DeleteResult::new(entity).to_string()),
            None => text_result(
                OperationStatus::failure(format!(
                    "Entity with ID {} not found",
                    params.as_ref().id
                ))
                .to_string(),
            ),
        }
    }

    pub async fn change_status(&self, Parameters(params): Parameters<ChangeStatus>) -> McpResult {
        debug!("change_status: {params:?}");

        let change = self
            .tracker
            .change_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to change status", &e))?;

        text_result(change.to_string())
    }

    pub async fn status_legend(&self, Parameters(params): Parameters<OfKind>) -> McpResult {
        debug!("status_legend: {params:?}");

        let kind = params
            .as_ref()
            .kind()
            .map_err(|e| to_mcp_error("Failed to show status legend", &e))?;

        text_result(StatusLegend(kind).to_string())
    }

    pub async fn status_breakdown(&self, Parameters(params): Parameters<OfKind>) -> McpResult {
        debug!("status_breakdown: {params:?}");

        let kind = params
            .as_ref()
            .kind()
            .map_err(|e| to_mcp_error("Failed to count statuses", &e))?;
        let breakdown = self
            .tracker
            .status_breakdown(kind)
            .await
            .map_err(|e| to_mcp_error("Failed to count statuses", &e))?;

        text_result(breakdown.to_string())
    }

    pub async fn add_milestone(&self, Parameters(params): Parameters<MilestoneRef>) -> McpResult {
        debug!("add_milestone: {params:?}");

        let entity = self
            .tracker
            .add_milestone(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add milestone", &e))?;

        let mut output = OperationStatus::success(format!(
            "Added milestone '{}' to {}",
            params.as_ref().label.trim(),
            entity.name
        ))
        .to_string();
        let _ = writeln!(output, "\n{}", entity.milestones);
        let _ = writeln!(output, "Progress: {}", ProgressBadge(entity.progress()));
        text_result(output)
    }

    pub async fn set_milestone(&self, Parameters(params): Parameters<SetMilestone>) -> McpResult {
        debug!("set_milestone: {params:?}");

        let (entity, satisfied) = self
            .tracker
            .set_milestone(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update milestone", &e))?;

        let state = if satisfied { "done" } else { "pending" };
        let mut output = OperationStatus::success(format!(
            "Milestone '{}' of {} is now {state}",
            params.as_ref().label.trim(),
            entity.name
        ))
        .to_string();
        let _ = writeln!(output, "\nProgress: {}", ProgressBadge(entity.progress()));
        text_result(output)
    }

    pub async fn remove_milestone(&self, Parameters(params): Parameters<MilestoneRef>) -> McpResult {
        debug!("remove_milestone: {params:?}");

        let entity = self
            .tracker
            .remove_milestone(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove milestone", &e))?;

        let mut output = OperationStatus::success(format!(
            "Removed milestone '{}' from {}",
            params.as_ref().label.trim(),
            entity.name
        ))
        .to_string();
        let _ = writeln!(output, "\nProgress: {}", ProgressBadge(entity.progress()));
        text_result(output)
    }

    pub async fn show_history(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_history: {params:?}");

        let history = self
            .tracker
            .show_history(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to show history", &e))?;

        text_result(history.to_string())
    }

    pub async fn add_note(&self, Parameters(params): Parameters<AddNote>) -> McpResult {
        debug!("add_note: {params:?}");

        let entry = self
            .tracker
            .add_note(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add note", &e))?;

        text_result(CreateResult::new(entry).to_string())
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        debug!("list_prompts");

        let prompts = get_prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        debug!("get_prompt: {}", request.name);

        let templates = get_prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| ErrorData::invalid_params("Prompt not found", None))?;

        let prompt_text = apply_arguments(template, request.arguments.as_ref())?;

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}

/// Substitutes `{name}` placeholders with the request's arguments, falling
/// back to each optional argument's default.
fn apply_arguments(
    template: &PromptTemplate,
    arguments: Option<&JsonObject>,
) -> Result<String, ErrorData> {
    let mut text = template.template.clone();
    let mut missing = Vec::new();

    for arg in &template.arguments {
        let value = match arguments.and_then(|args| args.get(&arg.name)) {
            Some(value) => match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                _ => {
                    return Err(ErrorData::invalid_params(
                        format!("Argument '{}' must be a string", arg.name),
                        None,
                    ))
                }
            },
            None if arg.required => {
                missing.push(arg.name.as_str());
                continue;
            }
            None => arg.default.clone().unwrap_or_default(),
        };
        text = text.replace(&PromptTemplate::placeholder(arg), &value);
    }

    if !missing.is_empty() {
        return Err(ErrorData::invalid_params(
            format!("Required arguments missing: {}", missing.join(", ")),
            None,
        ));
    }
    Ok(text)
}
