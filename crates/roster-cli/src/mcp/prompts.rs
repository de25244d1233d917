//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Substituted when an optional argument is left out
    pub default: Option<String>,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

impl PromptTemplate {
    /// Placeholder written in the template for `arg`.
    pub fn placeholder(arg: &PromptTemplateArg) -> String {
        format!("{{{}}}", arg.name)
    }
}

/// Get predefined prompt templates for agency record keeping
pub fn get_prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "worker_report".to_string(),
            description: "Summarize where a worker stands: status, checklist and recent history".to_string(),
            template: r#"You are a placement officer at a recruitment agency preparing a status report.

# Worker
ID: {worker_id}

# Gather
1. Call `show_entity` with the worker ID for the status, attributes and milestone checklist.
2. Call `show_history` with the same ID for status changes and notes, newest first.
3. Call `list_entities` with `kind` "document", then "ticket", and use `show_entity` on each candidate to keep those whose worker ID is this worker's.

# Report
Write a short report with these sections:
- **Status**: the current status and when it last changed
- **Checklist**: progress as completed/total, naming every milestone still pending
- **Documents and travel**: status of each related document and ticket
- **Next actions**: what must happen before the next status, in order

Keep it factual. Quote history notes where they explain a delay."#
                .to_string(),
            arguments: vec![PromptTemplateArg {
                name: "worker_id".to_string(),
                description: "ID of the worker to report on".to_string(),
                required: true,
                default: None,
            }],
        },
        PromptTemplate {
            name: "daily_review".to_string(),
            description: "Review records that need attention today".to_string(),
            template: r#"You are reviewing the agency's records at the start of the day.

# Scope
Kind: {kind}

# Steps
1. Call `status_breakdown` for the kind to see how records are spread over the statuses.
2. Call `list_entities` with the kind, `sort` "progress" and `descending` false, so the least advanced records come first.
3. For every record whose progress is below 70%, call `show_entity` and note the pending milestones.
4. For workers, also list the statuses "Today Flying" and "Missing" with `list_entities`, since both need same-day follow-up.

# Output
A prioritized list: record ID, name, status, progress and the single most urgent next step. Do not change any status or milestone; this review is read-only."#
                .to_string(),
            arguments: vec![PromptTemplateArg {
                name: "kind".to_string(),
                description: "Record kind to review: worker, document, ticket or task".to_string(),
                required: false,
                default: Some("worker".to_string()),
            }],
        },
        PromptTemplate {
            name: "record_update".to_string(),
            description: "Apply a described real-world event to a record".to_string(),
            template: r#"You are updating the agency's records after an event.

# Event
{event}

# Steps
1. Identify the record: use `list_entities` with `search` (and `search_fields` such as "passport_number" or "flight_number") until exactly one record matches. Ask if several do.
2. Call `show_entity` to read its current status and checklist.
3. If the event completes a checklist item, call `set_milestone` with `satisfied` true.
4. If the event moves the record to another status, call `change_status` with a note describing the event. Use `status_legend` to find the right label.
5. Otherwise record it with `add_note`.

Confirm what you changed, quoting the new status and progress."#
                .to_string(),
            arguments: vec![PromptTemplateArg {
                name: "event".to_string(),
                description: "What happened, e.g. 'Amina's visa was stamped today'".to_string(),
                required: true,
                default: None,
            }],
        },
    ]
}
