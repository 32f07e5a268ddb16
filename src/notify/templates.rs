//! Email template rendering for notification delivery.

use super::domain::{EmailMessage, TaskAssigned};
use minijinja::{Environment, context};
use thiserror::Error;

/// HTML body sent to an assignee when a task is created for them.
const ASSIGNMENT_TEMPLATE: &str = "\
<h2>Hello {{ assignee_name }},</h2>
<p>You have been assigned a new task by <b>{{ assigned_by_name }}</b>.</p>
<p><b>Task title:</b> {{ title }}</p>
<p><b>Description:</b> {{ description }}</p>
<p><b>Priority:</b> {{ priority }}</p>
{% if deadline %}<p><b>Deadline:</b> {{ deadline }}</p>
{% endif %}<p>Please log in to your dashboard to view and update the task status.</p>
<br/>
<p>Regards,<br/>Foreman</p>
";

/// Errors returned while rendering notification templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template compilation or rendering failed.
    #[error(transparent)]
    Render(#[from] minijinja::Error),
}

/// Renders the assignment email for a [`TaskAssigned`] event.
///
/// # Errors
///
/// Returns [`TemplateError::Render`] when the template engine rejects the
/// template or context; with the embedded template this indicates a
/// programming error rather than bad input.
pub fn render_assignment_email(event: &TaskAssigned) -> Result<EmailMessage, TemplateError> {
    let mut environment = Environment::new();
    environment.add_template("assignment", ASSIGNMENT_TEMPLATE)?;
    let template = environment.get_template("assignment")?;

    let description = event
        .description
        .as_deref()
        .unwrap_or("No description provided.");
    let deadline = event
        .deadline
        .map(|deadline| deadline.format("%-d %B %Y").to_string());

    let html_body = template.render(context! {
        assignee_name => event.assignee_name,
        assigned_by_name => event.assigned_by_name,
        title => event.title,
        description => description,
        priority => event.priority.as_str(),
        deadline => deadline,
    })?;

    Ok(EmailMessage {
        to: event.assignee_email.clone(),
        subject: format!("New task assigned: {}", event.title),
        html_body,
    })
}
