//! Transcript CLI commands: show and clear a session's history.

use anyhow::Result;
use console::style;
use dialoguer::Confirm;

use cinechat_core::chat::repository::ConversationRepository;
use cinechat_types::llm::MessageRole;
use cinechat_types::session::SessionId;

use crate::state::AppState;

/// Print the stored transcript for a session.
///
/// Reads the log as stored; a session that has never spoken shows nothing
/// rather than being seeded with the system prompt.
///
/// # Examples
///
/// ```bash
/// cinechat history 0198c5b2-7d41-7e32-a0f3-1b2c3d4e5f60
/// cinechat history 0198c5b2-7d41-7e32-a0f3-1b2c3d4e5f60 --json
/// ```
pub async fn show_history(state: &AppState, session_id: &str, json: bool) -> Result<()> {
    let session = SessionId::new(session_id);

    let messages = state.turn_service.store().repo().list(&session).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages stored for session '{}'.",
            style("i").blue().bold(),
            style(session_id).cyan()
        );
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  Transcript for session '{}'",
        style(session_id).cyan().bold()
    );
    println!();

    for msg in &messages {
        let role_label = match msg.role {
            MessageRole::User => style("you").cyan().bold(),
            MessageRole::Assistant => style("assistant").green().bold(),
            MessageRole::System => style("system").dim().bold(),
        };

        let timestamp = msg.created_at.format("%Y-%m-%d %H:%M");
        println!("  {} {}", role_label, style(format!("({timestamp})")).dim());
        println!("  {}", msg.content);
        println!();
    }

    println!(
        "  {} message{}",
        style(messages.len()).bold(),
        if messages.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Delete all messages for a session, with confirmation.
///
/// # Examples
///
/// ```bash
/// cinechat clear 0198c5b2-7d41-7e32-a0f3-1b2c3d4e5f60
/// cinechat clear 0198c5b2-7d41-7e32-a0f3-1b2c3d4e5f60 --force
/// ```
pub async fn clear_history(
    state: &AppState,
    session_id: &str,
    force: bool,
    json: bool,
) -> Result<()> {
    let session = SessionId::new(session_id);

    let count = state.turn_service.store().repo().count(&session).await?;

    if count == 0 {
        if json {
            println!(
                "{}",
                serde_json::json!({"cleared": true, "session_id": session_id, "messages_deleted": 0})
            );
        } else {
            println!(
                "  {} No messages stored for session '{}'.",
                style("i").blue().bold(),
                style(session_id).cyan()
            );
        }
        return Ok(());
    }

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete {} message{} for session '{}'?",
                count,
                if count == 1 { "" } else { "s" },
                style(session_id).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.turn_service.store().repo().clear(&session).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"cleared": true, "session_id": session_id, "messages_deleted": count})
        );
    } else {
        println!(
            "  {} Cleared {} message{} for session '{}'.",
            style("x").red().bold(),
            count,
            if count == 1 { "" } else { "s" },
            session_id
        );
    }

    Ok(())
}
