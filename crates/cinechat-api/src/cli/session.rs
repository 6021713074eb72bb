//! Session browsing CLI command.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use cinechat_core::chat::repository::ConversationRepository;

use crate::state::AppState;

/// List stored sessions with start time, last activity, and message count.
///
/// # Examples
///
/// ```bash
/// cinechat sessions
/// cinechat sessions --json
/// ```
pub async fn list_sessions(state: &AppState, json: bool) -> Result<()> {
    let sessions = state.turn_service.store().repo().list_sessions().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!(
            "  {} No sessions yet. Start the server with: {}",
            style("i").blue().bold(),
            style("cinechat serve").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Session").fg(Color::White),
        Cell::new("Started").fg(Color::White),
        Cell::new("Last active").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
    ]);

    for session in &sessions {
        let started = session.started_at.format("%Y-%m-%d %H:%M").to_string();
        let last_active = session.last_active_at.format("%Y-%m-%d %H:%M").to_string();

        table.add_row(vec![
            Cell::new(session.session_id.as_str()).fg(Color::Cyan),
            Cell::new(started).fg(Color::White),
            Cell::new(last_active).fg(Color::DarkGrey),
            Cell::new(session.message_count.to_string()).fg(Color::White),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} session{}",
        style(sessions.len()).bold(),
        if sessions.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
