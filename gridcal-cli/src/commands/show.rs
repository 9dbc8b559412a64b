use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::context::AppContext;

/// Details view for one record.
pub async fn run(ctx: &AppContext, id: &str, open_link: bool) -> Result<()> {
    let controller = ctx.controller().await?;
    let event = controller.event(id)?;

    println!("{}", event.title.bold());
    println!("  {} {}", "kind:".dimmed(), event.kind);
    println!("  {} {}", "date:".dimmed(), event.date);
    if !event.description.is_empty() {
        println!("  {} {}", "notes:".dimmed(), event.description);
    }
    if let Some(link) = &event.meeting_link {
        println!("  {} {}", "link:".dimmed(), link.underline());
    }

    if open_link {
        let link = event
            .meeting_link
            .as_deref()
            .with_context(|| format!("\"{}\" has no meeting link", event.title))?;
        open::that(link).with_context(|| format!("Could not open {}", link))?;
    }

    Ok(())
}
