use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::context::AppContext;
use crate::render::{Render, pluralize};

pub async fn run(ctx: &AppContext, date: NaiveDate) -> Result<()> {
    let controller = ctx.controller().await?;
    let events = controller.events_for(date);

    println!("{}", date.format("%A, %B %-d, %Y").bold());

    if events.is_empty() {
        println!("{}", "  Nothing scheduled".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("  {}  {}", event.render(), event.id.dimmed());
    }
    println!(
        "{}",
        format!("  {} {}", events.len(), pluralize("item", events.len())).dimmed()
    );

    Ok(())
}
