use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Input, Select};
use gridcal_core::date::parse_date;
use gridcal_core::error::GridcalError;
use gridcal_core::event::{EventDraft, EventKind};
use owo_colors::OwoColorize;

use crate::context::{AppContext, Reported};

/// Fields given on the command line; anything missing is prompted for.
pub struct AddArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub kind: Option<EventKind>,
    pub link: Option<String>,
}

pub async fn run(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let mut controller = ctx.controller().await?;
    let interactive = args.title.is_none() || args.date.is_none();

    // --- Date ---
    let date = match args.date {
        Some(d) => parse_day(&d)?,
        None => prompt_with_retry("  Date", parse_day)?,
    };
    controller.select_date(date);

    // --- Title ---
    let title = match args.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt(format!("  Title ({})", date.format("%a %b %-d")))
            .interact_text()?,
    };

    // --- Kind ---
    let kind = match args.kind {
        Some(k) => k,
        None if interactive => {
            let items: Vec<&str> = EventKind::ALL.iter().map(|k| k.label()).collect();
            let selection = Select::new()
                .with_prompt("  Kind")
                .items(&items)
                .default(0)
                .interact()?;
            EventKind::ALL[selection]
        }
        None => EventKind::Event,
    };

    // --- Description ---
    let description = match args.description {
        Some(d) => d,
        None if interactive => Input::new()
            .with_prompt("  Notes (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?,
        None => String::new(),
    };

    // --- Meeting link ---
    let meeting_link = match args.link {
        Some(l) => Some(l),
        None if interactive && kind == EventKind::Appointment => {
            let link: String = Input::new()
                .with_prompt("  Meeting link (skip)")
                .default(String::new())
                .show_default(false)
                .interact_text()?;
            Some(link)
        }
        None => None,
    };

    let draft = EventDraft {
        title,
        description,
        kind,
        meeting_link,
    };

    if interactive {
        println!();
    }
    // Success and save failures are reported by the controller's notifier
    match controller.add_event(draft).await {
        Ok(stored) => {
            println!("  {}", stored.id.dimmed());
            Ok(())
        }
        Err(GridcalError::Validation(message)) => anyhow::bail!(message),
        Err(_) => Err(Reported.into()),
    }
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<F>(prompt: &str, parse: F) -> Result<NaiveDate>
where
    F: Fn(&str) -> Result<NaiveDate>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Parse `YYYY-MM-DD`, falling back to natural language ("tomorrow", "fri").
fn parse_day(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = parse_date(input) {
        return Ok(date);
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(dt.date())
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    lower_words(input)
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| full.to_string())
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn lower_words(input: &str) -> impl Iterator<Item = String> + '_ {
    input.split_whitespace().map(str::to_lowercase)
}
