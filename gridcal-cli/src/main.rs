mod commands;
mod context;
mod render;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gridcal_core::date;
use gridcal_core::event::EventKind;
use gridcal_core::month::MonthCursor;
use owo_colors::OwoColorize;

use crate::commands::add::AddArgs;
use crate::context::{AppContext, Reported};

#[derive(Parser)]
#[command(name = "gridcal")]
#[command(about = "Month calendar for events, tasks and appointments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid (defaults to the current month)
    Month {
        /// Month to show (YYYY-MM)
        month: Option<MonthCursor>,

        /// Go back this many months
        #[arg(long, default_value_t = 0, conflicts_with = "next")]
        prev: u32,

        /// Go forward this many months
        #[arg(long, default_value_t = 0)]
        next: u32,
    },
    /// List everything on one day
    Day {
        /// Date (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },
    /// Show one record
    Show {
        id: String,

        /// Open the meeting link in the browser
        #[arg(long)]
        open: bool,
    },
    /// Create an event, task or appointment
    Add {
        title: Option<String>,

        /// Date (YYYY-MM-DD, or e.g. "tomorrow", "fri")
        #[arg(short, long)]
        date: Option<String>,

        #[arg(short = 'n', long)]
        description: Option<String>,

        /// event, task or appointment
        #[arg(short, long)]
        kind: Option<EventKind>,

        /// Meeting link for appointments
        #[arg(short, long)]
        link: Option<String>,
    },
    /// Log in as a team member
    Login { member: Option<String> },
    Logout,
    /// Print the logged-in team member
    Whoami,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is::<Reported>() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::load()?;

    match cli.command {
        Commands::Month { month, prev, next } => {
            let offset = commands::month::offset(prev, next);
            commands::month::run(&ctx, month, offset).await
        }
        Commands::Day { date } => {
            let date = match date {
                Some(d) => date::parse_date(&d)?,
                None => date::today(),
            };
            commands::day::run(&ctx, date).await
        }
        Commands::Show { id, open } => commands::show::run(&ctx, &id, open).await,
        Commands::Add {
            title,
            date,
            description,
            kind,
            link,
        } => {
            let args = AddArgs {
                title,
                date,
                description,
                kind,
                link,
            };
            commands::add::run(&ctx, args).await
        }
        Commands::Login { member } => commands::login::run(&ctx, member).await,
        Commands::Logout => commands::login::logout(&ctx),
        Commands::Whoami => commands::login::whoami(&ctx),
    }
}
