use anyhow::{Context, Result};
use dialoguer::Input;
use gridcal_core::auth::{LoginGate, MemberDirectory, NoDirectory};
use gridcal_core::error::GridcalError;
use owo_colors::OwoColorize;

use crate::context::AppContext;
use crate::utils::tui::create_spinner;

pub async fn run(ctx: &AppContext, member: Option<String>) -> Result<()> {
    let gate = LoginGate::new(&ctx.store, &ctx.config.auth, NoDirectory);
    if let Some(existing) = gate.current_member()? {
        println!("Already logged in as {}", existing.bold());
        return Ok(());
    }

    let member = match member {
        Some(m) => m,
        None => Input::<String>::new()
            .with_prompt("  Team member")
            .interact_text()?,
    };

    // Only the admin account has a password
    let password = if gate.is_admin(member.trim()) {
        rpassword::prompt_password("  Password: ").context("Failed to read password")?
    } else {
        String::new()
    };

    let result = match &ctx.backend {
        Some(backend) => {
            let spinner = create_spinner("Checking team member".to_string());
            let result = login_with(ctx, backend.clone(), &member, &password).await;
            spinner.finish_and_clear();
            result
        }
        None => login_with(ctx, NoDirectory, &member, &password).await,
    };

    match result {
        Ok(name) => {
            println!("{}", format!("Logged in as {}", name).green());
            Ok(())
        }
        Err(GridcalError::TeamMemberNotFound(name)) => anyhow::bail!(
            "Team member not found: {}\nThe team member name does not exist in the system.",
            name
        ),
        Err(GridcalError::NoBackendConfigured) => anyhow::bail!(
            "No backend configured, only the admin account can log in.\n\
            Add a [backend] section to {}",
            gridcal_core::config::GridcalConfig::config_path()?.display()
        ),
        Err(e) => anyhow::bail!("Login failed: {}", e.describe()),
    }
}

async fn login_with<D: MemberDirectory>(
    ctx: &AppContext,
    directory: D,
    member: &str,
    password: &str,
) -> Result<String, GridcalError> {
    LoginGate::new(&ctx.store, &ctx.config.auth, directory)
        .login(member, password)
        .await
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    LoginGate::new(&ctx.store, &ctx.config.auth, NoDirectory).logout()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match LoginGate::new(&ctx.store, &ctx.config.auth, NoDirectory).current_member()? {
        Some(member) => println!("{}", member),
        None => println!("{}", "Not logged in".dimmed()),
    }
    Ok(())
}
