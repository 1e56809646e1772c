//! Configuration management commands.

use anyhow::{bail, Result};
use console::Term;
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    let engine = &ctx.config.engine;
    ctx.output.info("[engine]");
    ctx.output.kv("bin_count", &engine.bin_count.to_string());
    ctx.output.kv("domain_step", &engine.domain_step.to_string());
    ctx.output.kv("weekly_min_nights", &engine.weekly_min_nights.to_string());
    ctx.output.kv("monthly_min_nights", &engine.monthly_min_nights.to_string());

    ctx.output.info("[source]");
    let path = ctx.config.source.path.as_deref().unwrap_or("(not set)");
    ctx.output.kv("path", path);
    ctx.output.kv("require_auth", &ctx.config.source.require_auth.to_string());

    ctx.output.info("[session]");
    ctx.output.kv("token_env", &ctx.config.session.token_env);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        let interactive = !ctx.output.is_json() && Term::stdout().is_term();
        let overwrite = interactive
            && Confirm::new()
                .with_prompt(format!("{} exists. Overwrite?", config_path.display()))
                .default(false)
                .interact()?;
        if !overwrite {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }
    }

    std::fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.engine.validate() {
        errors.push(e.to_string());
    }

    match ctx.config.source.path.as_deref() {
        None => warnings.push("source.path is not set; pass --stays to each command".to_string()),
        Some(path) if !ctx.resolve_path(path).exists() => {
            warnings.push(format!("source.path '{}' does not exist", path));
        }
        Some(_) => {}
    }

    if ctx.config.session.token_env.trim().is_empty() {
        errors.push("session.token_env must not be empty".to_string());
    } else if ctx.config.source.require_auth
        && std::env::var(&ctx.config.session.token_env).is_err()
    {
        warnings.push(format!(
            "source.require_auth is set but {} is not in the environment",
            ctx.config.session.token_env
        ));
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
