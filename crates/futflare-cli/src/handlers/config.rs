use anyhow::Result;
use futflare_runtime::{Config, Error};

use crate::commands::Context;
use crate::types::OutputFormat;

pub fn show(ctx: &Context) -> Result<()> {
    let redacted = ctx.config.redacted();
    match ctx.format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "path": ctx.config_path.display().to_string(),
                "exists": ctx.config_path.exists(),
                "config": redacted,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => {
            println!("# {}", ctx.config_path.display());
            print!("{}", toml::to_string_pretty(&redacted)?);
        }
    }
    Ok(())
}

pub fn init(ctx: &Context, force: bool) -> Result<()> {
    let path = &ctx.config_path;
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    Config::default().save_to(path)?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "path": path.display().to_string(), "written": true })
        ),
        OutputFormat::Plain => println!("Wrote default configuration to {}", path.display()),
    }
    Ok(())
}
