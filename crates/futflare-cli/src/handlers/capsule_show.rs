use anyhow::Result;
use chrono::Utc;
use futflare_runtime::Error;

use crate::commands::Context;
use crate::presentation;
use crate::types::OutputFormat;

pub async fn handle(ctx: &Context, id: &str) -> Result<()> {
    let client = ctx.client()?;
    let capsule = client.capsule(id).await.map_err(Error::from)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&capsule)?),
        OutputFormat::Plain => print!("{}", presentation::render_capsule(&capsule, Utc::now(), ctx.color)),
    }
    Ok(())
}
