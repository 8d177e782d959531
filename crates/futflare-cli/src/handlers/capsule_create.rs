use anyhow::{Context as _, Result, bail};
use chrono::{NaiveDate, NaiveTime, Utc};
use futflare_engine::{MAX_CONTENT_ITEMS, ValidationError};
use futflare_runtime::{Composer, Error, SubmitOutcome, load_media_file};
use futflare_types::ContentKind;

use crate::commands::Context;
use crate::item_spec::ItemSpec;
use crate::types::OutputFormat;

pub struct CreateArgs {
    pub title: String,
    pub description: String,
    pub open_at: Option<NaiveDate>,
    pub participants: Vec<String>,
    pub items: Vec<ItemSpec>,
}

/// Fill the draft from the arguments. Everything here is local; nothing is
/// uploaded until the draft is known to be submittable.
pub fn prepare(composer: &mut Composer, args: &CreateArgs) -> Result<(), ValidationError> {
    let draft = composer.draft_mut();
    draft.set_title(args.title.clone());
    draft.set_description(args.description.clone());

    for email in &args.participants {
        draft.participants().check(email)?;
        draft.participants_mut().add(email);
    }

    let mut missing = Vec::new();
    if draft.title().trim().is_empty() {
        missing.push("title");
    }
    if draft.description().trim().is_empty() {
        missing.push("description");
    }
    if args.items.is_empty() {
        missing.push("content");
    }
    if !missing.is_empty() {
        return Err(ValidationError::IncompleteDraft(missing));
    }
    if args.items.len() > MAX_CONTENT_ITEMS {
        return Err(ValidationError::ContentLimit(MAX_CONTENT_ITEMS));
    }

    if let Some(date) = args.open_at {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        composer.set_scheduled_open_date(midnight)?;
    }
    Ok(())
}

async fn stage(composer: &mut Composer, item: &ItemSpec) -> Result<()> {
    let content = composer.content_mut();
    content.select_kind(item.kind());
    match item {
        ItemSpec::Message(text) => content.set_message_text(text.clone()),
        ItemSpec::Image {
            path,
            caption,
            alt_text,
        } => {
            let file = load_media_file(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            content.select_file(file).map_err(Error::from)?;
            content.set_caption(caption.clone()).map_err(Error::from)?;
            content.set_alt_text(alt_text.clone()).map_err(Error::from)?;
        }
        ItemSpec::Video { path, caption } => {
            let file = load_media_file(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            content.select_file(file).map_err(Error::from)?;
            content.set_caption(caption.clone()).map_err(Error::from)?;
        }
    }
    Ok(())
}

pub async fn handle(ctx: &Context, args: CreateArgs) -> Result<()> {
    let client = ctx.client()?;
    let mut composer = client.composer();
    prepare(&mut composer, &args).map_err(Error::from)?;

    for (index, item) in args.items.iter().enumerate() {
        stage(&mut composer, item).await?;
        composer.commit().await?;
        if item.kind() != ContentKind::Message {
            tracing::info!(index, kind = %item.kind(), "media uploaded");
        }
    }

    let submission = client.submission();
    let capsule = match composer.submit(&submission).await.map_err(Error::from)? {
        SubmitOutcome::Created(capsule) => capsule,
        SubmitOutcome::NotSubmittable(missing) => {
            return Err(Error::from(ValidationError::IncompleteDraft(missing)).into());
        }
        SubmitOutcome::AlreadyInFlight => bail!("a submission is already in progress"),
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&capsule)?),
        OutputFormat::Plain => println!(
            "Created capsule {} ({}), opens {}",
            capsule.title,
            capsule.id,
            capsule.scheduled_open_date.format("%Y-%m-%d")
        ),
    }

    let remaining = capsule.time_until_open(Utc::now());
    tracing::debug!(id = %capsule.id, ?remaining, "capsule submitted");
    Ok(())
}
