use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use docket_core::dates::parse_date;
use docket_core::projection::{self, ArchiveQuery, UpcomingQuery};
use docket_core::{ContentRecord, RecordStorage};
use tracing::{info, warn};
use crate::views;

/// The fields of the create and edit forms.
#[derive(Args, Debug, Default, Clone)]
pub struct RecordFields {
    #[arg(long)]
    pub file_name: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Publication date, e.g. 2026-01-17
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub duration: Option<String>,
    #[arg(long)]
    pub youtube: Option<String>,
    #[arg(long)]
    pub tiktok: Option<String>,
    #[arg(long = "x")]
    pub x_com: Option<String>,
    /// Primary, Short (landscape), Short (portrait), or any other label
    #[arg(long = "type")]
    pub content_type: Option<String>,
    #[arg(long)]
    pub case: Option<String>,
    #[arg(long)]
    pub docket: Option<String>,
}

impl RecordFields {
    /// Overwrite the fields that were given, leave the rest as they are.
    pub fn apply_to(self, record: &mut ContentRecord) {
        let updates = [
            (&mut record.file_name, self.file_name),
            (&mut record.post_title, self.title),
            (&mut record.description, self.description),
            (&mut record.publication_date, self.date),
            (&mut record.duration, self.duration),
            (&mut record.youtube, self.youtube),
            (&mut record.tiktok, self.tiktok),
            (&mut record.x_com, self.x_com),
            (&mut record.content_type, self.content_type),
            (&mut record.case, self.case),
            (&mut record.docket_no, self.docket),
        ];
        for (field, value) in updates {
            if value.is_some() {
                *field = value;
            }
        }
    }

    /// A new record as the create form submits it: every field present,
    /// blank when not given.
    pub fn into_record(self) -> ContentRecord {
        let blank = Some(String::new());
        let mut record = ContentRecord {
            file_name: blank.clone(),
            post_title: blank.clone(),
            description: blank.clone(),
            publication_date: blank.clone(),
            duration: blank.clone(),
            youtube: blank.clone(),
            tiktok: blank.clone(),
            x_com: blank.clone(),
            content_type: blank.clone(),
            case: blank.clone(),
            docket_no: blank,
            ..Default::default()
        };
        self.apply_to(&mut record);
        record
    }
}

// Whitespace counts as filled in, as in the web form.
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().unwrap_or_default().is_empty()
}

pub async fn upcoming(storage: &dyn RecordStorage, today: NaiveDate, query: &UpcomingQuery) -> Result<String> {
    let records = storage.list_all().await.context("Failed to read contents")?;
    let view = projection::upcoming(&records, today, query);
    Ok(views::render_upcoming(&view, today))
}

pub async fn archive(storage: &dyn RecordStorage, today: NaiveDate, query: &ArchiveQuery) -> Result<String> {
    let records = storage.list_all().await.context("Failed to read contents")?;
    let types = projection::distinct_types(&records);
    let view = projection::archive(&records, today, query);
    Ok(views::render_archive(&view, &types))
}

pub async fn create(storage: &dyn RecordStorage, fields: RecordFields) -> Result<()> {
    if is_blank(&fields.title) || is_blank(&fields.date) {
        bail!("Title and Date are required");
    }
    if let Some(date) = fields.date.as_deref().filter(|d| parse_date(d).is_none()) {
        warn!("⚠️ Publication date \"{}\" is not a recognised date", date);
    }

    let record = fields.into_record();
    let title = record.post_title.clone().unwrap_or_default();
    storage.append(record).await.context("Error saving content")?;
    info!("🆕 Content \"{}\" created", title);
    Ok(())
}

pub async fn edit(storage: &dyn RecordStorage, index: i64, fields: RecordFields) -> Result<()> {
    let records = storage.list_all().await.context("Failed to read contents")?;
    let mut record = usize::try_from(index)
        .ok()
        .and_then(|i| records.get(i))
        .cloned()
        .with_context(|| format!("No content at position {}", index))?;

    fields.apply_to(&mut record);
    if is_blank(&record.post_title) || is_blank(&record.publication_date) {
        bail!("Title and Date are required");
    }

    storage
        .replace_at(index, record)
        .await
        .context("Error updating content")?;
    info!("📝 Content at {} updated", index);
    Ok(())
}

pub async fn delete(storage: &dyn RecordStorage, index: i64) -> Result<()> {
    storage.remove_at(index).await.context("Error deleting content")?;
    info!("🗑️ Content at {} deleted", index);
    Ok(())
}
