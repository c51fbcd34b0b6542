//! Owner collections: add, dashboard, reminders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use waifu_tracker_core::birthday::{BirthdayParts, extract_birthday, reminder_message};
use waifu_tracker_core::{DashboardEntry, NewWaifu, OwnerId, WaifuRecord, build_dashboard};

use crate::db::WaifuStore;
use crate::error::{AppError, Result};

/// Fields accepted when adding a waifu.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddWaifu {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    /// Month typed in by the user. Zero means "not given".
    #[serde(default)]
    pub manual_month: Option<u32>,
    /// Day typed in by the user. Zero means "not given".
    #[serde(default)]
    pub manual_day: Option<u32>,
}

/// Result of an add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A record with the same name already belongs to the owner; nothing was stored.
    AlreadyExists { name: String },
    /// A new record was stored.
    Saved(WaifuRecord),
}

impl AddOutcome {
    /// Message shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AlreadyExists { name } => format!("{name} is already in your list!"),
            Self::Saved(record) => match (record.birthday_month, record.birthday_day) {
                (Some(month), Some(day)) => {
                    format!("Saved {}! (Birthday: {month}/{day}) 🎉", record.name)
                }
                _ => format!("Saved {}! (Date set to Unknown)", record.name),
            },
        }
    }
}

/// A dashboard entry whose birthday is today or tomorrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderEntry {
    #[serde(flatten)]
    pub entry: DashboardEntry,
    pub message: String,
}

fn given(value: Option<u32>) -> Option<u32> {
    value.filter(|&v| v != 0)
}

/// Decide which birthday to store.
///
/// A manual month and day, both given, take priority. Otherwise the birthday
/// is extracted from the biography, keeping only storable parts.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if a given manual month is outside `1..=12`
/// or a given manual day is outside `1..=31`.
pub fn resolve_birthday(
    manual_month: Option<u32>,
    manual_day: Option<u32>,
    about: Option<&str>,
) -> Result<BirthdayParts> {
    let (month, day) = (given(manual_month), given(manual_day));

    if month.is_some_and(|m| m > 12) {
        return Err(AppError::BadRequest(
            "manual_month must be between 1 and 12".to_string(),
        ));
    }
    if day.is_some_and(|d| d > 31) {
        return Err(AppError::BadRequest(
            "manual_day must be between 1 and 31".to_string(),
        ));
    }

    let manual = BirthdayParts { month, day };
    if manual.is_complete() {
        return Ok(manual);
    }

    Ok(extract_birthday(about).in_range())
}

/// Add a waifu to an owner's list unless one with the same name is already there.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a blank name or out-of-range manual birthday.
/// Returns `AppError::Database` if the store fails.
#[instrument(skip(store, request), fields(name = %request.name))]
pub async fn add_waifu(store: &WaifuStore, owner: &OwnerId, request: AddWaifu) -> Result<AddOutcome> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    if store.find_by_name(owner, name).await?.is_some() {
        info!("Waifu already in list");
        return Ok(AddOutcome::AlreadyExists {
            name: name.to_string(),
        });
    }

    let birthday = resolve_birthday(
        request.manual_month,
        request.manual_day,
        request.about.as_deref(),
    )?;

    let record = store
        .create(NewWaifu {
            owner_id: owner.clone(),
            name: name.to_string(),
            image_url: request.image,
            about: request.about,
            birthday_month: birthday.month,
            birthday_day: birthday.day,
        })
        .await?;

    info!(
        waifu_id = %record.id,
        birthday_month = ?record.birthday_month,
        birthday_day = ?record.birthday_day,
        "Waifu saved"
    );

    Ok(AddOutcome::Saved(record))
}

/// The owner's dashboard as seen on `today`.
///
/// # Errors
///
/// Returns `AppError::Database` if the store fails.
pub async fn dashboard(store: &WaifuStore, owner: &OwnerId, today: NaiveDate) -> Result<Vec<DashboardEntry>> {
    let records = store.list_by_owner(owner).await?;
    Ok(build_dashboard(&records, today))
}

/// Dashboard entries with a birthday today or tomorrow.
///
/// # Errors
///
/// Returns `AppError::Database` if the store fails.
pub async fn reminders(store: &WaifuStore, owner: &OwnerId, today: NaiveDate) -> Result<Vec<ReminderEntry>> {
    let entries = dashboard(store, owner, today).await?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            reminder_message(&entry.name, entry.days_until)
                .map(|message| ReminderEntry { entry, message })
        })
        .collect())
}
