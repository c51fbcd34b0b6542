//! Stored waifu records and the dashboard view derived from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{OwnerId, WaifuId};
use crate::birthday::{BirthdayStatus, days_until_birthday};

/// A waifu saved to an owner's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaifuRecord {
    pub id: WaifuId,
    pub owner_id: OwnerId,
    pub name: String,
    pub image_url: Option<String>,
    pub about: Option<String>,
    /// Birthday month, `1..=12` when known.
    pub birthday_month: Option<u32>,
    /// Birthday day of month, `1..=31` when known.
    pub birthday_day: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// A record about to be stored; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWaifu {
    pub owner_id: OwnerId,
    pub name: String,
    pub image_url: Option<String>,
    pub about: Option<String>,
    pub birthday_month: Option<u32>,
    pub birthday_day: Option<u32>,
}

/// One row of the birthday dashboard. Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardEntry {
    pub id: WaifuId,
    pub name: String,
    pub image: Option<String>,
    /// Days until the next birthday, or 999 when unknown.
    pub days_until: i64,
    pub status: BirthdayStatus,
}

impl DashboardEntry {
    /// Compute the countdown for a record as seen on `today`.
    #[must_use]
    pub fn from_record(record: &WaifuRecord, today: NaiveDate) -> Self {
        let days_until = days_until_birthday(record.birthday_month, record.birthday_day, today);

        Self {
            id: record.id,
            name: record.name.clone(),
            image: record.image_url.clone(),
            days_until,
            status: BirthdayStatus::from_days(days_until),
        }
    }
}

/// Build the dashboard for a set of records, soonest birthday first.
///
/// The sort is stable, so records with the same countdown keep store order,
/// and unknown birthdays (999) always land at the end.
#[must_use]
pub fn build_dashboard(records: &[WaifuRecord], today: NaiveDate) -> Vec<DashboardEntry> {
    let mut entries: Vec<DashboardEntry> = records
        .iter()
        .map(|record| DashboardEntry::from_record(record, today))
        .collect();
    entries.sort_by_key(|entry| entry.days_until);
    entries
}
