//! Calendar reminder drafts for decoded medicine packs.
//!
//! A draft is an all-day event on the first day of the expiration month with
//! three reminders: an email and a popup a week ahead, and a popup a day
//! ahead, each 10 hours before midnight so they arrive during the day. The
//! draft is plain data; sending it to a calendar is up to the caller.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Value, json};

use crate::api::Context;
use crate::error::{Error, Result};
use crate::medicine::{Field, MedicineData};

pub const DEFAULT_SUMMARY: &str = "Medicine expires";
pub const DEFAULT_LOCATION: &str = "Nearest pharmacy";

const WEEK_AHEAD_MINUTES: u32 = 7 * 24 * 60 - 10 * 60;
const DAY_AHEAD_MINUTES: u32 = 24 * 60 - 10 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderMethod {
    Email,
    Popup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderOverride {
    pub method: ReminderMethod,
    /// Minutes before the event start.
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderDraft {
    pub summary: String,
    pub location: String,
    pub description: String,
    pub date: NaiveDate,
    pub reminders: Vec<ReminderOverride>,
}

impl ReminderDraft {
    /// Build a draft for `data`, resolving the expiration year against
    /// `context`.
    ///
    /// Fails with [`Error::MissingExpiration`] when there is no expiry and
    /// with [`Error::InvalidExpiration`] when the month is not `01..=12`.
    pub fn from_medicine(data: &MedicineData, context: &Context) -> Result<Self> {
        let Field::Found(exp) = &data.exp else {
            return Err(Error::MissingExpiration);
        };

        let year = exp.full_year(context);
        let date = exp
            .first_day(context)
            .ok_or_else(|| Error::InvalidExpiration { month: exp.month.clone(), year: year.clone() })?;
        let label = format!("{}/{}", exp.month, year);

        let mut lines = vec![format!("Your medicine expires {label}"), String::new()];
        if let Field::Found(pc) = &data.pc {
            lines.push(format!("PC:  {pc}"));
        }
        if let Field::Found(sn) = &data.sn {
            lines.push(format!("SN:  {sn}"));
        }
        if let Field::Found(lot) = &data.lot {
            lines.push(format!("LOT: {lot}"));
        }
        lines.push(format!("EXP: {label}"));

        Ok(ReminderDraft {
            summary: DEFAULT_SUMMARY.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            description: lines.join("\n"),
            date,
            reminders: vec![
                ReminderOverride { method: ReminderMethod::Email, minutes: WEEK_AHEAD_MINUTES },
                ReminderOverride { method: ReminderMethod::Popup, minutes: WEEK_AHEAD_MINUTES },
                ReminderOverride { method: ReminderMethod::Popup, minutes: DAY_AHEAD_MINUTES },
            ],
        })
    }

    /// The draft as a Google Calendar v3 event resource.
    pub fn to_calendar_event(&self) -> Value {
        let date = self.date.format("%Y-%m-%d").to_string();
        json!({
            "summary": self.summary,
            "location": self.location,
            "description": self.description,
            "start": { "date": date },
            "end": { "date": date },
            "reminders": {
                "useDefault": false,
                "overrides": self.reminders,
            },
        })
    }
}
