use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourseStatus {
    #[default]
    Planned,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CreatedBy {
    #[default]
    #[serde(rename = "HR")]
    Hr,
    User,
}

/// One training course. Field names follow the camelCase layout the local
/// slot and the spreadsheet webhook both use.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub company: String,
    pub department: String,
    pub objective: String,
    pub start_date: String,
    pub end_date: String,
    pub time: String,
    pub duration: f64,
    pub expected_attendees: u32,
    pub actual_attendees: u32,
    pub instructor: String,
    pub instructor_org: String,
    pub cost: f64,
    pub satisfaction: f64,
    pub status: CourseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub created_by: CreatedBy,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

impl Course {
    pub fn is_cancelled(&self) -> bool {
        self.status == CourseStatus::Cancelled
    }

    pub fn is_completed(&self) -> bool {
        self.status == CourseStatus::Completed
    }

    /// Form-level rules for a course submitted through the API. Drops a
    /// cancellation reason left over on a course that is no longer cancelled.
    pub fn validate(mut self) -> Result<Self, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name is required".to_string()));
        }
        if self.company.trim().is_empty() {
            return Err(AppError::BadRequest("company is required".to_string()));
        }

        let start = parse_date("startDate", &self.start_date)?;
        if !self.end_date.is_empty() {
            let end = parse_date("endDate", &self.end_date)?;
            if end < start {
                return Err(AppError::BadRequest(format!(
                    "endDate {} is before startDate {}",
                    self.end_date, self.start_date
                )));
            }
        }

        check_amount("duration", self.duration)?;
        check_amount("cost", self.cost)?;
        if self.satisfaction != 0.0 && !(1.0..=5.0).contains(&self.satisfaction) {
            return Err(AppError::BadRequest(format!(
                "satisfaction must be 0 or between 1 and 5, got {}",
                self.satisfaction
            )));
        }

        if self.is_cancelled() {
            let has_reason = self
                .cancellation_reason
                .as_deref()
                .is_some_and(|r| !r.trim().is_empty());
            if !has_reason {
                return Err(AppError::BadRequest(
                    "cancellationReason is required for a cancelled course".to_string(),
                ));
            }
        } else {
            self.cancellation_reason = None;
        }

        Ok(self)
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| AppError::BadRequest(format!("{} must be YYYY-MM-DD, got '{}'", field, value)))
}

fn check_amount(field: &str, value: f64) -> Result<(), AppError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("{} must be a non-negative number, got {}", field, value)))
    }
}
