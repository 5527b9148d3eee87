use serde::Serialize;

use crate::models::Course;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_courses: usize,
    /// Budget: every course that has not been cancelled.
    pub expected_total_cost: f64,
    pub actual_total_cost: f64,
    pub expected_total_hours: f64,
    pub actual_total_hours: f64,
    pub avg_satisfaction: f64,
    pub completion_rate: f64,
    pub opening_rate: f64,
    pub participation_rate: f64,
}

impl DashboardStats {
    pub fn compute(courses: &[Course]) -> Self {
        let active: Vec<&Course> = courses.iter().filter(|c| !c.is_cancelled()).collect();
        let completed: Vec<&Course> = courses.iter().filter(|c| c.is_completed()).collect();

        let rated: Vec<f64> = completed
            .iter()
            .map(|c| c.satisfaction)
            .filter(|s| *s > 0.0)
            .collect();
        let avg_satisfaction = if rated.is_empty() {
            0.0
        } else {
            round_to(rated.iter().sum::<f64>() / rated.len() as f64, 2)
        };

        let expected_attendees: u64 = completed.iter().map(|c| u64::from(c.expected_attendees)).sum();
        let actual_attendees: u64 = completed.iter().map(|c| u64::from(c.actual_attendees)).sum();

        Self {
            total_courses: courses.len(),
            expected_total_cost: active.iter().map(|c| c.cost).sum(),
            actual_total_cost: completed.iter().map(|c| c.cost).sum(),
            expected_total_hours: active.iter().map(|c| c.duration).sum(),
            actual_total_hours: completed.iter().map(|c| c.duration).sum(),
            avg_satisfaction,
            completion_rate: percent(completed.len() as f64, active.len() as f64),
            opening_rate: percent(active.len() as f64, courses.len() as f64),
            participation_rate: percent(actual_attendees as f64, expected_attendees as f64),
        }
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round_to(part / whole * 100.0, 1)
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
