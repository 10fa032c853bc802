//! Dashboard views over persisted matches. Everything here is pure: rows in,
//! filtered and sorted rows (or stats) out.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::scholarship_match::MatchWithScholarship;
use crate::models::UnknownVariant;

pub const HIGH_MATCH_SCORE: i32 = 90;
const MAX_WINDOW_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    MatchScore,
    Amount,
    Deadline,
}

impl FromStr for SortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matchScore" => Ok(SortKey::MatchScore),
            "amount" => Ok(SortKey::Amount),
            "deadline" => Ok(SortKey::Deadline),
            other => Err(UnknownVariant {
                kind: "sort key",
                value: other.to_string(),
            }),
        }
    }
}

/// Query string of `GET /api/matches/:id/dashboard`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub scholarship_type: Option<String>,
    pub min_amount: Option<u64>,
    pub due_within_days: Option<i64>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFilter {
    pub scholarship_type: Option<String>,
    pub min_amount: Option<u64>,
    pub due_within_days: Option<i64>,
}

impl ViewFilter {
    fn keeps(&self, row: &MatchWithScholarship, today: NaiveDate) -> bool {
        let s = &row.scholarship;
        if let Some(t) = &self.scholarship_type {
            if &s.scholarship_type != t {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if parse_amount(&s.amount).unwrap_or(0) < min {
                return false;
            }
        }
        if let Some(days) = self.due_within_days {
            let window_end = today + Duration::days(days.clamp(0, MAX_WINDOW_DAYS));
            match parse_deadline(&s.deadline) {
                Some(d) if d >= today && d <= window_end => {}
                _ => return false,
            }
        }
        true
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_matches: usize,
    pub high_match: usize,
    pub due_this_month: usize,
    pub total_value: String,
}

/// Numeric value of a free-text amount: the first run of digits, with
/// digit-group commas allowed. "$15,000" → 15000, "₹16,50,000" → 1650000.
pub fn parse_amount(amount: &str) -> Option<u64> {
    let start = amount.find(|c: char| c.is_ascii_digit())?;
    let mut value: u64 = 0;
    for c in amount[start..].chars() {
        match c {
            '0'..='9' => {
                value = value
                    .saturating_mul(10)
                    .saturating_add(u64::from(c as u8 - b'0'));
            }
            ',' => {}
            _ => break,
        }
    }
    Some(value)
}

pub fn parse_deadline(deadline: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(deadline.trim(), "%Y-%m-%d").ok()
}

/// Filters then sorts. Ties keep their incoming order.
pub fn apply_view(
    rows: Vec<MatchWithScholarship>,
    filter: &ViewFilter,
    sort: SortKey,
    today: NaiveDate,
) -> Vec<MatchWithScholarship> {
    let mut rows: Vec<_> = rows.into_iter().filter(|r| filter.keeps(r, today)).collect();
    match sort {
        SortKey::MatchScore => rows.sort_by(|a, b| b.record.match_score.cmp(&a.record.match_score)),
        SortKey::Amount => rows.sort_by(|a, b| {
            let a = parse_amount(&a.scholarship.amount).unwrap_or(0);
            let b = parse_amount(&b.scholarship.amount).unwrap_or(0);
            b.cmp(&a)
        }),
        SortKey::Deadline => rows.sort_by(|a, b| {
            match (
                parse_deadline(&a.scholarship.deadline),
                parse_deadline(&b.scholarship.deadline),
            ) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
    }
    rows
}

pub fn compute_stats(rows: &[MatchWithScholarship], today: NaiveDate) -> DashboardStats {
    let month_end = end_of_month(today);
    let total: u64 = rows
        .iter()
        .map(|r| parse_amount(&r.scholarship.amount).unwrap_or(0))
        .fold(0u64, u64::saturating_add);

    DashboardStats {
        total_matches: rows.len(),
        high_match: rows
            .iter()
            .filter(|r| r.record.match_score >= HIGH_MATCH_SCORE)
            .count(),
        due_this_month: rows
            .iter()
            .filter_map(|r| parse_deadline(&r.scholarship.deadline))
            .filter(|d| *d >= today && *d <= month_end)
            .count(),
        total_value: format!("${}K", total.saturating_add(500) / 1000),
    }
}

fn end_of_month(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(day)
}
