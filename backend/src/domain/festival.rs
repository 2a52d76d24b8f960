//! Festival reference data and month grouping for calendar views.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Region label for festivals celebrated nationwide.
pub const PAN_INDIA_REGION: &str = "Pan India";

/// Calendar month.
///
/// Declaration order is the canonical display order, so the derived `Ord`
/// sorts January first and December last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in display order.
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// English month name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Zero-based position in the calendar year.
    pub fn sort_order(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for month names outside the twelve calendar months.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised month name: {0}")]
pub struct UnknownMonth(pub String);

impl FromStr for Month {
    type Err = UnknownMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|month| month.as_str() == s)
            .ok_or_else(|| UnknownMonth(s.to_owned()))
    }
}

/// A festival entry in the reference calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Festival {
    pub name: String,
    pub month: Month,
    pub date: NaiveDate,
    pub region: String,
    pub year: i32,
}

/// Query over the festival reference set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FestivalFilter {
    /// Calendar year to load.
    pub year: i32,
    /// Restrict to these regions; `None` keeps every region.
    pub regions: Option<Vec<String>>,
}

impl FestivalFilter {
    /// Every festival in `year`.
    pub fn year(year: i32) -> Self {
        Self {
            year,
            regions: None,
        }
    }

    /// Festivals in `year` for `region` plus those celebrated nationwide.
    pub fn regional(year: i32, region: &str) -> Self {
        Self {
            year,
            regions: Some(vec![region.to_owned(), PAN_INDIA_REGION.to_owned()]),
        }
    }

    /// Check a festival against this filter.
    pub fn matches(&self, festival: &Festival) -> bool {
        festival.year == self.year
            && self
                .regions
                .as_ref()
                .is_none_or(|regions| regions.iter().any(|r| r == &festival.region))
    }
}

/// Festivals falling in one month, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FestivalMonthGroup {
    pub month: Month,
    pub festivals: Vec<Festival>,
    pub sort_order: u8,
}

/// Group festivals by month and order the groups January to December.
///
/// Months without festivals are omitted. Within a group festivals keep
/// their input order, so callers that want a date order sort first.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use heritage::domain::{group_by_month, Festival, Month};
///
/// let festival = |name: &str, month, day| Festival {
///     name: name.into(),
///     month,
///     date: NaiveDate::from_ymd_opt(2025, month as u32 + 1, day).unwrap(),
///     region: "Pan India".into(),
///     year: 2025,
/// };
/// let groups = group_by_month(vec![
///     festival("Diwali", Month::October, 20),
///     festival("Makar Sankranti", Month::January, 14),
/// ]);
/// let months: Vec<_> = groups.iter().map(|g| g.month).collect();
/// assert_eq!(months, [Month::January, Month::October]);
/// ```
pub fn group_by_month(festivals: impl IntoIterator<Item = Festival>) -> Vec<FestivalMonthGroup> {
    let mut by_month: BTreeMap<Month, Vec<Festival>> = BTreeMap::new();
    for festival in festivals {
        by_month.entry(festival.month).or_default().push(festival);
    }
    by_month
        .into_iter()
        .map(|(month, festivals)| FestivalMonthGroup {
            month,
            festivals,
            sort_order: month.sort_order(),
        })
        .collect()
}
