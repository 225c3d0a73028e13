// Canonical data model shared by the catalog, the booking stores and the service layer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// Destination category. Known values get their own variant, anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Beaches,
    Mountains,
    Historical,
    Nature,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Beaches => "Beaches",
            Category::Mountains => "Mountains",
            Category::Historical => "Historical",
            Category::Nature => "Nature",
            Category::Other(name) => name,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Beaches" => Category::Beaches,
            "Mountains" => Category::Mountains,
            "Historical" => Category::Historical,
            "Nature" => Category::Nature,
            _ => Category::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub category: Category,
    #[serde(default)]
    pub popular_foods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub destination_id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

// A tour package. `itinerary` holds one "Day N: ..." entry per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub destination_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub places_covered: Vec<String>,
    pub duration_days: u32,
    #[serde(default)]
    pub itinerary: Vec<String>,
    pub cost: u64,
    pub image_url: String,
}

impl Package {
    // Last day of a trip on this package starting at `start`
    pub fn end_date(&self, start: NaiveDate) -> NaiveDate {
        crate::travel_dates::end_date(start, self.duration_days)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub id: String,
    pub destination_id: String,
    pub name: String,
    pub contact: String,
    #[serde(rename = "experience")]
    pub experience_years: u32,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    pub rating: f32,
    pub price_per_day: u64,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown booking status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

// Case-insensitive, so "confirmed" and "CONFIRMED" both parse
impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "canceled" | "cancelled" => Ok(BookingStatus::Canceled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

// Travel dates are stored as `YYYY-MM-DD`, but rows written by the web storefront
// carry full timestamps such as `2024-06-01T00:00:00.000Z`. Both read as the date part.
pub fn parse_travel_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    match raw.trim().parse::<NaiveDate>() {
        Ok(date) => Ok(date),
        Err(_) => DateTime::parse_from_rfc3339(raw.trim()).map(|ts| ts.date_naive()),
    }
}

fn deserialize_travel_dates<'de, D>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer)?
        .iter()
        .map(|raw| {
            parse_travel_date(raw)
                .map_err(|e| de::Error::custom(format!("invalid travel date {raw:?}: {e}")))
        })
        .collect()
}

// An empty guide id means "no guide"
fn deserialize_guide_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|id| !id.trim().is_empty()))
}

// Input to a store's create operation. Identity and creation time are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub user_id: String,
    pub package_id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_guide_id"
    )]
    pub guide_id: Option<String>,
    #[serde(deserialize_with = "deserialize_travel_dates")]
    pub travel_dates: Vec<NaiveDate>,
    #[serde(rename = "booking_status")]
    pub status: BookingStatus,
    pub total_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub package_id: String,
    #[serde(default, deserialize_with = "deserialize_guide_id")]
    pub guide_id: Option<String>,
    #[serde(deserialize_with = "deserialize_travel_dates")]
    pub travel_dates: Vec<NaiveDate>,
    #[serde(rename = "booking_status")]
    pub status: BookingStatus,
    pub total_cost: u64,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_new(id: String, created_at: DateTime<Utc>, new: NewBooking) -> Self {
        Self {
            id,
            user_id: new.user_id,
            package_id: new.package_id,
            guide_id: new.guide_id,
            travel_dates: new.travel_dates,
            status: new.status,
            total_cost: new.total_cost,
            created_at,
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.travel_dates.first().copied()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.travel_dates.last().copied()
    }

    pub fn trip_length(&self) -> usize {
        self.travel_dates.len()
    }
}
