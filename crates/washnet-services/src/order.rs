//! Order records as returned by the laundry backend.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

const GRAY: &str = "#6c757d";

/// Order lifecycle state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Processing,
    Ready,
    Completed,
    Cancelled,
    /// Status the client doesn't know about, kept verbatim
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    /// Badge color for the status
    pub fn color(&self) -> &'static str {
        match self {
            Self::Pending => "#ffc107",
            Self::Processing => "#17a2b8",
            Self::Ready | Self::Completed => "#28a745",
            Self::Cancelled => "#dc3545",
            Self::Other(_) => GRAY,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "ready" => Self::Ready,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

/// What the shop does with the laundry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    #[default]
    WashDry,
    WashOnly,
    DryOnly,
    Mixed,
    Other(String),
}

impl ServiceType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::WashDry => "wash_dry",
            Self::WashOnly => "wash_only",
            Self::DryOnly => "dry_only",
            Self::Mixed => "mixed",
            Self::Other(s) => s,
        }
    }

    /// Customer-facing name. Unknown codes read as the default service.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WashDry | Self::Other(_) => "Wash & Dry",
            Self::WashOnly => "Wash Only",
            Self::DryOnly => "Dry Only",
            Self::Mixed => "Mixed",
        }
    }
}

impl From<String> for ServiceType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "wash_dry" => Self::WashDry,
            "wash_only" => Self::WashOnly,
            "dry_only" => Self::DryOnly,
            "mixed" => Self::Mixed,
            _ => Self::Other(s),
        }
    }
}

impl From<ServiceType> for String {
    fn from(service: ServiceType) -> Self {
        service.as_str().to_string()
    }
}

/// How the finished order reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Pickup,
    #[default]
    #[serde(other)]
    Deliver,
}

impl DeliveryMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pickup => "🏠 Pickup Only",
            Self::Deliver => "📦 Delivery Only",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    #[serde(deserialize_with = "quantity_from_number_or_text")]
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default, deserialize_with = "items_from_list_or_json")]
    pub items: Vec<OrderItem>,
    #[serde(deserialize_with = "amount_from_number_or_text")]
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub delivery_method: DeliveryMethod,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub pickup_date: Option<String>,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Order {
    /// Total in pesos, e.g. "₱350.00"
    pub fn total_display(&self) -> String {
        format!("₱{:.2}", self.total_amount)
    }

    /// Item badges, e.g. "Shirts (x3)"
    pub fn item_badges(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| format!("{} (x{})", item.name, item.quantity))
            .collect()
    }
}

// Laravel returns decimals as strings ("350.00"); accept plain numbers too.
fn amount_from_number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {}", s))),
    }
}

fn quantity_from_number_or_text<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Number(u32),
        Text(String),
    }

    match Quantity::deserialize(deserializer)? {
        Quantity::Number(n) => Ok(n),
        Quantity::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid quantity: {}", s))),
    }
}

// Items are stored as a JSON text column; depending on model casts the API
// sends either the decoded array or the raw string.
fn items_from_list_or_json<'de, D>(deserializer: D) -> Result<Vec<OrderItem>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Items {
        List(Vec<OrderItem>),
        Json(String),
        Missing,
    }

    match Items::deserialize(deserializer)? {
        Items::List(items) => Ok(items),
        Items::Json(text) if text.trim().is_empty() => Ok(Vec::new()),
        Items::Json(text) => serde_json::from_str(&text).map_err(serde::de::Error::custom),
        Items::Missing => Ok(Vec::new()),
    }
}

/// Format a backend date as "10/21/2025" in local time, or "Not set"
pub fn format_date(value: Option<&str>) -> String {
    format_date_in(value, &Local)
}

/// Format a backend date in `tz`.
///
/// Accepts RFC 3339 timestamps, "YYYY-MM-DD HH:MM:SS" and bare dates.
/// Anything else is shown as received.
pub fn format_date_in<Tz: TimeZone>(value: Option<&str>, tz: &Tz) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "Not set".to_string();
    };

    let date = if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        Some(at.with_timezone(tz).date_naive())
    } else if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Some(at.date())
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    };

    match date {
        Some(d) => d.format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}
