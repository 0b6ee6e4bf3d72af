use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A booking row as stored in the external data store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub guests: Option<i64>,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub preferred_contact: Option<String>,
    pub source: String,
    pub status: BookingStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub amount_lkr: Option<f64>,
    #[serde(default)]
    pub payhere_order_id: Option<String>,
    #[serde(default)]
    pub payhere_payment_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Booking {
    /// Whether this booking takes its dates off the market.
    pub fn reserves_dates(&self) -> bool {
        matches!(self.status, BookingStatus::Confirmed | BookingStatus::Blocked)
    }

    /// Half-open interval overlap: [checkin, checkout) intersects the query
    /// range iff this booking starts before the query ends and ends after
    /// the query starts.
    pub fn overlaps(&self, checkin: NaiveDate, checkout: NaiveDate) -> bool {
        self.checkin < checkout && self.checkout > checkin
    }
}

/// Insert payload for a new booking; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub guests: Option<i64>,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub message: Option<String>,
    pub preferred_contact: Option<String>,
    pub source: String,
    pub status: BookingStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub amount_lkr: f64,
}

/// Partial update applied to a booking row. Fields left as `None` are not
/// touched in the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payhere_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payhere_payment_id: Option<String>,
}

impl BookingPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.payment_status.is_none()
            && self.payhere_order_id.is_none()
            && self.payhere_payment_id.is_none()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Inquiry,
    Confirmed,
    Blocked,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Inquiry => "inquiry",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Blocked => "blocked",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inquiry" => Some(BookingStatus::Inquiry),
            "confirmed" => Some(BookingStatus::Confirmed),
            "blocked" => Some(BookingStatus::Blocked),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    PayLater,
    PayOnline,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::PayLater => "pay_later",
            PaymentMethod::PayOnline => "pay_online",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// Validate a requested stay range from raw query/body strings.
///
/// Both dates must be present, parse as ISO dates, and satisfy
/// `checkout > checkin`. The error string is shown to the caller.
pub fn parse_stay_range(
    checkin: Option<&str>,
    checkout: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), String> {
    let checkin = checkin.map(str::trim).filter(|s| !s.is_empty());
    let checkout = checkout.map(str::trim).filter(|s| !s.is_empty());

    let (checkin, checkout) = match (checkin, checkout) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err("checkin and checkout are required".to_string()),
    };

    let start = NaiveDate::parse_from_str(checkin, "%Y-%m-%d")
        .map_err(|_| format!("invalid checkin date: {checkin}"))?;
    let end = NaiveDate::parse_from_str(checkout, "%Y-%m-%d")
        .map_err(|_| format!("invalid checkout date: {checkout}"))?;

    if end <= start {
        return Err("checkout must be after checkin".to_string());
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking(checkin: &str, checkout: &str, status: BookingStatus) -> Booking {
        Booking {
            id: 1,
            name: "Guest".to_string(),
            email: "guest@example.com".to_string(),
            phone: None,
            guests: None,
            checkin: date(checkin),
            checkout: date(checkout),
            message: None,
            preferred_contact: None,
            source: "website".to_string(),
            status,
            payment_method: PaymentMethod::PayLater,
            payment_status: PaymentStatus::Unpaid,
            amount_lkr: None,
            payhere_order_id: None,
            payhere_payment_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_overlap_predicate_grid() {
        // Existing reserved stay [2025-06-10, 2025-06-15).
        let b = booking("2025-06-10", "2025-06-15", BookingStatus::Confirmed);

        // (query checkin, query checkout, expected overlap)
        let cases = [
            ("2025-06-01", "2025-06-05", false), // fully before
            ("2025-06-01", "2025-06-10", false), // ends exactly at checkin
            ("2025-06-01", "2025-06-11", true),  // crosses checkin
            ("2025-06-11", "2025-06-13", true),  // fully inside
            ("2025-06-10", "2025-06-15", true),  // identical range
            ("2025-06-14", "2025-06-20", true),  // crosses checkout
            ("2025-06-15", "2025-06-20", false), // starts exactly at checkout
            ("2025-06-16", "2025-06-20", false), // fully after
            ("2025-06-01", "2025-06-30", true),  // contains the stay
        ];

        for (c, d, expected) in cases {
            assert_eq!(
                b.overlaps(date(c), date(d)),
                expected,
                "query [{c}, {d}) against [2025-06-10, 2025-06-15)"
            );
        }
    }

    #[test]
    fn test_overlap_matches_interval_formula() {
        // a < d && b > c over a sweep of day offsets around the stay.
        let b = booking("2025-06-10", "2025-06-15", BookingStatus::Blocked);
        let base = date("2025-06-01");
        for c_off in 0..30 {
            for len in 1..10 {
                let c = base + chrono::Duration::days(c_off);
                let d = c + chrono::Duration::days(len);
                let expected = b.checkin < d && b.checkout > c;
                assert_eq!(b.overlaps(c, d), expected, "query [{c}, {d})");
            }
        }
    }

    #[test]
    fn test_reserves_dates_by_status() {
        assert!(booking("2025-06-10", "2025-06-15", BookingStatus::Confirmed).reserves_dates());
        assert!(booking("2025-06-10", "2025-06-15", BookingStatus::Blocked).reserves_dates());
        assert!(!booking("2025-06-10", "2025-06-15", BookingStatus::Inquiry).reserves_dates());
        assert!(!booking("2025-06-10", "2025-06-15", BookingStatus::Cancelled).reserves_dates());
    }

    #[test]
    fn test_parse_stay_range_valid() {
        let (start, end) = parse_stay_range(Some("2025-06-01"), Some("2025-06-03")).unwrap();
        assert_eq!(start, date("2025-06-01"));
        assert_eq!(end, date("2025-06-03"));
    }

    #[test]
    fn test_parse_stay_range_missing() {
        assert!(parse_stay_range(None, Some("2025-06-03")).is_err());
        assert!(parse_stay_range(Some("2025-06-01"), None).is_err());
        assert!(parse_stay_range(Some(""), Some("2025-06-03")).is_err());
    }

    #[test]
    fn test_parse_stay_range_invalid_format() {
        assert!(parse_stay_range(Some("June 1"), Some("2025-06-03")).is_err());
        assert!(parse_stay_range(Some("2025-06-01"), Some("03/06/2025")).is_err());
    }

    #[test]
    fn test_parse_stay_range_inverted_or_equal() {
        assert!(parse_stay_range(Some("2025-06-03"), Some("2025-06-01")).is_err());
        assert!(parse_stay_range(Some("2025-06-01"), Some("2025-06-01")).is_err());
    }

    #[test]
    fn test_status_parse_allow_list() {
        assert_eq!(BookingStatus::parse("confirmed"), Some(BookingStatus::Confirmed));
        assert_eq!(BookingStatus::parse("inquiry"), Some(BookingStatus::Inquiry));
        assert_eq!(BookingStatus::parse("blocked"), Some(BookingStatus::Blocked));
        assert_eq!(BookingStatus::parse("cancelled"), Some(BookingStatus::Cancelled));
        assert_eq!(BookingStatus::parse("VIP"), None);
        assert_eq!(BookingStatus::parse(""), None);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(BookingPatch::default().is_empty());
        let patch = BookingPatch {
            status: Some(BookingStatus::Confirmed),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
