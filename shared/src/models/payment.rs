//! Payment gateway events and their canonical form

use super::row::{Row, RowExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// Folded header aliases, tried in order
const ENTITY_ID: &[&str] = &["entityid", "paymentid", "id"];
const ENTITY_TYPE: &[&str] = &["entitytype"];
const EVENT_TYPE: &[&str] = &["eventtype", "event"];
const STATUS: &[&str] = &["status"];
const AMOUNT: &[&str] = &["amount"];
const CURRENCY: &[&str] = &["currency"];
const TIMESTAMP: &[&str] = &["timestamp", "time", "createdat"];
const ACCOUNT_ID: &[&str] = &["razorpayaccountid", "accountid"];
const ACCOUNT_EMAIL: &[&str] = &["razorpayaccountemail", "accountemail"];
const CUSTOMER_NAME: &[&str] = &["customername"];
const CUSTOMER_EMAIL: &[&str] = &["customeremail"];
const ORDER_ID: &[&str] = &["orderid"];
const NOTES: &[&str] = &["notes"];
const EXTRA_ID: &[&str] = &["extraidqrpaymentlink", "extraid"];

/// One webhook delivery as stored upstream, with every field resolved
/// from the row exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaymentEvent {
    pub entity_id: Option<String>,
    pub entity_type: Option<String>,
    pub event_type: Option<String>,
    pub status: Option<String>,
    /// Decimal text, currency-agnostic
    pub amount: Option<String>,
    /// Informational only
    pub currency: Option<String>,
    pub timestamp: Option<String>,
    pub account_id: Option<String>,
    pub account_email: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub order_id: Option<String>,
    pub notes: Option<String>,
    pub extra_id: Option<String>,
}

impl RawPaymentEvent {
    pub fn from_row(row: &Row) -> Self {
        Self {
            entity_id: row.field(ENTITY_ID),
            entity_type: row.field(ENTITY_TYPE),
            event_type: row.field(EVENT_TYPE),
            status: row.field(STATUS),
            amount: row.field(AMOUNT),
            currency: row.field(CURRENCY),
            timestamp: row.field(TIMESTAMP),
            account_id: row.field(ACCOUNT_ID),
            account_email: row.field(ACCOUNT_EMAIL),
            customer_name: row.field(CUSTOMER_NAME),
            customer_email: row.field(CUSTOMER_EMAIL),
            order_id: row.field(ORDER_ID),
            notes: row.field(NOTES),
            extra_id: row.field(EXTRA_ID),
        }
    }
}

/// Gateway event type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentEventKind {
    PaymentCaptured,
    OrderPaid,
    PaymentLinkPaid,
    PaymentAuthorized,
    Other(String),
}

impl PaymentEventKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "payment.captured" => Self::PaymentCaptured,
            "order.paid" => Self::OrderPaid,
            "payment_link.paid" => Self::PaymentLinkPaid,
            "payment.authorized" => Self::PaymentAuthorized,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PaymentCaptured => "payment.captured",
            Self::OrderPaid => "order.paid",
            Self::PaymentLinkPaid => "payment_link.paid",
            Self::PaymentAuthorized => "payment.authorized",
            Self::Other(s) => s,
        }
    }

    /// Rank used when several deliveries share one entity id
    pub fn precedence(&self) -> u8 {
        match self {
            Self::PaymentCaptured => 3,
            Self::OrderPaid | Self::PaymentLinkPaid => 2,
            Self::PaymentAuthorized => 1,
            Self::Other(_) => 0,
        }
    }

    /// Finalized-payment events, the only kinds that count toward sales
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::OrderPaid | Self::PaymentLinkPaid)
    }
}

impl From<String> for PaymentEventKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PaymentEventKind> for String {
    fn from(kind: PaymentEventKind) -> Self {
        match kind {
            PaymentEventKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaymentEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dedup key of a transaction
///
/// Records arriving without an entity id get a synthetic key from their
/// position in the payments table, so each one forms its own group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Gateway(String),
    Row(usize),
}

impl EntityKey {
    /// Gateway id, if the record carried one
    pub fn gateway_id(&self) -> Option<&str> {
        match self {
            Self::Gateway(id) => Some(id),
            Self::Row(_) => None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Row(_))
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gateway(id) => f.write_str(id),
            Self::Row(index) => write!(f, "row-{}", index),
        }
    }
}

impl Serialize for EntityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Normalized payment record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTransaction {
    pub entity_id: EntityKey,
    pub event_type: PaymentEventKind,
    /// Trimmed gateway status, empty when absent
    pub status: String,
    pub amount: f64,
    /// `None` when the source timestamp could not be parsed
    pub timestamp: Option<DateTime<Utc>>,
    pub raw_timestamp: Option<String>,
    pub account_id: Option<String>,
    pub account_email: Option<String>,
    /// Resolved against the team registry, `None` when unknown
    pub team_name: Option<String>,
    pub group_label: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub order_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_row_resolves_aliases() {
        let row = json!({
            "Timestamp": "2024-03-01 10:00:00",
            "Event Type": "order.paid",
            "Entity ID": "order_1",
            "Amount": 500,
            "Status": " paid ",
            "Razorpay Account ID": "acc_1",
            "Razorpay Account Email": "team@x.com",
            "Extra ID (QR / Payment Link)": "plink_9",
        });
        let event = RawPaymentEvent::from_row(row.as_object().unwrap());

        assert_eq!(event.entity_id.as_deref(), Some("order_1"));
        assert_eq!(event.event_type.as_deref(), Some("order.paid"));
        assert_eq!(event.amount.as_deref(), Some("500"));
        assert_eq!(event.status.as_deref(), Some("paid"));
        assert_eq!(event.account_id.as_deref(), Some("acc_1"));
        assert_eq!(event.account_email.as_deref(), Some("team@x.com"));
        assert_eq!(event.extra_id.as_deref(), Some("plink_9"));
        assert_eq!(event.currency, None);
    }

    #[test]
    fn test_from_row_camel_case_headers() {
        let row = json!({
            "eventType": "payment.captured",
            "paymentId": "pay_1",
            "accountId": "acc_2",
            "createdAt": 1700000000,
        });
        let event = RawPaymentEvent::from_row(row.as_object().unwrap());
        assert_eq!(event.event_type.as_deref(), Some("payment.captured"));
        assert_eq!(event.entity_id.as_deref(), Some("pay_1"));
        assert_eq!(event.account_id.as_deref(), Some("acc_2"));
        assert_eq!(event.timestamp.as_deref(), Some("1700000000"));
    }

    #[test]
    fn test_event_kind_precedence() {
        assert!(
            PaymentEventKind::PaymentCaptured.precedence()
                > PaymentEventKind::OrderPaid.precedence()
        );
        assert_eq!(
            PaymentEventKind::OrderPaid.precedence(),
            PaymentEventKind::PaymentLinkPaid.precedence()
        );
        assert!(
            PaymentEventKind::PaymentAuthorized.precedence()
                > PaymentEventKind::parse("refund.created").precedence()
        );
    }

    #[test]
    fn test_event_kind_round_trips_gateway_string() {
        let kind: PaymentEventKind = serde_json::from_str("\"payment_link.paid\"").unwrap();
        assert_eq!(kind, PaymentEventKind::PaymentLinkPaid);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"payment_link.paid\"");

        let other = PaymentEventKind::parse("refund.processed");
        assert_eq!(other.to_string(), "refund.processed");
        assert!(!other.is_completion());
    }

    #[test]
    fn test_entity_key_display() {
        assert_eq!(EntityKey::Gateway("pay_1".into()).to_string(), "pay_1");
        assert_eq!(EntityKey::Row(7).to_string(), "row-7");
        assert_eq!(EntityKey::Row(7).gateway_id(), None);
        assert!(EntityKey::Row(7).is_synthetic());
    }
}
