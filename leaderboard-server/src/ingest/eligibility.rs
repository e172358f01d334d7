//! Which canonical transactions count toward sales totals

use shared::models::CanonicalTransaction;

/// Finalized-payment event AND status `paid` (trimmed, ASCII case-insensitive)
pub fn is_eligible(tx: &CanonicalTransaction) -> bool {
    tx.event_type.is_completion() && tx.status.trim().eq_ignore_ascii_case("paid")
}

pub fn eligible(transactions: Vec<CanonicalTransaction>) -> Vec<CanonicalTransaction> {
    transactions.into_iter().filter(is_eligible).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{EntityKey, PaymentEventKind};

    fn tx(event: &str, status: &str) -> CanonicalTransaction {
        CanonicalTransaction {
            entity_id: EntityKey::Gateway("E1".into()),
            event_type: PaymentEventKind::parse(event),
            status: status.into(),
            amount: 100.0,
            timestamp: None,
            raw_timestamp: None,
            account_id: None,
            account_email: None,
            team_name: None,
            group_label: None,
            customer_name: None,
            customer_email: None,
            order_id: None,
        }
    }

    #[test]
    fn test_completion_events_with_paid_status() {
        assert!(is_eligible(&tx("order.paid", "paid")));
        assert!(is_eligible(&tx("payment_link.paid", " PAID ")));
    }

    #[test]
    fn test_captured_never_counts() {
        assert!(!is_eligible(&tx("payment.captured", "captured")));
        assert!(!is_eligible(&tx("payment.captured", "paid")));
    }

    #[test]
    fn test_wrong_status_excluded() {
        assert!(!is_eligible(&tx("order.paid", "attempted")));
        assert!(!is_eligible(&tx("order.paid", "")));
    }

    #[test]
    fn test_eligible_filters_in_order() {
        let kept = eligible(vec![
            tx("order.paid", "paid"),
            tx("payment.authorized", "authorized"),
            tx("payment_link.paid", "paid"),
        ]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].event_type, PaymentEventKind::PaymentLinkPaid);
    }
}
