//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use leaderboard_server::sources::{MemorySource, SourceTable};
use serde_json::{Value, json};
use shared::models::Row;
use std::sync::Arc;

pub fn rows(value: Value) -> Vec<Row> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 2, 6, 0, 0).unwrap()
}

pub fn seeded_source() -> Arc<MemorySource> {
    let source = Arc::new(MemorySource::new());
    source.set_rows(
        SourceTable::Teams,
        rows(json!([
            {"Group": "A", "Product/Service Name": "Chai Co", "Razorpay Account ID": "acc_1",
             "Razorpay Account Email": "chai@example.com", "Name 1": "Asha Rao", "Name 2": "Vikram Shah"},
            {"Group": "A", "Product/Service Name": "Dosa Den", "Razorpay Account ID": "acc_2"},
            {"Group": "B", "Product/Service Name": "Momo Hub", "Razorpay Account ID": "acc_3"},
            {"Group": "", "Product/Service Name": "", "Razorpay Account ID": ""}
        ])),
    );
    source.set_rows(
        SourceTable::Payments,
        rows(json!([
            // authorized then order.paid for one entity: counted once
            {"Entity ID": "pay_1", "Event Type": "payment.authorized", "Status": "authorized",
             "Amount": "500", "Timestamp": "2024-03-01 10:00:00", "Razorpay Account ID": "acc_1"},
            {"Entity ID": "pay_1", "Event Type": "order.paid", "Status": "paid",
             "Amount": "500", "Timestamp": "2024-03-01 10:00:02", "Razorpay Account ID": "acc_1"},
            // captured only: feed yes, totals no
            {"Entity ID": "pay_2", "Event Type": "payment.captured", "Status": "captured",
             "Amount": "999", "Timestamp": "2024-03-01 11:00:00", "Razorpay Account ID": "acc_2"},
            {"Entity ID": "pay_3", "Event Type": "payment_link.paid", "Status": "PAID",
             "Amount": "1,500", "Timestamp": "2024-03-01 12:00:00", "Razorpay Account ID": "acc_3"},
            // unknown account: excluded from totals, shown as Unknown Team
            {"Entity ID": "pay_4", "Event Type": "order.paid", "Status": "paid",
             "Amount": "700", "Timestamp": "2024-03-01 13:00:00", "Razorpay Account ID": "acc_ghost"},
            // neither sales nor feed signal
            {"Notes": "manual adjustment"}
        ])),
    );
    source.set_rows(
        SourceTable::Access,
        rows(json!([
            {"Email": "admin@example.com", "Name": "Admin", "Access Type": "admin"},
            {"Email": "student@example.com", "Name": "Stu", "Access Type": "student", "Group Name": "A"},
            {"Email": "", "Name": "Blank"}
        ])),
    );
    source
}
