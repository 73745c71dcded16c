/// Development fixtures
///
/// Three accounts (one per role), two schedule entries and two invoices for
/// Alice. All accounts log in with the sentinel password
/// (see [`crate::auth::credentials`]).

use crate::models::{Invoice, InvoiceStatus, Role, ScheduleEntry, ScheduleStatus, User};
use chrono::{NaiveDate, NaiveTime};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "usr-001".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Resident,
            address: Some("123 Main St".to_string()),
            household_id: Some("h001".to_string()),
        },
        User {
            id: "usr-002".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Johnson".to_string(),
            email: "bob@example.com".to_string(),
            role: Role::Collector,
            address: None,
            household_id: None,
        },
        User {
            id: "usr-003".to_string(),
            first_name: "Charlie".to_string(),
            last_name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            address: None,
            household_id: None,
        },
    ]
}

pub fn schedule() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry {
            id: "sch-001".to_string(),
            area: "Main St Area".to_string(),
            collection_date: date(2023, 10, 26),
            collection_time: time(8, 0),
            status: ScheduleStatus::Scheduled,
            collector_id: None,
        },
        ScheduleEntry {
            id: "sch-002".to_string(),
            area: "Oak Ave District".to_string(),
            collection_date: date(2023, 10, 27),
            collection_time: time(9, 30),
            status: ScheduleStatus::Collected,
            collector_id: None,
        },
    ]
}

pub fn invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            id: "inv-001".to_string(),
            user_id: "usr-001".to_string(),
            issue_date: date(2023, 9, 15),
            due_date: date(2023, 10, 15),
            amount: 25.0,
            status: InvoiceStatus::Pending,
            services: vec!["Residential Waste".to_string()],
            payment_date: None,
        },
        Invoice {
            id: "inv-002".to_string(),
            user_id: "usr-001".to_string(),
            issue_date: date(2023, 8, 15),
            due_date: date(2023, 9, 15),
            amount: 25.0,
            status: InvoiceStatus::Paid,
            services: vec!["Residential Waste".to_string()],
            payment_date: Some(date(2023, 9, 10)),
        },
    ]
}
