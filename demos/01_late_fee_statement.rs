/// late-fee statement - paid, overdue and not-yet-due items with controlled time
use billing_docs_rs::config::default_issuers;
use billing_docs_rs::{
    DocumentPreview, Language, LineItemInput, NotificationLevel, SafeTimeProvider, Statement,
    TimeSource,
};
use chrono::{TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    println!("=== late-fee statement ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
    ));

    let mut statement = Statement::default()
        .with_issuer(default_issuers().remove(1))
        .with_client("Maria Souza")
        .with_language(Language::En);

    let entries = [
        ("Invoice 001", "1000", "2024-01-01", "2024-01-11", false, "10"),
        ("Invoice 002", "450.75", "2024-01-20", "2024-01-15", false, ""),
        ("Invoice 003", "300", "2024-01-05", "2024-01-30", true, ""),
        ("", "89.90", "2024-01-10", "", false, ""),
        ("Bad entry", "zero", "", "", false, ""),
    ];

    for (title, value, due, paid, is_paid, discount) in entries {
        let input = LineItemInput {
            title: title.to_string(),
            value: value.to_string(),
            due_date: due.to_string(),
            paid_date: paid.to_string(),
            is_paid,
            discount: discount.to_string(),
        };
        if let Err(e) = statement.add_item(&input, &time) {
            println!("rejected: {}", e);
        }
    }

    for item in statement.items() {
        println!(
            "{:<12} {:<10} {:>3}d  due {}",
            item.title,
            item.status.label(Language::En),
            item.days_late,
            item.amount_due.round_cents()
        );
    }

    let totals = statement.totals()?;
    println!("\nfines: {}", totals.fines.round_cents());
    println!("interest: {}", totals.interest.round_cents());
    println!("discounts: {}", totals.discounts.round_cents());
    println!("total to pay: {}", totals.amount_due.round_cents());

    let view = statement.preview(&time)?;
    println!("\npreview generated at {}", view.generated_at.format("%Y-%m-%d %H:%M"));

    // rejected entries surface as error toasts
    for event in statement.events.take_events() {
        if event.level() == NotificationLevel::Error {
            println!("toast (error): {:?}", event);
        }
    }

    Ok(())
}
