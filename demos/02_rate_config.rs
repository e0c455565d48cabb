/// rate config - load rates from json and override them per statement
use billing_docs_rs::{DocumentConfig, LineItemInput, RateConfig, Statement};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DocumentConfig::from_json(
        r#"{
            "rates": { "fine_rate_percent": "2", "daily_interest_rate_percent": "0.033" },
            "language": "pt"
        }"#,
    )?;

    println!("fine rate: {}", config.rates.fine_rate());
    println!("daily interest: {}", config.rates.daily_interest_rate());

    let item = LineItemInput {
        value: "1000".to_string(),
        due_date: "2024-03-01".to_string(),
        paid_date: "2024-03-31".to_string(),
        ..Default::default()
    };

    let mut statement = Statement::new(config.rates)?
        .with_issuer(config.issuer("empresaA")?.clone())
        .with_client("Acme Ltda");
    statement.add_item_now(&item)?;
    println!("\nwith configured rates: {}", statement.total_due()?.round_cents());

    statement.set_rates(RateConfig::new(dec!(10), dec!(0.03))?)?;
    statement.add_item_now(&item)?;
    println!("second item with default rates: {}", statement.items()[1].amount_due.round_cents());
    println!("statement total: {}", statement.total_due()?.round_cents());

    Ok(())
}
