/// quick start - one overdue item on a late-fee statement
use billing_docs_rs::{DocumentPreview, LineItemInput, Statement};
use billing_docs_rs::config::default_issuers;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // statement with the default rates: 10% fine, 0.03% interest per day
    let mut statement = Statement::default()
        .with_issuer(default_issuers().remove(0))
        .with_client("Acme Ltda");

    statement.add_item_now(&LineItemInput {
        title: "Mensalidade janeiro".to_string(),
        value: "1000".to_string(),
        due_date: "2024-01-01".to_string(),
        paid_date: "2024-01-11".to_string(),
        ..Default::default()
    })?;

    println!("total due: {}", statement.total_due()?.round_cents());
    println!("{}", billing_docs_rs::serialization::to_json_pretty(&statement.preview_now()?)?);

    Ok(())
}
