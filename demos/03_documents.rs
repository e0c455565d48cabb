/// documents - negotiation, receipt, cancellation and percentage calculator
use billing_docs_rs::config::default_issuers;
use billing_docs_rs::percentage::{parse_number, percent_change, percent_of, ratio_percent};
use billing_docs_rs::{
    CancellationProof, DocumentPreview, NegotiationProposal, PaymentMethod, PaymentReceipt,
    ReceiptItemInput, SafeTimeProvider, TimeSource,
};
use chrono::{TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 8, 1, 10, 0, 0).unwrap(),
    ));
    let issuer = default_issuers().remove(0);

    println!("=== negotiation ===");
    let mut proposal = NegotiationProposal::new()
        .with_issuer(issuer.clone())
        .with_client("Acme Ltda");
    proposal.add_item("NF 1001", "1200", &time)?;
    proposal.add_item("NF 1002", "380.40", &time)?;
    proposal.set_discount_text("12")?;
    println!("{}", proposal.preview_json(&time)?);

    println!("\n=== receipt ===");
    let mut receipt = PaymentReceipt::new()
        .with_issuer(issuer.clone())
        .with_client("Acme Ltda");
    receipt.set_payment_date("2024-07-31")?;
    receipt.add_item(
        &ReceiptItemInput {
            description: "Endereço fiscal".to_string(),
            plan: "Anual".to_string(),
            method: PaymentMethod::Pix,
            value: "1198.80".to_string(),
        },
        &time,
    )?;
    println!("{}", receipt.preview_json(&time)?);

    println!("\n=== cancellation ===");
    let mut proof = CancellationProof::new()
        .with_issuer(issuer)
        .with_client("Acme Ltda")
        .with_reason("Encerramento das atividades");
    proof.set_date("2024-07-31")?;
    println!("{}", proof.preview_json(&time)?);

    println!("\n=== percentages ===");
    println!("15% of 240 = {}", percent_of(parse_number("15")?, parse_number("240")?)?);
    println!("30 of 120 = {}%", ratio_percent(parse_number("30")?, parse_number("120")?)?);
    println!("80 -> 100 = {}%", percent_change(parse_number("80")?, parse_number("100")?)?);

    Ok(())
}
