use super::format::{NOT_AVAILABLE, yes_no};
use crate::core::{Finding, Investigation, Recommendation};
use crate::ui::style;

fn status_text(finding: Option<&Finding>) -> String {
    finding.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |f| match f.unavailable_reason() {
            Some(reason) => format!("Unavailable ({reason})"),
            None => f.status.to_string(),
        },
    )
}

/// `(label, value)` pairs of the terminal recap, in display order.
pub fn summary_fields(
    investigation: &Investigation,
    recommendation: &Recommendation,
) -> Vec<(&'static str, String)> {
    vec![
        ("Alias", investigation.alias.to_string()),
        ("Account status", status_text(investigation.directory())),
        ("Mailbox status", status_text(investigation.mailbox())),
        (
            "Storage found",
            yes_no(investigation.storage_found()).to_string(),
        ),
        ("Has data", yes_no(investigation.has_data).to_string()),
        ("Recommendation", recommendation.verdict.to_string()),
    ]
}

/// Plain recap, one line per field.
pub fn summary_lines(investigation: &Investigation, recommendation: &Recommendation) -> Vec<String> {
    summary_fields(investigation, recommendation)
        .into_iter()
        .map(|(label, value)| format!("{label:<16}{value}"))
        .collect()
}

pub fn print_summary(investigation: &Investigation, recommendation: &Recommendation) {
    println!();
    println!("{}", style::header("Investigation Summary"));
    println!("{}", style::dim("─".repeat(40)));
    for (label, value) in summary_fields(investigation, recommendation) {
        let value = if label == "Recommendation" {
            style::verdict(recommendation.verdict, &value)
        } else {
            style::value(&value)
        };
        println!("{} {value}", style::cyan(format!("{label:<15}")));
    }
}
