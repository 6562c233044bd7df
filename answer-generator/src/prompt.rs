//! Prompt builder: fixed support persona + CRM context block + question.

use crm_source::AccountRecord;

/// System instruction sent with every completion.
pub const SYSTEM_PROMPT: &str = "You are Tauro, an expert customer support agent. \
Use the Salesforce information to answer clearly, briefly and professionally.";

/// One line per record, `- {name} ({industry}, {phone})`, joined by `\n`.
///
/// No records give an empty string. A field the CRM left `null` arrives as
/// `""` and leaves its slot blank.
///
/// # Example
/// ```
/// # use answer_generator::prompt::render_context;
/// # use crm_source::AccountRecord;
/// let rows = [
///     AccountRecord::new("Acme Corp", "Energy", "+1-555-0100"),
///     AccountRecord::new("Globex", "", "+1-555-0200"),
/// ];
/// assert_eq!(
///     render_context(&rows),
///     "- Acme Corp (Energy, +1-555-0100)\n- Globex (, +1-555-0200)"
/// );
/// ```
pub fn render_context(records: &[AccountRecord]) -> String {
    records
        .iter()
        .map(|r| format!("- {} ({}, {})", r.name, r.industry, r.phone))
        .collect::<Vec<_>>()
        .join("\n")
}

/// User message: the context block verbatim, then the question.
pub fn build_user_prompt(question: &str, context: &str) -> String {
    format!("CRM data:\n{context}\n\nUser question:\n{question}")
}
