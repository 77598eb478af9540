//! Prompt builder: short system message + labeled context block.

/// Default system instructions for company FAQ answers.
pub const DEFAULT_SYSTEM: &str = r#"
You are a helpful assistant answering questions about a company.
Answer only from the provided company information. If it does not contain the answer, say you don't know.
Keep answers short and friendly.
"#;

/// Builds the user prompt: the context block first, then the question.
///
/// # Example
/// ```
/// # use faq_context::prompt::build_user_prompt;
/// let prompt = build_user_prompt("Who is Ana?", "[employee]\nEmployee: Ana");
/// assert!(prompt.starts_with("Company information:"));
/// assert!(prompt.ends_with("Who is Ana?"));
/// ```
pub fn build_user_prompt(question: &str, context: &str) -> String {
    let mut out = String::with_capacity(context.len() + question.len() + 48);
    out.push_str("Company information:\n");
    out.push_str(context.trim());
    out.push_str("\n\nQuestion:\n");
    out.push_str(question.trim());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_stable() {
        let p = build_user_prompt("  What is Acme?\n", "[company_info]\nCompany: Acme\n");
        assert_eq!(
            p,
            "Company information:\n[company_info]\nCompany: Acme\n\nQuestion:\nWhat is Acme?"
        );
    }
}
