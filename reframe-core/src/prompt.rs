//! Prompt templates for fact generation and reframing.
//!
//! Both builders are pure string construction; the only failure is a missing input.

use crate::error::FactError;

/// Topics excluded from generated facts.
const EXCLUDED_TOPICS: &[&str] = &[
    "Ancient history",
    "Historical figures",
    "Pyramids or Egypt",
    "Time comparisons",
    "Internet memes or viral facts",
];

/// Build the prompt asking for one recent, numeric, single-sentence fact.
///
/// `current_year` is passed in rather than read from the clock so the output
/// only depends on the arguments.
pub fn build_fact_prompt(
    categories: &[String],
    recency_window_years: u32,
    current_year: i32,
) -> Result<String, FactError> {
    let categories: Vec<&str> = categories
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    if categories.is_empty() {
        return Err(FactError::InvalidArgument("categories".to_string()));
    }

    let topic = categories.join(" or ");
    let from_year = current_year - recency_window_years as i32;

    let mut prompt = format!("Generate ONE fascinating scientific fact about {topic}.\n\n");
    prompt.push_str("CRITICAL RULES:\n");
    prompt.push_str("1. NEVER MENTION:\n");
    for excluded in EXCLUDED_TOPICS {
        prompt.push_str(&format!("   × {excluded}\n"));
    }
    prompt.push('\n');

    prompt.push_str("2. ONLY FOCUS ON:\n");
    prompt.push_str(&format!(
        "   ✓ Scientific discoveries from {from_year} to {current_year}\n"
    ));
    prompt.push_str("   ✓ Measurable data and specific numbers\n");
    prompt.push_str("   ✓ Peer-reviewed research\n");
    prompt.push_str("   ✓ Modern technology and innovation\n");
    prompt.push_str(&format!("   ✓ Current developments in {topic}\n\n"));

    prompt.push_str("3. RESPONSE MUST BE:\n");
    prompt.push_str("   ✓ One single sentence\n");
    prompt.push_str("   ✓ Include at least one specific number\n");
    prompt.push_str("   ✓ Start directly with the fact (no \"Did you know\" or similar)\n");
    prompt.push_str("   ✓ End with a period");

    Ok(prompt)
}

/// Build the prompt asking for `text` to be re-expressed through `lens`.
pub fn build_reframe_prompt(text: &str, lens: &str) -> Result<String, FactError> {
    let text = text.trim();
    let lens = lens.trim();
    if text.is_empty() {
        return Err(FactError::InvalidArgument("textToReframe".to_string()));
    }
    if lens.is_empty() {
        return Err(FactError::InvalidArgument("subjectLens".to_string()));
    }

    Ok(format!(
        "I will give you a scientific fact, and I want you to reframe it through the lens of {lens}.\n\
         \n\
         The fact is: \"{text}\"\n\
         \n\
         Reframe this fact through the lens of {lens}. Explain how the fact relates to concepts, \
         principles, or applications in {lens}.\n\
         \n\
         Guidelines:\n\
         - Keep your response concise (2-3 sentences maximum)\n\
         - Focus specifically on {lens} connections\n\
         - Maintain scientific accuracy while translating to the new field\n\
         - Use terminology familiar to people who study {lens}\n\
         - Don't start with \"Through the lens of {lens}...\" or similar phrases\n\
         - Start directly with the reframed fact"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fact_prompt_joins_categories() {
        let prompt = build_fact_prompt(&cats(&["astronomy", "genetics"]), 5, 2025).unwrap();
        assert!(prompt.starts_with("Generate ONE fascinating scientific fact about astronomy or genetics."));
        assert!(prompt.contains("Current developments in astronomy or genetics"));
    }

    #[test]
    fn test_fact_prompt_recency_window() {
        let prompt = build_fact_prompt(&cats(&["ecology"]), 5, 2025).unwrap();
        assert!(prompt.contains("Scientific discoveries from 2020 to 2025"));

        let prompt = build_fact_prompt(&cats(&["ecology"]), 2, 2030).unwrap();
        assert!(prompt.contains("from 2028 to 2030"));
    }

    #[test]
    fn test_fact_prompt_rules() {
        let prompt = build_fact_prompt(&cats(&["chemistry"]), 5, 2025).unwrap();
        for excluded in EXCLUDED_TOPICS {
            assert!(prompt.contains(excluded), "missing exclusion {excluded}");
        }
        assert!(prompt.contains("One single sentence"));
        assert!(prompt.contains("at least one specific number"));
        assert!(prompt.contains("Did you know"));
    }

    #[test]
    fn test_fact_prompt_is_deterministic() {
        let a = build_fact_prompt(&cats(&["neuroscience", "ecology"]), 5, 2025).unwrap();
        let b = build_fact_prompt(&cats(&["neuroscience", "ecology"]), 5, 2025).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fact_prompt_requires_categories() {
        let err = build_fact_prompt(&[], 5, 2025).unwrap_err();
        assert!(matches!(err, FactError::InvalidArgument(_)));

        let err = build_fact_prompt(&cats(&["  "]), 5, 2025).unwrap_err();
        assert!(matches!(err, FactError::InvalidArgument(_)));
    }

    #[test]
    fn test_reframe_prompt_embeds_text_and_lens() {
        let prompt = build_reframe_prompt("Bees see ultraviolet light.", "Art").unwrap();
        assert!(prompt.contains("The fact is: \"Bees see ultraviolet light.\""));
        assert!(prompt.contains("reframe it through the lens of Art."));
        assert!(prompt.contains("2-3 sentences maximum"));
        assert!(prompt.contains("Don't start with \"Through the lens of Art...\""));
        assert!(prompt.contains("terminology familiar to people who study Art"));
    }

    #[test]
    fn test_reframe_prompt_rejects_missing_inputs() {
        assert_eq!(
            build_reframe_prompt("", "Art").unwrap_err(),
            FactError::InvalidArgument("textToReframe".to_string())
        );
        assert_eq!(
            build_reframe_prompt("Some fact.", "   ").unwrap_err(),
            FactError::InvalidArgument("subjectLens".to_string())
        );
    }
}
