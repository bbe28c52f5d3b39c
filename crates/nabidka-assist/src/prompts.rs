//! Czech prompts sent to the model.

/// Asks for a one or two sentence professional rewrite of a short
/// service description.
pub fn description_prompt(brief: &str) -> String {
    format!(
        "Rozšiřte tento stručný popis služby do profesionálnější a podrobnější položky \
         pro cenovou nabídku. Popis by měl být vhodný pro klienta. Udržujte ho v rozsahu \
         jedné nebo dvou vět. Stručný popis: \"{brief}\""
    )
}

/// Asks for standard business terms of a freelancer quote.
pub const TERMS_PROMPT: &str = "Vygenerujte standardní obchodní podmínky pro cenovou nabídku \
od freelancera nebo malé firmy. Zahrňte stručné sekce pro:
1. Platební podmínky (např. 50 % předem, 50 % po dokončení, splatnost 30 dní).
2. Rozsah práce (obecné prohlášení, že detaily jsou v nabídce).
3. Časový harmonogram (obecné prohlášení).
4. Důvěrnost.
5. Storno podmínky.
Jazyk udržujte jasný, stručný a profesionální.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_prompt_quotes_input() {
        let prompt = description_prompt("web");
        assert!(prompt.ends_with("Stručný popis: \"web\""));
        assert!(!prompt.contains("  "));
    }
}
