//! Instruction template for the classification request.
//!
//! One routine renders every variant: the category groups come from the
//! request, and the per-category instruction comes from [`EvidenceMode`].

use crate::codebook::{EvidenceMode, GroupKind};
use crate::evidence::NO_EVIDENCE;
use crate::result::ClassificationRequest;

pub const SYSTEM_PROMPT: &str = "You are an expert in analyzing special education responses.";

fn evidence_instruction(mode: EvidenceMode) -> &'static str {
    match mode {
        EvidenceMode::Explanation => {
            "a list of short explanations of the relevant content, each naming the specific text it is drawn from"
        }
        EvidenceMode::Quotes => {
            "a list of exact quotes copied verbatim from the text, without paraphrasing or commentary"
        }
    }
}

fn mode_line(mode: EvidenceMode) -> &'static str {
    match mode {
        EvidenceMode::Explanation => "Provide specific text snippets and explanations for each code.",
        EvidenceMode::Quotes => "Provide only direct quotes from the text as evidence for each code.",
    }
}

/// Render the user instruction for a request.
pub fn render_instruction(request: &ClassificationRequest) -> String {
    let groups: Vec<GroupKind> = request.active_groups().collect();
    let sections: String = groups
        .iter()
        .map(|kind| {
            let names: String = request
                .group(*kind)
                .iter()
                .map(|name| format!("- {name}\n"))
                .collect();
            format!("\n{}:\n{names}", kind.title())
        })
        .collect();
    let keys = groups
        .iter()
        .map(|k| format!("'{}'", k.key()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analyze the following special education response text and identify relevant content for each category.\n\
         {mode_line}\n\
         \n\
         Text to analyze: {subject}\n\
         \n\
         Please analyze the text for the following categories and provide results in JSON format:\n\
         {sections}\n\
         Format the response as a single JSON object with exactly these top-level keys: {keys}.\n\
         Each key maps to an object whose keys are exactly the category names listed under that heading.\n\
         The value for each category is {evidence}.\n\
         If the text contains nothing relevant for a category, use the string \"{sentinel}\".",
        mode_line = mode_line(request.evidence_mode),
        subject = request.subject_text,
        evidence = evidence_instruction(request.evidence_mode),
        sentinel = NO_EVIDENCE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codebook::{Codebook, EMERGENT_CODES, PREDETERMINED_CODES};

    fn request(custom: &[&str], mode: EvidenceMode) -> ClassificationRequest {
        let custom: Vec<String> = custom.iter().map(|s| s.to_string()).collect();
        ClassificationRequest::new(
            &Codebook::default().with_evidence_mode(mode),
            "Maria: 'I need to know her reading level.'",
            &custom,
        )
    }

    #[test]
    fn embeds_all_fixed_categories_and_subject() {
        let text = render_instruction(&request(&[], EvidenceMode::Explanation));
        for name in PREDETERMINED_CODES.iter().chain(EMERGENT_CODES) {
            assert!(text.contains(&format!("- {name}")), "missing {name}");
        }
        assert!(text.contains("Text to analyze: Maria: 'I need to know her reading level.'"));
        assert!(text.contains("'predetermined_codes', 'emergent_codes'."));
        assert!(!text.contains("custom_codes"));
        assert!(!text.contains("Custom Codes:"));
    }

    #[test]
    fn custom_group_added_when_supplied() {
        let text = render_instruction(&request(&["Pacing Concerns"], EvidenceMode::Explanation));
        assert!(text.contains("Custom Codes:\n- Pacing Concerns"));
        assert!(text.contains("'predetermined_codes', 'emergent_codes', 'custom_codes'."));
    }

    #[test]
    fn evidence_mode_changes_instruction() {
        let explain = render_instruction(&request(&[], EvidenceMode::Explanation));
        let quotes = render_instruction(&request(&[], EvidenceMode::Quotes));
        assert!(explain.contains("short explanations"));
        assert!(quotes.contains("exact quotes copied verbatim"));
        assert!(quotes.contains("direct quotes"));
    }

    #[test]
    fn empty_subject_still_renders() {
        let req = ClassificationRequest::new(&Codebook::default(), "", &[]);
        let text = render_instruction(&req);
        assert!(text.contains("Text to analyze: \n"));
        assert!(text.ends_with(&format!("\"{NO_EVIDENCE}\".")));
    }

    #[test]
    fn sections_are_separated_by_blank_lines() {
        let req = ClassificationRequest::new(
            &Codebook {
                predetermined: vec!["A".into()],
                emergent: vec!["B".into(), "C".into()],
                evidence_mode: EvidenceMode::Explanation,
            },
            "some text",
            &["D".to_string()],
        );
        let text = render_instruction(&req);
        assert!(text.starts_with(
            "Analyze the following special education response text and identify relevant content for each category.\n\
             Provide specific text snippets and explanations for each code.\n\
             \n\
             Text to analyze: some text\n\
             \n"
        ));
        assert!(text.contains(
            "JSON format:\n\
             \n\
             Predetermined Codes:\n- A\n\
             \n\
             Emergent Codes:\n- B\n- C\n\
             \n\
             Custom Codes:\n- D\n\
             \n\
             Format the response"
        ));
    }
}
