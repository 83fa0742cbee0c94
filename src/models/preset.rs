//! Preset Scales
//!
//! Built-in reusable AI use scales: the default four-level scale a fresh
//! draft starts from, and the named presets offered by the scale
//! repository panel.

use serde::{Deserialize, Serialize};

/// One level of a preset scale (no row key; keys are minted on load)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetLevel {
    pub name: String,
    pub instructions: String,
    pub examples: String,
    pub ai_generated_content: String,
    pub acknowledgement: bool,
}

/// A named reusable scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetScale {
    /// Stable preset identifier
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub levels: Vec<PresetLevel>,
}

fn level(
    name: &str,
    instructions: &str,
    examples: &str,
    ai_generated_content: &str,
) -> PresetLevel {
    PresetLevel {
        name: name.to_string(),
        instructions: instructions.to_string(),
        examples: examples.to_string(),
        ai_generated_content: ai_generated_content.to_string(),
        acknowledgement: true,
    }
}

/// The four-level scale a brand-new draft is seeded with
pub fn default_levels() -> Vec<PresetLevel> {
    vec![
        level(
            "No AI Use Permitted",
            "The assessment is completed entirely without AI assistance. This level ensures that students rely solely on their knowledge, understanding, and skills. AI must not be used at any point during the assessment",
            "Traditional exams, in-class essays, mathematical problem-solving without computational aids, original creative writing",
            "Add details here…",
        ),
        level(
            "AI for Research & Brainstorming Only",
            "You may use AI tools for initial research, topic exploration, and brainstorming ideas. However, all analysis, writing, and final work must be your own.",
            "Using ChatGPT to understand complex topics, generating research questions, exploring different perspectives on a subject",
            "Add details here…",
        ),
        level(
            "AI as Writing Assistant",
            "AI tools may be used to assist with writing tasks such as grammar checking, style suggestions, and structural feedback. The core ideas and arguments must be your own.",
            "Using Grammarly for editing, ChatGPT for feedback on draft structure, AI tools for citation formatting",
            "Add details here…",
        ),
        level(
            "Collaborative AI Use Encouraged",
            "AI tools are encouraged as collaborative partners. You may use AI for research, drafting, analysis, and refinement while demonstrating critical evaluation of AI outputs.",
            "Co-writing with AI, using AI for data analysis, AI-assisted coding projects, collaborative problem-solving with AI",
            "Add details here…",
        ),
    ]
}

/// Acknowledgement wording for levels where AI output may appear verbatim
const CITE_AND_DECLARE: &str = "Students MUST (a) cite and reference AI output that is either paraphrased or directly quoted in their submission, and (b) acknowledge the use of AI by adding a declaration at the end of their submission.";
/// Acknowledgement wording for declaration-only levels
const DECLARE_ONLY: &str = "Students MUST acknowledge the use of AI by adding a declaration at the end of their submission.";

/// The named presets offered by the scale repository panel
pub fn builtin_presets() -> Vec<PresetScale> {
    let mut levels = default_levels();
    for (index, preset_level) in levels.iter_mut().enumerate() {
        preset_level.ai_generated_content = if index < 2 {
            DECLARE_ONLY.to_string()
        } else {
            CITE_AND_DECLARE.to_string()
        };
    }
    vec![PresetScale {
        id: "base-template".to_string(),
        name: "Base Template".to_string(),
        description: "Standard scale".to_string(),
        category: "Writing".to_string(),
        levels,
    }]
}
