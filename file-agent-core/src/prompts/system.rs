//! System instruction for the file agent

use crate::config::constants::tools;

/// Output-format modes selected on the command line.
///
/// Each active flag appends one `**Current Mode**` line to the system
/// instruction; the engine is expected to honor it, nothing else changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub brief: bool,
    pub detailed: bool,
    pub beginner: bool,
    pub advanced: bool,
    pub questions: bool,
    pub flashcards: bool,
    pub cornell: bool,
    pub mindmap: bool,
}

impl FormatFlags {
    /// Mode lines for the active flags, in declaration order
    pub fn mode_lines(&self) -> Vec<&'static str> {
        [
            (self.brief, "Brief/Concise - Focus on creating ultra-concise summaries."),
            (
                self.detailed,
                "Detailed - Provide comprehensive breakdowns with extensive detail.",
            ),
            (self.beginner, "Beginner - Simplify all content for novice learners."),
            (
                self.advanced,
                "Advanced - Include sophisticated analysis and technical depth.",
            ),
            (self.questions, "Question Generation - Focus on creating test questions."),
            (self.flashcards, "Flashcards - Format all output as Q&A pairs."),
            (
                self.cornell,
                "Cornell Notes - Structure all output in Cornell note format.",
            ),
            (self.mindmap, "Mind Map - Create text-based hierarchical concept maps."),
        ]
        .into_iter()
        .filter_map(|(active, line)| active.then_some(line))
        .collect()
    }

    pub fn any(&self) -> bool {
        !self.mode_lines().is_empty()
    }
}

/// Generate the system instruction, including one line per active format flag
pub fn generate_system_instruction(flags: &FormatFlags) -> String {
    let mut instruction = String::new();

    instruction.push_str(
        "You are a Learning Notes Assistant. You help students and lifelong learners turn raw notes, \
         textbook excerpts and lecture transcripts into clear, structured study material that is easy \
         to review.\n\n",
    );

    instruction.push_str("CAPABILITIES:\n");
    instruction.push_str("- Summarize: extract key concepts and separate them from supporting detail\n");
    instruction.push_str("- Rewrite: simplify dense text without losing accuracy, add examples and analogies\n");
    instruction.push_str("- Enhance: generate self-test questions, flashcard pairs and memory aids\n");
    instruction.push_str("- Restructure: outlines, Cornell notes, mind maps, comparison tables, study guides\n\n");

    instruction.push_str("TOOLS:\n");
    instruction.push_str(&format!("- {}: Create or overwrite a file\n", tools::CREATE_FILE));
    instruction.push_str(&format!(
        "- {}: Replace a file's content or append to it\n",
        tools::EDIT_FILE
    ));
    instruction.push_str(&format!("- {}: Read a file\n", tools::SHOW_FILE));
    instruction.push_str(&format!(
        "- {}: Delete a file (requires confirm=true)\n",
        tools::DELETE_FILE
    ));
    instruction.push_str(&format!(
        "- {}: List a directory\n\n",
        tools::LIST_DIRECTORY
    ));

    instruction.push_str("FILE GUIDELINES:\n");
    instruction.push_str("- Use descriptive file names such as biology_cell_division_summary.md\n");
    instruction.push_str("- Start notes with the topic and source; use consistent markdown\n");
    instruction.push_str("- Read a file before editing it and preserve its meaning and formatting\n");
    instruction.push_str("- Paths are relative to the working directory; never try to leave it\n");
    instruction.push_str("- Only delete files the user explicitly asked to delete\n\n");

    instruction.push_str("RESPONSES:\n");
    instruction.push_str("- Stay accurate to the source; say where nuance was simplified away\n");
    instruction.push_str("- Briefly state what you did, including the files you touched\n");
    instruction.push_str("- Offer a useful next step such as a quiz or a different format");

    for line in flags.mode_lines() {
        instruction.push_str("\n\n**Current Mode**: ");
        instruction.push_str(line);
    }

    instruction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_instruction_has_no_mode_lines() {
        let instruction = generate_system_instruction(&FormatFlags::default());
        assert!(instruction.contains("Learning Notes Assistant"));
        assert!(instruction.contains(tools::DELETE_FILE));
        assert!(!instruction.contains("**Current Mode**"));
    }

    #[test]
    fn active_flags_append_in_declaration_order() {
        let flags = FormatFlags {
            mindmap: true,
            brief: true,
            ..FormatFlags::default()
        };
        let instruction = generate_system_instruction(&flags);

        assert!(instruction.ends_with(
            "\n\n**Current Mode**: Brief/Concise - Focus on creating ultra-concise summaries.\
             \n\n**Current Mode**: Mind Map - Create text-based hierarchical concept maps."
        ));
        assert_eq!(instruction.matches("**Current Mode**").count(), 2);
        assert!(flags.any());
    }
}
