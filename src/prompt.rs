//! Prompt composition.
//!
//! Folds retrieved facts into the system message and wraps the result in the
//! Llama-2 chat instruction template:
//!
//! ```text
//! <s>[INST] <<SYS>>{system}<</SYS>>{query} [/INST]
//! ```

/// Separator placed between the caller's system message and the fact list.
pub const FACTS_PREAMBLE: &str = "\n\nUse these facts to answer:\n";

/// Everything needed to build one prompt. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext<'a> {
    pub system_message: &'a str,
    pub retrieved_facts: Vec<&'a str>,
    pub user_query: &'a str,
}

impl<'a> PromptContext<'a> {
    pub fn new(system_message: &'a str, retrieved_facts: Vec<&'a str>, user_query: &'a str) -> Self {
        Self {
            system_message,
            retrieved_facts,
            user_query,
        }
    }

    /// The system message with the fact block appended, or unchanged when
    /// no facts were retrieved.
    pub fn system_message(&self) -> String {
        augment_system_message(self.system_message, &self.retrieved_facts)
    }

    /// The final instruction string sent to the model.
    pub fn render(&self) -> String {
        render_instruction(&self.system_message(), self.user_query)
    }
}

pub fn augment_system_message(system_message: &str, facts: &[&str]) -> String {
    if facts.is_empty() {
        return system_message.to_string();
    }
    format!("{system_message}{FACTS_PREAMBLE}{}", facts.join("\n"))
}

pub fn render_instruction(system_message: &str, user_query: &str) -> String {
    format!("<s>[INST] <<SYS>>{system_message}<</SYS>>{user_query} [/INST]")
}

/// Compose a complete prompt from its parts.
pub fn compose(system_message: &str, facts: &[&str], user_query: &str) -> String {
    render_instruction(&augment_system_message(system_message, facts), user_query)
}
