//! Prompt surface used by the session runner. The interactive implementation
//! relies on dialoguer; tests drive the runner with scripted implementations.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::form::{Rule, SectionId, Step};

const BACK_LABEL: &str = "← Back";
const BLANK_LABEL: &str = "(leave blank)";

/// Describes how a field prompt was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied a concrete value (possibly empty to clear the field).
    Value(String),
    /// Keep whatever the field currently holds.
    Keep,
    /// Go back to the previous field of the step.
    Back,
    /// Abort the whole session.
    Cancel,
}

/// What to do once every field of a step has been visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Continue,
    Previous,
    Cancel,
}

/// Data provided to render one field prompt.
pub struct PromptContext<'a> {
    pub section: SectionId,
    pub field: &'static str,
    pub rule: &'a Rule,
    pub current: Option<String>,
    pub error: Option<String>,
    pub index: usize,
    pub total: usize,
}

impl PromptContext<'_> {
    pub fn prompt_label(&self) -> String {
        let marker = if self.rule.required { " *" } else { "" };
        format!(
            "[{}/{}] {}{}",
            self.index + 1,
            self.total,
            self.rule.label,
            marker
        )
    }
}

pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn choose_action(&mut self, step: Step) -> StepAction;

    /// Asked after a failed submission; `true` retries.
    fn confirm_retry(&mut self, message: &str) -> bool;
}

/// Terminal implementation backed by dialoguer prompts.
pub struct DialoguerInteraction {
    theme: ColorfulTheme,
}

impl Default for DialoguerInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn prompt_text(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        let mut prompt = context.prompt_label();
        if let Some(current) = &context.current {
            prompt.push_str(&format!(" [{current}]"));
        }
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();
        match answer {
            Ok(raw) => interpret_text(&raw),
            Err(_) => PromptResponse::Cancel,
        }
    }

    fn prompt_select(&mut self, context: &PromptContext<'_>, options: &[&str]) -> PromptResponse {
        let mut items: Vec<&str> = options.to_vec();
        if !context.rule.required {
            items.push(BLANK_LABEL);
        }
        if context.index > 0 {
            items.push(BACK_LABEL);
        }
        let default = context
            .current
            .as_deref()
            .and_then(|current| items.iter().position(|item| item.eq_ignore_ascii_case(current)))
            .unwrap_or(0);

        let selection = Select::with_theme(&self.theme)
            .with_prompt(context.prompt_label())
            .items(&items)
            .default(default)
            .interact_opt();
        match selection {
            Ok(Some(index)) => match items[index] {
                BACK_LABEL => PromptResponse::Back,
                BLANK_LABEL => PromptResponse::Value(String::new()),
                choice => PromptResponse::Value(choice.to_string()),
            },
            _ => PromptResponse::Cancel,
        }
    }
}

/// Maps typed text onto a response. `:back`, `:clear` and `:cancel` are
/// commands; an empty line keeps the current value.
pub fn interpret_text(raw: &str) -> PromptResponse {
    match raw.trim() {
        "" => PromptResponse::Keep,
        ":back" => PromptResponse::Back,
        ":clear" => PromptResponse::Value(String::new()),
        ":cancel" => PromptResponse::Cancel,
        _ => PromptResponse::Value(raw.to_string()),
    }
}

impl FormInteraction for DialoguerInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        if let Some(options) = context.rule.options() {
            return self.prompt_select(context, options);
        }
        if context.rule.is_boolean() {
            return self.prompt_select(context, &["Yes", "No"]);
        }
        self.prompt_text(context)
    }

    fn choose_action(&mut self, step: Step) -> StepAction {
        let forward = if step.is_terminal() {
            "Submit enrolment"
        } else {
            "Move to next step"
        };
        let mut items = vec![forward];
        if step.previous().is_some() {
            items.push("Previous step");
        }
        items.push("Cancel");

        match Select::with_theme(&self.theme)
            .items(&items)
            .default(0)
            .interact_opt()
        {
            Ok(Some(index)) => match items[index] {
                "Previous step" => StepAction::Previous,
                "Cancel" => StepAction::Cancel,
                _ => StepAction::Continue,
            },
            _ => StepAction::Cancel,
        }
    }

    fn confirm_retry(&mut self, message: &str) -> bool {
        Confirm::with_theme(&self.theme)
            .with_prompt(format!("{message}. Try submitting again?"))
            .default(true)
            .interact()
            .unwrap_or(false)
    }
}
