//! Drives a [`Wizard`] through a [`FormInteraction`]: prompts each field of
//! the current step, validates on entry, then gates or submits.

use serde_json::Value;

use crate::cli::interaction::{FormInteraction, PromptContext, PromptResponse, StepAction};
use crate::cli::output;
use crate::form::{rule_for, Document, FormStore, SectionId, Step, StepOutcome, Wizard};
use crate::submission::Transport;

/// Terminal state of an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionResult {
    Submitted(Value),
    Cancelled,
    Failed(String),
}

enum StepFlow {
    Completed,
    Cancelled,
}

pub fn run_session<T: Transport, I: FormInteraction>(
    wizard: &mut Wizard<T>,
    interaction: &mut I,
) -> SessionResult {
    loop {
        let step = wizard.step();
        output::section(format!(
            "Step {} of {}: {}",
            step.index() + 1,
            Step::ALL.len(),
            step.title()
        ));
        if let Some(banner) = wizard.banner() {
            output::warning(banner);
        }

        if let StepFlow::Cancelled = collect_step(wizard.store_mut(), interaction, step) {
            return SessionResult::Cancelled;
        }

        match interaction.choose_action(step) {
            StepAction::Cancel => return SessionResult::Cancelled,
            StepAction::Previous => {
                wizard.previous();
                continue;
            }
            StepAction::Continue => {}
        }

        match wizard.next() {
            StepOutcome::Advanced(_) => {}
            StepOutcome::Blocked(message) => {
                output::warning(&message);
                print_step_errors(wizard.store(), step);
            }
            StepOutcome::Submitted(body) => {
                output::success("Student enrollment submitted successfully!");
                wizard.restart();
                return SessionResult::Submitted(body);
            }
            StepOutcome::SubmitFailed(message) => {
                output::error(format!("Error: {message}"));
                if !interaction.confirm_retry(&message) {
                    return SessionResult::Failed(message);
                }
            }
        }
    }
}

fn collect_step<I: FormInteraction>(
    store: &mut FormStore,
    interaction: &mut I,
    step: Step,
) -> StepFlow {
    let fields: Vec<(SectionId, &'static str)> = step
        .sections()
        .iter()
        .flat_map(|section| {
            Document::field_names(*section)
                .iter()
                .map(move |field| (*section, *field))
        })
        .collect();

    let mut index = 0;
    while index < fields.len() {
        let (section, field) = fields[index];
        if index == 0 || fields[index - 1].0 != section {
            output::info(section.title());
        }

        let rule = rule_for(section, field);
        let context = PromptContext {
            section,
            field,
            rule: &rule,
            current: store
                .document()
                .get(section, field)
                .map(|value| value.to_string())
                .filter(|value| !value.is_empty()),
            error: store.error(section, field).map(str::to_string),
            index,
            total: fields.len(),
        };

        let response = interaction.prompt_field(&context);
        match response {
            PromptResponse::Cancel => return StepFlow::Cancelled,
            PromptResponse::Back => {
                if index > 0 {
                    index -= 1;
                } else {
                    output::warning("Already at the first field of this step.");
                }
                continue;
            }
            PromptResponse::Keep => {}
            PromptResponse::Value(raw) => {
                let value = match rule.parse_input(&raw) {
                    Ok(value) => value,
                    Err(err) => {
                        output::warning(&err);
                        continue;
                    }
                };
                if let Err(err) = store.update(section, field, value) {
                    output::warning(&err);
                    continue;
                }
            }
        }

        if store.validate_field(section, field) {
            index += 1;
        } else if let Some(message) = store.error(section, field) {
            output::warning(message);
        }
    }

    StepFlow::Completed
}

/// Prints every recorded error of the step's sections.
pub(crate) fn print_step_errors(store: &FormStore, step: Step) {
    for section in step.sections() {
        if let Some(fields) = store.errors().get(section) {
            for (field, message) in fields {
                let label = rule_for(*section, field).label;
                output::detail(format!("{} / {}: {}", section.title(), label, message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SubmissionError;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    const PROMPT_LIMIT: usize = 500;

    /// Answers prompts from a lookup table; unlisted fields keep their value.
    struct ScriptedInteraction {
        answers: HashMap<(SectionId, &'static str), &'static str>,
        actions: VecDeque<StepAction>,
        retries: VecDeque<bool>,
        prompts: usize,
    }

    impl ScriptedInteraction {
        fn new(
            answers: &[(SectionId, &'static str, &'static str)],
            actions: Vec<StepAction>,
        ) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(section, field, value)| ((*section, *field), *value))
                    .collect(),
                actions: actions.into(),
                retries: VecDeque::new(),
                prompts: 0,
            }
        }
    }

    impl FormInteraction for ScriptedInteraction {
        fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
            self.prompts += 1;
            if self.prompts > PROMPT_LIMIT {
                return PromptResponse::Cancel;
            }
            match self.answers.get(&(context.section, context.field)) {
                Some(value) if context.current.as_deref() != Some(*value) => {
                    PromptResponse::Value(value.to_string())
                }
                Some(_) => PromptResponse::Keep,
                None if context.error.is_some() => PromptResponse::Cancel,
                None => PromptResponse::Keep,
            }
        }

        fn choose_action(&mut self, _step: Step) -> StepAction {
            self.actions.pop_front().unwrap_or(StepAction::Cancel)
        }

        fn confirm_retry(&mut self, _message: &str) -> bool {
            self.retries.pop_front().unwrap_or(false)
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: RefCell<Vec<Value>>,
        fail_with: Option<String>,
    }

    impl Transport for RecordingTransport {
        fn send(&self, payload: &Value) -> Result<Value, SubmissionError> {
            self.sent.borrow_mut().push(payload.clone());
            match &self.fail_with {
                Some(message) => Err(SubmissionError::Transport(message.clone())),
                None => Ok(json!({"message": "stored"})),
            }
        }
    }

    fn wizard(transport: RecordingTransport) -> Wizard<RecordingTransport> {
        let store = FormStore::new().with_today(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        Wizard::new(store, transport)
    }

    const COMPLETE_ANSWERS: &[(SectionId, &str, &str)] = &[
        (SectionId::Student, "family_name", "Papadopoulos"),
        (SectionId::Student, "first_given_name", "Eleni"),
        (SectionId::Student, "gender", "female"),
        (SectionId::Student, "date_of_birth", "2014-09-02"),
        (SectionId::Student, "enrollment_year", "k5"),
        (SectionId::Student, "overseas_student", "no"),
        (SectionId::Student, "community_school_name", "Hellenic Community School"),
        (SectionId::Student, "enrolment_date", "2024-02-05"),
        (SectionId::Student, "day_school_name", "Earlwood Public School"),
        (SectionId::Student, "day_school_location", "Earlwood"),
        (SectionId::Student, "attendance_from", "2020-01"),
        (SectionId::Student, "attendance_to", "2024-05"),
        (SectionId::ParentCarer1, "title", "Mr"),
        (SectionId::ParentCarer1, "gender", "Male"),
        (SectionId::ParentCarer1, "relationship_to_student", "Father"),
        (SectionId::ParentCarer1, "family_name", "Papadopoulos"),
        (SectionId::ParentCarer1, "given_name", "Nikos"),
        (SectionId::ParentCarer1, "country_of_birth", "Greece"),
        (SectionId::FirstContact, "parent_name", "Nikos Papadopoulos"),
        (SectionId::FirstContact, "mobile_phone", "0412 345 678"),
        (SectionId::FirstContact, "email", "nikos@example.com"),
        (SectionId::FirstEmergencyContact, "family_name", "Georgiou"),
        (SectionId::FirstEmergencyContact, "given_name", "Maria"),
        (SectionId::FirstEmergencyContact, "mobile_phone", "0498 765 432"),
        (SectionId::PersonalDeclaration, "first_parent_carer_name", "Nikos Papadopoulos"),
        (SectionId::PersonalDeclaration, "first_parent_carer_name_date", "2024-05-30"),
    ];

    #[test]
    fn complete_session_submits_and_resets() {
        let mut wizard = wizard(RecordingTransport::default());
        let mut interaction = ScriptedInteraction::new(
            COMPLETE_ANSWERS,
            vec![StepAction::Continue; 5],
        );

        let result = run_session(&mut wizard, &mut interaction);

        assert_eq!(result, SessionResult::Submitted(json!({"message": "stored"})));
        let sent = wizard.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        let student = &sent[0]["student"];
        assert_eq!(student["gender"], json!("Female"));
        assert_eq!(student["enrollment_year"], json!("K5"));
        assert_eq!(student["overseas_student"], json!(false));
        assert_eq!(student["dates_of_attendance"], json!("2020-01 to 2024-05"));
        assert!(student.get("attendance_from").is_none());
        drop(sent);

        assert_eq!(wizard.step(), Step::Student);
        assert_eq!(wizard.store().document(), &Document::default());
    }

    #[test]
    fn blocked_family_step_reports_banner() {
        let student_only: Vec<_> = COMPLETE_ANSWERS
            .iter()
            .copied()
            .filter(|(section, _, _)| *section == SectionId::Student)
            .collect();
        let mut wizard = wizard(RecordingTransport::default());
        let mut interaction = ScriptedInteraction::new(
            &student_only,
            vec![StepAction::Continue, StepAction::Continue, StepAction::Cancel],
        );

        let result = run_session(&mut wizard, &mut interaction);

        assert_eq!(result, SessionResult::Cancelled);
        assert_eq!(wizard.step(), Step::Family);
        assert_eq!(wizard.banner(), Some(Step::Family.incomplete_message()));
        assert!(wizard.transport().sent.borrow().is_empty());
    }

    #[test]
    fn previous_action_returns_to_earlier_step() {
        let mut wizard = wizard(RecordingTransport::default());
        let mut interaction = ScriptedInteraction::new(
            COMPLETE_ANSWERS,
            vec![StepAction::Continue, StepAction::Previous, StepAction::Cancel],
        );

        let result = run_session(&mut wizard, &mut interaction);

        assert_eq!(result, SessionResult::Cancelled);
        assert_eq!(wizard.step(), Step::Student);
        assert_eq!(
            wizard.store().document().parent_carer_1.given_name,
            "Nikos"
        );
    }

    #[test]
    fn failed_submission_without_retry_reports_failure() {
        let mut wizard = wizard(RecordingTransport {
            fail_with: Some("connection refused".into()),
            ..RecordingTransport::default()
        });
        let mut interaction = ScriptedInteraction::new(
            COMPLETE_ANSWERS,
            vec![StepAction::Continue; 5],
        );

        let result = run_session(&mut wizard, &mut interaction);

        assert_eq!(
            result,
            SessionResult::Failed(
                "Failed to store student enrollment data: connection refused".into()
            )
        );
        assert_eq!(wizard.step(), Step::Declaration);
        assert_eq!(wizard.store().document().student.family_name, "Papadopoulos");
    }

    #[test]
    fn retry_after_failure_submits_again() {
        let mut wizard = wizard(RecordingTransport {
            fail_with: Some("timed out".into()),
            ..RecordingTransport::default()
        });
        let mut interaction = ScriptedInteraction::new(
            COMPLETE_ANSWERS,
            vec![StepAction::Continue; 6],
        );
        interaction.retries.push_back(true);

        let result = run_session(&mut wizard, &mut interaction);

        assert!(matches!(result, SessionResult::Failed(_)));
        assert_eq!(wizard.transport().sent.borrow().len(), 2);
    }
}
