//! Linear five-step wizard that gates forward navigation on section validity
//! and hands the finished document to the submission adapter.

use std::fmt;

use serde_json::Value;
use tracing::{info, warn};

use super::document::SectionId;
use super::store::FormStore;
use super::validator;
use crate::submission::{self, Transport};

/// One screen of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    Student,
    Family,
    Contacts,
    Emergency,
    Declaration,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Student,
        Step::Family,
        Step::Contacts,
        Step::Emergency,
        Step::Declaration,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Step::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Student => "Student details",
            Step::Family => "Family details - Parent/Carer Information",
            Step::Contacts => "Family details - Contact Information",
            Step::Emergency => "Family details - Additional Details",
            Step::Declaration => "Personal information and declaration of accuracy",
        }
    }

    /// Sections owned (and validated) by this step.
    pub fn sections(self) -> &'static [SectionId] {
        match self {
            Step::Student => &[SectionId::Student],
            Step::Family => &[
                SectionId::ParentCarer1,
                SectionId::ParentCarer2,
                SectionId::ParentLivingDetails,
            ],
            Step::Contacts => &[
                SectionId::FirstContact,
                SectionId::SecondContact,
                SectionId::ParentNotLiving,
            ],
            Step::Emergency => &[
                SectionId::FirstEmergencyContact,
                SectionId::SecondEmergencyContact,
            ],
            Step::Declaration => &[SectionId::PersonalDeclaration],
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Declaration
    }

    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }

    /// Banner shown when a field owned by the step fails validation.
    pub fn invalid_fields_message(self) -> &'static str {
        match self {
            Step::Student => "Please fix the highlighted student details before continuing.",
            Step::Family => "Please fix the highlighted parent/carer details before continuing.",
            Step::Contacts => "Please fix the highlighted contact details before continuing.",
            Step::Emergency => {
                "Please fix the highlighted emergency contact details before continuing."
            }
            Step::Declaration => "Please complete the declaration before submitting.",
        }
    }

    /// Banner shown when the step's alternative-completion predicate fails.
    pub fn incomplete_message(self) -> &'static str {
        match self {
            Step::Family => {
                "Please complete Parent/Carer 1, Parent/Carer 2, or the living details section before continuing."
            }
            Step::Contacts => {
                "Please complete at least one contact: first contact, second contact, or parent not living with the student."
            }
            Step::Emergency => "Please provide at least one emergency contact.",
            Step::Student | Step::Declaration => self.invalid_fields_message(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Runs the step's gate: every owned section must validate, then the step's
/// alternative-completion predicate must hold. Returns the banner on failure.
pub fn check_step(store: &mut FormStore, step: Step) -> Result<(), &'static str> {
    let sections_valid = step
        .sections()
        .iter()
        .fold(true, |all_valid, section| {
            store.validate_section(*section) && all_valid
        });
    if !sections_valid {
        return Err(step.invalid_fields_message());
    }

    let document = store.document();
    let complete = match step {
        Step::Family => validator::family_step_complete(document),
        Step::Contacts => validator::contact_step_complete(document),
        Step::Emergency => validator::emergency_step_complete(document),
        Step::Student | Step::Declaration => true,
    };
    if complete {
        Ok(())
    } else {
        Err(step.incomplete_message())
    }
}

/// Result of a navigation or submission request.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Advanced(Step),
    Blocked(String),
    Submitted(Value),
    SubmitFailed(String),
}

/// Wizard controller for one enrolment session.
pub struct Wizard<T: Transport> {
    store: FormStore,
    step: Step,
    banner: Option<String>,
    transport: T,
}

impl<T: Transport> Wizard<T> {
    pub fn new(store: FormStore, transport: T) -> Self {
        Self {
            store,
            step: Step::Student,
            banner: None,
            transport,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Step-level error banner, if gating or submission failed. A failed
    /// submission stays visible across navigation until the next attempt.
    pub fn banner(&self) -> Option<&str> {
        self.banner
            .as_deref()
            .or(self.store.submission().error.as_deref())
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_submitting(&self) -> bool {
        self.store.submission().in_flight
    }

    /// Advances one step when the current one passes its gate. On the
    /// declaration step this submits instead.
    pub fn next(&mut self) -> StepOutcome {
        if self.step.is_terminal() {
            return self.submit();
        }

        match check_step(&mut self.store, self.step) {
            Ok(()) => {
                let from = self.step;
                self.step = self.step.next().unwrap_or(self.step);
                self.banner = None;
                info!(from = ?from, to = ?self.step, "wizard advanced");
                StepOutcome::Advanced(self.step)
            }
            Err(message) => {
                warn!(step = ?self.step, message, "wizard blocked");
                self.banner = Some(message.to_string());
                StepOutcome::Blocked(message.to_string())
            }
        }
    }

    /// Steps back unconditionally; entered data is left untouched.
    pub fn previous(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
            self.banner = None;
        }
        self.step
    }

    /// Validates the declaration and posts the document. Earlier sections
    /// are trusted because their own steps already gated past them.
    pub fn submit(&mut self) -> StepOutcome {
        let payload = match self.begin_submission() {
            Ok(payload) => payload,
            Err(message) => return StepOutcome::Blocked(message),
        };
        let result = self.transport.send(&payload);
        self.finish_submission(result)
    }

    /// First half of [`Wizard::submit`] for front ends that deliver the
    /// payload themselves. Marks the request in flight; a second call before
    /// [`Wizard::finish_submission`] is refused.
    pub fn begin_submission(&mut self) -> Result<Value, String> {
        if !self.step.is_terminal() {
            return Err("Submission is only available on the declaration step.".to_string());
        }
        if self.is_submitting() {
            return Err("A submission is already in progress.".to_string());
        }
        self.store.clear_submission_error();
        if let Err(message) = check_step(&mut self.store, Step::Declaration) {
            warn!(message, "submission blocked");
            self.banner = Some(message.to_string());
            return Err(message.to_string());
        }

        let payload = match submission::build_payload(self.store.document()) {
            Ok(payload) => payload,
            Err(err) => {
                let message = err.to_string();
                self.store.submission_mut().error = Some(message.clone());
                self.banner = Some(message.clone());
                return Err(message);
            }
        };

        self.store.clear_success();
        self.store.submission_mut().in_flight = true;
        Ok(payload)
    }

    /// Records the delivery result started by [`Wizard::begin_submission`].
    pub fn finish_submission(
        &mut self,
        result: Result<Value, crate::errors::SubmissionError>,
    ) -> StepOutcome {
        let state = self.store.submission_mut();
        state.in_flight = false;
        match result {
            Ok(body) => {
                state.success = true;
                self.banner = None;
                info!("enrolment submitted");
                StepOutcome::Submitted(body)
            }
            Err(err) => {
                let message = err.to_string();
                state.error = Some(message.clone());
                self.banner = Some(message.clone());
                warn!(error = %message, "enrolment submission failed");
                StepOutcome::SubmitFailed(message)
            }
        }
    }

    /// Discards the session's data and returns to the first step.
    pub fn restart(&mut self) {
        self.store.reset();
        self.step = Step::Student;
        self.banner = None;
    }
}
