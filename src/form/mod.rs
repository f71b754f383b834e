//! Form state and validation engine: document model, field registry,
//! validator, state store and the wizard controller.

pub mod document;
pub mod registry;
pub mod store;
pub mod validator;
pub mod wizard;

pub use document::{Document, FieldValue, SectionId};
pub use registry::{rule_for, Rule, RuleKind};
pub use store::{ErrorMap, FieldStatus, FormStore, SubmissionState};
pub use validator::ValidationError;
pub use wizard::{check_step, Step, StepOutcome, Wizard};
