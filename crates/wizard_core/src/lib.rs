//! Multi-step payment form engine: field rules, step navigation, repeatable
//! blocks, draft persistence and the review summary.

pub mod blocks;
pub mod controller;
pub mod effects;
pub mod flows;
pub mod rules;
pub mod session;
pub mod summary;
pub mod validator;

pub use controller::{FieldReport, StepController, StepReport};
pub use effects::{Command, Effect};
pub use flows::FlowDefinition;
pub use rules::RuleRegistry;
pub use session::{LoggingSubmitter, SubmitHandler, View, WizardSession};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
