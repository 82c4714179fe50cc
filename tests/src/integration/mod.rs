//! Cross-subsystem flows: admission through sealing to persistence.

mod admission_flows;
mod persistence_flows;
mod sealing_flows;
