pub use crate::{
    orchestrator::{MockOrchestrator, Orchestrator},
    types::{ConfirmationRequest, ConfirmationResult, ConfirmationStatus},
};

mod orchestrator;
mod types;
