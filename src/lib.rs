pub mod analytes;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod input;
pub mod math;
pub mod model;
pub mod panels;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod strategies;

pub use engine::Engine;
pub use model::state::PathwayState;
pub use pipeline::stage4_state::{EngineContext, compute_pathway_state, compute_pathway_states};
pub use pipeline::stage5_summary::{PathwaySummary, summarize_pathway_states};
