//! The scripted mail/approval workflow: the run plan, per-iteration state,
//! typed request/reply schemas, and the gated step sequence itself.
mod context;
mod forms;
mod plan;
mod schema;
mod steps;


pub use context::IterationContext;
pub use forms::FormCatalog;
pub use plan::ScenarioPlan;
pub use schema::{
    ComposeReply, FormRef, LoginReply, LoginRequest, Recipient, SubmitReply, UpdateReply,
    UpdateRequest,
};

pub(crate) use steps::{WorkerContext, run_iteration};
