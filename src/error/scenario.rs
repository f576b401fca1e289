use thiserror::Error;

use crate::args::StepId;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Malformed {tag} response body: {source}")]
    MalformedBody {
        tag: StepId,
        #[source]
        source: serde_json::Error,
    },
    #[error("Submit response for message '{id}' has no second recipient; the approval chain needs a next signer.")]
    MissingNextRecipient { id: String },
}
