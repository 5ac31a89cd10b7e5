use thiserror::Error;
use ws_core::{SubjectId, WsError};

use crate::WorkspotState;

#[derive(Debug, Error)]
pub enum InstanceError {
    #[error(transparent)]
    Core(#[from] WsError),

    #[error("tree '{0}' has no root entry")]
    MissingRoot(String),

    #[error("tree '{0}' produced nothing to play")]
    NothingToPlay(String),

    #[error("instance for {subject} cannot be set up from state {state:?}")]
    AlreadyStarted {
        subject: SubjectId,
        state:   WorkspotState,
    },
}

pub type InstanceResult<T> = Result<T, InstanceError>;
