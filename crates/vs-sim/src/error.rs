use vs_core::{MemberId, VsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{member} is outside the population of {group_size} members")]
    MemberOutOfRange {
        member:     MemberId,
        group_size: usize,
    },

    #[error("the simulation has stopped and cannot accept this request")]
    Stopped,

    #[error("failed to spawn the scheduler thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl From<VsError> for SimError {
    fn from(err: VsError) -> Self {
        match err {
            VsError::Config(msg) => SimError::Config(msg),
            VsError::MemberOutOfRange { member, group_size } => {
                SimError::MemberOutOfRange { member, group_size }
            }
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
