use thiserror::Error;

use crate::model::ParseIdError;
use crate::quiz::QuizStateError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizStateError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}
