use thiserror::Error;

use crate::eval::EvalError;
use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Eval error: {0}")]
    Eval(#[from] EvalError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Config error: {0}")]
    Config(String),
}

pub type InternalResult<T> = Result<T, Error>;
