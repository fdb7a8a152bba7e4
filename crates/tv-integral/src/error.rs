use thiserror::Error;
use tv_core::TvError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntegralError {
    #[error(transparent)]
    Config(#[from] TvError),
}

pub type IntegralResult<T> = Result<T, IntegralError>;
