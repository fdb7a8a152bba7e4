use thiserror::Error;

/// Errors raised while assembling a graph.  Evaluation itself never fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("{node} needs at least {min} source(s), got {got}")]
    TooFewSources {
        node: &'static str,
        min:  usize,
        got:  usize,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;
