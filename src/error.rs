use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no convergence after {sweeps} sweeps, residual={residual}")]
    NonConvergence { sweeps: usize, residual: f64 },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "damping={damping}, expected a value in (0, 1)"
        )))
    }
}

pub(crate) fn check_not_empty<G: algograph::graph::QueryableGraph>(g: &G) -> Result<()> {
    if g.vertex_size() > 0 {
        Ok(())
    } else {
        Err(Error::InvalidInput("graph has no pages".to_string()))
    }
}
