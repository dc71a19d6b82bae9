use geo_types::Coord;
use std::fmt;

/// Errors surfaced by the top-level algorithm entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A required input was empty, null-like, or out of range.
    InvalidArgument(&'static str),
    /// LU decomposition hit a zero pivot during `solve` or `invert`.
    SingularMatrix,
    /// The iterated-noding loop failed to reach a fixed point. Callers should
    /// retry under a coarser precision model.
    NonConvergentNoding { iterations: usize },
    /// The buffer pipeline found an inconsistency in the noded edge graph.
    TopologyError {
        message: &'static str,
        coordinate: Option<Coord<f64>>,
    },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidArgument(what) => write!(f, "invalid argument: {}", what),
            Error::SingularMatrix => write!(f, "matrix is singular"),
            Error::NonConvergentNoding { iterations } => {
                write!(f, "noding failed to converge after {} iterations", iterations)
            }
            Error::TopologyError {
                message,
                coordinate: Some(c),
            } => write!(f, "{} at ({:?}, {:?})", message, c.x, c.y),
            Error::TopologyError {
                message,
                coordinate: None,
            } => write!(f, "{}", message),
        }
    }
}

impl Error {
    pub(crate) fn topology(message: &'static str, coordinate: Coord<f64>) -> Self {
        Error::TopologyError {
            message,
            coordinate: Some(coordinate),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_output() {
        let err = Error::NonConvergentNoding { iterations: 6 };
        assert_eq!(err.to_string(), "noding failed to converge after 6 iterations");

        let err = Error::topology("depth mismatch", geo_types::coord! { x: 1.5, y: 2.0 });
        assert_eq!(err.to_string(), "depth mismatch at (1.5, 2.0)");
    }
}
