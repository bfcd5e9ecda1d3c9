use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unknown label: {0}")]
    UnknownLabel(String),
    #[error("no path from {from} to {to}")]
    UnreachableGoal { from: String, to: String },
    #[error("cannot form {k} clusters from {available} distinct points")]
    InsufficientPoints { k: usize, available: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn unknown_label(label: impl Into<String>) -> Self {
        Self::UnknownLabel(label.into())
    }

    pub fn unreachable(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnreachableGoal {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn unreachable_names_both_endpoints() {
        let err = Error::unreachable("A", "B");
        assert_eq!(err.to_string(), "no path from A to B");
    }

    #[test]
    fn insufficient_points_reports_counts() {
        let err = Error::InsufficientPoints { k: 3, available: 2 };
        assert_eq!(
            err.to_string(),
            "cannot form 3 clusters from 2 distinct points"
        );
    }
}
