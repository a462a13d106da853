#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("no data")]
    NoData,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ReadError> for CreateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NoData => CreateError::Storage(StorageError::Other("no data".into())),
            ReadError::Storage(storage) => CreateError::Storage(storage),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("no row selected")]
    NoSelection,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ReadError> for UpdateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NoData => UpdateError::Storage(StorageError::Other("no data".into())),
            ReadError::Storage(storage) => UpdateError::Storage(storage),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error("no row selected")]
    NoSelection,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ReadError> for DeleteError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NoData => DeleteError::Storage(StorageError::Other("no data".into())),
            ReadError::Storage(storage) => DeleteError::Storage(storage),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection: {0}")]
    NoConnection(String),
    #[error("incompatible schema: {0}")]
    Schema(String),
    #[error("constraint violated: {0}")]
    Constraint(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} must be numeric")]
    NotANumber(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{0} must not exceed {max}", max = crate::Amount::MAX)]
    OutOfRange(&'static str),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_create_error_from_read_error() {
        assert!(matches!(
            CreateError::from(ReadError::Storage(StorageError::NoConnection("foo".into()))),
            CreateError::Storage(StorageError::NoConnection(reason)) if reason == "foo"
        ));
        assert!(matches!(
            CreateError::from(ReadError::NoData),
            CreateError::Storage(StorageError::Other(error)) if error.to_string() == "no data"
        ));
    }

    #[test]
    fn test_update_error_from_read_error() {
        assert!(matches!(
            UpdateError::from(ReadError::Storage(StorageError::Schema("flats".into()))),
            UpdateError::Storage(StorageError::Schema(_))
        ));
    }

    #[test]
    fn test_delete_error_from_read_error() {
        assert!(matches!(
            DeleteError::from(ReadError::Storage(StorageError::Constraint("x".into()))),
            DeleteError::Storage(StorageError::Constraint(_))
        ));
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::NotANumber("Price").to_string(),
            "Price must be numeric"
        );
        assert_eq!(
            ValidationError::OutOfRange("Budget").to_string(),
            "Budget must not exceed 99999999.99"
        );
    }
}
