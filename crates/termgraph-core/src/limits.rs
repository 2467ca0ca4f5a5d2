//! Input validation limits for resource protection

/// Maximum length for a term id (256 chars)
pub const MAX_TERM_ID_LEN: usize = 256;

/// Maximum ids in a single batch request (1000)
pub const MAX_BATCH_IDS: usize = 1000;

/// Maximum edges in a single enumerated path (50)
pub const MAX_PATH_DEPTH: usize = 50;

/// Maximum number of paths returned by one path query (10000)
pub const MAX_PATHS: usize = 10000;

/// Default edges per enumerated path
pub const DEFAULT_PATH_DEPTH: usize = 20;

/// Default number of paths returned by one path query
pub const DEFAULT_MAX_PATHS: usize = 100;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    TermIdTooLong { len: usize, max: usize },
    TooManyIds { count: usize, max: usize },
    PathDepthTooLarge { depth: usize, max: usize },
    TooManyPaths { count: usize, max: usize },
    ZeroPathLimit,
    EmptyTermId,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TermIdTooLong { len, max } => {
                write!(f, "Term id too long: {} chars (max {})", len, max)
            }
            Self::TooManyIds { count, max } => {
                write!(f, "Too many ids in batch: {} (max {})", count, max)
            }
            Self::PathDepthTooLarge { depth, max } => {
                write!(f, "Path depth too large: {} (max {})", depth, max)
            }
            Self::TooManyPaths { count, max } => {
                write!(f, "Too many paths requested: {} (max {})", count, max)
            }
            Self::ZeroPathLimit => write!(f, "Path limits must be greater than zero"),
            Self::EmptyTermId => write!(f, "Term id cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a single term id
pub fn validate_term_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyTermId);
    }
    if id.len() > MAX_TERM_ID_LEN {
        return Err(ValidationError::TermIdTooLong {
            len: id.len(),
            max: MAX_TERM_ID_LEN,
        });
    }
    Ok(())
}

/// Validate batch id count
pub fn validate_batch_ids(count: usize) -> Result<(), ValidationError> {
    if count > MAX_BATCH_IDS {
        return Err(ValidationError::TooManyIds {
            count,
            max: MAX_BATCH_IDS,
        });
    }
    Ok(())
}

/// Validate path enumeration bounds
pub fn validate_path_limits(max_paths: usize, max_depth: usize) -> Result<(), ValidationError> {
    if max_paths == 0 || max_depth == 0 {
        return Err(ValidationError::ZeroPathLimit);
    }
    if max_depth > MAX_PATH_DEPTH {
        return Err(ValidationError::PathDepthTooLarge {
            depth: max_depth,
            max: MAX_PATH_DEPTH,
        });
    }
    if max_paths > MAX_PATHS {
        return Err(ValidationError::TooManyPaths {
            count: max_paths,
            max: MAX_PATHS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_term_id() {
        assert!(validate_term_id("GO:0006915").is_ok());
        assert_eq!(validate_term_id(""), Err(ValidationError::EmptyTermId));
        assert_eq!(validate_term_id("   "), Err(ValidationError::EmptyTermId));
        assert!(validate_term_id(&"x".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_batch_ids() {
        assert!(validate_batch_ids(MAX_BATCH_IDS).is_ok());
        assert!(validate_batch_ids(MAX_BATCH_IDS + 1).is_err());
    }

    #[test]
    fn test_validate_path_limits() {
        assert!(validate_path_limits(DEFAULT_MAX_PATHS, DEFAULT_PATH_DEPTH).is_ok());
        assert_eq!(validate_path_limits(0, 5), Err(ValidationError::ZeroPathLimit));
        assert!(validate_path_limits(5, MAX_PATH_DEPTH + 1).is_err());
        assert!(validate_path_limits(MAX_PATHS + 1, 5).is_err());
    }
}
