use crate::types::{AppError, Result};

/// Ownership predicate: only a resource's recorded owner may mutate it.
///
/// Pure equality between the resource's owner field and the caller's
/// verified identity. Callers must check that the resource exists before
/// invoking this - existence is always reported before ownership.
pub fn authorize(owner: &str, caller: &str) -> Result<()> {
    if owner == caller {
        Ok(())
    } else {
        Err(AppError::NotAuthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_allowed() {
        assert!(authorize("u1", "u1").is_ok());
    }

    #[test]
    fn other_caller_is_denied() {
        assert!(matches!(
            authorize("u1", "u2"),
            Err(AppError::NotAuthorized)
        ));
    }
}
