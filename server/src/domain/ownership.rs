use super::error::DomainError;

/// Mutating a post or a comment requires the actor to be its owner.
/// User mutation is self-scoped via the authenticated identity and never
/// goes through this check.
pub(crate) fn assert_owner(owner_id: i64, actor_id: i64) -> Result<(), DomainError> {
    if owner_id != actor_id {
        return Err(DomainError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::assert_owner;
    use crate::domain::error::DomainError;

    #[test]
    fn owner_passes() {
        assert!(assert_owner(7, 7).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let err = assert_owner(7, 8).expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
    }
}
