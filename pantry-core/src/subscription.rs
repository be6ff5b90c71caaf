use crate::error::SubscriptionError;

/// A user can follow anyone but themselves.
pub fn ensure_distinct<T: PartialEq + ?Sized>(user: &T, author: &T) -> Result<(), SubscriptionError> {
    if user == author {
        return Err(SubscriptionError::SelfSubscription);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_same_user() {
        for id in [0, 1, 42, i64::MAX] {
            assert_eq!(
                ensure_distinct(&id, &id),
                Err(SubscriptionError::SelfSubscription)
            );
        }
        assert_eq!(
            ensure_distinct("anna", "anna"),
            Err(SubscriptionError::SelfSubscription)
        );
    }

    #[test]
    fn test_accepts_different_users() {
        assert_eq!(ensure_distinct(&1, &2), Ok(()));
        assert_eq!(ensure_distinct("anna", "boris"), Ok(()));
    }
}
