use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("goal!goal!").unwrap();
        assert!(verify_password("goal!goal!", &hashed));
        assert!(!verify_password("offside", &hashed));
        assert!(!verify_password("goal!goal!", "not-a-bcrypt-hash"));
    }
}
