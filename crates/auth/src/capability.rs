use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No credential, or one that is not a well-formed bearer token.
    #[error("missing or malformed bearer token")]
    Unauthenticated,

    /// A bearer token was presented but does not grant the capability.
    #[error("bearer token does not grant admin access")]
    Forbidden,
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
///
/// The token is everything after the single space, verbatim. Padding is part
/// of the token, so it will not match the secret.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::Unauthenticated)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::Unauthenticated)?;

    if token.is_empty() {
        return Err(AuthError::Unauthenticated);
    }

    Ok(token)
}

/// The single shared admin secret.
///
/// This is a binary capability: a request either presents the secret or it
/// does not. There are no users, expiry or rotation. With no secret configured
/// the gate stays closed and every token is refused.
#[derive(Clone)]
pub struct AdminCapability {
    secret: Option<Box<[u8]>>,
}

impl AdminCapability {
    /// An empty secret is treated as no secret.
    pub fn from_secret(secret: Option<String>) -> Self {
        let secret = secret
            .filter(|s| !s.is_empty())
            .map(|s| s.into_bytes().into_boxed_slice());
        Self { secret }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Check a raw `Authorization` header value.
    pub fn authorize(&self, header: Option<&str>) -> Result<(), AuthError> {
        let token = extract_bearer(header)?;
        match &self.secret {
            Some(secret) if constant_time_eq(secret, token.as_bytes()) => Ok(()),
            _ => Err(AuthError::Forbidden),
        }
    }
}

impl core::fmt::Debug for AdminCapability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminCapability")
            .field("configured", &self.is_configured())
            .finish()
    }
}

// Length is not secret; only the byte comparison avoids early exit.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AdminCapability {
        AdminCapability::from_secret(Some("s3cret".to_string()))
    }

    #[test]
    fn matching_token_is_granted() {
        assert_eq!(gate().authorize(Some("Bearer s3cret")), Ok(()));
    }

    #[test]
    fn padded_token_does_not_match() {
        for header in ["Bearer   s3cret  ", "Bearer  s3cret", "Bearer s3cret ", "Bearer s3cret extra"] {
            assert_eq!(gate().authorize(Some(header)), Err(AuthError::Forbidden), "header {header:?}");
        }
    }

    #[test]
    fn extract_bearer_returns_the_raw_remainder() {
        assert_eq!(extract_bearer(Some("Bearer abc")), Ok("abc"));
        assert_eq!(extract_bearer(Some("Bearer  abc ")), Ok(" abc "));
        assert_eq!(extract_bearer(Some("Bearer ")), Err(AuthError::Unauthenticated));
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        assert_eq!(gate().authorize(None), Err(AuthError::Unauthenticated));
    }

    #[test]
    fn non_bearer_schemes_are_unauthenticated() {
        for header in ["Basic czNjcmV0", "bearer s3cret", "s3cret", "Bearer", "Bearer "] {
            assert_eq!(
                gate().authorize(Some(header)),
                Err(AuthError::Unauthenticated),
                "header {header:?}"
            );
        }
    }

    #[test]
    fn wrong_token_is_forbidden() {
        assert_eq!(gate().authorize(Some("Bearer wrong")), Err(AuthError::Forbidden));
        assert_eq!(gate().authorize(Some("Bearer s3cret2")), Err(AuthError::Forbidden));
        assert_eq!(gate().authorize(Some("Bearer s3cre")), Err(AuthError::Forbidden));
    }

    #[test]
    fn unconfigured_secret_refuses_every_token() {
        for secret in [None, Some(String::new())] {
            let gate = AdminCapability::from_secret(secret);
            assert!(!gate.is_configured());
            assert_eq!(gate.authorize(Some("Bearer anything")), Err(AuthError::Forbidden));
            assert_eq!(gate.authorize(None), Err(AuthError::Unauthenticated));
        }
    }

    #[test]
    fn debug_output_does_not_leak_the_secret() {
        let rendered = format!("{:?}", gate());
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("configured: true"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: only the exact secret is granted.
            #[test]
            fn only_the_exact_secret_is_granted(
                secret in "[A-Za-z0-9]{1,32}",
                presented in "[A-Za-z0-9]{1,32}",
            ) {
                let gate = AdminCapability::from_secret(Some(secret.clone()));
                let result = gate.authorize(Some(&format!("Bearer {presented}")));
                if presented == secret {
                    prop_assert_eq!(result, Ok(()));
                } else {
                    prop_assert_eq!(result, Err(AuthError::Forbidden));
                }
            }
        }
    }
}
