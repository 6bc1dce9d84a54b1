//! Generation tokens for superseding in-flight layout passes.
//!
//! Each triggered pass carries a token; when the pass reaches the point of
//! applying its result, it asks the issuer whether its token is still the
//! latest. A newer trigger issues a newer token, so the older pass's result
//! is discarded instead of overwriting fresher state. This check is the
//! system's only ordering guarantee and substitutes for locking.

/// Token identifying one triggered reflow pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReflowToken(u64);

/// Issues monotonically increasing tokens and tracks which is current.
#[derive(Debug, Default)]
pub struct TokenIssuer {
    latest: u64,
}

impl TokenIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding every previously issued one.
    pub fn issue(&mut self) -> ReflowToken {
        self.latest += 1;
        ReflowToken(self.latest)
    }

    /// Whether `token` is still the latest issued.
    pub fn is_current(&self, token: ReflowToken) -> bool {
        token.0 == self.latest
    }

    /// Invalidate every outstanding token without issuing a new one.
    /// Used at disposal so no pass can apply its result afterwards.
    pub fn invalidate_all(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newly_issued_token_is_current() {
        let mut issuer = TokenIssuer::new();
        let token = issuer.issue();

        assert!(issuer.is_current(token));
    }

    #[test]
    fn newer_token_supersedes_older_one() {
        let mut issuer = TokenIssuer::new();
        let old = issuer.issue();
        let new = issuer.issue();

        assert!(!issuer.is_current(old));
        assert!(issuer.is_current(new));
    }

    #[test]
    fn invalidate_all_leaves_no_current_token() {
        let mut issuer = TokenIssuer::new();
        let token = issuer.issue();

        issuer.invalidate_all();

        assert!(!issuer.is_current(token));
    }

    #[test]
    fn tokens_are_strictly_increasing() {
        let mut issuer = TokenIssuer::new();
        let first = issuer.issue();
        let second = issuer.issue();

        assert!(second > first);
    }
}
