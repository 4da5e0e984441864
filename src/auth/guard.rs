//! Route guard — pure decision over the auth phase.

use super::context::AuthPhase;

/// What a protected view should do for a given auth phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the protected content.
    Render,
    /// Hydration is still in progress; show a loading indicator.
    Loading,
    /// Send the user to the login entry point.
    RedirectToLogin,
}

/// Gate a protected view on the authentication phase. No state of its
/// own; callers take a fresh snapshot and ask again after any transition.
pub fn decide(phase: AuthPhase) -> RouteDecision {
    match phase {
        AuthPhase::Authenticated => RouteDecision::Render,
        AuthPhase::Loading => RouteDecision::Loading,
        AuthPhase::Anonymous => RouteDecision::RedirectToLogin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_only_when_authenticated() {
        assert_eq!(decide(AuthPhase::Authenticated), RouteDecision::Render);
        assert_eq!(decide(AuthPhase::Loading), RouteDecision::Loading);
        assert_eq!(decide(AuthPhase::Anonymous), RouteDecision::RedirectToLogin);
    }
}
