//! Route protection decision.

use crate::session::{AuthState, SessionPhase, DASHBOARD_PATH, LOGIN_PATH};

/// What a guarded route should do for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still hydrating: render a neutral placeholder only.
    Wait,
    Render,
    Redirect(&'static str),
}

/// Decision for a page that requires a signed-in user.
pub fn protect(state: &AuthState) -> GuardDecision {
    match state.phase() {
        SessionPhase::Loading => GuardDecision::Wait,
        SessionPhase::Authenticated => GuardDecision::Render,
        SessionPhase::Anonymous => GuardDecision::Redirect(LOGIN_PATH),
    }
}

/// Decision for the login and signup pages, which a signed-in user skips.
pub fn guest_only(state: &AuthState) -> GuardDecision {
    match state.phase() {
        SessionPhase::Loading => GuardDecision::Wait,
        SessionPhase::Authenticated => GuardDecision::Redirect(DASHBOARD_PATH),
        SessionPhase::Anonymous => GuardDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::User;

    fn signed_in() -> AuthState {
        let user: User =
            serde_json::from_str(r#"{"id":"u-1","email":"a@example.com"}"#).unwrap();
        AuthState::authenticated(user)
    }

    #[test]
    fn test_protected_route() {
        assert_eq!(protect(&AuthState::default()), GuardDecision::Wait);
        assert_eq!(protect(&AuthState::anonymous()), GuardDecision::Redirect("/login"));
        assert_eq!(protect(&signed_in()), GuardDecision::Render);
    }

    #[test]
    fn test_guest_only_route() {
        assert_eq!(guest_only(&AuthState::default()), GuardDecision::Wait);
        assert_eq!(guest_only(&AuthState::anonymous()), GuardDecision::Render);
        assert_eq!(guest_only(&signed_in()), GuardDecision::Redirect("/dashboard"));
    }
}
