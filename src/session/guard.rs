use crate::models::Role;

use super::SessionState;

/// Where a denied consumer should send the operator. `Login` discards the
/// current navigation intent (the console used a history *replace*, not a
/// push); `Home` is the default authenticated landing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Home,
}

/// Outcome of a guard decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Session state is not yet determined; show nothing and wait.
    Pending,
    Denied(Redirect),
    Granted,
}

/// Gate access to a protected surface.
///
/// The decision is suspended while the session is still loading, applied
/// uniformly to every surface. With a resolved state: no token or no user
/// redirects to login; a role requirement the user does not meet (and is not
/// admin) redirects to the landing screen.
pub fn evaluate(state: &SessionState, required: Option<Role>) -> Access {
    if state.loading {
        return Access::Pending;
    }
    let Some(user) = &state.user else {
        return Access::Denied(Redirect::Login);
    };
    if state.token.is_none() {
        return Access::Denied(Redirect::Login);
    }
    match required {
        Some(role) if !user.role.grants(role) => Access::Denied(Redirect::Home),
        _ => Access::Granted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn user_with(role: Role) -> User {
        User {
            id: "u-1".to_string(),
            username: "asha".to_string(),
            role,
            full_name: "Asha Rao".to_string(),
            email: None,
        }
    }

    fn resolved(role: Option<Role>) -> SessionState {
        SessionState {
            loading: false,
            token: role.map(|_| "token".to_string()),
            user: role.map(user_with),
        }
    }

    #[test]
    fn decision_is_suspended_while_loading() {
        let state = SessionState::default();
        assert_eq!(evaluate(&state, None), Access::Pending);
        assert_eq!(evaluate(&state, Some(Role::Hr)), Access::Pending);
    }

    #[test]
    fn missing_session_redirects_to_login() {
        assert_eq!(
            evaluate(&resolved(None), None),
            Access::Denied(Redirect::Login)
        );
    }

    #[test]
    fn token_without_user_redirects_to_login() {
        let state = SessionState {
            loading: false,
            token: Some("token".to_string()),
            user: None,
        };
        assert_eq!(evaluate(&state, None), Access::Denied(Redirect::Login));
    }

    #[test]
    fn role_mismatch_redirects_home() {
        assert_eq!(
            evaluate(&resolved(Some(Role::User)), Some(Role::Hr)),
            Access::Denied(Redirect::Home)
        );
    }

    #[test]
    fn admin_passes_any_role_requirement() {
        assert_eq!(
            evaluate(&resolved(Some(Role::Admin)), Some(Role::Hr)),
            Access::Granted
        );
    }

    #[test]
    fn matching_role_is_granted() {
        assert_eq!(
            evaluate(&resolved(Some(Role::Hr)), Some(Role::Hr)),
            Access::Granted
        );
        assert_eq!(evaluate(&resolved(Some(Role::User)), None), Access::Granted);
    }
}
