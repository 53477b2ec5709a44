//! Route authorization decisions.

use crate::session::SessionState;
use healthlink_api::response::Role;

/// What a protected view should do on this render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// The session is still bootstrapping or refreshing; show a neutral
    /// loading indicator, do not redirect yet.
    Loading,
    Allow,
    /// Not authenticated.
    RedirectToLogin,
    /// Authenticated but the role is not in the required set.
    RedirectToUnauthorized,
}

/// Decides whether a protected view may render.
///
/// An empty `required_roles` set means any authenticated role is allowed.
/// Evaluated on every render of a protected view, so a cleared session is
/// always caught.
pub fn authorize(state: &SessionState, loading: bool, required_roles: &[Role]) -> RouteDecision {
    if loading {
        return RouteDecision::Loading;
    }
    match state {
        SessionState::Bootstrapping => RouteDecision::Loading,
        SessionState::Anonymous => RouteDecision::RedirectToLogin,
        SessionState::Authenticated(user) => {
            if required_roles.is_empty() || required_roles.contains(&user.role) {
                RouteDecision::Allow
            } else {
                RouteDecision::RedirectToUnauthorized
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use healthlink_api::response::{Profile, User};

    fn authenticated(role: Role) -> SessionState {
        SessionState::Authenticated(User {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            role,
            profile: Profile {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                date_of_birth: None,
                phone_number: None,
                bio: None,
                medical_license_number: None,
                specialties: None,
                hospital_affiliations: None,
                average_rating: None,
                num_reviews: None,
                managed_hospital_id: None,
                managed_pharmacy_id: None,
            },
        })
    }

    #[test]
    fn bootstrapping_never_redirects() {
        assert_eq!(
            authorize(&SessionState::Bootstrapping, true, &[Role::Patient]),
            RouteDecision::Loading
        );
    }

    #[test]
    fn anonymous_redirects_to_login() {
        assert_eq!(
            authorize(&SessionState::Anonymous, false, &[]),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn wrong_role_redirects_to_unauthorized_not_login() {
        assert_eq!(
            authorize(&authenticated(Role::Doctor), false, &[Role::Patient]),
            RouteDecision::RedirectToUnauthorized
        );
    }

    #[test]
    fn matching_role_is_allowed() {
        assert_eq!(
            authorize(
                &authenticated(Role::HospitalAdmin),
                false,
                &[Role::Admin, Role::HospitalAdmin]
            ),
            RouteDecision::Allow
        );
    }

    #[test]
    fn empty_required_set_admits_every_authenticated_role() {
        for role in [
            Role::Patient,
            Role::Doctor,
            Role::Admin,
            Role::HospitalAdmin,
            Role::PharmacyAdmin,
        ] {
            assert_eq!(
                authorize(&authenticated(role), false, &[]),
                RouteDecision::Allow
            );
        }
    }
}
