// File: ./src/router.rs
// Path parsing and the authentication guard.
use crate::session::{Identity, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Journals,
    JournalNew,
    JournalEdit(i64),
    Sessions,
    BookSession,
    Therapists,
    Motivation,
    Profile,
}

impl Route {
    /// `/` and anything unrecognised resolve to the dashboard.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/journals" => Route::Journals,
            "/journal/new" => Route::JournalNew,
            "/sessions" => Route::Sessions,
            "/book-session" => Route::BookSession,
            "/therapists" => Route::Therapists,
            "/motivation" => Route::Motivation,
            "/profile" => Route::Profile,
            other => other
                .strip_prefix("/journal/edit/")
                .and_then(|id| id.parse().ok())
                .map(Route::JournalEdit)
                .unwrap_or(Route::Dashboard),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Journals => "/journals".to_string(),
            Route::JournalNew => "/journal/new".to_string(),
            Route::JournalEdit(id) => format!("/journal/edit/{}", id),
            Route::Sessions => "/sessions".to_string(),
            Route::BookSession => "/book-session".to_string(),
            Route::Therapists => "/therapists".to_string(),
            Route::Motivation => "/motivation".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    /// Navigation entries offered to a role, in display order.
    pub fn menu(role: Role) -> Vec<(Route, &'static str)> {
        let mut items = vec![(Route::Dashboard, "Dashboard")];
        match role {
            Role::EndUser => items.extend([
                (Route::Journals, "Journals"),
                (Route::Sessions, "Sessions"),
                (Route::BookSession, "Book Session"),
                (Route::Therapists, "Therapists"),
            ]),
            Role::Therapist => items.push((Route::Sessions, "My Sessions")),
            Role::Admin => {}
        }
        items.push((Route::Motivation, "Motivation"));
        items.push((Route::Profile, "Profile"));
        items
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(Role),
}

impl AuthState {
    pub fn of(identity: Option<&Identity>) -> Self {
        identity.map_or(AuthState::Unauthenticated, |i| {
            AuthState::Authenticated(i.role)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardVariant {
    EndUser,
    Therapist,
    Admin,
}

impl From<Role> for DashboardVariant {
    fn from(role: Role) -> Self {
        match role {
            Role::EndUser => DashboardVariant::EndUser,
            Role::Therapist => DashboardVariant::Therapist,
            Role::Admin => DashboardVariant::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard(DashboardVariant),
    JournalList,
    /// `None` creates, `Some(id)` edits.
    JournalForm(Option<i64>),
    SessionList,
    BookSession,
    TherapistDirectory,
    Motivation,
    Profile,
}

pub struct Guard;

impl Guard {
    /// Applies redirects and picks the screen. Returns the route actually shown.
    pub fn resolve(route: Route, auth: AuthState) -> (Route, Screen) {
        match auth {
            AuthState::Unauthenticated => match route {
                Route::Register => (Route::Register, Screen::Register),
                _ => (Route::Login, Screen::Login),
            },
            AuthState::Authenticated(role) => {
                let screen = match route {
                    Route::Login | Route::Register | Route::Dashboard => {
                        return (Route::Dashboard, Screen::Dashboard(role.into()));
                    }
                    Route::Journals => Screen::JournalList,
                    Route::JournalNew => Screen::JournalForm(None),
                    Route::JournalEdit(id) => Screen::JournalForm(Some(id)),
                    Route::Sessions => Screen::SessionList,
                    Route::BookSession => Screen::BookSession,
                    Route::Therapists => Screen::TherapistDirectory,
                    Route::Motivation => Screen::Motivation,
                    Route::Profile => Screen::Profile,
                };
                (route, screen)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROUTES: [Route; 11] = [
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Journals,
        Route::JournalNew,
        Route::JournalEdit(4),
        Route::Sessions,
        Route::BookSession,
        Route::Therapists,
        Route::Motivation,
        Route::Profile,
    ];

    #[test]
    fn test_parse_and_path_agree() {
        for route in ALL_ROUTES {
            assert_eq!(Route::parse(&route.path()), route);
        }
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/nowhere"), Route::Dashboard);
        assert_eq!(Route::parse("/journal/edit/abc"), Route::Dashboard);
        assert_eq!(Route::parse("/journals/"), Route::Journals);
    }

    #[test]
    fn test_unauthenticated_sees_only_public_screens() {
        for route in ALL_ROUTES {
            let (shown, screen) = Guard::resolve(route, AuthState::Unauthenticated);
            assert!(shown.is_public(), "{:?} leaked to {:?}", route, shown);
            assert!(matches!(screen, Screen::Login | Screen::Register));
        }
        assert_eq!(
            Guard::resolve(Route::Register, AuthState::Unauthenticated).1,
            Screen::Register
        );
    }

    #[test]
    fn test_exactly_one_dashboard_per_role() {
        let cases = [
            (Role::EndUser, DashboardVariant::EndUser),
            (Role::Therapist, DashboardVariant::Therapist),
            (Role::Admin, DashboardVariant::Admin),
        ];
        for (role, expected) in cases {
            let auth = AuthState::Authenticated(role);
            let dashboards: Vec<_> = ALL_ROUTES
                .iter()
                .filter_map(|r| match Guard::resolve(*r, auth).1 {
                    Screen::Dashboard(v) => Some(v),
                    _ => None,
                })
                .collect();
            assert!(!dashboards.is_empty());
            assert!(dashboards.iter().all(|v| *v == expected));
        }
    }

    #[test]
    fn test_authenticated_public_routes_redirect() {
        let auth = AuthState::Authenticated(Role::EndUser);
        assert_eq!(Guard::resolve(Route::Login, auth).0, Route::Dashboard);
        assert_eq!(Guard::resolve(Route::Register, auth).0, Route::Dashboard);
        assert_eq!(
            Guard::resolve(Route::JournalEdit(9), auth),
            (Route::JournalEdit(9), Screen::JournalForm(Some(9)))
        );
    }

    #[test]
    fn test_menu_per_role() {
        let user_menu = Route::menu(Role::EndUser);
        assert!(user_menu.iter().any(|(r, _)| *r == Route::BookSession));
        let therapist_menu = Route::menu(Role::Therapist);
        assert!(!therapist_menu.iter().any(|(r, _)| *r == Route::Journals));
        assert!(therapist_menu.iter().any(|(r, _)| *r == Route::Sessions));
        let admin_menu = Route::menu(Role::Admin);
        assert_eq!(admin_menu.len(), 3);
    }
}
