//! Route table and access gating.
//!
//! Client-side only: a fixed set of surfaces, every one except the
//! landing screen gated on an authenticated session. Unauthenticated
//! access to a protected route silently redirects to the landing route;
//! an unknown path resolves to a dedicated not-found surface, never an
//! error.

use std::fmt;

/// One addressable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Home,
    Dashboard,
    Relationships,
    Timeline,
    Anomalies,
    NotFound,
}

impl Route {
    /// All real surfaces, in navigation order (excludes `NotFound`).
    pub const NAVIGABLE: [Route; 6] = [
        Route::Landing,
        Route::Home,
        Route::Dashboard,
        Route::Relationships,
        Route::Timeline,
        Route::Anomalies,
    ];

    /// Parse a path. Anything unknown is `NotFound`.
    pub fn parse(path: &str) -> Self {
        match path {
            "/" => Route::Landing,
            "/home" => Route::Home,
            "/dashboard" => Route::Dashboard,
            "/dashboard/relationships" => Route::Relationships,
            "/dashboard/timeline" => Route::Timeline,
            "/dashboard/anomalies" => Route::Anomalies,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Home => "/home",
            Route::Dashboard => "/dashboard",
            Route::Relationships => "/dashboard/relationships",
            Route::Timeline => "/dashboard/timeline",
            Route::Anomalies => "/dashboard/anomalies",
            Route::NotFound => "/404",
        }
    }

    /// Every route except the landing screen requires a session.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Landing)
    }

    /// Apply the access rules to a requested route.
    ///
    /// - protected route without a session -> `Landing` (silent redirect)
    /// - `Landing` with a session -> `Home`
    pub fn resolve(requested: Route, authenticated: bool) -> Route {
        if requested.requires_auth() && !authenticated {
            return Route::Landing;
        }
        if requested == Route::Landing && authenticated {
            return Route::Home;
        }
        requested
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_for_real_routes() {
        for route in Route::NAVIGABLE {
            assert_eq!(Route::parse(route.path()), route);
        }
    }

    #[test]
    fn test_unknown_paths_hit_not_found() {
        assert_eq!(Route::parse("/nope"), Route::NotFound);
        assert_eq!(Route::parse("/dashboard/extra"), Route::NotFound);
        assert_eq!(Route::parse(""), Route::NotFound);
    }

    #[test]
    fn test_protected_routes_redirect_without_a_session() {
        for route in [
            Route::Home,
            Route::Dashboard,
            Route::Relationships,
            Route::Timeline,
            Route::Anomalies,
            Route::NotFound,
        ] {
            assert_eq!(Route::resolve(route, false), Route::Landing);
        }
    }

    #[test]
    fn test_authenticated_requests_pass_through() {
        for route in [
            Route::Home,
            Route::Dashboard,
            Route::Relationships,
            Route::Timeline,
            Route::Anomalies,
        ] {
            assert_eq!(Route::resolve(route, true), route);
        }
    }

    #[test]
    fn test_landing_redirects_home_once_authenticated() {
        assert_eq!(Route::resolve(Route::Landing, true), Route::Home);
        assert_eq!(Route::resolve(Route::Landing, false), Route::Landing);
    }
}
