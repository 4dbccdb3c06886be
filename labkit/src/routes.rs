//! Client-side route table and the authentication guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The table is static and mirrors the application views. Renderers (the
//! Leptos router, the CLI's `routes` listing) consult it; the guard decides
//! synchronously per navigation so a protected view is never rendered before
//! the decision.
//!
//! DESIGN
//! ======
//! The guard is a pure function of `(full path, authenticated)`. The
//! transport's [`NavigationIntent`] is resolved here against the current path,
//! so a login redirect while already on `/login` is a no-op.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::transport::NavigationIntent;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
/// Query parameter carrying the originally requested path through login.
pub const REDIRECT_QUERY_KEY: &str = "redirect";

#[derive(Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub requires_auth: bool,
    pub redirect: Option<&'static str>,
    pub children: &'static [RouteEntry],
}

const fn leaf(path: &'static str, name: &'static str, title: &'static str) -> RouteEntry {
    RouteEntry { path, name, title, requires_auth: true, redirect: None, children: &[] }
}

const HOME_CHILDREN: &[RouteEntry] = &[
    leaf("/laboratory", "laboratory", "Laboratories"),
    leaf("/equipment", "equipment", "Equipment"),
    leaf("/borrow/apply", "borrowApply", "Borrow request"),
    leaf("/borrow/my", "borrowMy", "My borrows"),
    leaf("/borrow/approval", "borrowApproval", "Borrow approval"),
    leaf("/reservation/apply", "reservationApply", "Reserve a lab"),
    leaf("/reservation/my", "reservationMy", "My reservations"),
    leaf("/reservation/approval", "reservationApproval", "Reservation approval"),
    leaf("/repair/apply", "repairApply", "Report a fault"),
    leaf("/repair/my", "repairMy", "My repairs"),
    leaf("/repair/management", "repairManagement", "Repair management"),
    leaf("/scrap/apply", "scrapApply", "Scrap request"),
    leaf("/scrap/my", "scrapMy", "My scrap requests"),
    leaf("/scrap/approval", "scrapApproval", "Scrap approval"),
];

pub static ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: LOGIN_PATH,
        name: "login",
        title: "Sign in",
        requires_auth: false,
        redirect: None,
        children: &[],
    },
    RouteEntry {
        path: HOME_PATH,
        name: "home",
        title: "Home",
        requires_auth: true,
        redirect: Some("/laboratory"),
        children: HOME_CHILDREN,
    },
    leaf("/about", "about", "About"),
];

/// A route together with whether it, or any ancestor, requires auth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub entry: &'static RouteEntry,
    pub requires_auth: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(String),
}

/// Depth-first walk of the table, carrying the inherited auth flag.
fn walk<F>(entries: &'static [RouteEntry], inherited: bool, pred: &F) -> Option<ResolvedRoute>
where
    F: Fn(&RouteEntry) -> bool,
{
    entries.iter().find_map(|entry| {
        let requires_auth = inherited || entry.requires_auth;
        if pred(entry) {
            return Some(ResolvedRoute { entry, requires_auth });
        }
        walk(entry.children, requires_auth, pred)
    })
}

/// Path component of a full path: no query, no fragment, no trailing slash,
/// and repeated leading slashes collapsed to one.
#[must_use]
pub fn path_only(full_path: &str) -> &str {
    let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
    let path = &full_path[..end];
    let rest = path.trim_start_matches('/');
    let path = if rest.len() < path.len() { &path[path.len() - rest.len() - 1..] } else { path };
    match path.trim_end_matches('/') {
        "" => HOME_PATH,
        trimmed => trimmed,
    }
}

/// Look up a route by its path. Query string and fragment are ignored.
#[must_use]
pub fn find_route(full_path: &str) -> Option<ResolvedRoute> {
    let path = path_only(full_path);
    walk(ROUTES, false, &|entry| entry.path == path)
}

#[must_use]
pub fn find_by_name(name: &str) -> Option<ResolvedRoute> {
    walk(ROUTES, false, &|entry| entry.name == name)
}

/// Whether navigating to `full_path` needs a session. Unknown paths do not.
#[must_use]
pub fn requires_auth(full_path: &str) -> bool {
    find_route(full_path).is_some_and(|route| route.requires_auth)
}

/// Decide one navigation attempt.
#[must_use]
pub fn guard(full_path: &str, authenticated: bool) -> NavigationDecision {
    if requires_auth(full_path) && !authenticated {
        return NavigationDecision::Redirect(login_redirect(full_path));
    }
    if authenticated && path_only(full_path) == LOGIN_PATH {
        let redirect = full_path.split_once('?').and_then(|(_, query)| redirect_param(query));
        return NavigationDecision::Redirect(post_login_target(redirect.as_deref()));
    }
    NavigationDecision::Allow
}

/// `/login?redirect=<full path>`, encoded except for path separators.
#[must_use]
pub fn login_redirect(full_path: &str) -> String {
    let target = urlencoding::encode(full_path).replace("%2F", "/");
    format!("{LOGIN_PATH}?{REDIRECT_QUERY_KEY}={target}")
}

/// Where to go after a successful login. Only local absolute paths are
/// honoured; anything else lands on home.
#[must_use]
pub fn post_login_target(redirect: Option<&str>) -> String {
    match redirect {
        Some(target) if is_local_path(target) && path_only(target) != LOGIN_PATH => target.to_owned(),
        _ => HOME_PATH.to_owned(),
    }
}

fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}

/// Extract and decode the `redirect` parameter from a query string
/// (with or without the leading `?`).
#[must_use]
pub fn redirect_param(query: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == REDIRECT_QUERY_KEY)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}

/// Turn a transport intent into a concrete path, or `None` when the user is
/// already where the intent points.
#[must_use]
pub fn resolve_intent(intent: NavigationIntent, current_path: &str) -> Option<String> {
    match intent {
        NavigationIntent::Login if path_only(current_path) == LOGIN_PATH => None,
        NavigationIntent::Login => Some(LOGIN_PATH.to_owned()),
    }
}

/// Landing path for an entry: its redirect when it has one.
#[must_use]
pub fn landing_path(full_path: &str) -> Option<&'static str> {
    find_route(full_path).and_then(|route| route.entry.redirect)
}

/// Child views of home, grouped by the first path segment, in table order.
#[must_use]
pub fn sections() -> Vec<(&'static str, Vec<&'static RouteEntry>)> {
    let mut groups: Vec<(&'static str, Vec<&'static RouteEntry>)> = Vec::new();
    for entry in HOME_CHILDREN {
        let section = entry.path.trim_start_matches('/').split('/').next().unwrap_or_default();
        match groups.iter_mut().find(|(name, _)| *name == section) {
            Some((_, entries)) => entries.push(entry),
            None => groups.push((section, vec![entry])),
        }
    }
    groups
}
