//! Route table assembly and path matching.
//!
//! [`fix_routes`] turns a flat `(resource name, target)` table into the
//! regex route patterns a host router consumes; [`RouteSet`] is the
//! equivalent matcher for hosts without one. Both treat a path as
//! `<base>/<resource>[/<arg>]` where the optional arg is everything after
//! the first slash following the resource name and may itself contain
//! slashes.

/// Expand each `(name, target)` pair into the route pattern
/// `<base>/(<name>)(?:/(.*))?`, preserving table order.
///
/// Group 1 captures the resource name, group 2 the optional argument. With
/// no base the patterns are root-relative (`/(<name>)(?:/(.*))?`).
pub fn fix_routes<T: Clone>(routes: &[(&str, T)], base: Option<&str>) -> Vec<(String, T)> {
    let base = base.unwrap_or("");
    routes
        .iter()
        .map(|(name, target)| (format!("{base}/({name})(?:/(.*))?"), target.clone()))
        .collect()
}

/// A resolved route: the table target plus the captured path pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, T> {
    pub target: &'a T,
    pub resource: String,
    pub arg: Option<String>,
}

/// Path matcher over a `fix_routes`-style table.
#[derive(Debug, Clone, Default)]
pub struct RouteSet<T> {
    base: String,
    routes: Vec<(String, T)>,
}

impl<T> RouteSet<T> {
    pub fn new(base: Option<&str>) -> Self {
        Self {
            base: base.unwrap_or("").to_string(),
            routes: Vec::new(),
        }
    }

    /// Register a resource name and its target. First match wins on resolve.
    pub fn add(mut self, name: impl Into<String>, target: T) -> Self {
        self.routes.push((name.into(), target));
        self
    }

    /// Resolve a raw request path against the table.
    ///
    /// An empty trailing argument (`/todos/`) resolves the same as no
    /// argument at all.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_, T>> {
        let rest = path.strip_prefix(self.base.as_str())?;
        let after = rest.strip_prefix('/')?;
        for (name, target) in &self.routes {
            let Some(tail) = after.strip_prefix(name.as_str()) else {
                continue;
            };
            let arg = match tail {
                "" => None,
                tail => match tail.strip_prefix('/') {
                    Some("") => None,
                    Some(arg) => Some(arg.to_string()),
                    None => continue,
                },
            };
            return Some(RouteMatch {
                target,
                resource: name.clone(),
                arg,
            });
        }
        None
    }
}
