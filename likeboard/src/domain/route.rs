//! Route matching for the `/:user?` pattern.
//!
//! Locations are parsed with `url` against a fixed base so query strings and
//! fragments are ignored, then the single optional segment is percent-decoded.

use std::borrow::Cow;

use url::Url;

use super::user::UserName;

/// The only route the page serves.
pub const ROUTE_PATTERN: &str = "/:user?";

const LOCATION_BASE: &str = "http://likeboard.invalid/";

/// Parameters extracted from a matched route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    /// Decoded `:user` segment, if present.
    pub user: Option<String>,
}

/// A location matched against [`ROUTE_PATTERN`].
///
/// # Examples
/// ```
/// use likeboard::domain::RouteMatch;
///
/// assert_eq!(RouteMatch::from_path("/alice").user(), Some("alice"));
/// assert_eq!(RouteMatch::from_path("/").user(), None);
/// assert_eq!(RouteMatch::from_path("/mary%20ann?tab=likes").user(), Some("mary ann"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    path: String,
    params: RouteParams,
}

impl RouteMatch {
    /// Match a location path. Paths with more than one segment do not match
    /// the pattern and yield no parameters.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let params = RouteParams {
            user: user_segment(path),
        };
        Self {
            path: path.to_owned(),
            params,
        }
    }

    /// The location this match was built from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Extracted parameters.
    #[must_use]
    pub const fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Shorthand for `params().user`.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.params.user.as_deref()
    }
}

impl Default for RouteMatch {
    fn default() -> Self {
        Self::from_path("/")
    }
}

/// Location of the page for `user`.
#[must_use]
pub fn user_path(user: &UserName) -> String {
    format!("/{}", urlencoding::encode(user.as_str()))
}

fn user_segment(path: &str) -> Option<String> {
    let location = Url::parse(LOCATION_BASE)
        .and_then(|base| base.join(path))
        .ok()?;
    let mut segments = location
        .path_segments()?
        .filter(|segment| !segment.is_empty());
    let segment = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    let decoded = urlencoding::decode(segment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| segment.to_owned());
    Some(decoded)
}
