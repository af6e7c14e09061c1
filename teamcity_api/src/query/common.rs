//! Shared query infrastructure: the [`Query`] trait and locator serialization.
//!
//! A locator is the server's filter syntax: comma-separated `key:value`
//! dimensions, where a value may itself be a parenthesized sub-locator such as
//! `buildType:(id:Foo)`.

use std::borrow::Cow;
use std::fmt::Display;

use url::Url;

/// Trait implemented by all query builders. Provides locator serialization and
/// appends it to request URLs.
pub trait Query {
    /// Serializes the active predicates into a locator string. An empty string
    /// means "no filter".
    fn locator(&self) -> String;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let locator = self.locator();
        if !locator.is_empty() {
            url.query_pairs_mut().append_pair("locator", &locator);
        }
        url
    }
}

/// Accumulates locator dimensions in the order they are written.
#[derive(Default)]
pub(crate) struct LocatorWriter {
    dimensions: Vec<String>,
}

impl LocatorWriter {
    pub(crate) fn dimension(mut self, key: &str, value: impl Display) -> Self {
        self.dimensions.push(format!("{}:{}", key, value));
        self
    }

    pub(crate) fn dimension_opt(self, key: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.dimension(key, value),
            None => self,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.dimensions.join(",")
    }
}

/// Wraps a free-form value in parentheses when it contains locator syntax
/// (`,`, `:`, `(` or `)`), so the server reads it as one value. Values with
/// unbalanced parentheses still cannot be expressed.
pub(crate) fn locator_value(value: &str) -> Cow<'_, str> {
    if value.contains([',', ':', '(', ')']) {
        Cow::Owned(format!("({})", value))
    } else {
        Cow::Borrowed(value)
    }
}

/// Formats a single-dimension sub-locator, e.g. `(id:Foo)`.
pub(crate) fn sub_locator(key: &str, value: impl Display) -> String {
    format!("({}:{})", key, value)
}
