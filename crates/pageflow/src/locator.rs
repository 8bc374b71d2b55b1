// Locator - immutable (strategy, selector) element addressing
//
// Locators identify zero or more elements in the remote document. They are
// defined per page at construction time and never mutated afterwards; every
// action re-resolves its locator so no stale element reference can survive a
// re-render.

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};

/// Element lookup strategy understood by the remote session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Lookup by element id attribute
    Id,
    /// CSS selector
    Css,
    /// XPath expression
    XPath,
    /// Single class name
    Class,
}

impl Strategy {
    /// Short strategy tag used in log lines and error messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Strategy::Id => "id",
            Strategy::Css => "css",
            Strategy::XPath => "xpath",
            Strategy::Class => "class",
        }
    }
}

/// A (strategy, selector) pair identifying elements in the remote document.
///
/// Page objects declare their locators as associated constants; the only
/// locators built at runtime come from [`Locator::xpath_option`], which
/// validates the interpolated value first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    strategy: Strategy,
    selector: Cow<'static, str>,
}

/// Placeholder token replaced by [`Locator::xpath_option`].
const TEMPLATE_SLOT: &str = "{}";

impl Locator {
    /// Locator matching by element id.
    pub const fn id(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::Id,
            selector: Cow::Borrowed(selector),
        }
    }

    /// Locator matching by CSS selector.
    pub const fn css(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::Css,
            selector: Cow::Borrowed(selector),
        }
    }

    /// Locator matching by XPath expression.
    pub const fn xpath(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::XPath,
            selector: Cow::Borrowed(selector),
        }
    }

    /// Locator matching by a single class name.
    pub const fn class(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::Class,
            selector: Cow::Borrowed(selector),
        }
    }

    /// Builds an XPath locator from a template and a runtime display text.
    ///
    /// `template` must contain exactly one `{}` slot. The value is rejected
    /// if it carries characters that would break out of the quoted XPath
    /// string (quotes, backslashes, control characters), so a dropdown
    /// option's visible text can be embedded without selector injection.
    pub fn xpath_option(template: &'static str, value: &str) -> Result<Self> {
        if template.matches(TEMPLATE_SLOT).count() != 1 {
            return Err(Error::InvalidFilterValue {
                value: value.to_string(),
                reason: "template must contain exactly one {} slot",
            });
        }
        if value.is_empty() {
            return Err(Error::InvalidFilterValue {
                value: value.to_string(),
                reason: "empty value",
            });
        }
        if value
            .chars()
            .any(|c| matches!(c, '\'' | '"' | '\\') || c.is_control())
        {
            return Err(Error::InvalidFilterValue {
                value: value.to_string(),
                reason: "value contains selector-breaking characters",
            });
        }
        Ok(Self {
            strategy: Strategy::XPath,
            selector: Cow::Owned(template.replacen(TEMPLATE_SLOT, value, 1)),
        })
    }

    /// Returns the lookup strategy.
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the selector string.
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy.as_str(), self.selector)
    }
}
