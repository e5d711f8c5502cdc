//! Element locators
//!
//! A [`Locator`] is a CSS or XPath selector, optionally narrowed by the
//! element's visible text and optionally scoped under a parent locator.
//! Resolution happens in [`crate::driver::Driver::query_all`].

use std::fmt;

/// Raw selector understood by the WebDriver `find element(s)` commands
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Css(String),
    XPath(String),
}

impl Selector {
    /// W3C location strategy name
    pub fn strategy(&self) -> &'static str {
        match self {
            Selector::Css(_) => "css selector",
            Selector::XPath(_) => "xpath",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Selector::Css(v) | Selector::XPath(v) => v,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(v) => write!(f, "css={}", v),
            Selector::XPath(v) => write!(f, "xpath={}", v),
        }
    }
}

/// Filter on an element's visible text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextMatch {
    /// Whole text equals the value after whitespace normalization
    Exact(String),
    /// Text contains the value after whitespace normalization
    Contains(String),
}

impl TextMatch {
    pub fn matches(&self, text: &str) -> bool {
        let text = normalize_whitespace(text);
        match self {
            TextMatch::Exact(expected) => text == normalize_whitespace(expected),
            TextMatch::Contains(needle) => text.contains(&normalize_whitespace(needle)),
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// How to find one or more elements on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    text: Option<TextMatch>,
    parent: Option<Box<Locator>>,
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::Css(selector.into()))
    }

    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::XPath(selector.into()))
    }

    /// Input by its placeholder attribute
    pub fn placeholder(text: &str) -> Self {
        Self::css(format!("[placeholder=\"{}\"]", escape_attr(text)))
    }

    /// Element by its title attribute
    pub fn title(text: &str) -> Self {
        Self::css(format!("[title=\"{}\"]", escape_attr(text)))
    }

    fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            text: None,
            parent: None,
        }
    }

    /// Keep only elements whose text is exactly `text`
    pub fn exact_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(TextMatch::Exact(text.into()));
        self
    }

    /// Keep only elements whose text contains `text`
    pub fn has_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(TextMatch::Contains(text.into()));
        self
    }

    /// Search inside the first element matched by `parent`
    pub fn within(mut self, parent: Locator) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn text(&self) -> Option<&TextMatch> {
        self.text.as_ref()
    }

    pub fn parent(&self) -> Option<&Locator> {
        self.parent.as_deref()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = &self.parent {
            write!(f, "{} >> ", parent)?;
        }
        write!(f, "{}", self.selector)?;
        match &self.text {
            Some(TextMatch::Exact(t)) => write!(f, " [text={:?}]", t),
            Some(TextMatch::Contains(t)) => write!(f, " [has-text={:?}]", t),
            None => Ok(()),
        }
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
