//! Structural selectors for matching opaque page elements.
//!
//! Selectors are the only vocabulary the pipeline has for addressing host
//! markup. The grammar is deliberately small: comma-separated alternatives,
//! each a whitespace-separated descendant chain of simple parts
//! (`tag.class#id[attr]` / `[attr=value]`). Anything richer would amount to
//! semantic parsing of the host page, which the pipeline avoids by design.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Read-only element facade a selector part is matched against.
///
/// Adapters implementing [`crate::page::ports::PageDom`] expose their
/// element data through this trait so that matching logic lives in one
/// place.
pub trait ElementView {
    /// Returns the lowercase tag name.
    fn tag_name(&self) -> &str;

    /// Returns the element's `id` attribute, when present.
    fn element_id(&self) -> Option<&str>;

    /// Returns `true` when the element carries the given class.
    fn has_class(&self, class: &str) -> bool;

    /// Returns the value of the named attribute, when present.
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Predicate over a single element attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributePredicate {
    /// The attribute must be present, with any value.
    Present(String),
    /// The attribute must be present with exactly the given value.
    Equals {
        /// Attribute name.
        name: String,
        /// Required attribute value.
        value: String,
    },
}

impl AttributePredicate {
    /// Evaluates the predicate against an element.
    #[must_use]
    pub fn matches(&self, element: &impl ElementView) -> bool {
        match self {
            Self::Present(name) => element.attribute(name).is_some(),
            Self::Equals { name, value } => element.attribute(name) == Some(value.as_str()),
        }
    }
}

/// One compound step of a descendant chain: `tag.class#id[attr=value]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimplePart {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributePredicate>,
}

impl SimplePart {
    /// Returns `true` when the element satisfies every constraint of this
    /// part.
    #[must_use]
    pub fn matches(&self, element: &impl ElementView) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.element_id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attributes
            .iter()
            .all(|predicate| predicate.matches(element))
    }

    const fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }
}

/// A descendant chain: zero or more ancestor parts plus a subject part.
///
/// The subject must match the candidate element itself; each ancestor part
/// must match some element on the candidate's parent chain, outermost
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSelector {
    ancestors: Vec<SimplePart>,
    subject: SimplePart,
}

impl ChainSelector {
    /// Returns the part the candidate element itself must satisfy.
    #[must_use]
    pub const fn subject(&self) -> &SimplePart {
        &self.subject
    }

    /// Returns the ancestor parts, outermost first.
    #[must_use]
    pub fn ancestors(&self) -> &[SimplePart] {
        &self.ancestors
    }
}

/// A parsed structural selector.
///
/// Immutable after parsing; the original source string is retained so the
/// selector round-trips through serialisation unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Selector {
    source: String,
    alternatives: Vec<ChainSelector>,
}

impl Selector {
    /// Parses a selector from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorParseError`] when the source is empty or contains
    /// a malformed part.
    pub fn parse(source: impl Into<String>) -> Result<Self, SelectorParseError> {
        let source = source.into();
        let mut alternatives = Vec::new();
        for chain_source in source.split(',') {
            let trimmed = chain_source.trim();
            if trimmed.is_empty() {
                return Err(SelectorParseError::Empty(source.clone()));
            }
            alternatives.push(parse_chain(trimmed, &source)?);
        }
        if alternatives.is_empty() {
            return Err(SelectorParseError::Empty(source));
        }
        Ok(Self {
            source,
            alternatives,
        })
    }

    /// Returns the parsed alternatives, in declaration order.
    #[must_use]
    pub fn alternatives(&self) -> &[ChainSelector] {
        &self.alternatives
    }

    /// Returns the original selector text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<String> for Selector {
    type Error = SelectorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.source
    }
}

/// Errors produced while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorParseError {
    /// The selector source or one alternative was empty.
    #[error("empty selector: {0:?}")]
    Empty(String),

    /// A character was found outside any recognised construct.
    #[error("unexpected character {character:?} in selector {selector:?}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The full selector source.
        selector: String,
    },

    /// An attribute constraint was opened with `[` but never closed.
    #[error("unterminated attribute constraint in selector {0:?}")]
    UnterminatedAttribute(String),

    /// An attribute constraint had no name before `=` or `]`.
    #[error("empty attribute name in selector {0:?}")]
    EmptyAttributeName(String),
}

fn parse_chain(chain_source: &str, full_source: &str) -> Result<ChainSelector, SelectorParseError> {
    let mut parts = Vec::new();
    for token in chain_source.split_whitespace() {
        parts.push(parse_part(token, full_source)?);
    }
    let Some(subject) = parts.pop() else {
        return Err(SelectorParseError::Empty(full_source.to_owned()));
    };
    Ok(ChainSelector {
        ancestors: parts,
        subject,
    })
}

fn parse_part(token: &str, full_source: &str) -> Result<SimplePart, SelectorParseError> {
    let mut part = SimplePart::default();
    let mut chars = token.chars().peekable();

    let mut tag = String::new();
    while let Some(&c) = chars.peek() {
        if c == '*' && tag.is_empty() {
            chars.next();
            break;
        }
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            tag.push(c);
            chars.next();
        } else {
            break;
        }
    }
    if !tag.is_empty() {
        part.tag = Some(tag.to_ascii_lowercase());
    }

    while let Some(c) = chars.next() {
        match c {
            '.' => part.classes.push(read_name(&mut chars)),
            '#' => part.id = Some(read_name(&mut chars)),
            '[' => part
                .attributes
                .push(read_attribute(&mut chars, full_source)?),
            other => {
                return Err(SelectorParseError::UnexpectedCharacter {
                    character: other,
                    selector: full_source.to_owned(),
                });
            }
        }
    }

    if part.is_empty() {
        return Err(SelectorParseError::Empty(full_source.to_owned()));
    }
    Ok(part)
}

fn read_name(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    name
}

fn read_attribute(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    full_source: &str,
) -> Result<AttributePredicate, SelectorParseError> {
    let mut body = String::new();
    let mut closed = false;
    for c in chars.by_ref() {
        if c == ']' {
            closed = true;
            break;
        }
        body.push(c);
    }
    if !closed {
        return Err(SelectorParseError::UnterminatedAttribute(
            full_source.to_owned(),
        ));
    }

    let predicate = body.split_once('=').map_or_else(
        || AttributePredicate::Present(body.trim().to_owned()),
        |(name, value)| AttributePredicate::Equals {
            name: name.trim().to_owned(),
            value: unquote(value.trim()).to_owned(),
        },
    );

    let name_empty = match &predicate {
        AttributePredicate::Present(name) | AttributePredicate::Equals { name, .. } => {
            name.is_empty()
        }
    };
    if name_empty {
        return Err(SelectorParseError::EmptyAttributeName(
            full_source.to_owned(),
        ));
    }
    Ok(predicate)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            value
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        })
        .unwrap_or(value)
}
