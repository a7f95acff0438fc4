// Selector - Minimal selector engine for the headless element tree
//
// Supports the shapes the verification suite actually uses: a tag name, an
// #id, .class names, compounds of those, and a trailing :has-text("...")
// filter that matches on subtree text (substring, case-sensitive).
//
// Examples: "html", "#add-to-cart", ".info-box",
//           "button:has-text(\"Add to cart\")", "button.primary#buy"

use crate::dom::Node;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selector {
    raw: String,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    has_text: Option<String>,
}

impl Selector {
    pub(crate) fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidSelector("empty selector".to_string()));
        }

        let (compound, has_text) = match trimmed.find(":has-text(") {
            Some(start) => {
                let argument = &trimmed[start + ":has-text(".len()..];
                let Some(end) = argument.rfind(')') else {
                    return Err(Error::InvalidSelector(format!(
                        "unterminated :has-text in '{}'",
                        trimmed
                    )));
                };
                if end != argument.len() - 1 {
                    return Err(Error::InvalidSelector(format!(
                        "trailing input after :has-text in '{}'",
                        trimmed
                    )));
                }
                let text = strip_quotes(&argument[..end]).ok_or_else(|| {
                    Error::InvalidSelector(format!(
                        ":has-text argument must be quoted in '{}'",
                        trimmed
                    ))
                })?;
                (&trimmed[..start], Some(text.to_string()))
            }
            None => (trimmed, None),
        };

        let mut tag = None;
        let mut id = None;
        let mut classes = Vec::new();

        let mut rest = compound;
        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        if tag_end > 0 {
            let name = &rest[..tag_end];
            validate_name(name, trimmed)?;
            tag = Some(name.to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while !rest.is_empty() {
            let marker = rest.as_bytes()[0];
            rest = &rest[1..];
            let end = rest.find(['#', '.']).unwrap_or(rest.len());
            let name = &rest[..end];
            validate_name(name, trimmed)?;
            match marker {
                b'#' => {
                    if id.replace(name.to_string()).is_some() {
                        return Err(Error::InvalidSelector(format!(
                            "more than one #id in '{}'",
                            trimmed
                        )));
                    }
                }
                b'.' => classes.push(name.to_string()),
                _ => unreachable!("rest always starts at a '#' or '.' marker"),
            }
            rest = &rest[end..];
        }

        if tag.is_none() && id.is_none() && classes.is_empty() && has_text.is_none() {
            return Err(Error::InvalidSelector(format!(
                "selector '{}' matches nothing",
                trimmed
            )));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            tag,
            id,
            classes,
            has_text,
        })
    }

    /// The selector as written, for error messages and Debug output.
    pub(crate) fn raw(&self) -> &str {
        &self.raw
    }

    pub(crate) fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag
            && node.tag != *tag
        {
            return false;
        }
        if let Some(id) = &self.id
            && node.dom_id.as_deref() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|class| node.has_class(class)) {
            return false;
        }
        if let Some(text) = &self.has_text
            && !node.subtree_text().contains(text.as_str())
        {
            return false;
        }
        true
    }
}

fn strip_quotes(argument: &str) -> Option<&str> {
    let argument = argument.trim();
    for quote in ['"', '\''] {
        if argument.len() >= 2
            && argument.starts_with(quote)
            && argument.ends_with(quote)
        {
            return Some(&argument[1..argument.len() - 1]);
        }
    }
    None
}

fn validate_name(name: &str, selector: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidSelector(format!(
            "empty name in '{}'",
            selector
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidSelector(format!(
            "unsupported characters in '{}'",
            selector
        )));
    }
    Ok(())
}
