//! Route template compilation.
//!
//! A template such as `/servers/:host/logs` is scanned left to right. Literal
//! text is copied into the pattern with regex metacharacters escaped, and every
//! `:name` token becomes a capturing group. The pattern is anchored at both
//! ends so a path either matches in full or not at all.

use std::mem;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, RouterError};
use crate::request::PathParams;

/// Capturing group emitted for every `:name` token.
const PARAM_GROUP: &str = "([A-Za-z0-9_-]+)";

/// How a compiled pattern treats a single trailing `/` in the request path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// `/hello/world/` matches the template `/hello/world`.
    #[default]
    Optional,
    /// The path must end exactly where the template ends.
    Strict,
}

/// A piece of a tokenized template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    /// Text matched verbatim.
    Literal(String),
    /// A named parameter.
    Param(String),
}

/// A compiled route template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    chunks: Vec<Chunk>,
    regex: Regex,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compiles a template with the default trailing slash policy.
    ///
    /// # Errors
    ///
    /// See [`PathPattern::compile_with`].
    ///
    /// # Example
    ///
    /// ```
    /// use route_matcher::PathPattern;
    ///
    /// let pattern = PathPattern::compile("/servers/:host/logs").unwrap();
    /// let params = pattern.match_path("/servers/db1/logs").unwrap();
    /// assert_eq!(params.get("host"), Some("db1"));
    /// assert!(pattern.match_path("/servers/db1/logs/extra").is_none());
    /// ```
    pub fn compile(template: &str) -> Result<Self> {
        Self::compile_with(template, TrailingSlash::default())
    }

    /// Compiles a template into an anchored pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] when the template is empty, does
    /// not start with `/`, or contains a `:` that is not followed by an
    /// alphanumeric name. Returns [`RouterError::CaptureMismatch`] if the
    /// compiled pattern does not capture exactly one group per parameter.
    pub fn compile_with(template: &str, trailing_slash: TrailingSlash) -> Result<Self> {
        if template.is_empty() {
            return Err(RouterError::invalid(template, "template is empty"));
        }
        if !template.starts_with('/') {
            return Err(RouterError::invalid(template, "template must start with '/'"));
        }

        let chunks = tokenize(template)?;
        let mut param_names = Vec::new();
        let mut regex_str = String::from("^");

        for chunk in &chunks {
            match chunk {
                Chunk::Literal(text) => regex_str.push_str(&regex::escape(text)),
                Chunk::Param(name) => {
                    regex_str.push_str(PARAM_GROUP);
                    param_names.push(name.clone());
                }
            }
        }

        if trailing_slash == TrailingSlash::Optional && !template.ends_with('/') {
            regex_str.push_str("/?");
        }
        regex_str.push('$');

        let regex = Regex::new(&regex_str)?;
        let groups = regex.captures_len() - 1;
        if groups != param_names.len() {
            return Err(RouterError::CaptureMismatch {
                template: template.to_string(),
                names: param_names.len(),
                groups,
            });
        }

        debug!(template, pattern = %regex_str, params = ?param_names, "Compiled route template");

        Ok(Self {
            template: template.to_string(),
            chunks,
            regex,
            param_names,
        })
    }

    /// Returns true if the whole path matches this pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Attempts to match a path against this pattern.
    ///
    /// Returns the extracted parameters, in template order, if the path
    /// matches. A name that appears twice keeps the later value.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;

        let mut params = PathParams::new();
        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(value) = caps.get(i + 1) {
                params.insert(name.as_str(), value.as_str());
            }
        }

        Some(params)
    }

    /// Returns the template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the generated regular expression.
    pub fn as_regex_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the parameter names in the order they appear in the template.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Builds a concrete path from parameter values.
    ///
    /// Returns `None` if a parameter is missing or its value could not be
    /// matched back by this pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use route_matcher::{PathParams, PathPattern};
    ///
    /// let pattern = PathPattern::compile("/:greeting/:location").unwrap();
    /// let params: PathParams = [("greeting", "hey"), ("location", "australia")]
    ///     .into_iter()
    ///     .collect();
    /// assert_eq!(pattern.reverse(&params).as_deref(), Some("/hey/australia"));
    /// ```
    pub fn reverse(&self, params: &PathParams) -> Option<String> {
        let mut path = String::with_capacity(self.template.len());

        for chunk in &self.chunks {
            match chunk {
                Chunk::Literal(text) => path.push_str(text),
                Chunk::Param(name) => {
                    let value = params.get(name)?;
                    if !is_param_value(value) {
                        return None;
                    }
                    path.push_str(value);
                }
            }
        }

        Some(path)
    }
}

/// Splits a template into literal runs and `:name` parameters.
fn tokenize(template: &str) -> Result<Vec<Chunk>> {
    let mut chunks = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != ':' {
            literal.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some(&(_, next)) = chars.peek() {
            if !next.is_ascii_alphanumeric() {
                break;
            }
            name.push(next);
            chars.next();
        }

        if name.is_empty() {
            return Err(RouterError::invalid(
                template,
                format!("empty parameter name at byte {pos}"),
            ));
        }

        if !literal.is_empty() {
            chunks.push(Chunk::Literal(mem::take(&mut literal)));
        }
        chunks.push(Chunk::Param(name));
    }

    if !literal.is_empty() {
        chunks.push(Chunk::Literal(literal));
    }

    Ok(chunks)
}

fn is_param_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
