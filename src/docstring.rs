//! Docstring model
//!
//! Wraps one raw doc comment and answers the questions the role catalog asks
//! about it: which tags are present, how many code examples it carries,
//! whether the return value is mentioned or described, and whether it
//! overrides the entity's visibility.
//!
//! Parsing is a pure function of the raw text. Malformed tag lines (an `@`
//! not followed by a tag name) are kept as plain text, so the tag they were
//! meant to be is simply absent.

use crate::models::Visibility;
use regex::Regex;
use std::sync::OnceLock;

static TAG_LINE: OnceLock<Regex> = OnceLock::new();
static RETURNS_PROSE: OnceLock<Regex> = OnceLock::new();

fn tag_line() -> &'static Regex {
    TAG_LINE.get_or_init(|| {
        Regex::new(r"^@([A-Za-z][A-Za-z0-9_-]*)(?:\s+(.*)|\s*$|(\{.*))")
            .expect("valid regex")
    })
}

fn returns_prose() -> &'static Regex {
    RETURNS_PROSE.get_or_init(|| Regex::new(r"(?i)^returns?\b(.*)$").expect("valid regex"))
}

/// A block tag such as `@param {string} name The name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Everything after the tag name, continuation lines included
    pub body: String,
}

/// A parsed `@param` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    pub name: String,
    pub type_expr: Option<String>,
    pub description: String,
}

/// Parsed documentation comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docstring {
    text: String,
    description: String,
    tags: Vec<Tag>,
    fenced_examples: usize,
}

impl Docstring {
    /// Build a docstring from raw comment text. `None` yields an empty docstring.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw {
            Some(r) => r,
            None => return Self::default(),
        };
        let text = strip_comment_markers(raw);

        let mut description: Vec<&str> = Vec::new();
        let mut tags: Vec<(String, Vec<String>)> = Vec::new();
        let mut fenced_examples = 0;
        let mut in_fence = false;

        for line in text.lines() {
            let trimmed = line.trim();

            if trimmed.starts_with("```") {
                in_fence = !in_fence;
                // A closing fence outside an @example body is an example of its own
                let in_example_tag = tags.last().is_some_and(|(n, _)| n == "example");
                if !in_fence && !in_example_tag {
                    fenced_examples += 1;
                }
            } else if !in_fence {
                if let Some(caps) = tag_line().captures(trimmed) {
                    let name = caps[1].to_string();
                    let first = caps
                        .get(2)
                        .or_else(|| caps.get(3))
                        .map(|m| m.as_str().trim().to_string())
                        .unwrap_or_default();
                    tags.push((name, vec![first]));
                    continue;
                }
            }

            match tags.last_mut() {
                Some((_, body)) => body.push(line.to_string()),
                None => description.push(line),
            }
        }

        let tags = tags
            .into_iter()
            .map(|(name, body)| Tag {
                name,
                body: body.join("\n").trim().to_string(),
            })
            .collect();

        Self {
            description: description.join("\n").trim().to_string(),
            text,
            tags,
            fenced_examples,
        }
    }

    /// Comment text without `/**`, `*/` and leading `*` markers
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Free text before the first tag
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether a block tag with this name is present (without the `@`)
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |t| t.name == name)
    }

    /// Number of code examples: `@example` tags plus fenced code blocks
    pub fn code_example_count(&self) -> usize {
        self.tags_named("example").count() + self.fenced_examples
    }

    pub fn contains_code_example(&self) -> bool {
        self.code_example_count() > 0
    }

    /// A `@return`/`@returns` tag exists, or the prose starts a line with "Returns"
    pub fn mentions_return(&self) -> bool {
        self.return_tags().next().is_some()
            || self
                .description
                .lines()
                .any(|l| returns_prose().is_match(l.trim()))
    }

    /// The return value is mentioned with actual description text
    pub fn describes_return(&self) -> bool {
        let tagged = self.return_tags().any(|t| {
            let (_, rest) = split_type_expr(&t.body);
            !rest.trim().is_empty()
        });
        tagged
            || self.description.lines().any(|l| {
                returns_prose()
                    .captures(l.trim())
                    .and_then(|c| c.get(1))
                    .is_some_and(|rest| !rest.as_str().trim().is_empty())
            })
    }

    /// Visibility declared inside the comment, if any
    ///
    /// Bare `@public`/`@protected`/`@private` tags are checked in that order,
    /// then `@access <level>`.
    pub fn visibility(&self) -> Option<Visibility> {
        for (tag, vis) in [
            ("public", Visibility::Public),
            ("protected", Visibility::Protected),
            ("private", Visibility::Private),
        ] {
            if self.has_tag(tag) {
                return Some(vis);
            }
        }
        self.tags_named("access")
            .find_map(|t| t.body.split_whitespace().next().and_then(Visibility::parse))
    }

    /// All `@param` tags (`@arg` and `@argument` are aliases)
    pub fn param_tags(&self) -> Vec<ParamTag> {
        self.tags
            .iter()
            .filter(|t| matches!(t.name.as_str(), "param" | "arg" | "argument"))
            .filter_map(|t| parse_param_tag(&t.body))
            .collect()
    }

    pub fn mentions_parameter(&self, name: &str) -> bool {
        self.param_tags().iter().any(|p| p.name == name)
    }

    pub fn describes_parameter(&self, name: &str) -> bool {
        self.param_tags()
            .iter()
            .any(|p| p.name == name && !p.description.is_empty())
    }

    fn return_tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags
            .iter()
            .filter(|t| t.name == "return" || t.name == "returns")
    }
}

impl std::fmt::Display for Docstring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Remove C-style comment markers. Text that is not a block comment is only trimmed.
fn strip_comment_markers(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("/*") {
        return trimmed.to_string();
    }

    let inner = trimmed.strip_suffix("*/").unwrap_or(trimmed);
    let inner = inner.trim_start_matches('/').trim_start_matches('*');

    inner
        .lines()
        .map(|line| {
            let l = line.trim_start();
            let l = l.strip_prefix('*').unwrap_or(l);
            let l = l.strip_prefix(' ').unwrap_or(l);
            l.trim_end()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Split a leading `{type}` expression off a tag body. Braces may nest.
fn split_type_expr(body: &str) -> (Option<&str>, &str) {
    let body = body.trim_start();
    if !body.starts_with('{') {
        return (None, body);
    }
    let mut depth = 0usize;
    for (i, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (Some(&body[1..i]), &body[i + 1..]);
                }
            }
            _ => {}
        }
    }
    // Unbalanced braces: no usable type, no usable rest
    (None, "")
}

fn parse_param_tag(body: &str) -> Option<ParamTag> {
    let (type_expr, rest) = split_type_expr(body);
    let rest = rest.trim_start();

    let (raw_name, after) = if let Some(optional) = rest.strip_prefix('[') {
        let end = optional.find(']')?;
        (&optional[..end], &optional[end + 1..])
    } else {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        (&rest[..end], &rest[end..])
    };

    let name = raw_name.split('=').next().unwrap_or("").trim();
    if name.is_empty() {
        return None;
    }

    let description = after.trim().trim_start_matches('-').trim().to_string();
    Some(ParamTag {
        name: name.to_string(),
        type_expr: type_expr.map(|t| t.trim().to_string()),
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_comment_is_empty() {
        let doc = Docstring::parse(None);
        assert!(doc.is_empty());
        assert!(doc.tags().is_empty());
        assert_eq!(doc.code_example_count(), 0);
    }

    #[test]
    fn test_strips_block_comment_markers() {
        let doc = Docstring::parse(Some("/**\n * Does X.\n *\n * More text.\n */"));
        assert_eq!(doc.text(), "Does X.\n\nMore text.");
        assert_eq!(doc.description(), "Does X.\n\nMore text.");
    }

    #[test]
    fn test_single_line_block_comment() {
        let doc = Docstring::parse(Some("/* istanbul ignore next */"));
        assert_eq!(doc.text(), "istanbul ignore next");
    }

    #[test]
    fn test_tags_and_continuation_lines() {
        let doc = Docstring::parse(Some(
            "/**\n * Adds.\n * @param {number} a first\n *   operand\n * @ignore\n */",
        ));
        assert!(doc.has_tag("param"));
        assert!(doc.has_tag("ignore"));
        assert!(!doc.has_tag("example"));
        let param = doc.tags_named("param").next().unwrap();
        assert_eq!(param.body, "{number} a first\n  operand");
        assert_eq!(doc.description(), "Adds.");
    }

    #[test]
    fn test_malformed_tag_is_plain_text() {
        let doc = Docstring::parse(Some("Mail me @ home.\n@ 123 nonsense"));
        assert!(doc.tags().is_empty());
        assert!(doc.description().contains("@ 123"));
    }

    #[test]
    fn test_code_examples() {
        let doc = Docstring::parse(Some(
            "/**\n * Sum.\n * ```js\n * sum(1, 2)\n * ```\n * @example\n * sum(3, 4)\n */",
        ));
        assert_eq!(doc.code_example_count(), 2);
        assert!(doc.contains_code_example());

        let two_tags = Docstring::parse(Some("@example\nfoo()\n@example\nbar()"));
        assert_eq!(two_tags.code_example_count(), 2);
    }

    #[test]
    fn test_fence_inside_example_counts_once() {
        let doc = Docstring::parse(Some("Sum.\n@example\n```js\nsum(1, 2)\n```"));
        assert_eq!(doc.code_example_count(), 1);
    }

    #[test]
    fn test_unclosed_fence_is_not_an_example() {
        let doc = Docstring::parse(Some("Sum.\n```js\nsum(1, 2)"));
        assert_eq!(doc.code_example_count(), 0);
    }

    #[test]
    fn test_tag_inside_fence_is_ignored() {
        let doc = Docstring::parse(Some("Usage:\n```\n@ignore\n```"));
        assert!(!doc.has_tag("ignore"));
    }

    #[test]
    fn test_return_mentioned_and_described() {
        let typed_only = Docstring::parse(Some("Gets it.\n@returns {string}"));
        assert!(typed_only.mentions_return());
        assert!(!typed_only.describes_return());

        let described = Docstring::parse(Some("Gets it.\n@return {string} the name"));
        assert!(described.mentions_return());
        assert!(described.describes_return());

        let prose = Docstring::parse(Some("Returns the name of the user."));
        assert!(prose.mentions_return());
        assert!(prose.describes_return());

        let nothing = Docstring::parse(Some("Does X."));
        assert!(!nothing.mentions_return());
        assert!(!nothing.describes_return());
    }

    #[test]
    fn test_visibility_tags() {
        assert_eq!(
            Docstring::parse(Some("X.\n@private")).visibility(),
            Some(Visibility::Private)
        );
        assert_eq!(
            Docstring::parse(Some("X.\n@access protected")).visibility(),
            Some(Visibility::Protected)
        );
        assert_eq!(
            Docstring::parse(Some("X.\n@access package")).visibility(),
            None
        );
        assert_eq!(Docstring::parse(Some("X.")).visibility(), None);
    }

    #[test]
    fn test_param_tags() {
        let doc = Docstring::parse(Some(
            "@param {Object} opts - the options\n@param [limit=10] cap\n@arg name\n@param {bad",
        ));
        let params = doc.param_tags();
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].name, "opts");
        assert_eq!(params[0].type_expr.as_deref(), Some("Object"));
        assert_eq!(params[0].description, "the options");
        assert_eq!(params[1].name, "limit");
        assert_eq!(params[1].description, "cap");
        assert!(doc.mentions_parameter("name"));
        assert!(!doc.describes_parameter("name"));
        assert!(doc.describes_parameter("opts"));
    }
}
