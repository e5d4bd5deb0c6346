//! Naming-convention predicates over fully qualified names
//!
//! Every predicate looks at a name segment that starts either at the
//! beginning of the full name or right after a member separator (`#` or `.`).

use regex::Regex;
use std::sync::OnceLock;

static GETTER: OnceLock<Regex> = OnceLock::new();
static SETTER: OnceLock<Regex> = OnceLock::new();
static QUESTIONING: OnceLock<Regex> = OnceLock::new();
static PRIVATE: OnceLock<Regex> = OnceLock::new();

fn segment_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(&format!(r"(?:\A|#|\.){pattern}")).expect("valid regex"))
}

/// `getFoo`, `Bar#getFoo`, `Bar.getFoo`
pub fn is_getter(full_name: &str) -> bool {
    segment_regex(&GETTER, "get[A-Z]").is_match(full_name)
}

/// `setFoo`, `Bar#setFoo`, `Bar.setFoo`
pub fn is_setter(full_name: &str) -> bool {
    segment_regex(&SETTER, "set[A-Z]").is_match(full_name)
}

/// `isReady`, `hasChildren`
pub fn is_questioning(full_name: &str) -> bool {
    segment_regex(&QUESTIONING, "(?:has|is)[A-Z]").is_match(full_name)
}

/// Any segment starting with `_`
pub fn is_private_by_name(full_name: &str) -> bool {
    segment_regex(&PRIVATE, "_").is_match(full_name)
}

/// Number of dot-separated segments
pub fn depth(full_name: &str) -> usize {
    full_name.split('.').count()
}

/// Full name with its last dot-segment removed; `None` for root names
pub fn derived_parent(full_name: &str) -> Option<&str> {
    full_name.rfind('.').map(|i| &full_name[..i])
}

/// Local name: the part after the last `.`, `#` or `~`
pub fn local_name(full_name: &str) -> &str {
    full_name
        .rfind(['.', '#', '~'])
        .map(|i| &full_name[i + 1..])
        .unwrap_or(full_name)
}
