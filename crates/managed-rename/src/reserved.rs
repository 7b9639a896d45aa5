//! Target-language reserved words and sanitization (spec.md §4.3 step 3:
//! "sanitize against the target language's reserved-word list").

/// Structurally-typed target language keywords plus the identifiers the
/// emitted surface reserves for itself (`constructor`, the module-level
/// `default` export slot). Kept as a flat list rather than a `HashSet`
/// build-on-first-use since it's consulted once per candidate name, not
/// in a hot loop.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "as", "implements", "interface",
    "let", "package", "private", "protected", "public", "static", "yield", "any", "boolean",
    "constructor", "declare", "get", "module", "require", "number", "set", "string", "symbol",
    "type", "from", "of", "namespace", "readonly", "never", "unknown", "infer", "keyof",
];

pub fn is_reserved(candidate: &str) -> bool {
    RESERVED_WORDS.contains(&candidate)
}

/// Sanitize a candidate identifier that collided with a reserved word by
/// appending a trailing underscore, the convention this target language's
/// own declaration emitters use for reserved-word members.
pub fn sanitize(candidate: &str) -> String {
    if is_reserved(candidate) {
        format!("{candidate}_")
    } else {
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_get_trailing_underscore() {
        assert_eq!(sanitize("new"), "new_");
        assert_eq!(sanitize("delete"), "delete_");
    }

    #[test]
    fn ordinary_names_pass_through() {
        assert_eq!(sanitize("Widget"), "Widget");
    }
}
