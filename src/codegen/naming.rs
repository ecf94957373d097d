//! Normalization of human-authored schema text into generated-code keys and
//! JavaScript identifiers.

/// JavaScript reserved words that can't be used as identifiers.
const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    // Strict mode reserved words.
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "yield",
];

/// Normalizes arbitrary tag, operation, or path text into a generated-code
/// key.
///
/// Characters that are not word characters, whitespace, or hyphens are
/// stripped. Each run of whitespace and hyphens is collapsed into the
/// following character, upper-cased. With `camel_case`, the first character
/// of the result is lower-cased.
///
/// The output contains only ASCII word characters, and the function is
/// idempotent: `format_key(&format_key(x, c), c) == format_key(x, c)`.
pub fn format_key(text: &str, camel_case: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut upper_next = false;
    for c in text.chars() {
        if c.is_whitespace() || c == '-' {
            upper_next = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            if upper_next {
                out.push(c.to_ascii_uppercase());
                upper_next = false;
            } else {
                out.push(c);
            }
        }
        // Everything else is stripped and doesn't affect casing.
    }

    if camel_case {
        if let Some(first) = out.chars().next() {
            if first.is_ascii_uppercase() {
                out.replace_range(..1, &first.to_ascii_lowercase().to_string());
            }
        }
    }
    out
}

/// Whether `name` can be used as a bare JavaScript identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (unicode_ident::is_xid_start(first) || first == '_' || first == '$')
        && chars.all(|c| unicode_ident::is_xid_continue(c) || c == '$')
        && !KEYWORDS.contains(&name)
}

/// Returns a usable identifier for a declared parameter name, or an empty
/// string when nothing salvageable remains.
fn parameter_name(name: &str) -> String {
    if is_valid_identifier(name) {
        return name.to_owned();
    }
    let cleaned = format_key(name, true);
    if is_valid_identifier(&cleaned) {
        cleaned
    } else {
        String::new()
    }
}

/// Sanitized, de-duplicated argument names for a generated parameter list.
///
/// Names are taken in declaration order. A name that can't become an
/// identifier falls back to a positional `p<index>` name, and collisions
/// (with each other or with `reserved`) get a numeric suffix.
pub fn argument_names<I, S>(names: I, reserved: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut taken: Vec<String> = reserved.iter().map(|name| (*name).to_owned()).collect();
    let mut out = Vec::new();
    for (index, name) in names.into_iter().enumerate() {
        let mut candidate = parameter_name(name.as_ref());
        if candidate.is_empty() {
            candidate = format!("p{index}");
        }
        let mut unique = candidate.clone();
        let mut suffix = 2;
        while taken.contains(&unique) {
            unique = format!("{candidate}{suffix}");
            suffix += 1;
        }
        taken.push(unique.clone());
        out.push(unique);
    }
    out
}

/// The exported name for a generated function: prefixed with `_` when the
/// key alone isn't a valid identifier (leading digit, reserved word).
pub fn export_name(key: &str) -> String {
    if is_valid_identifier(key) {
        key.to_owned()
    } else {
        format!("_{key}")
    }
}

/// The `<KEY>_API` constant name for a module, `_`-prefixed when needed.
pub fn module_constant_name(module_key: &str) -> String {
    export_name(&format!("{}_API", module_key.to_uppercase()))
}

/// A member access on a constant group: dot notation when the key is a
/// valid identifier, bracket notation otherwise.
pub fn member_access(base: &str, key: &str) -> String {
    if is_valid_identifier(key) {
        format!("{base}.{key}")
    } else {
        format!("{base}['{key}']")
    }
}
