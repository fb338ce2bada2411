//! Naming helpers used by the URL templates: path pieces, slugs, class names
//! and hash tokens.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;

/// Extension of the last path element, including the leading dot.
///
/// Returns an empty string when the last element has no dot.
pub fn path_ext(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}

/// Last element of a slash-separated path, ignoring trailing slashes.
pub fn path_base(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "";
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// File name without its extension.
pub fn path_stem(path: &str) -> &str {
    let base = path_base(path);
    base.strip_suffix(path_ext(base)).unwrap_or(base)
}

/// Lower-cased extension without the dot, as used for type checks.
pub fn normalized_ext(filename: &str) -> String {
    path_ext(filename).trim_start_matches('.').trim().to_lowercase()
}

/// Make a URL-safe slug: ASCII letters, digits, `-` and `_`, lower-cased.
///
/// Every other character becomes `-`, dash runs collapse, and leading or
/// trailing dashes and underscores are trimmed.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_dash = false;

    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }

    out.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Replace every run of whitespace or `+` with a single `-`.
pub fn collapse_separators(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;

    for c in s.chars() {
        if c.is_whitespace() || c == '+' {
            if !in_run {
                out.push('-');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}

/// Convert a type name such as `ProductImage` into `product-image`.
pub fn to_param_string(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == ' ' || c == '-' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('-') {
                out.push('-');
            }
        }

        out.extend(c.to_lowercase());
    }

    out.trim_end_matches('-').to_string()
}

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "media",
    "news",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
];

/// English plural of a param-cased name. Only the last segment is inflected.
pub fn pluralize(name: &str) -> String {
    let (head, word) = match name.rfind('-') {
        Some(idx) => name.split_at(idx + 1),
        None => ("", name),
    };

    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return name.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(single, _)| *single == word) {
        return format!("{head}{plural}");
    }

    let plural = if word.ends_with("ss")
        || word.ends_with("us")
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        format!("{word}es")
    } else if word.ends_with('s') {
        word.to_string()
    } else if let Some(stem) = word.strip_suffix('y') {
        match stem.chars().last() {
            Some(c) if !"aeiou".contains(c) => format!("{stem}ies"),
            _ => format!("{word}s"),
        }
    } else if let Some(stem) = word.strip_suffix("fe") {
        format!("{stem}ves")
    } else {
        format!("{word}s")
    };

    format!("{head}{plural}")
}

static HASH_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Digits-only token for unique file names.
///
/// The local time down to nanoseconds, followed by a three digit sequence
/// number so two renders in the same clock tick still differ.
pub fn hash_token() -> String {
    let seq = HASH_SEQUENCE.fetch_add(1, Ordering::Relaxed) % 1000;
    format!("{}{:03}", Local::now().format("%Y%m%d%H%M%S%9f"), seq)
}
