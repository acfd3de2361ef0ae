//! Naming conventions shared by classification and emission.

/// Fallback module for paths and schemas with no better home.
pub const COMMON_MODULE: &str = "Common";

const PAGINATED_PREFIX: &str = "Paginated";
const SERIALIZER_FOR: &str = "SerializerFor";
const STRIPPED_SUFFIXES: [&str; 3] = ["Serializer", "Request", "Response"];
const ENVELOPE_SUFFIXES: [&str; 2] = ["Request", "Response"];

/// Name used for the emitted interface of a schema.
///
/// Strips a leading `Paginated`, everything from `SerializerFor` on, and any
/// trailing run of `Serializer` / `Request` / `Response`. A name that would
/// become empty is kept as is.
pub fn simplify_schema_name(name: &str) -> String {
    let mut simple = name.strip_prefix(PAGINATED_PREFIX).unwrap_or(name);
    if let Some(idx) = simple.find(SERIALIZER_FOR) {
        simple = &simple[..idx];
    }
    while let Some(stripped) = STRIPPED_SUFFIXES
        .iter()
        .find_map(|suffix| simple.strip_suffix(suffix))
    {
        simple = stripped;
    }
    if simple.is_empty() {
        name.to_string()
    } else {
        simple.to_string()
    }
}

/// Schema name with only `Request` / `Response` suffixes removed.
pub fn envelope_base_name(name: &str) -> &str {
    let mut base = name;
    while let Some(stripped) = ENVELOPE_SUFFIXES
        .iter()
        .find_map(|suffix| base.strip_suffix(suffix))
    {
        base = stripped;
    }
    base
}

/// Whether a schema name carries a `Request` / `Response` suffix.
pub fn has_envelope_suffix(name: &str) -> bool {
    ENVELOPE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Whether a schema is excluded from primary election by its raw name.
pub fn is_auxiliary_schema(name: &str) -> bool {
    name.starts_with(PAGINATED_PREFIX) || name.contains("Serializer") || has_for_qualifier(name)
}

/// Whether a raw schema name is a `Paginated*` envelope.
pub fn is_paginated(name: &str) -> bool {
    name.starts_with(PAGINATED_PREFIX)
}

/// `For` followed by an uppercase letter, as in `WidgetForAdmin`.
fn has_for_qualifier(name: &str) -> bool {
    name.match_indices("For").any(|(idx, _)| {
        name[idx + 3..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
    })
}

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// `user-profiles` / `user_profiles` -> `UserProfiles`; inner casing is kept.
pub fn pascal_case(s: &str) -> String {
    words(s).map(capitalize).collect()
}

/// `export_csv` -> `exportCsv`; inner casing is kept.
pub fn camel_case(s: &str) -> String {
    let pascal = pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// `widgets_list` / `listWidgets` -> `WIDGETS_LIST` / `LIST_WIDGETS`.
pub fn upper_snake_case(s: &str) -> String {
    let mut out = String::new();
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_uppercase());
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        }
    }
    out.trim_end_matches('_').to_string()
}

/// Infer the owning module of a path template.
///
/// Leading/trailing slashes are ignored, a first segment equal to
/// `api_prefix` is discarded and the next segment is PascalCased. Empty and
/// `{param}` segments yield `Common`.
pub fn module_name_for_path(path: &str, api_prefix: &str) -> String {
    let mut segments = path.trim_matches('/').split('/');
    let mut segment = segments.next().unwrap_or_default();
    if !api_prefix.is_empty() && segment == api_prefix {
        segment = segments.next().unwrap_or_default();
    }
    if segment.starts_with('{') {
        return COMMON_MODULE.to_string();
    }
    let name = pascal_case(segment);
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        COMMON_MODULE.to_string()
    } else {
        name
    }
}

/// Output directory of a module (`{m}`).
pub fn module_dir(module: &str) -> String {
    module.to_lowercase()
}
