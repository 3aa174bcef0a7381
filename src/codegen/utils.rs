//! Naming and formatting helpers for code generation.

use convert_case::{Case, Casing};

/// Convert a string to snake_case
pub fn to_snake_case(s: &str) -> String {
    s.to_case(Case::Snake)
}

/// Convert a string to PascalCase
pub fn to_pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Render free text as `///` doc lines at the given indentation.
pub fn doc_comment(text: &str, indent: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("{}/// {}\n", indent, line))
        .collect()
}

/// Header placed at the top of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by mapgen. Do not edit.";
