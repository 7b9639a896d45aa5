//! Naming style transforms applied during reservation (spec.md §4.3 step
//! 2, parameterised by [`clrbind_common::policy::Policy`]'s `TypeStyle`
//! and `MemberStyle`).

use clrbind_common::policy::{MemberStyle, TypeStyle};

/// Split a CLR identifier into word boundaries: underscores, and
/// lower-to-upper or digit-to-letter transitions. CLR names are already
/// Pascal-cased in the overwhelming common case, so this is mostly a
/// passthrough with underscore-splitting for the `Preserve`-vs-restyle
/// boundary cases.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn apply_type_style(name: &str, style: TypeStyle) -> String {
    match style {
        TypeStyle::Preserve => name.to_string(),
        TypeStyle::Pascal => split_words(name).iter().map(|w| capitalize_first(w)).collect(),
    }
}

pub fn apply_member_style(name: &str, style: MemberStyle) -> String {
    match style {
        MemberStyle::Preserve => name.to_string(),
        MemberStyle::Camel => {
            let words = split_words(name);
            words
                .iter()
                .enumerate()
                .map(|(i, w)| if i == 0 { lowercase_first(w) } else { capitalize_first(w) })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_preserves_already_pascal_names() {
        assert_eq!(apply_type_style("HttpClient", TypeStyle::Pascal), "HttpClient");
    }

    #[test]
    fn camel_lowercases_leading_word_only() {
        assert_eq!(apply_member_style("GetValue", MemberStyle::Camel), "getValue");
    }

    #[test]
    fn camel_splits_on_underscore() {
        assert_eq!(apply_member_style("max_length", MemberStyle::Camel), "maxLength");
    }

    #[test]
    fn preserve_style_is_a_no_op() {
        assert_eq!(apply_member_style("Get_Value", MemberStyle::Preserve), "Get_Value");
    }
}
