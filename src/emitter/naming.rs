/// Split on anything that is not ASCII alphanumeric
fn words(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Method name for a recorded test name: lower camel case, prefixed with
/// `test` when it would be empty or start with a digit
pub fn sanitize_name(raw: &str) -> String {
    let mut name = String::new();
    for (i, word) in words(raw).enumerate() {
        if i == 0 {
            name.push_str(&lower_first(word));
        } else {
            name.push_str(&capitalize(word));
        }
    }
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name = format!("test{}", capitalize(&name));
    }
    name
}

/// Class name for a project: upper camel case
pub fn sanitize_class_name(raw: &str) -> String {
    capitalize(&sanitize_name(raw))
}
