use syn::{Error, LitStr, Result};

pub fn to_pascal_case(val: &str) -> String {
    let mut pascal = String::new();
    let mut capitalize = true;
    for ch in val.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            pascal.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            pascal.push(ch);
        }
    }
    pascal
}

pub fn to_camel_case(val: &str) -> String {
    let pascal = to_pascal_case(val);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => pascal,
    }
}

/// Applies a serde `rename_all` rule to a snake_case field name.
pub fn apply_rename_all(rule: &LitStr, field: &str) -> Result<String> {
    Ok(match rule.value().as_str() {
        "lowercase" | "snake_case" => field.to_string(),
        "UPPERCASE" | "SCREAMING_SNAKE_CASE" => field.to_ascii_uppercase(),
        "PascalCase" => to_pascal_case(field),
        "camelCase" => to_camel_case(field),
        "kebab-case" => field.replace('_', "-"),
        "SCREAMING-KEBAB-CASE" => field.replace('_', "-").to_ascii_uppercase(),
        other => {
            return Err(Error::new(
                rule.span(),
                format!("unsupported rename_all rule: {other}"),
            ))
        }
    })
}

pub fn strip_raw_prefix(val: &str) -> &str {
    val.strip_prefix("r#").unwrap_or(val)
}
