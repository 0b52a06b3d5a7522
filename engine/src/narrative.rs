//! Placeholder rendering for narrative templates.
//!
//! Templates use `{key}` placeholders, e.g. `"{actor} attacks {target}"`.
//! Unknown placeholders are left as written.

use std::fmt::Display;

/// A template with its placeholder values filled in one at a time.
#[derive(Debug, Clone)]
pub struct Template<'a> {
    text: &'a str,
    vars: Vec<(&'a str, String)>,
}

impl<'a> Template<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            vars: Vec::new(),
        }
    }

    pub fn var(mut self, key: &'a str, value: impl Display) -> Self {
        self.vars.push((key, value.to_string()));
        self
    }

    pub fn render(&self) -> String {
        render(self.text, &self.vars)
    }
}

pub fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// `*12*` for positive amounts, `no` otherwise.
pub fn amount_text(amount: u32) -> String {
    if amount > 0 {
        format!("*{}*", amount)
    } else {
        "no".to_string()
    }
}

/// Trailing crit marker, only when the crit actually dealt damage.
pub fn crit_text(crit: bool, damage: u32) -> &'static str {
    if crit && damage > 0 {
        " _Critical hit!_"
    } else {
        ""
    }
}
