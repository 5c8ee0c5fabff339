use std::collections::HashMap;

/// Named field values parsed from a command body.
///
/// Behaves like a form: reading a field that was never filled in yields an
/// empty string rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandForm {
    values: HashMap<String, String>,
}

impl CommandForm {
    /// Current value of `name`, or `""` if the field is empty
    pub fn field(&self, name: &str) -> &str {
        self.values
            .get(&name.to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Parse command tokens into a form with the given declared fields.
///
/// `name=value` sets a declared field directly (case-insensitive name).
/// Any other token fills the next unset field in declaration order; extra
/// positional tokens are dropped. One pair of surrounding double quotes is
/// stripped from every value so `""` stands for an empty field.
pub fn parse_form(fields: &[&str], tokens: &[&str]) -> CommandForm {
    let mut values: HashMap<String, String> = HashMap::new();
    let mut positional = Vec::new();

    for token in tokens {
        match token.split_once('=') {
            Some((name, value)) if fields.iter().any(|f| f.eq_ignore_ascii_case(name)) => {
                values.insert(name.to_lowercase(), unquote(value).to_string());
            }
            _ => positional.push(unquote(token)),
        }
    }

    let mut positional = positional.into_iter();
    for field in fields {
        let key = field.to_lowercase();
        if values.contains_key(&key) {
            continue;
        }
        match positional.next() {
            Some(value) => {
                values.insert(key, value.to_string());
            }
            None => break,
        }
    }

    CommandForm { values }
}

/// Split a message body on whitespace, keeping double-quoted runs together.
///
/// Quote characters stay in the token so `parse_form` can strip them;
/// `name="a b"` and `"a b"` each come out as one token, and `""` as an
/// empty-field token. An unterminated quote runs to the end of the body.
pub fn tokenize(body: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut started = false;

    for c in body.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
                started = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        tokens.push(current);
    }

    tokens
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
