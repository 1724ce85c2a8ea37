//! Template expression helpers: top-level splitting and pipe chains.

/// A pipe application parsed out of `value | name:arg1:arg2`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeCall<'a> {
    pub name: &'a str,
    pub args: Vec<&'a str>,
}

/// Split `s` at every `sep` that sits outside strings and brackets.
pub fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    scan(s, |i, c| {
        if c == sep {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    });
    parts.push(&s[start..]);
    parts
}

/// The value expression and the pipes applied to it, in order.
pub fn parse_pipe_chain(expr: &str) -> (&str, Vec<PipeCall<'_>>) {
    let mut cuts = Vec::new();
    let bytes = expr.as_bytes();
    scan(expr, |i, c| {
        let prev = i.checked_sub(1).map(|p| bytes[p]);
        let next = bytes.get(i + 1).copied();
        if c == '|' && prev != Some(b'|') && next != Some(b'|') {
            cuts.push(i);
        }
    });
    if cuts.is_empty() {
        return (expr.trim(), Vec::new());
    }

    let value = expr[..cuts[0]].trim();
    let mut pipes = Vec::new();
    for (n, &cut) in cuts.iter().enumerate() {
        let end = cuts.get(n + 1).copied().unwrap_or(expr.len());
        let segment = &expr[cut + 1..end];
        let mut parts = split_pipe_args(segment).into_iter().map(str::trim);
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        pipes.push(PipeCall {
            name,
            args: parts.filter(|a| !a.is_empty()).collect(),
        });
    }
    (value, pipes)
}

/// Rewrite `value | a:x | b` into `b(a(value, x))`. Returns the compiled
/// expression and the pipe names in order of application.
pub fn compile_pipes(expr: &str) -> (String, Vec<String>) {
    let (value, pipes) = parse_pipe_chain(expr);
    let mut out = value.to_string();
    let mut names = Vec::new();
    for pipe in pipes {
        let mut args = vec![out];
        args.extend(pipe.args.iter().map(|a| a.to_string()));
        out = format!("{}({})", pipe.name, args.join(", "));
        names.push(pipe.name.to_string());
    }
    (out, names)
}

// Colons separate pipe arguments unless they close a `? :` conditional.
fn split_pipe_args(segment: &str) -> Vec<&str> {
    let bytes = segment.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut pending_ternary = 0usize;
    scan(segment, |i, c| match c {
        '?' => {
            let next = bytes.get(i + 1).copied();
            let prev = i.checked_sub(1).map(|p| bytes[p]);
            if next != Some(b'.') && next != Some(b'?') && prev != Some(b'?') {
                pending_ternary += 1;
            }
        }
        ':' if pending_ternary > 0 => pending_ternary -= 1,
        ':' => {
            parts.push(&segment[start..i]);
            start = i + 1;
        }
        _ => {}
    });
    parts.push(&segment[start..]);
    parts
}

// Calls `f` for each character outside string literals at bracket depth 0.
fn scan(s: &str, mut f: impl FnMut(usize, char)) {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 => f(i, c),
            _ => {}
        }
    }
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// An object literal key: bare when it is an identifier, quoted otherwise.
pub fn object_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        sprig_jsx::printer::js_string(name)
    }
}

/// `font-size` -> `fontSize`.
pub fn camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper = false;
    for c in s.chars() {
        if c == '-' || c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `value` -> `Value`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `UserCard` -> `user-card`.
pub fn kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.char_indices() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_chain_nests_calls() {
        assert_eq!(
            compile_pipes("price | currency:'EUR':true | upper"),
            ("upper(currency(price, 'EUR', true))".to_string(), vec!["currency".to_string(), "upper".to_string()])
        );
    }

    #[test]
    fn logical_or_and_strings_are_not_pipes() {
        assert_eq!(compile_pipes("a || 'x | y'").0, "a || 'x | y'");
        assert_eq!(compile_pipes("fn(a | b)").0, "fn(a | b)");
    }

    #[test]
    fn ternary_argument_keeps_its_colon() {
        assert_eq!(compile_pipes("d | date:wide ? 'long' : 'short'").0, "date(d, wide ? 'long' : 'short')");
    }

    #[test]
    fn case_helpers() {
        assert_eq!(camel_case("font-size"), "fontSize");
        assert_eq!(kebab_case("UserCard"), "user-card");
        assert_eq!(capitalize("value"), "Value");
    }
}
