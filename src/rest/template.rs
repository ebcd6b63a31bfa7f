//! Positional path templates: `items/{0}`, `users/{}/posts/{}`.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

use super::error::RestError;

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    // Escaped braces first, then a full placeholder, then any stray brace
    Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("placeholder regex is valid") // Static pattern, safe to panic
});

/// A positional value substituted into a path template.
pub type PathArg<'a> = &'a (dyn Display + Sync);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Auto,
    Manual,
}

/// Substitutes positional values into `template`.
///
/// `{}` takes the next value, `{N}` takes value `N`, `{{` and `}}` are
/// literal braces. Automatic and manual numbering cannot be mixed. Unused
/// values are ignored.
///
/// # Errors
///
/// Returns [`RestError::Template`] for a missing value, a non-numeric
/// placeholder, mixed numbering or an unbalanced brace.
pub fn expand(template: &str, args: &[PathArg<'_>]) -> Result<String, RestError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    let mut next_auto = 0usize;
    let mut numbering: Option<Numbering> = None;

    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        match whole.as_str() {
            "{{" => out.push('{'),
            "}}" => out.push('}'),
            "{" | "}" => {
                return Err(RestError::template(
                    template,
                    format!("unbalanced brace at byte {}", whole.start()),
                ));
            }
            _ => {
                let field = caps.get(1).map_or("", |f| f.as_str()).trim();
                let (index, kind) = if field.is_empty() {
                    next_auto += 1;
                    (next_auto - 1, Numbering::Auto)
                } else {
                    let index = field.parse::<usize>().map_err(|_| {
                        RestError::template(
                            template,
                            format!("placeholder '{{{field}}}' is not a position"),
                        )
                    })?;
                    (index, Numbering::Manual)
                };

                match numbering {
                    Some(seen) if seen != kind => {
                        return Err(RestError::template(
                            template,
                            "cannot mix '{}' and '{N}' placeholders",
                        ));
                    }
                    _ => numbering = Some(kind),
                }

                let value = args.get(index).ok_or_else(|| {
                    RestError::template(template, format!("no value for placeholder {index}"))
                })?;
                out.push_str(&value.to_string());
            }
        }
    }

    out.push_str(&template[last..]);
    Ok(out)
}

/// Joins a base address and a path with exactly one `/` between them.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
