/// Counts top-level commas in `text`, tracking nesting depth over
/// `()[]{}<>` so a comma inside a nested type or call doesn't split a
/// parameter/argument in two.
fn count_top_level_commas(text: &str) -> usize {
    let mut depth: i32 = 0;
    let mut commas = 0usize;
    for c in text.chars() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth -= 1,
            ',' if depth == 0 => commas += 1,
            _ => {}
        }
    }
    commas
}

fn strip_outer_delimiters(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('(').unwrap_or(trimmed);
    trimmed.strip_suffix(')').unwrap_or(trimmed).trim()
}

/// Counts parameters in a raw parameter-list text, per the symbol
/// extractor's parameter-counting rule: depth-tracked comma counting with
/// variadic detection. Variadic forms (`...`, `*args`, `**kwargs`) report
/// `-1`. An empty parameter list reports `0`.
///
/// # Examples
/// ```
/// use codemap_common::counting::count_params;
/// assert_eq!(count_params("()"), 0);
/// assert_eq!(count_params("(a,b,c)"), 3);
/// assert_eq!(count_params("(a func(int,int), b)"), 2);
/// assert_eq!(count_params("(*args)"), -1);
/// ```
pub fn count_params(raw: &str) -> i32 {
    let inner = strip_outer_delimiters(raw);
    if inner.is_empty() {
        return 0;
    }
    if inner.contains("...") || inner.contains("*args") || inner.contains("**kwargs") {
        return -1;
    }
    count_top_level_commas(inner) as i32 + 1
}

/// Counts arguments in a raw argument-list text the same way, but without
/// variadic special-casing — call sites don't declare variadic parameters.
pub fn count_args(raw: &str) -> usize {
    let inner = strip_outer_delimiters(raw);
    if inner.is_empty() {
        return 0;
    }
    count_top_level_commas(inner) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_counting_examples_from_spec() {
        assert_eq!(count_params("()"), 0);
        assert_eq!(count_params("(a,b,c)"), 3);
        assert_eq!(count_params("(a func(int,int), b)"), 2);
        assert_eq!(count_params("(*args)"), -1);
        assert_eq!(count_params("(...)"), -1);
        assert_eq!(count_params("(**kwargs)"), -1);
    }

    #[test]
    fn arg_counting() {
        assert_eq!(count_args("()"), 0);
        assert_eq!(count_args("(1, 2, 3)"), 3);
        assert_eq!(count_args("(f(1,2), g())"), 2);
    }
}
