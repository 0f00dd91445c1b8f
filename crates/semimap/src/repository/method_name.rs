//! Parses query methods named by convention, such as
//! `findFirst3ByNameStartsWithAndAgeGreaterThanOrderByAgeDesc`.

use semimap_core::{
    stmt::{Direction, Operator},
    Error, Result,
};

use heck::ToSnakeCase;

#[derive(Debug, Clone, PartialEq)]
pub struct MethodName {
    pub action: Action,

    /// Limit declared by `First<N>` or `Top<N>`
    pub first: Option<u64>,

    pub parts: Vec<Part>,

    pub sorts: Vec<(String, Direction)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Find,
    Count,
    Exists,
    Delete,
}

/// One comparison of the method's condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// How the part joins the parts before it. Ignored for the first.
    pub and: bool,

    /// Dotted field path
    pub field: String,

    pub op: Operator,

    pub negate: bool,
}

const PREFIXES: &[(&str, Action)] = &[
    ("find", Action::Find),
    ("get", Action::Find),
    ("read", Action::Find),
    ("query", Action::Find),
    ("stream", Action::Find),
    ("count", Action::Count),
    ("exists", Action::Exists),
    ("delete", Action::Delete),
    ("remove", Action::Delete),
];

/// Longest keywords first, so `GreaterThanEqual` wins over `GreaterThan`.
const OPERATORS: &[(&[&str], Operator)] = &[
    (&["Greater", "Than", "Equal"], Operator::GreaterEquals),
    (&["Less", "Than", "Equal"], Operator::LesserEquals),
    (&["Greater", "Than"], Operator::GreaterThan),
    (&["Less", "Than"], Operator::LesserThan),
    (&["Starts", "With"], Operator::StartsWith),
    (&["Ends", "With"], Operator::EndsWith),
    (&["Between"], Operator::Between),
    (&["Contains"], Operator::Contains),
    (&["Equals"], Operator::Equals),
    (&["Like"], Operator::Like),
    (&["In"], Operator::In),
];

impl MethodName {
    /// Returns `None` when `name` does not follow the convention.
    pub fn parse(name: &str) -> Result<Option<MethodName>> {
        let Some((action, rest)) = split_prefix(name) else {
            return Ok(None);
        };

        let words = words(rest);

        if words.is_empty() {
            return Ok(None);
        }

        let order_at = words
            .windows(2)
            .position(|pair| pair == ["Order", "By"]);

        let by_at = words
            .iter()
            .enumerate()
            .position(|(i, word)| *word == "By" && (i == 0 || words[i - 1] != "Order"));

        let subject_end = match (by_at, order_at) {
            (None, None) => return Ok(None),
            (Some(by), Some(order)) => by.min(order),
            (Some(at), None) | (None, Some(at)) => at,
        };

        let predicate = match by_at {
            Some(by) if order_at.map_or(true, |order| by < order) => {
                &words[by + 1..order_at.unwrap_or(words.len())]
            }
            _ => &[][..],
        };

        if predicate.is_empty() && order_at.is_none() {
            return Err(invalid(name, "expected a condition after `By`"));
        }

        let sorts = match order_at {
            Some(order) => parse_sorts(name, &words[order + 2..])?,
            None => vec![],
        };

        Ok(Some(MethodName {
            action,
            first: parse_first(name, &words[..subject_end])?,
            parts: parse_parts(name, predicate)?,
            sorts,
        }))
    }
}

/// The action named by the method's prefix, for any method name.
pub fn action(name: &str) -> Option<Action> {
    split_prefix(name).map(|(action, _)| action)
}

fn split_prefix(name: &str) -> Option<(Action, &str)> {
    PREFIXES.iter().find_map(|(prefix, action)| {
        let rest = name.strip_prefix(prefix)?;
        (rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_uppercase()))
            .then_some((*action, rest))
    })
}

fn parse_first(name: &str, subject: &[&str]) -> Result<Option<u64>> {
    let Some(at) = subject.iter().position(|w| *w == "First" || *w == "Top") else {
        return Ok(None);
    };

    match subject.get(at + 1) {
        Some(n) if n.starts_with(|c: char| c.is_ascii_digit()) => match n.parse::<u64>()? {
            0 => Err(invalid(name, "`First` requires a limit of at least 1")),
            n => Ok(Some(n)),
        },
        _ => Ok(Some(1)),
    }
}

fn parse_parts(name: &str, words: &[&str]) -> Result<Vec<Part>> {
    if words.is_empty() {
        return Ok(vec![]);
    }

    let mut parts = vec![];
    let mut and = true;
    let mut start = 0;

    for i in 0..=words.len() {
        let connector = match words.get(i) {
            Some(&"And") => Some(true),
            Some(&"Or") => Some(false),
            Some(_) => continue,
            None => None,
        };

        parts.push(parse_part(name, &words[start..i], and)?);

        if let Some(next) = connector {
            and = next;
            start = i + 1;
        }
    }

    Ok(parts)
}

fn parse_part(name: &str, mut words: &[&str], and: bool) -> Result<Part> {
    let mut op = Operator::Equals;

    for (keyword, candidate) in OPERATORS {
        if words.len() > keyword.len() && words.ends_with(keyword) {
            op = *candidate;
            words = &words[..words.len() - keyword.len()];
            break;
        }
    }

    let negate = words.len() > 1 && words.last() == Some(&"Not");

    if negate {
        words = &words[..words.len() - 1];
    }

    Ok(Part {
        and,
        field: field_path(name, words)?,
        op,
        negate,
    })
}

fn parse_sorts(name: &str, words: &[&str]) -> Result<Vec<(String, Direction)>> {
    let mut sorts = vec![];
    let mut start = 0;

    for (i, word) in words.iter().enumerate() {
        let direction = match *word {
            "Asc" => Direction::Asc,
            "Desc" => Direction::Desc,
            _ => continue,
        };

        sorts.push((field_path(name, &words[start..i])?, direction));
        start = i + 1;
    }

    if start < words.len() {
        sorts.push((field_path(name, &words[start..])?, Direction::Asc));
    }

    if sorts.is_empty() {
        return Err(invalid(name, "expected a field after `OrderBy`"));
    }

    Ok(sorts)
}

/// `Address _ City` becomes `address.city`.
fn field_path(name: &str, words: &[&str]) -> Result<String> {
    let path = words
        .split(|word| *word == "_")
        .map(|segment| segment.concat().to_snake_case())
        .collect::<Vec<_>>();

    if path.iter().any(String::is_empty) {
        return Err(invalid(name, "expected a field name"));
    }

    Ok(path.join("."))
}

/// Splits camel case into words. Underscores and digit runs are words of
/// their own.
fn words(s: &str) -> Vec<&str> {
    let mut ret = vec![];
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (i, c) in s.char_indices() {
        if let Some(prev) = prev {
            let boundary = c == '_'
                || prev == '_'
                || c.is_uppercase()
                || c.is_ascii_digit() != prev.is_ascii_digit();

            if boundary {
                ret.push(&s[start..i]);
                start = i;
            }
        }

        prev = Some(c);
    }

    if start < s.len() {
        ret.push(&s[start..]);
    }

    ret
}

fn invalid(name: &str, reason: &str) -> Error {
    Error::illegal_argument(format!("invalid query method `{name}`: {reason}"))
}
