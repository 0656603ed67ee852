use tracing::{debug, warn};

use super::Instruction;
use crate::args::HttpMethod;

const LINE_CONTINUATION: char = '\\';

/// Piece of a curl command recognised by one of the segment matchers.
#[derive(Debug, PartialEq, Eq)]
enum CurlPart {
    Header { key: String, value: String },
    Body(String),
    Method(String),
    Destination(String),
}

type Matcher = fn(&str) -> Option<CurlPart>;

/// Tried in order for every segment; the first hit wins and unmatched segments are dropped.
const MATCHERS: [Matcher; 4] = [match_header, match_body, match_method, match_destination];

/// Applies an instruction's curl command to its url, method, headers and payload.
///
/// Instructions without a command are returned as-is, so translating twice is a no-op.
/// Parsing is best effort and only understands well structured commands such as the
/// ones browsers produce with "copy as cURL".
#[must_use]
pub fn translate(mut instruction: Instruction) -> Instruction {
    let command = match instruction.raw_command.as_deref() {
        Some(command) if !command.trim().is_empty() => command.to_owned(),
        _ => return instruction,
    };

    instruction.headers.clear();

    for segment in segments(&command) {
        let Some(part) = MATCHERS.iter().find_map(|matcher| matcher(segment)) else {
            continue;
        };
        match part {
            CurlPart::Header { key, value } => {
                if key.is_empty() {
                    debug!("Ignoring curl header without a name: '{}'", segment);
                } else {
                    instruction.headers.insert(key, value);
                }
            }
            CurlPart::Body(payload) => instruction.payload = payload,
            CurlPart::Method(value) => match value.parse::<HttpMethod>() {
                Ok(method) => instruction.method = method,
                Err(err) => warn!("Ignoring curl method: {}", err),
            },
            CurlPart::Destination(url) => instruction.url = url,
        }
    }

    instruction.raw_command = None;
    debug!("Translated curl command into {:?}", instruction);
    instruction
}

/// Flags that take the following word as their value on single-line commands.
const VALUE_FLAGS: [&str; 3] = ["-H", "-d", "-X"];

/// Multi-line commands split at every backslash; single-line ones into flag/value words.
fn segments(command: &str) -> Vec<&str> {
    let pieces: Vec<&str> = if has_line_continuation(command) {
        command.split(LINE_CONTINUATION).collect()
    } else {
        split_words(command)
    };
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// A backslash followed by optional blanks and a line break; escapes inside values don't count.
fn has_line_continuation(command: &str) -> bool {
    command.match_indices(LINE_CONTINUATION).any(|(index, _)| {
        command
            .get(index.saturating_add(1)..)
            .map(|rest| rest.trim_start_matches([' ', '\t']))
            .is_some_and(|rest| rest.starts_with('\n') || rest.starts_with("\r\n"))
    })
}

fn split_words(command: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut spans = word_spans(command).into_iter();
    while let Some((start, word_end)) = spans.next() {
        let is_value_flag = command
            .get(start..word_end)
            .is_some_and(|word| VALUE_FLAGS.contains(&word));
        let end = if is_value_flag {
            spans.next().map_or(word_end, |(_, value_end)| value_end)
        } else {
            word_end
        };
        if let Some(piece) = command.get(start..end) {
            pieces.push(piece);
        }
    }
    pieces
}

/// Byte ranges of words separated by unquoted whitespace; quotes stay inside the word.
fn word_spans(command: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut quote: Option<char> = None;

    for (index, ch) in command.char_indices() {
        match quote {
            Some(open) => {
                if ch == open {
                    quote = None;
                }
            }
            None if ch.is_whitespace() => {
                if let Some(begin) = start.take() {
                    spans.push((begin, index));
                }
            }
            None => {
                if start.is_none() {
                    start = Some(index);
                }
                if ch == '\'' || ch == '"' {
                    quote = Some(ch);
                }
            }
        }
    }
    if let Some(begin) = start {
        spans.push((begin, command.len()));
    }
    spans
}

/// Value of a `-X`/`-H`/`-d` style flag, split at the first colon when there is one.
struct FlagValue {
    key: Option<String>,
    value: String,
}

fn parse_flag(segment: &str, prefix: &str) -> Option<FlagValue> {
    let rest = unquote(segment.strip_prefix(prefix)?);
    let flag = match rest.split_once(':') {
        Some((key, value)) => FlagValue {
            key: Some(key.trim().to_owned()),
            value: value.trim().to_owned(),
        },
        None => FlagValue {
            key: None,
            value: rest.trim().to_owned(),
        },
    };
    Some(flag)
}

fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next_back()) {
        (Some('\'' | '"'), Some(_)) => chars.as_str(),
        _ => trimmed,
    }
}

fn match_header(segment: &str) -> Option<CurlPart> {
    let flag = parse_flag(segment, "-H")?;
    Some(CurlPart::Header {
        key: flag.key.unwrap_or_default(),
        value: flag.value,
    })
}

// Bodies containing ':' keep only what follows the first colon.
fn match_body(segment: &str) -> Option<CurlPart> {
    parse_flag(segment, "-d").map(|flag| CurlPart::Body(flag.value))
}

fn match_method(segment: &str) -> Option<CurlPart> {
    parse_flag(segment, "-X").map(|flag| CurlPart::Method(flag.value))
}

fn match_destination(segment: &str) -> Option<CurlPart> {
    let start = segment.find("http")?;
    let tail = segment.get(start..)?;
    let url = match tail.chars().next_back() {
        Some(quote @ ('\'' | '"')) => tail.trim_end_matches(quote),
        _ => tail,
    };
    Some(CurlPart::Destination(url.to_owned()))
}
