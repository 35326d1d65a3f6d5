//! Parsing of `/poll` command text into a question and ordered options.
//!
//! Parsing is deliberately lenient: it never fails, and rejection of
//! too-short input happens later when the poll message is rendered.

/// One poll command, as typed by the user: the first field is the question,
/// the rest are options in typing order. Duplicates are allowed and the
/// question may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedPoll {
    pub question: String,
    pub options: Vec<String>,
}

/// A question plus up to ten options.
pub const MAX_FIELDS: usize = 11;

/// Splits raw command text into a question and options.
///
/// Double-quoted spans (smart quotes included) form a single field and may
/// contain `\"` escapes; everything else splits on whitespace. A field
/// opened by an unbalanced quote swallows the rest of the words typed after
/// it. At most [`MAX_FIELDS`] fields are kept.
pub fn parse_poll_command(raw: &str) -> ParsedPoll {
    let cleaned = normalize_smart_quotes(raw);
    let mut fields = collect_fields(tokenize(&cleaned));
    fields.truncate(MAX_FIELDS);

    let mut fields = fields.iter().map(|field| unquote(field));
    let question = fields.next().unwrap_or_default();
    ParsedPoll { question, options: fields.collect() }
}

fn normalize_smart_quotes(input: &str) -> String {
    input.replace(['\u{201C}', '\u{201D}'], "\"")
}

/// Splits input into tokens: either a balanced double-quoted span (which may
/// contain whitespace and `\`-escaped characters) or a maximal run of
/// non-whitespace characters. An opening quote with no balanced close falls
/// back to a plain non-whitespace run, so it stays a literal token.
fn tokenize(input: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let offset_at =
        |index: usize| chars.get(index).map(|(offset, _)| *offset).unwrap_or(input.len());

    let mut tokens = Vec::new();
    let mut index = 0;
    while index < chars.len() {
        let (start, ch) = chars[index];
        if ch.is_whitespace() {
            index += 1;
            continue;
        }

        if ch == '"' {
            if let Some(close) = balanced_close(&chars, index) {
                tokens.push(&input[start..offset_at(close + 1)]);
                index = close + 1;
                continue;
            }
        }

        let mut end = index;
        while end < chars.len() && !chars[end].1.is_whitespace() {
            end += 1;
        }
        tokens.push(&input[start..offset_at(end)]);
        index = end;
    }

    tokens
}

fn balanced_close(chars: &[(usize, char)], open: usize) -> Option<usize> {
    let mut index = open + 1;
    while index < chars.len() {
        match chars[index].1 {
            '\\' => index += 2,
            '"' => return Some(index),
            _ => index += 1,
        }
    }
    None
}

/// Reduces tokens to fields. A token starts a new field unless the previous
/// field is an unbalanced quoted fragment, in which case the token is joined
/// onto it (the continuation of `"abc def`-style input). Lone `"` tokens are
/// a tokenizer edge case and are dropped.
fn collect_fields(tokens: Vec<&str>) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for token in tokens {
        if token == "\"" {
            continue;
        }

        match fields.last_mut() {
            Some(last) if !is_quoted(token) && last.starts_with('"') && !is_quoted(last) => {
                last.push(' ');
                last.push_str(token);
            }
            _ => fields.push(token.to_string()),
        }
    }
    fields
}

fn is_quoted(field: &str) -> bool {
    field.len() >= 2 && field.starts_with('"') && field.ends_with('"')
}

/// Drops unescaped quote characters and rewrites `\"` to a literal `"`.
fn unquote(field: &str) -> String {
    let mut output = String::with_capacity(field.len());
    let mut chars = field.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' && matches!(chars.peek(), Some('"')) {
            chars.next();
            output.push('"');
        } else if ch != '"' {
            output.push(ch);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{parse_poll_command, ParsedPoll};

    #[test]
    fn empty_input_yields_empty_question_and_no_options() {
        assert_eq!(parse_poll_command(""), ParsedPoll::default());
        assert_eq!(parse_poll_command("   \t "), ParsedPoll::default());
    }

    #[test]
    fn single_token_yields_question_without_options() {
        let parsed = parse_poll_command("lunch?");
        assert_eq!(parsed.question, "lunch?");
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn quoted_fields_stay_atomic_and_separate() {
        let parsed = parse_poll_command(r#""question" "option one" "option two""#);
        assert_eq!(parsed.question, "question");
        assert_eq!(parsed.options, vec!["option one".to_string(), "option two".to_string()]);
    }

    #[test]
    fn unquoted_run_splits_per_token() {
        let parsed = parse_poll_command("giraffe 123 456 789");
        assert_eq!(parsed.question, "giraffe");
        assert_eq!(
            parsed.options,
            vec!["123".to_string(), "456".to_string(), "789".to_string()]
        );
    }

    #[test]
    fn smart_quotes_are_treated_as_plain_quotes() {
        let parsed = parse_poll_command("\u{201C}best pet?\u{201D} cats dogs");
        assert_eq!(parsed.question, "best pet?");
        assert_eq!(parsed.options, vec!["cats".to_string(), "dogs".to_string()]);
    }

    #[test]
    fn escaped_quotes_decode_to_literal_quotes() {
        let parsed = parse_poll_command(r#""say \"hi\"" yes no"#);
        assert_eq!(parsed.question, r#"say "hi""#);
        assert_eq!(parsed.options, vec!["yes".to_string(), "no".to_string()]);
    }

    #[test]
    fn unbalanced_quote_swallows_the_rest_of_the_line() {
        let parsed = parse_poll_command(r#"question "red or blue"#);
        assert_eq!(parsed.question, "question");
        assert_eq!(parsed.options, vec!["red or blue".to_string()]);
    }

    #[test]
    fn lone_quote_tokens_are_dropped() {
        let parsed = parse_poll_command(r#"question " yes no"#);
        assert_eq!(parsed.question, "question");
        assert_eq!(parsed.options, vec!["yes".to_string(), "no".to_string()]);
    }

    #[test]
    fn fields_beyond_eleven_are_truncated() {
        let text = "q a b c d e f g h i j k l";
        let parsed = parse_poll_command(text);
        assert_eq!(parsed.question, "q");
        assert_eq!(parsed.options.len(), 10);
        assert_eq!(parsed.options.last().map(String::as_str), Some("j"));
    }

    #[test]
    fn duplicate_options_are_preserved_in_order() {
        let parsed = parse_poll_command("q yes yes no");
        assert_eq!(
            parsed.options,
            vec!["yes".to_string(), "yes".to_string(), "no".to_string()]
        );
    }

    #[test]
    fn quoted_field_followed_by_unquoted_tokens_keeps_them_separate() {
        let parsed = parse_poll_command(r#""favorite color?" red blue"#);
        assert_eq!(parsed.question, "favorite color?");
        assert_eq!(parsed.options, vec!["red".to_string(), "blue".to_string()]);
    }
}
