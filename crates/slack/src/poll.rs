//! Poll rendering and the poll's remote identity.

use thiserror::Error;

/// Polls carry at most ten options, one per numbered-emoji marker.
pub const MAX_OPTIONS: usize = 10;

/// Positional marker for one option: the glyph rendered into the message
/// line and the reaction name added to the posted message. The two columns
/// stay index-aligned so option `i` votes with the emoji shown next to it.
pub struct NumberedEmoji {
    pub glyph: &'static str,
    pub reaction: &'static str,
}

pub const NUMBERED_EMOJI: [NumberedEmoji; MAX_OPTIONS] = [
    NumberedEmoji { glyph: "1\u{fe0f}\u{20e3}", reaction: "one" },
    NumberedEmoji { glyph: "2\u{fe0f}\u{20e3}", reaction: "two" },
    NumberedEmoji { glyph: "3\u{fe0f}\u{20e3}", reaction: "three" },
    NumberedEmoji { glyph: "4\u{fe0f}\u{20e3}", reaction: "four" },
    NumberedEmoji { glyph: "5\u{fe0f}\u{20e3}", reaction: "five" },
    NumberedEmoji { glyph: "6\u{fe0f}\u{20e3}", reaction: "six" },
    NumberedEmoji { glyph: "7\u{fe0f}\u{20e3}", reaction: "seven" },
    NumberedEmoji { glyph: "8\u{fe0f}\u{20e3}", reaction: "eight" },
    NumberedEmoji { glyph: "9\u{fe0f}\u{20e3}", reaction: "nine" },
    NumberedEmoji { glyph: "\u{1f51f}", reaction: "keycap_ten" },
];

/// The remote platform's addressable handle for a posted poll message.
/// Assigned by the post call and required for both reacting and deleting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollIdentity {
    pub channel: String,
    pub ts: String,
}

impl PollIdentity {
    /// Encodes the identity into the opaque value carried by the delete
    /// button, round-tripped back on click.
    pub fn delete_value(&self) -> String {
        format!("{},{}", self.channel, self.ts)
    }

    /// Inverse of [`PollIdentity::delete_value`]. Channel ids never contain
    /// a comma, so the first comma is the separator.
    pub fn parse_delete_value(value: &str) -> Option<Self> {
        let (channel, ts) = value.split_once(',')?;
        if channel.is_empty() || ts.is_empty() {
            return None;
        }
        Some(Self { channel: channel.to_owned(), ts: ts.to_owned() })
    }
}

/// User-input problems reported back as ephemeral chat text rather than a
/// hard HTTP failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Uh, did you follow the command hints? You need a question first..")]
    MissingQuestion,
    #[error("Hey, you don't have enough options to make a poll!")]
    NotEnoughOptions,
}

/// Renders the poll message: bold question line, then one `>` blockquote
/// line per option prefixed with its positional glyph. Options beyond the
/// tenth are dropped silently.
pub fn format_poll_message(
    question: &str,
    options: &[String],
) -> Result<String, ParameterError> {
    if question.is_empty() {
        return Err(ParameterError::MissingQuestion);
    }
    if options.len() < 2 {
        return Err(ParameterError::NotEnoughOptions);
    }

    let lines = options
        .iter()
        .take(MAX_OPTIONS)
        .enumerate()
        .map(|(position, option)| format!(">{} {}", NUMBERED_EMOJI[position].glyph, option))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!("*{question}*\nOptions:\n{lines}"))
}
