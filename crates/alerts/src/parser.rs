use thiserror::Error;

use common::{symbols, Alert, Comparator};

/// Messages starting with this word (any case) are alert commands.
pub const KEYWORD: &str = "alert";

/// Why an alert command was not accepted. `Display` is the reply text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertParseError {
    #[error("⚠️ Format: alert BTC < 65000")]
    Malformed,

    #[error("⚠️ Unknown symbol {0}. Supported: {}", symbols::supported_list())]
    UnknownSymbol(String),
}

/// Parse a free-text message as an alert registration.
///
/// Returns `None` when the message is not an alert command at all, so the
/// caller stays silent. Otherwise the message must be, in full:
///
/// ```text
/// alert <SYMBOL> <op> <value>
/// ```
///
/// with `SYMBOL` 2–6 ASCII letters in any case, `op` one of `<` `>`, and
/// `value` a non-negative decimal. Whitespace around `op` is optional. The
/// returned alert carries the uppercased symbol, which must be in the
/// known-symbol table.
pub fn parse_alert(text: &str) -> Option<Result<Alert, AlertParseError>> {
    let text = text.trim();
    let head = text.get(..KEYWORD.len())?;
    if !head.eq_ignore_ascii_case(KEYWORD) {
        return None;
    }
    Some(parse_body(&text[KEYWORD.len()..]))
}

fn parse_body(rest: &str) -> Result<Alert, AlertParseError> {
    use AlertParseError::Malformed;

    // keyword must be followed by whitespace
    let after_keyword = rest.trim_start();
    if after_keyword.len() == rest.len() {
        return Err(Malformed);
    }

    let symbol_len = after_keyword
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(after_keyword.len());
    if !(2..=6).contains(&symbol_len) {
        return Err(Malformed);
    }
    let (symbol, rest) = after_keyword.split_at(symbol_len);

    let mut chars = rest.trim_start().chars();
    let comparator = chars
        .next()
        .and_then(Comparator::from_symbol)
        .ok_or(Malformed)?;

    let threshold = parse_threshold(chars.as_str().trim_start()).ok_or(Malformed)?;

    let symbol = symbol.to_ascii_uppercase();
    if !symbols::is_known(&symbol) {
        return Err(AlertParseError::UnknownSymbol(symbol));
    }

    Ok(Alert::new(symbol, comparator, threshold))
}

/// `digits+ ("." digits*)?`, nothing else.
fn parse_threshold(s: &str) -> Option<f64> {
    let (int, frac) = s.split_once('.').unwrap_or((s, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if int.is_empty() || !all_digits(int) || !all_digits(frac) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
