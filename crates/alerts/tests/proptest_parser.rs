use proptest::prelude::*;

use alerts::{parse_alert, AlertParseError, AlertStore};
use common::{symbols::KNOWN_SYMBOLS, Comparator};

fn known_ticker() -> impl Strategy<Value = String> {
    prop::sample::select(KNOWN_SYMBOLS.iter().map(|(t, _)| t.to_string()).collect::<Vec<_>>())
}

/// Randomly re-case every character.
fn recase(s: &str, mask: &[bool]) -> String {
    s.chars()
        .zip(mask.iter().cycle())
        .map(|(c, &upper)| if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
        .collect()
}

proptest! {
    /// Arbitrary chat text must never panic the parser.
    #[test]
    fn parser_never_panics(text in "\\PC*") {
        let _ = parse_alert(&text);
    }

    /// Alert-shaped noise must never panic either.
    #[test]
    fn parser_never_panics_on_alert_prefix(rest in "[ a-zA-Z<>=.0-9-]{0,24}") {
        let _ = parse_alert(&format!("alert{rest}"));
    }

    /// Text that does not start with the keyword is always ignored.
    #[test]
    fn non_alert_text_is_ignored(text in "[b-zB-Z0-9,.!?][a-zA-Z0-9 ,.!?<>]{0,40}") {
        prop_assert_eq!(parse_alert(&text), None);
    }

    /// Every grammar-valid message registers exactly one alert for the
    /// sender, with the symbol uppercased.
    #[test]
    fn valid_alert_registers_uppercase_symbol(
        ticker in known_ticker(),
        keyword_mask in prop::collection::vec(any::<bool>(), 5),
        symbol_mask in prop::collection::vec(any::<bool>(), 3),
        below in any::<bool>(),
        whole in 0u32..10_000_000,
        frac in prop::option::of(0u32..100),
        user_id in any::<i64>(),
    ) {
        let op = if below { '<' } else { '>' };
        let value = match frac {
            Some(f) => format!("{whole}.{f:02}"),
            None => whole.to_string(),
        };
        let text = format!(
            "{} {} {op} {value}",
            recase("alert", &keyword_mask),
            recase(&ticker, &symbol_mask),
        );

        let alert = parse_alert(&text).expect("alert command").expect("valid alert");
        prop_assert_eq!(&alert.symbol, &ticker);
        prop_assert_eq!(
            alert.comparator,
            if below { Comparator::Below } else { Comparator::Above }
        );
        prop_assert_eq!(alert.threshold, value.parse::<f64>().unwrap());

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = AlertStore::new();
            store.register(user_id, alert.clone()).await;
            assert_eq!(store.all_entries().await, vec![(user_id, alert)]);
        });
    }

    /// Two-to-six letter tickers outside the table are rejected, never stored.
    #[test]
    fn unknown_tickers_are_rejected(ticker in "[A-Z]{2,6}") {
        prop_assume!(!KNOWN_SYMBOLS.iter().any(|(t, _)| *t == ticker));
        let result = parse_alert(&format!("alert {ticker} > 1"));
        prop_assert_eq!(result, Some(Err(AlertParseError::UnknownSymbol(ticker))));
    }
}
