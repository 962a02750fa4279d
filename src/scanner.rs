use crate::EventKind;
use logos::Logos;

/// A single grid cell as seen by the lexer.
/// Spaces are skipped, so every token produced sits on a stored cell.
#[derive(PartialEq, Debug, Clone, Copy, Logos)]
pub enum TokenKind {
    // Floors.
    #[token("=")]
    #[token("|")]
    Platform,
    #[token("\"")]
    Quote,
    #[token("#")]
    Pillar,

    // Direction changes.
    #[token(">")]
    Right,
    #[token("<")]
    Left,
    #[token("^")]
    Up,
    #[token("@")]
    Reverse,
    #[token("!")]
    Stop,
    #[token("[")]
    Branch,

    // Memory and IO, mapped onto the event alphabet.
    #[regex(r"[)(+\-.:,;]", |lex| lex.slice().chars().next().and_then(EventKind::from_symbol))]
    Memory(EventKind),

    // Anything else is stored but inert
    #[error]
    #[regex(r" +", logos::skip)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<(TokenKind, std::ops::Range<usize>)> {
        TokenKind::lexer(line).spanned().collect()
    }

    #[test]
    fn floors_and_directions() {
        assert_eq!(
            tokens("=|\"# ><^@![").into_iter().map(|(t, _)| t).collect::<Vec<_>>(),
            vec![
                TokenKind::Platform,
                TokenKind::Platform,
                TokenKind::Quote,
                TokenKind::Pillar,
                TokenKind::Right,
                TokenKind::Left,
                TokenKind::Up,
                TokenKind::Reverse,
                TokenKind::Stop,
                TokenKind::Branch,
            ]
        );
    }

    #[test]
    fn memory_symbols() {
        let kinds = tokens(")(+-.:,;")
            .into_iter()
            .map(|(t, _)| t)
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Memory(EventKind::Forward),
                TokenKind::Memory(EventKind::Back),
                TokenKind::Memory(EventKind::Increment),
                TokenKind::Memory(EventKind::Decrement),
                TokenKind::Memory(EventKind::OutputChar),
                TokenKind::Memory(EventKind::OutputInt),
                TokenKind::Memory(EventKind::InputChar),
                TokenKind::Memory(EventKind::InputInt),
            ]
        );
    }

    #[test]
    fn spaces_are_skipped() {
        assert_eq!(
            tokens("  +   x"),
            vec![
                (TokenKind::Memory(EventKind::Increment), 2..3),
                (TokenKind::Other, 6..7),
            ]
        );
    }
}
