//! logos-based selector tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (`:hover` as [`Token::PseudoClass`])
//! 2. For equal length matches, earlier-defined variants win

use logos::Logos;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Compound tokens ──────────────────────────────────────────────

    /// Pseudo-class: `:hover`, `:focus`, etc.
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoClass,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Unsigned number, only valid as an attribute value.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    /// Identifier: tag names, class names, ids, attribute names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `#`
    #[token("#")]
    Hash,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `=`
    #[token("=")]
    Equals,
}

impl Token {
    /// Whether this token can begin a compound selector.
    pub fn starts_compound(&self) -> bool {
        matches!(
            self,
            Token::Ident
                | Token::Hash
                | Token::Dot
                | Token::Star
                | Token::PseudoClass
                | Token::BracketOpen
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Token::lexer(input).filter_map(Result::ok).collect()
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            tokens(", . # * > [ ] ="),
            vec![
                Token::Comma,
                Token::Dot,
                Token::Hash,
                Token::Star,
                Token::GreaterThan,
                Token::BracketOpen,
                Token::BracketClose,
                Token::Equals,
            ]
        );
    }

    #[test]
    fn hyphenated_ident_is_one_token() {
        let mut lexer = Token::lexer("x-toggle");
        assert_eq!(lexer.next(), Some(Ok(Token::Ident)));
        assert_eq!(lexer.slice(), "x-toggle");
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn id_selector_is_hash_then_ident() {
        assert_eq!(tokens("#foo"), vec![Token::Hash, Token::Ident]);
    }

    #[test]
    fn pseudo_class() {
        assert_eq!(tokens("button:hover"), vec![Token::Ident, Token::PseudoClass]);
    }

    #[test]
    fn attribute_tokens() {
        assert_eq!(
            tokens(r#"[type="submit"]"#),
            vec![
                Token::BracketOpen,
                Token::Ident,
                Token::Equals,
                Token::StringLiteral,
                Token::BracketClose,
            ]
        );
        assert_eq!(tokens("[x='1']")[3], Token::StringLiteralSingle);
    }

    #[test]
    fn unknown_character_is_an_error() {
        let results: Vec<_> = Token::lexer("a ~ b").collect();
        assert!(results.iter().any(Result::is_err));
    }
}
