//! Recursive descent selector parser.
//!
//! Parses a selector string into a [`SelectorList`]. Whitespace between
//! compound selectors is significant (descendant combinator), so tokens keep
//! their byte spans for adjacency checks.

use logos::Logos;

use super::model::*;
use super::tokenizer::Token;

/// Errors from selector parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A positioned token with byte-level span information for whitespace detection.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

fn tokenize_with_spans(input: &str) -> Result<Vec<PToken>, SelectorError> {
    let mut tokens = Vec::new();
    for (idx, (result, span)) in Token::lexer(input).spanned().enumerate() {
        let token = result.map_err(|()| SelectorError::UnexpectedToken {
            position: idx,
            message: format!("unrecognized input '{}'", &input[span.clone()]),
        })?;
        tokens.push(PToken {
            text: input[span.clone()].to_string(),
            token,
            pos: idx,
            byte_start: span.start,
            byte_end: span.end,
        });
    }
    Ok(tokens)
}

/// Parse a selector list such as `"#save, x-item > button.primary"`.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let tokens = tokenize_with_spans(input)?;
    if tokens.is_empty() {
        return Err(SelectorError::UnexpectedEof("expected selector".into()));
    }

    let mut parser = Parser { tokens, cursor: 0 };
    let mut selectors = vec![parser.parse_selector()?];
    while parser.peek().is_some_and(|t| t.token == Token::Comma) {
        parser.advance();
        selectors.push(parser.parse_selector()?);
    }

    if let Some(tok) = parser.peek() {
        return Err(SelectorError::UnexpectedToken {
            position: tok.pos,
            message: format!("unexpected {:?} '{}'", tok.token, tok.text),
        });
    }

    Ok(SelectorList { selectors })
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&PToken> {
        let tok = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(tok)
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token is immediately adjacent (no whitespace)
    /// to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.byte_start == prev.byte_end,
            None => false,
        }
    }

    /// Consume an identifier, describing what was expected on failure.
    fn expect_ident(&mut self, what: &str) -> Result<String, SelectorError> {
        let tok = self
            .advance()
            .ok_or_else(|| SelectorError::UnexpectedEof(format!("expected {what}")))?;
        if tok.token != Token::Ident {
            return Err(SelectorError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {what}, got {:?} '{}'", tok.token, tok.text),
            });
        }
        Ok(tok.text.clone())
    }

    fn expect(&mut self, expected: Token) -> Result<(), SelectorError> {
        match self.advance() {
            Some(tok) if tok.token == expected => Ok(()),
            Some(tok) => Err(SelectorError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(SelectorError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    /// Parse a complex selector: compound selectors joined by combinators.
    fn parse_selector(&mut self) -> Result<Selector, SelectorError> {
        let mut parts = vec![SelectorPart::Compound(self.parse_compound_selector()?)];

        loop {
            match self.peek() {
                Some(t) if t.token == Token::GreaterThan => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // A selector-starting token here was separated by whitespace;
                // an adjacent one would already belong to the compound.
                Some(t) if t.token.starts_compound() => {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    /// Parse a compound selector such as `button.primary[disabled]`.
    ///
    /// Only tokens immediately after the previous one (no whitespace gap)
    /// extend the current compound.
    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();

        match self.peek().map(|t| (t.token.clone(), t.text.clone())) {
            Some((Token::Ident, name)) => {
                self.advance();
                components.push(SelectorComponent::Type(name.to_ascii_lowercase()));
            }
            Some((Token::Star, _)) => {
                self.advance();
                components.push(SelectorComponent::Universal);
            }
            Some((token, _)) if token.starts_compound() => {
                components.push(self.parse_subclass()?);
            }
            _ => {
                return Err(SelectorError::UnexpectedToken {
                    position: self.current_pos(),
                    message: "expected selector part".into(),
                });
            }
        }

        while self.is_adjacent() {
            match self.peek() {
                Some(t)
                    if matches!(
                        t.token,
                        Token::Dot | Token::Hash | Token::PseudoClass | Token::BracketOpen
                    ) =>
                {
                    components.push(self.parse_subclass()?);
                }
                _ => break,
            }
        }

        Ok(CompoundSelector { components })
    }

    /// Parse one `.class`, `#id`, `:pseudo` or `[attr]` component.
    fn parse_subclass(&mut self) -> Result<SelectorComponent, SelectorError> {
        let (token, text, pos) = match self.advance() {
            Some(t) => (t.token.clone(), t.text.clone(), t.pos),
            None => return Err(SelectorError::UnexpectedEof("expected selector part".into())),
        };
        match token {
            Token::Dot => Ok(SelectorComponent::Class(self.expect_ident("class name")?)),
            Token::Hash => Ok(SelectorComponent::Id(self.expect_ident("id name")?)),
            Token::PseudoClass => Ok(SelectorComponent::PseudoClass(text[1..].to_string())),
            Token::BracketOpen => self.parse_attribute(),
            other => Err(SelectorError::UnexpectedToken {
                position: pos,
                message: format!("expected selector part, got {other:?} '{text}'"),
            }),
        }
    }

    /// Parse the remainder of `[name]` or `[name=value]` after the `[`.
    fn parse_attribute(&mut self) -> Result<SelectorComponent, SelectorError> {
        let name = self.expect_ident("attribute name")?.to_ascii_lowercase();

        let value = if self.peek().is_some_and(|t| t.token == Token::Equals) {
            self.advance();
            let tok = self
                .advance()
                .ok_or_else(|| SelectorError::UnexpectedEof("expected attribute value".into()))?;
            let value = match tok.token {
                Token::StringLiteral | Token::StringLiteralSingle => {
                    tok.text[1..tok.text.len() - 1].to_string()
                }
                Token::Ident | Token::Number => tok.text.clone(),
                _ => {
                    return Err(SelectorError::UnexpectedToken {
                        position: tok.pos,
                        message: format!(
                            "expected attribute value, got {:?} '{}'",
                            tok.token, tok.text
                        ),
                    });
                }
            };
            Some(value)
        } else {
            None
        };

        self.expect(Token::BracketClose)?;
        Ok(SelectorComponent::Attribute { name, value })
    }
}
