use ivy_source::Span;
use logos::Logos;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Logos, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // literals
    #[regex("[0-9]+")]
    Integer,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // identifiers
    #[regex("[a-zA-Z][a-zA-Z0-9]*")]
    Identifier,

    // keywords
    #[token("var")]
    Var,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("function")]
    Function,
    #[token("return")]
    Return,

    // binary operators
    // - assignment
    #[token("=")]
    Assign,
    // - equality
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token("<")]
    LessThan,
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // misc
    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    #[error]
    Error,

    /// Only generated by [`Lexer`] when the underlying lexer is exhausted.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Integer => "integer literal",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Identifier => "identifier",
            TokenKind::Var => "`var`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::Function => "`function`",
            TokenKind::Return => "`return`",
            TokenKind::Assign => "`=`",
            TokenKind::EqualsEquals => "`==`",
            TokenKind::NotEquals => "`!=`",
            TokenKind::GreaterThan => "`>`",
            TokenKind::LessThan => "`<`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Asterisk => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::OpenBrace => "`{`",
            TokenKind::CloseBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Semi => "`;`",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A classified lexical unit together with the text it was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    fn eof(offset: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: String::new(),
            span: offset..offset,
        }
    }
}

/// An unrecognized character in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized character `{character}` at position {}", .span.start)]
pub struct LexError {
    pub character: char,
    pub span: Span,
}

/// Tokenizer with two tokens of lookahead (`current` and `peek`).
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    current: Token,
    peek: Token,
}

impl<'a> Lexer<'a> {
    /// Creates a new `Lexer` and loads the first two tokens.
    pub fn new(source: &'a str) -> Result<Self, LexError> {
        let mut inner = TokenKind::lexer(source);
        let current = lex_token(&mut inner)?;
        let peek = lex_token(&mut inner)?;
        Ok(Self {
            inner,
            current,
            peek,
        })
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn peek(&self) -> &Token {
        &self.peek
    }

    /// Shifts the lookahead window by one token and returns the token that was `current`.
    /// Once the end of input is reached, [`TokenKind::Eof`] is returned indefinitely.
    pub fn advance(&mut self) -> Result<Token, LexError> {
        let next = lex_token(&mut self.inner)?;
        let peek = std::mem::replace(&mut self.peek, next);
        Ok(std::mem::replace(&mut self.current, peek))
    }
}

fn lex_token(inner: &mut logos::Lexer<'_, TokenKind>) -> Result<Token, LexError> {
    match inner.next() {
        Some(TokenKind::Error) => {
            let span = inner.span();
            let character = inner.source()[span.start..]
                .chars()
                .next()
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            Err(LexError {
                character,
                span: span.start..span.start + character.len_utf8(),
            })
        }
        Some(kind) => Ok(Token {
            kind,
            text: inner.slice().to_string(),
            span: inner.span(),
        }),
        None => Ok(Token::eof(inner.source().len())),
    }
}

/// Lexes the whole of `source`. The returned tokens always end with a single [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut inner = TokenKind::lexer(source);
    let mut tokens = Vec::new();
    loop {
        let token = lex_token(&mut inner)?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_operators_and_delimiters() {
        use TokenKind::*;
        assert_eq!(
            kinds("+ - * / = == != > < ( ) { } , ;"),
            vec![
                Plus, Minus, Asterisk, Slash, Assign, EqualsEquals, NotEquals, GreaterThan,
                LessThan, OpenParen, CloseParen, OpenBrace, CloseBrace, Comma, Semi, Eof
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        use TokenKind::*;
        assert_eq!(kinds("x==y"), vec![Identifier, EqualsEquals, Identifier, Eof]);
        assert_eq!(kinds("x= =y"), vec![Identifier, Assign, Assign, Identifier, Eof]);
        assert_eq!(kinds("a!=b"), vec![Identifier, NotEquals, Identifier, Eof]);
    }

    #[test]
    fn test_keywords() {
        use TokenKind::*;
        assert_eq!(
            kinds("  var true false if else function return "),
            vec![Var, True, False, If, Else, Function, Return, Eof]
        );
    }

    #[test]
    fn test_identifiers() {
        let tokens = tokenize("foobar foo24bar variable returns TEST").unwrap();
        assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
        assert_eq!(tokens[1].text, "foo24bar");
        assert_eq!(tokens[2].text, "variable");
    }

    #[test]
    fn test_integers() {
        let tokens = tokenize("5 42   4234213234").unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["5", "42", "4234213234", ""]);
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Integer));
        assert_eq!(tokens[2].span, 8..18);
    }

    #[test]
    fn test_digits_then_letters() {
        use TokenKind::*;
        assert_eq!(kinds("12abc"), vec![Integer, Identifier, Eof]);
    }

    #[test]
    fn test_unrecognized_character() {
        assert_eq!(
            tokenize("var x = $;"),
            Err(LexError {
                character: '$',
                span: 8..9
            })
        );
        assert_eq!(tokenize("!x").unwrap_err().character, '!');
        assert_eq!(tokenize("foo_bar").unwrap_err().character, '_');
    }

    #[test]
    fn test_lookahead() {
        let mut lexer = Lexer::new("var x;").unwrap();
        assert_eq!(lexer.current().kind, TokenKind::Var);
        assert_eq!(lexer.peek().kind, TokenKind::Identifier);

        let var = lexer.advance().unwrap();
        assert_eq!(var.kind, TokenKind::Var);
        assert_eq!(lexer.current().text, "x");
        assert_eq!(lexer.peek().kind, TokenKind::Semi);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("1").unwrap();
        assert_eq!(lexer.peek().kind, TokenKind::Eof);
        for _ in 0..3 {
            lexer.advance().unwrap();
            assert_eq!(lexer.current().kind, TokenKind::Eof);
            assert_eq!(lexer.peek().kind, TokenKind::Eof);
        }
        assert_eq!(lexer.current().span, 1..1);
    }

    #[test]
    fn test_empty_source() {
        let lexer = Lexer::new("   \n\t").unwrap();
        assert_eq!(lexer.current().kind, TokenKind::Eof);
    }
}
