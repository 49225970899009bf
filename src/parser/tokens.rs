//! Lexer for DDL statement text.
//!
//! Produces a flat token stream with byte spans into the source, so the
//! column grammar can recover raw text (qualifiers, default expressions)
//! exactly as it was written.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{anychar, char, digit1, multispace1, not_line_ending},
    combinator::{map, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{pair, tuple},
    IResult,
};

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word: keyword or identifier. Backtick-quoted names lex as words.
    Word(String),
    /// Single- or double-quoted text, unescaped.
    Quoted { quote: char, value: String },
    Number(String),
    LParen,
    RParen,
    Comma,
    /// The `::` cast operator.
    Cast,
    Punct(char),
}

/// A token with its byte range in the lexed source.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// Case-insensitive keyword test.
    pub fn is_word(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    pub fn word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }

    /// An identifier: a bare word or a double-quoted name.
    pub fn ident(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            Token::Quoted { quote: '"', value } => Some(value),
            _ => None,
        }
    }
}

/// Parse whitespace, `--` line comments and `/* */` block comments.
pub fn ws_or_comment(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), line_comment, block_comment))))(input)
}

fn line_comment(input: &str) -> IResult<&str, ()> {
    value((), pair(tag("--"), not_line_ending))(input)
}

fn block_comment(input: &str) -> IResult<&str, ()> {
    value((), tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

/// Parse a quoted literal or backtick identifier.
///
/// A doubled quote character stands for itself; a backslash escapes the
/// next character except inside backticks.
fn quoted(input: &str) -> IResult<&str, Token> {
    let quote = match input.chars().next() {
        Some(c @ ('\'' | '"' | '`')) => c,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    };

    let body = &input[1..];
    let mut text = String::new();
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '\\' && quote != '`' {
            if let Some((_, escaped)) = chars.next() {
                text.push(escaped);
            }
            continue;
        }
        if c == quote {
            if matches!(chars.peek(), Some(&(_, next)) if next == quote) {
                text.push(quote);
                chars.next();
                continue;
            }
            let rest = &body[i + c.len_utf8()..];
            let token = if quote == '`' {
                Token::Word(text)
            } else {
                Token::Quoted { quote, value: text }
            };
            return Ok((rest, token));
        }
        text.push(c);
    }

    // Unterminated literal
    Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
}

fn word(input: &str) -> IResult<&str, Token> {
    map(
        recognize(pair(
            take_while1(|c: char| c.is_alphabetic() || c == '_'),
            take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
        )),
        |w: &str| Token::Word(w.to_string()),
    )(input)
}

fn number(input: &str) -> IResult<&str, Token> {
    map(recognize(pair(digit1, opt(pair(char('.'), digit1)))), |n: &str| {
        Token::Number(n.to_string())
    })(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        quoted,
        value(Token::Cast, tag("::")),
        number,
        word,
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
        value(Token::Comma, char(',')),
        map(anychar, Token::Punct),
    ))(input)
}

/// Tokenize `source`. Never fails: unlexable characters become [`Token::Punct`].
pub fn tokenize(source: &str) -> Vec<Spanned> {
    let mut tokens = Vec::new();
    let mut rest = source;

    loop {
        if let Ok((remaining, _)) = ws_or_comment(rest) {
            rest = remaining;
        }
        if rest.is_empty() {
            break;
        }
        let start = source.len() - rest.len();
        match token(rest) {
            Ok((remaining, token)) => {
                let end = source.len() - remaining.len();
                tokens.push(Spanned { token, start, end });
                rest = remaining;
            }
            Err(_) => break,
        }
    }

    tokens
}

/// All quoted literals in `text`, in order (`'a','b'` yields `a`, `b`).
pub fn string_literals(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter_map(|t| match t.token {
            Token::Quoted { value, .. } => Some(value),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn test_column_definition_tokens() {
        assert_eq!(
            kinds("price DECIMAL(10,2) NOT NULL,"),
            vec![
                Token::Word("price".into()),
                Token::Word("DECIMAL".into()),
                Token::LParen,
                Token::Number("10".into()),
                Token::Comma,
                Token::Number("2".into()),
                Token::RParen,
                Token::Word("NOT".into()),
                Token::Word("NULL".into()),
                Token::Comma,
            ]
        );
    }

    #[test]
    fn test_quoted_literals_and_escapes() {
        assert_eq!(
            kinds(r#"'it''s' "say \"hi\"" `order`"#),
            vec![
                Token::Quoted { quote: '\'', value: "it's".into() },
                Token::Quoted { quote: '"', value: "say \"hi\"".into() },
                Token::Word("order".into()),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "id INT, -- the key\n/* block\ncomment */ name TEXT";
        assert_eq!(
            kinds(source),
            vec![
                Token::Word("id".into()),
                Token::Word("INT".into()),
                Token::Comma,
                Token::Word("name".into()),
                Token::Word("TEXT".into()),
            ]
        );
    }

    #[test]
    fn test_cast_and_spans() {
        let source = "'x'::varchar";
        let tokens = tokenize(source);
        assert_eq!(tokens[1].token, Token::Cast);
        assert_eq!(&source[tokens[0].start..tokens[0].end], "'x'");
        assert_eq!(&source[tokens[2].start..tokens[2].end], "varchar");
    }

    #[test]
    fn test_unterminated_quote_does_not_stop_lexing() {
        let tokens = kinds("'open text");
        assert_eq!(tokens[0], Token::Punct('\''));
        assert_eq!(tokens[1], Token::Word("open".into()));
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(string_literals("'a', 'bb' ,'c,c'"), vec!["a", "bb", "c,c"]);
        assert!(string_literals("10,2").is_empty());
    }
}
