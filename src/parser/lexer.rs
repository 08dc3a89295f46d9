//! Lexer for keyword directive bodies using logos
//!
//! Only the text after the leading `.` of a keyword directive goes through
//! this lexer; literal text and substitutions never do.

use logos::Logos;

/// Byte range in the directive body
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // Literal keywords
    #[token("meta-left")]
    MetaLeft,
    #[token("meta-right")]
    MetaRight,
    #[token("space")]
    Space,

    // Block keywords
    #[token("repeated")]
    Repeated,
    #[token("section")]
    Section,
    #[token("alternates")]
    Alternates,
    #[token("with")]
    With,
    #[token("or")]
    Or,
    #[token("end")]
    End,

    // Section names - anything without whitespace, after keywords
    #[regex(r"[^ \t\r\n]+", |lex| lex.slice().to_string(), priority = 1)]
    Name(String),
}

/// Lex a keyword body into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_literal_keywords() {
        assert_eq!(
            tokens("meta-left meta-right space"),
            vec![Token::MetaLeft, Token::MetaRight, Token::Space]
        );
    }

    #[test]
    fn test_repeated_section() {
        assert_eq!(
            tokens("repeated section people"),
            vec![
                Token::Repeated,
                Token::Section,
                Token::Name("people".to_string())
            ]
        );
    }

    #[test]
    fn test_names_are_not_split_on_punctuation() {
        assert_eq!(
            tokens("section @"),
            vec![Token::Section, Token::Name("@".to_string())]
        );
        assert_eq!(tokens("ending"), vec![Token::Name("ending".to_string())]);
        assert_eq!(tokens("or-else"), vec![Token::Name("or-else".to_string())]);
    }

    #[test]
    fn test_alternates_with() {
        assert_eq!(tokens("alternates  with"), vec![Token::Alternates, Token::With]);
    }

    #[test]
    fn test_spans() {
        let spans: Vec<_> = lex("section x").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..7, 8..9]);
    }
}
