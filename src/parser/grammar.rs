//! Keyword directive grammar using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::lexer::Token;

/// A recognized keyword directive
#[derive(Debug, Clone, PartialEq)]
pub enum Keyword {
    MetaLeft,
    MetaRight,
    Space,
    /// `section NAME` or `repeated section NAME`; words after the name are ignored
    Section {
        repeated: bool,
        name: Option<String>,
    },
    AlternatesWith,
    Or,
    End,
}

/// Parse the body of a `.` directive
///
/// Returns `None` when the body is not a keyword; the compiler then treats
/// the directive as a substitution.
pub fn parse_keyword(input: &str) -> Option<Keyword> {
    let len = input.len();

    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    keyword_parser().parse(token_stream).into_result().ok()
}

fn keyword_parser<'a, I>() -> impl Parser<'a, I, Keyword, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Keyword words are still valid section names
    let name = select! {
        Token::Name(s) => s,
        Token::MetaLeft => "meta-left".to_string(),
        Token::MetaRight => "meta-right".to_string(),
        Token::Space => "space".to_string(),
        Token::Repeated => "repeated".to_string(),
        Token::Section => "section".to_string(),
        Token::Alternates => "alternates".to_string(),
        Token::With => "with".to_string(),
        Token::Or => "or".to_string(),
        Token::End => "end".to_string(),
    };

    let section = just(Token::Repeated)
        .or_not()
        .then_ignore(just(Token::Section))
        .then(name.or_not())
        .then_ignore(any().repeated())
        .map(|(repeated, name)| Keyword::Section {
            repeated: repeated.is_some(),
            name,
        });

    choice((
        just(Token::MetaLeft).to(Keyword::MetaLeft),
        just(Token::MetaRight).to(Keyword::MetaRight),
        just(Token::Space).to(Keyword::Space),
        just(Token::Alternates)
            .then(just(Token::With))
            .to(Keyword::AlternatesWith),
        just(Token::Or).to(Keyword::Or),
        just(Token::End).to(Keyword::End),
        section,
    ))
    .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section() {
        assert_eq!(
            parse_keyword("section person"),
            Some(Keyword::Section {
                repeated: false,
                name: Some("person".to_string())
            })
        );
    }

    #[test]
    fn test_parse_repeated_section() {
        assert_eq!(
            parse_keyword("repeated section @"),
            Some(Keyword::Section {
                repeated: true,
                name: Some("@".to_string())
            })
        );
    }

    #[test]
    fn test_parse_anonymous_section() {
        assert_eq!(
            parse_keyword("section"),
            Some(Keyword::Section {
                repeated: false,
                name: None
            })
        );
    }

    #[test]
    fn test_keyword_as_section_name() {
        assert_eq!(
            parse_keyword("section end"),
            Some(Keyword::Section {
                repeated: false,
                name: Some("end".to_string())
            })
        );
    }

    #[test]
    fn test_words_after_section_name_ignored() {
        assert_eq!(
            parse_keyword("section a extra words"),
            Some(Keyword::Section {
                repeated: false,
                name: Some("a".to_string())
            })
        );
        assert_eq!(
            parse_keyword("repeated section xs end"),
            Some(Keyword::Section {
                repeated: true,
                name: Some("xs".to_string())
            })
        );
    }

    #[test]
    fn test_simple_keywords() {
        assert_eq!(parse_keyword("meta-left"), Some(Keyword::MetaLeft));
        assert_eq!(parse_keyword("meta-right"), Some(Keyword::MetaRight));
        assert_eq!(parse_keyword("space"), Some(Keyword::Space));
        assert_eq!(parse_keyword("alternates with"), Some(Keyword::AlternatesWith));
        assert_eq!(parse_keyword("or"), Some(Keyword::Or));
        assert_eq!(parse_keyword("end"), Some(Keyword::End));
    }

    #[test]
    fn test_not_a_keyword() {
        assert_eq!(parse_keyword("title"), None);
        assert_eq!(parse_keyword("alternates"), None);
        assert_eq!(parse_keyword("end now"), None);
        assert_eq!(parse_keyword(""), None);
    }
}
