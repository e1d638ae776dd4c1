use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<Token> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.token)
        .collect()
}

fn ident(s: &str) -> Token {
    Token::Ident(s.to_string())
}

#[test]
fn operators_are_identifiers() {
    assert_eq!(
        kinds("(+ 1 2) (:: x xs) (== a b)"),
        vec![
            Token::LParen,
            ident("+"),
            Token::Number(1.0),
            Token::Number(2.0),
            Token::RParen,
            Token::LParen,
            ident("::"),
            ident("x"),
            ident("xs"),
            Token::RParen,
            Token::LParen,
            ident("=="),
            ident("a"),
            ident("b"),
            Token::RParen,
        ]
    );
}

#[test]
fn keywords_win_over_identifiers() {
    assert_eq!(
        kinds("let public namespace type import from lets"),
        vec![
            Token::Let,
            Token::Public,
            Token::Namespace,
            Token::Type,
            Token::Import,
            Token::From,
            ident("lets"),
        ]
    );
}

#[test]
fn arrow_and_equals_are_symbols() {
    assert_eq!(
        kinds("{x -> x} = -"),
        vec![
            Token::LBrace,
            ident("x"),
            Token::Arrow,
            ident("x"),
            Token::RBrace,
            Token::Eq,
            ident("-"),
        ]
    );
}

#[test]
fn unit_and_empty_list_are_single_tokens() {
    assert_eq!(
        kinds("() [] ( ) [ ]"),
        vec![
            Token::Unit,
            Token::EmptyList,
            Token::LParen,
            Token::RParen,
            Token::LBracket,
            Token::RBracket,
        ]
    );
}

#[test]
fn numbers_and_strings() {
    assert_eq!(
        kinds(r#"42 3.5 7. "double" 'single'"#),
        vec![
            Token::Number(42.0),
            Token::Number(3.5),
            Token::Number(7.0),
            Token::Str("double".into()),
            Token::Str("single".into()),
        ]
    );
}

#[test]
fn qualified_name_splits_on_dots() {
    assert_eq!(
        kinds("Outer.Inner.x"),
        vec![
            ident("Outer"),
            Token::Dot,
            ident("Inner"),
            Token::Dot,
            ident("x"),
        ]
    );
}

#[test]
fn comments_are_skipped_and_lines_tracked() {
    let tokens = tokenize("# header\nlet x = 1 # trailing\n\n(f x)").unwrap();
    let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![2, 2, 2, 2, 4, 4, 4, 4]);
}

#[test]
fn unterminated_string_is_an_error() {
    let err = tokenize("let s = \"oops\nx").unwrap_err();
    assert_eq!(err.line, 1);
    assert!(err.message.starts_with("unexpected character"));
}

#[test]
fn lone_symbols_outrank_identifiers_but_longer_runs_do_not() {
    assert_eq!(
        kinds("let x = (=> a ->> b ==)"),
        vec![
            Token::Let,
            ident("x"),
            Token::Eq,
            Token::LParen,
            ident("=>"),
            ident("a"),
            ident("->>"),
            ident("b"),
            ident("=="),
            Token::RParen,
        ]
    );
}
