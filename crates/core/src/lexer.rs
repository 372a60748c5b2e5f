//! Expression-body tokenizer.
//!
//! Splits an expression right-hand side into a typed token stream so the
//! reducer can substitute structurally instead of splicing strings. The
//! lexer is total: any character it does not classify becomes a
//! [`Token::Symbol`], so every body the extractor captured can be
//! tokenized.

/// One token of an expression body.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare identifier — a declared name, or a word operator such as
    /// `AND` / `OR` / `NOT` (the reducer tells them apart through the
    /// name registry).
    Ident(String),
    /// `Name.field` qualified reference.
    Qualified { base: String, field: String },
    /// Numeric literal, kept verbatim (`100.4`, `1.004e2`, `.5`).
    Number(String),
    LParen,
    RParen,
    /// A maximal run of operator characters (`>=`, `==`, `^`, `%`, ...)
    /// or any single character the lexer does not otherwise classify.
    Symbol(String),
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '!' | '+' | '-' | '*' | '/' | '^' | '%')
}

/// Tokenize an expression body.
pub fn lex(body: &str) -> Vec<Token> {
    let chars: Vec<char> = body.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        // Identifier, possibly `base.field` qualified
        if is_ident_start(c) {
            let start = pos;
            while pos < chars.len() && is_ident_char(chars[pos]) {
                pos += 1;
            }
            let base: String = chars[start..pos].iter().collect();
            if pos + 1 < chars.len() && chars[pos] == '.' && is_ident_start(chars[pos + 1]) {
                pos += 1;
                let fstart = pos;
                while pos < chars.len() && is_ident_char(chars[pos]) {
                    pos += 1;
                }
                let field: String = chars[fstart..pos].iter().collect();
                tokens.push(Token::Qualified { base, field });
            } else {
                tokens.push(Token::Ident(base));
            }
            continue;
        }

        // Number: digits, optional fraction, optional exponent. A
        // leading-fraction literal such as `.5` is a single number.
        if c.is_ascii_digit()
            || (c == '.' && pos + 1 < chars.len() && chars[pos + 1].is_ascii_digit())
        {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos + 1 < chars.len() && chars[pos] == '.' && chars[pos + 1].is_ascii_digit() {
                pos += 1;
                while pos < chars.len() && chars[pos].is_ascii_digit() {
                    pos += 1;
                }
            }
            if pos < chars.len() && (chars[pos] == 'e' || chars[pos] == 'E') {
                let mut p = pos + 1;
                if p < chars.len() && (chars[p] == '+' || chars[p] == '-') {
                    p += 1;
                }
                if p < chars.len() && chars[p].is_ascii_digit() {
                    pos = p;
                    while pos < chars.len() && chars[pos].is_ascii_digit() {
                        pos += 1;
                    }
                }
            }
            let s: String = chars[start..pos].iter().collect();
            tokens.push(Token::Number(s));
            continue;
        }

        if c == '(' {
            tokens.push(Token::LParen);
            pos += 1;
            continue;
        }
        if c == ')' {
            tokens.push(Token::RParen);
            pos += 1;
            continue;
        }

        // Operator run
        if is_operator_char(c) {
            let start = pos;
            while pos < chars.len() && is_operator_char(chars[pos]) {
                pos += 1;
            }
            let s: String = chars[start..pos].iter().collect();
            tokens.push(Token::Symbol(s));
            continue;
        }

        // Anything else: single-character symbol
        tokens.push(Token::Symbol(c.to_string()));
        pos += 1;
    }

    tokens
}

/// Render a token stream back to its canonical text form: tokens joined
/// by single spaces, qualified references as `base.field`.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if !out.is_empty() {
            out.push(' ');
        }
        match token {
            Token::Ident(s) | Token::Number(s) | Token::Symbol(s) => out.push_str(s),
            Token::Qualified { base, field } => {
                out.push_str(base);
                out.push('.');
                out.push_str(field);
            }
            Token::LParen => out.push('('),
            Token::RParen => out.push(')'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_and_operators() {
        let tokens = lex("Temperature AND hasRigors");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("Temperature".to_owned()),
                Token::Ident("AND".to_owned()),
                Token::Ident("hasRigors".to_owned()),
            ]
        );
    }

    #[test]
    fn qualified_reference_and_comparison() {
        let tokens = lex("Temperature.value >= 100.4");
        assert_eq!(
            tokens,
            vec![
                Token::Qualified {
                    base: "Temperature".to_owned(),
                    field: "value".to_owned()
                },
                Token::Symbol(">=".to_owned()),
                Token::Number("100.4".to_owned()),
            ]
        );
    }

    #[test]
    fn leading_fraction_literal_is_one_number() {
        let tokens = lex("Temperature.value > .5");
        assert_eq!(tokens[2], Token::Number(".5".to_owned()));
        assert_eq!(render(&tokens), "Temperature.value > .5");
    }

    #[test]
    fn exponent_literal_kept_verbatim() {
        let tokens = lex("Temperature.value >= 1.004e2");
        assert_eq!(tokens[2], Token::Number("1.004e2".to_owned()));
    }

    #[test]
    fn unspaced_input_still_tokenizes() {
        let tokens = lex("(Lesion.dimension_X<=5)OR(Lesion.dimension_X>=45)");
        assert_eq!(tokens.len(), 11);
        assert_eq!(tokens[0], Token::LParen);
        assert_eq!(tokens[2], Token::Symbol("<=".to_owned()));
        assert_eq!(tokens[5], Token::Ident("OR".to_owned()));
        assert_eq!(tokens[10], Token::RParen);
    }

    #[test]
    fn arithmetic_operators() {
        let tokens = lex("Temperature.value % 3 ^ 2 == 2");
        assert_eq!(
            tokens[1..],
            [
                Token::Symbol("%".to_owned()),
                Token::Number("3".to_owned()),
                Token::Symbol("^".to_owned()),
                Token::Number("2".to_owned()),
                Token::Symbol("==".to_owned()),
                Token::Number("2".to_owned()),
            ]
        );
    }

    #[test]
    fn render_joins_with_single_spaces() {
        let tokens = lex("( Temperature.value>=100.4 )");
        assert_eq!(render(&tokens), "( Temperature.value >= 100.4 )");
    }

    #[test]
    fn render_roundtrips_spaced_input() {
        let body = "Temperature.value >= 100.4 AND hasRigors";
        assert_eq!(render(&lex(body)), body);
    }

    #[test]
    fn unknown_characters_become_symbols() {
        let tokens = lex("a , b");
        assert_eq!(tokens[1], Token::Symbol(",".to_owned()));
    }
}
