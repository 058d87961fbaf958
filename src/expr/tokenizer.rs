use crate::error::{MatrixError, MatrixResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Ident(String),
    Number(f64),
    LeftAngle,
    RightAngle,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Ident(ident) => format!("'{ident}'"),
            Token::Number(number) => format!("number {number:?}"),
            Token::LeftAngle => "'<'".to_string(),
            Token::RightAngle => "'>'".to_string(),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
            Token::LeftBracket => "'['".to_string(),
            Token::RightBracket => "']'".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Comma => "','".to_string(),
        }
    }
}

/// A token and the byte offset it starts at.
pub(crate) type Spanned = (Token, usize);

/// Split an expression into tokens, skipping whitespace.
pub(crate) fn tokenize(input: &str) -> MatrixResult<Vec<Spanned>> {
    let mut tokens = vec![];
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '<' => Token::LeftAngle,
            '>' => Token::RightAngle,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '[' => Token::LeftBracket,
            ']' => Token::RightBracket,
            ':' => Token::Colon,
            ',' => Token::Comma,
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_ascii_alphanumeric() || c == '_') {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                tokens.push((Token::Ident(input[start..end].to_string()), start));
                continue;
            }
            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                let mut end = start;
                let mut prev = None;
                while let Some(&(i, c)) = chars.peek() {
                    let sign_after_exponent =
                        (c == '-' || c == '+') && matches!(prev, Some('e') | Some('E'));
                    let continues = c.is_ascii_digit()
                        || c == '.'
                        || c == 'e'
                        || c == 'E'
                        || sign_after_exponent
                        || (i == start && (c == '-' || c == '+'));
                    if !continues {
                        break;
                    }
                    end = i + c.len_utf8();
                    prev = Some(c);
                    chars.next();
                }
                let text = &input[start..end];
                let number = text.parse::<f64>().map_err(|_| {
                    MatrixError::Parse(format!("Invalid number '{text}' at offset {start}"))
                })?;
                if !number.is_finite() {
                    return Err(MatrixError::Parse(format!(
                        "Non-finite number '{text}' at offset {start}"
                    )));
                }
                tokens.push((Token::Number(number), start));
                continue;
            }
            other => {
                return Err(MatrixError::Parse(format!(
                    "Unexpected character '{other}' at offset {start}"
                )))
            }
        };
        chars.next();
        tokens.push((token, start));
    }

    Ok(tokens)
}

#[cfg(test)]
mod test {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn point() {
        assert_eq!(
            kinds("Point<Coordinate2D>(x: 1.0, y: -2.5)"),
            vec![
                Token::Ident("Point".to_string()),
                Token::LeftAngle,
                Token::Ident("Coordinate2D".to_string()),
                Token::RightAngle,
                Token::LeftParen,
                Token::Ident("x".to_string()),
                Token::Colon,
                Token::Number(1.0),
                Token::Comma,
                Token::Ident("y".to_string()),
                Token::Colon,
                Token::Number(-2.5),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(kinds("2.002"), vec![Token::Number(2.002)]);
        assert_eq!(kinds("1e300"), vec![Token::Number(1e300)]);
        assert_eq!(kinds("-1.5e-3"), vec![Token::Number(-1.5e-3)]);
        assert_eq!(kinds("+7"), vec![Token::Number(7.0)]);
    }

    #[test]
    fn offsets() {
        let tokens = tokenize("  [ ]").unwrap();
        assert_eq!(tokens, vec![(Token::LeftBracket, 2), (Token::RightBracket, 4)]);
    }

    #[test]
    fn bad_input() {
        assert!(tokenize("Point{}").is_err());
        assert!(tokenize("1.0.0").is_err());
        assert!(tokenize("--1").is_err());
    }

    #[test]
    fn overflowing_numbers() {
        let err = tokenize("(x: 1e999, y: 1.0)").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expression parse error: Non-finite number '1e999' at offset 4"
        );
        assert!(tokenize("-1e999").is_err());
        assert_eq!(kinds("1e-999"), vec![Token::Number(0.0)]);
    }
}
