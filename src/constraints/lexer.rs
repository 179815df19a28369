//! Splits one predicate line into tokens.

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Ident(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    Ne,
    AndAnd,
    OrOr,
    Bang,
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::Number(v) => return write!(f, "number {v}"),
            Self::Ident(name) => return write!(f, "'{name}'"),
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Caret => "^",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::EqEq => "==",
            Self::Ne => "!=",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::Bang => "!",
        };
        write!(f, "'{text}'")
    }
}

/// Tokenizes `text`. `**` is folded into [`Token::Caret`].
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || (c == '.' && next.is_some_and(|n| n.is_ascii_digit())) {
            let (value, len) = lex_number(&chars[i..])?;
            tokens.push(Token::Number(value));
            i += len;
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let len = chars[i..]
                .iter()
                .take_while(|ch| ch.is_ascii_alphanumeric() || **ch == '_')
                .count();
            tokens.push(Token::Ident(chars[i..i + len].iter().collect()));
            i += len;
            continue;
        }

        let (token, len) = match (c, next) {
            ('*', Some('*')) => (Token::Caret, 2),
            ('<', Some('=')) => (Token::Le, 2),
            ('>', Some('=')) => (Token::Ge, 2),
            ('=', Some('=')) => (Token::EqEq, 2),
            ('!', Some('=')) => (Token::Ne, 2),
            ('&', Some('&')) => (Token::AndAnd, 2),
            ('|', Some('|')) => (Token::OrOr, 2),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            ('[', _) => (Token::LBracket, 1),
            (']', _) => (Token::RBracket, 1),
            (',', _) => (Token::Comma, 1),
            ('+', _) => (Token::Plus, 1),
            ('-', _) => (Token::Minus, 1),
            ('*', _) => (Token::Star, 1),
            ('/', _) => (Token::Slash, 1),
            ('^', _) => (Token::Caret, 1),
            ('<', _) => (Token::Lt, 1),
            ('>', _) => (Token::Gt, 1),
            ('!', _) => (Token::Bang, 1),
            ('=', _) => return Err("unexpected '=' (use '==' to compare)".to_string()),
            _ => return Err(format!("unexpected character '{c}'")),
        };
        tokens.push(token);
        i += len;
    }

    Ok(tokens)
}

/// Reads a decimal literal with optional fraction and exponent. An `e` not
/// followed by digits is left for the next token.
fn lex_number(chars: &[char]) -> Result<(f64, usize), String> {
    let digits = |from: usize| chars[from..].iter().take_while(|c| c.is_ascii_digit()).count();

    let mut len = digits(0);
    if chars.get(len) == Some(&'.') {
        len += 1;
        len += digits(len);
    }
    if matches!(chars.get(len), Some('e' | 'E')) {
        let sign = usize::from(matches!(chars.get(len + 1), Some('+' | '-')));
        let exp_digits = digits(len + 1 + sign);
        if exp_digits > 0 {
            len += 1 + sign + exp_digits;
        }
    }

    let text: String = chars[..len].iter().collect();
    text.parse::<f64>()
        .map(|value| (value, len))
        .map_err(|e| format!("invalid number '{text}': {e}"))
}
