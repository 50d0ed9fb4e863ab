use crate::token::{Token, TokenKind};

/// Rebuilds normalized source from a token sequence.
///
/// Whitespace tokens are dropped and every other token is followed by one space, except
/// unary minus and section headers. Each line break re-indents by the current `if` depth;
/// an `endif` takes back the indent unit of the line it opens.
pub fn pretty_print(tokens: &[Token], indent: &str) -> String {
    let mut text = String::new();
    let mut level: isize = 0;

    for token in tokens {
        match token.kind {
            TokenKind::Whitespace | TokenKind::EOF => {}
            TokenKind::LineBreak => {
                let trimmed = text.trim_end_matches(' ').len();
                text.truncate(trimmed);
                text.push('\n');
                text.push_str(&indent.repeat(level.max(0) as usize));
            }
            TokenKind::SectionName => {
                text.push('[');
                text.push_str(token.text);
                text.push(']');
            }
            kind => {
                if kind == TokenKind::If {
                    level += 1;
                } else if kind == TokenKind::Endif {
                    level -= 1;
                    if !indent.is_empty() && text.ends_with(indent) {
                        text.truncate(text.len() - indent.len());
                    }
                }
                text.push_str(token.text);
                if kind != TokenKind::UnaryMinus {
                    text.push(' ');
                }
            }
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn normalizes_spacing() {
        let stream = tokenize("x=1\nkey   =\t$a+2");
        assert_eq!(pretty_print(stream.tokens(), "  "), "x=1\nkey = $a + 2 ");
    }

    #[test]
    fn indents_if_blocks() {
        let source = "[Main]\nif $a == 1\n$b = 2\nif $c\nrun = x\nendif\nendif\nz = 0";
        let expected = "[Main]\nif $a == 1\n  $b = 2\n  if $c\n    run = x\n  endif\nendif\nz = 0 ";
        assert_eq!(pretty_print(tokenize(source).tokens(), "  "), expected);
    }

    #[test]
    fn unary_minus_takes_no_pad() {
        let tokens = [
            Token::new(TokenKind::UnaryMinus, 0, "-"),
            Token::new(TokenKind::Number, 1, "3"),
        ];
        assert_eq!(pretty_print(&tokens, "  "), "-3 ");
    }

    #[test]
    fn stray_endif_does_not_underflow_indent() {
        let source = "endif\nx = 1";
        assert_eq!(pretty_print(tokenize(source).tokens(), "\t"), "endif\nx = 1 ");
    }
}
