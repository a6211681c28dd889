use nu_ansi_term::{Color, Style};
use quotient::parser::{self, TokenKind};
use reedline::StyledText;

const PLAIN: Color = Color::White;
const NUMBER: Color = Color::Cyan;
const OPERATOR: Color = Color::Magenta;
const PUNCTUATION: Color = Color::Yellow;
const INVALID: Color = Color::Red;

/// Colors the input line using the expression lexer.
pub struct Highlighter;

impl Highlighter {
    fn push(output: &mut StyledText, color: Color, text: &str) {
        if !text.is_empty() {
            output.push((Style::new().fg(color), text.to_string()));
        }
    }
}

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();

        let tokens = match parser::tokenize(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                // Mark the offending span and leave the rest plain.
                let span = e.span().0.clone();
                let (start, end) = (span.start.min(line.len()), span.end.min(line.len()));
                Self::push(&mut output, PLAIN, &line[..start]);
                Self::push(&mut output, INVALID, &line[start..end]);
                Self::push(&mut output, PLAIN, &line[end..]);
                return output;
            }
        };

        let mut curr_end = 0;
        for token in tokens {
            let span = token.span.0.clone();
            Self::push(&mut output, PLAIN, &line[curr_end..span.start]);
            let color = match token.kind {
                TokenKind::Numeral(_) => NUMBER,
                TokenKind::Operator(_) => OPERATOR,
                TokenKind::LParen | TokenKind::RParen => PUNCTUATION,
            };
            Self::push(&mut output, color, &line[span.clone()]);
            curr_end = span.end;
        }
        Self::push(&mut output, PLAIN, &line[curr_end..]);

        output
    }
}
