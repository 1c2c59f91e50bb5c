use crate::error::PathError;
use crate::path::{Path, PathCommand, PathCommandKind};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Letter(char),
    Number(f32),
}

const COMMAND_LETTERS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// Parse SVG path-data into a [Path].
///
/// Implicit command repetition is expanded: `"L 1,2 3,4"` produces two
/// `Line` commands. Empty input produces an empty command list.
pub fn parse(input: &str) -> Result<Path, PathError> {
    let tokens = tokenize(input)?;

    let mut commands = Vec::new();
    let mut kind: Option<PathCommandKind> = None;
    let mut numbers: Vec<f32> = Vec::new();

    for token in tokens {
        match token {
            Token::Letter(letter) => {
                if let Some(kind) = kind {
                    finish_command(kind, &mut numbers, &mut commands)?;
                }
                kind = Some(PathCommandKind::from_letter(letter).ok_or(PathError::InvalidPath)?);
                numbers.clear();
            }
            Token::Number(value) => {
                if kind.is_none() {
                    log::warn!("path data: number before the first command letter");
                    return Err(PathError::InvalidPath);
                }
                numbers.push(value);
            }
        }
    }

    if let Some(kind) = kind {
        finish_command(kind, &mut numbers, &mut commands)?;
    }

    Ok(Path {
        commands,
        ..Path::default()
    })
}

/// Flush the numbers accumulated for `kind`, expanding implicit repetition
/// into `count / arity` commands.
fn finish_command(
    kind: PathCommandKind,
    numbers: &mut Vec<f32>,
    commands: &mut Vec<PathCommand>,
) -> Result<(), PathError> {
    let arity = kind.arity();

    if arity == 0 {
        if !numbers.is_empty() {
            log::warn!("path data: arity-0 command {:?} given parameters", kind);
            return Err(PathError::InvalidPath);
        }
        commands.push(PathCommand::new(kind, Vec::new()));
    } else {
        if numbers.is_empty() || numbers.len() % arity != 0 {
            log::warn!(
                "path data: {:?} got {} parameters, not a positive multiple of {}",
                kind,
                numbers.len(),
                arity
            );
            return Err(PathError::InvalidPath);
        }
        for chunk in numbers.chunks(arity) {
            commands.push(PathCommand::new(kind, chunk.to_vec()));
        }
    }

    numbers.clear();
    Ok(())
}

fn tokenize(input: &str) -> Result<Vec<Token>, PathError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() || c == ',' {
            i += 1;
            continue;
        }

        if COMMAND_LETTERS.contains(c) {
            tokens.push(Token::Letter(c));
            i += 1;
            continue;
        }

        if c == '+' || c == '-' || c == '.' || c.is_ascii_digit() {
            let (text, next) = scan_number(&chars, i);
            let value: f32 = text.parse().map_err(|_| PathError::InvalidPath)?;
            tokens.push(Token::Number(value));
            i = next;
            continue;
        }

        log::warn!("path data: unexpected character {:?}", c);
        return Err(PathError::InvalidPath);
    }

    Ok(tokens)
}

/// Scan one number starting at `chars[start]`, returning its source text and
/// the index just past it.
///
/// A `+`/`-` immediately after `e`/`E` is consumed as the exponent's sign,
/// not treated as the start of the next number.
fn scan_number(chars: &[char], start: usize) -> (String, usize) {
    let mut i = start;
    let mut text = String::new();

    if i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
        text.push(chars[i]);
        i += 1;
    }

    while i < chars.len() && chars[i].is_ascii_digit() {
        text.push(chars[i]);
        i += 1;
    }

    if i < chars.len() && chars[i] == '.' {
        text.push(chars[i]);
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            text.push(chars[i]);
            i += 1;
        }
    }

    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut lookahead = i + 1;
        if lookahead < chars.len() && (chars[lookahead] == '+' || chars[lookahead] == '-') {
            lookahead += 1;
        }
        if lookahead < chars.len() && chars[lookahead].is_ascii_digit() {
            text.push(chars[i]);
            i += 1;
            if chars[i] == '+' || chars[i] == '-' {
                text.push(chars[i]);
                i += 1;
            }
            while i < chars.len() && chars[i].is_ascii_digit() {
                text.push(chars[i]);
                i += 1;
            }
        }
    }

    (text, i)
}
