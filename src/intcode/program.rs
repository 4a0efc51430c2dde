use std::{fs, path::Path};

use tracing::debug;

use crate::intcode::errors::IntcodeError;

/// Parses a comma-separated listing. Whitespace around tokens and a single
/// trailing comma are accepted; anything else that is not an integer is an
/// error.
pub fn parse(text: &str) -> Result<Vec<i64>, IntcodeError> {
    let text = text.trim();
    let text = text.strip_suffix(',').unwrap_or(text);
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            token.parse::<i64>().map_err(|_| IntcodeError::Parse {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Reads and parses a listing from disk.
pub fn load(path: &Path) -> Result<Vec<i64>, IntcodeError> {
    let text = fs::read_to_string(path).map_err(|source| IntcodeError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let program = parse(&text)?;
    debug!(path = %path.display(), len = program.len(), "program loaded");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_listing() {
        assert_eq!(parse("1101,100,-1,4,0").unwrap(), vec![1101, 100, -1, 4, 0]);
        assert_eq!(parse(" 3, +4 ,\n99,\n").unwrap(), vec![3, 4, 99]);
        assert!(parse("  \n").unwrap().is_empty());
    }

    #[test]
    fn bad_token_is_reported() {
        match parse("1,2,x3,4") {
            Err(IntcodeError::Parse { index, token }) => {
                assert_eq!(index, 2);
                assert_eq!(token, "x3");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(parse("1,,2"), Err(IntcodeError::Parse { index: 1, .. })));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, IntcodeError::Load { .. }));
        assert!(err.to_string().contains("here.txt"));
    }
}
