//! Lexical analysis of a command line.
//!
//! The shell has no quoting or substitutions, so a token is simply a maximal run
//! of non-delimiter characters.

/// Characters that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Initial capacity of the token vector.
const TOKEN_BLOCK: usize = 64;

fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

/// Splits `line` into owned tokens.
///
/// Runs of delimiters count as a single split point, so the result never
/// contains empty tokens. A line made only of delimiters yields no tokens.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::with_capacity(TOKEN_BLOCK);
    tokens.extend(
        line.split(is_delimiter)
            .filter(|word| !word.is_empty())
            .map(str::to_owned),
    );
    tokens
}
