//! Comment-stripping pre-pass for asset files.
//!
//! Starbound's asset "JSON" allows `//` line comments and `/* */` block
//! comments. This pass blanks them out before parsing, preserving string
//! contents (a `//` inside a quoted string is data) and preserving
//! newlines inside block comments so parse errors still report the right
//! line.

/// Replace comments with whitespace, leaving everything else untouched.
pub fn strip_comments(input: &str) -> String {
    enum State {
        Code,
        StringLit,
        LineComment,
        BlockComment,
    }

    let mut out = String::with_capacity(input.len());
    let mut state = State::Code;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '"' => {
                    state = State::StringLit;
                    out.push(c);
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                _ => out.push(c),
            },
            State::StringLit => {
                out.push(c);
                match c {
                    '\\' => {
                        // Escaped character, including \" — copy it through.
                        if let Some(next) = chars.next() {
                            out.push(next);
                        }
                    }
                    '"' => state = State::Code,
                    _ => {}
                }
            }
            State::LineComment => {
                if c == '\n' {
                    out.push(c);
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '\n' {
                    out.push(c);
                } else if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
        }
    }
    out
}
