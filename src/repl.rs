use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::{Session, run_source};

const BANNER: &str = "Azhar v0.6 REPL (type 'exit' to quit)";
const PROMPT: &str = ">>> ";
const CONTINUATION: &str = "... ";
const FILE: &str = "<stdin>";

/// Runs the interactive prompt on `session` until `exit` or end of input.
///
/// Lines are buffered while more `do` than `end` words have been typed, then
/// the buffer runs as one chunk. Prompts and diagnostics are written to the
/// session's output stream; a failing chunk does not end the loop.
///
/// ## Example
/// ```
/// use azhar::{Session, repl};
///
/// let input = "let n: int = 2\nwhile n > 0 do\nprint(n)\nn = n - 1\nend\nexit\n";
/// let mut session = Session::with_io(input.as_bytes(), Vec::new());
/// repl::start(&mut session).unwrap();
///
/// let transcript = String::from_utf8(session.interpreter.into_output()).unwrap();
/// assert!(transcript.contains("... ... ... 2\n1\n"));
/// ```
pub fn start<R: BufRead, W: Write>(session: &mut Session<R, W>) -> io::Result<()> {
    writeln!(session.interpreter.output_mut(), "{BANNER}")?;

    let mut buffer = String::new();
    let mut depth = 0_i64;

    loop {
        let prompt = if depth > 0 { CONTINUATION } else { PROMPT };
        write!(session.interpreter.output_mut(), "{prompt}")?;
        session.interpreter.output_mut().flush()?;

        let mut line = String::new();
        if session.interpreter.input_mut().read_line(&mut line)? == 0 {
            writeln!(session.interpreter.output_mut())?;
            break;
        }

        if line.trim() == "exit" {
            break;
        }

        buffer.push_str(line.trim_end_matches(['\n', '\r']));
        buffer.push('\n');
        depth += block_balance(&line);

        if depth <= 0 {
            debug!(bytes = buffer.len(), "running chunk");
            if let Err(diagnostic) = run_source(&buffer, FILE, session) {
                writeln!(session.interpreter.output_mut(), "{diagnostic}")?;
            }
            buffer.clear();
            depth = 0;
        }
    }

    session.interpreter.output_mut().flush()
}

/// Number of `do` words minus number of `end` words in `line`.
fn block_balance(line: &str) -> i64 {
    line.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .map(|word| match word {
            "do" => 1,
            "end" => -1,
            _ => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(input: &'static str) -> String {
        let mut session = Session::with_io(input.as_bytes(), Vec::new());
        start(&mut session).unwrap();
        String::from_utf8(session.interpreter.into_output()).unwrap()
    }

    #[test]
    fn counts_whole_words_only() {
        assert_eq!(block_balance("if done do print(x) end"), 0);
        assert_eq!(block_balance("function f() -> int do"), 1);
        assert_eq!(block_balance("end end"), -2);
        assert_eq!(block_balance("let ending: int = 1"), 0);
    }

    #[test]
    fn globals_survive_between_chunks() {
        let output = transcript("let x: int = 41\nprint(x + 1)\n");

        assert_eq!(output, format!("{BANNER}\n>>> >>> 42\n>>> \n"));
    }

    #[test]
    fn errors_are_reported_and_the_loop_continues() {
        let output = transcript("print(y)\nprint(1)\nexit\n");

        assert!(output.contains("<stdin>:1:7: TypeError: Undeclared variable 'y'"));
        assert!(output.ends_with(">>> 1\n>>> "));
    }

    #[test]
    fn rejected_chunks_leave_no_declarations() {
        let output = transcript("let a: int = \"s\"\nprint(a)\nexit\n");

        assert!(output.contains("TypeError: Cannot assign string to int"));
        assert!(output.contains("TypeError: Undeclared variable 'a'"));
    }
}
