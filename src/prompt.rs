//! Interactive questions asked by the CLI. The library never prompts; the
//! binary passes the answers in.

use std::io::{self, BufRead, Write};

/// Print `question`, read one line, and return it trimmed
pub fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask whether `title` is the intended asset group. Only `yes` confirms.
pub fn confirm_title<R: BufRead, W: Write>(
    title: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    let answer = ask(
        &format!("Asset Group Title: {}. Is this correct? (yes/no): ", title),
        input,
        output,
    )?;
    Ok(answer.eq_ignore_ascii_case("yes"))
}

/// [`ask`] on the process's stdin and stdout
pub fn ask_stdin(question: &str) -> io::Result<String> {
    ask(question, &mut io::stdin().lock(), &mut io::stdout())
}

/// [`confirm_title`] on the process's stdin and stdout
pub fn confirm_title_stdin(title: &str) -> io::Result<bool> {
    confirm_title(title, &mut io::stdin().lock(), &mut io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_trims_answer() {
        let mut input = Cursor::new("  12345 \n");
        let mut output = Vec::new();

        let answer = ask("Enter the Asset Group ID: ", &mut input, &mut output).unwrap();
        assert_eq!(answer, "12345");
        assert_eq!(String::from_utf8(output).unwrap(), "Enter the Asset Group ID: ");
    }

    #[test]
    fn test_ask_at_eof() {
        let mut input = Cursor::new("");
        let answer = ask("? ", &mut input, &mut Vec::new()).unwrap();
        assert_eq!(answer, "");
    }

    #[test]
    fn test_confirm_yes_any_case() {
        for reply in ["yes\n", "YES\n", "Yes\r\n"] {
            let mut input = Cursor::new(reply);
            assert!(confirm_title("Finance", &mut input, &mut Vec::new()).unwrap());
        }
    }

    #[test]
    fn test_confirm_rejects_anything_else() {
        for reply in ["y\n", "no\n", "\n", "yes please\n"] {
            let mut input = Cursor::new(reply);
            assert!(!confirm_title("Finance", &mut input, &mut Vec::new()).unwrap());
        }
    }

    #[test]
    fn test_confirm_shows_title() {
        let mut output = Vec::new();
        confirm_title("Finance Web", &mut Cursor::new("no\n"), &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("Asset Group Title: Finance Web."));
    }
}
