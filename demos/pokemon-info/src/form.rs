//! Reading submitted names from a line-oriented input.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Line that ends the session
pub const QUIT: &str = ":quit";

/// Turns input lines into submitted names
///
/// Each line is one submission. Surrounding whitespace is dropped; a blank
/// line submits the empty name.
pub struct PokemonForm<R> {
    lines: Lines<R>,
}

impl<R> PokemonForm<R>
where
    R: AsyncBufRead + Unpin,
{
    /// Read submissions from `reader`
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Next submitted name, `None` at end of input or on [`QUIT`]
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying reader.
    pub async fn next_submission(&mut self) -> std::io::Result<Option<String>> {
        let Some(line) = self.lines.next_line().await? else {
            return Ok(None);
        };

        let name = line.trim();
        if name == QUIT {
            return Ok(None);
        }
        Ok(Some(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submissions() -> std::io::Result<()> {
        let input: &[u8] = b"  pikachu \n\nmew\n:quit\ncharizard\n";
        let mut form = PokemonForm::new(input);

        assert_eq!(form.next_submission().await?, Some("pikachu".to_string()));
        assert_eq!(form.next_submission().await?, Some(String::new()));
        assert_eq!(form.next_submission().await?, Some("mew".to_string()));
        assert_eq!(form.next_submission().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_end_of_input() -> std::io::Result<()> {
        let input: &[u8] = b"mew";
        let mut form = PokemonForm::new(input);

        assert_eq!(form.next_submission().await?, Some("mew".to_string()));
        assert_eq!(form.next_submission().await?, None);
        Ok(())
    }
}
