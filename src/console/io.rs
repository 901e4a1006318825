//! Line-oriented console input and output

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::AppResult;

/// Line-oriented terminal access. Generic so tests can script the input and
/// capture the output.
pub struct ConsoleIo<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> ConsoleIo<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub async fn print(&mut self, text: &str) -> AppResult<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    pub async fn println(&mut self, text: &str) -> AppResult<()> {
        self.print(text).await?;
        self.print("\n").await
    }

    /// Next input line without its line terminator, `None` once input is closed
    pub async fn read_line(&mut self) -> AppResult<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt until a line with non-whitespace content is entered. The line
    /// is returned as typed.
    pub async fn prompt_non_empty(&mut self, prompt: &str) -> AppResult<Option<String>> {
        loop {
            self.print(prompt).await?;
            match self.read_line().await? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Some(line)),
            }
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prompt_non_empty_skips_blank_lines() {
        let mut io = ConsoleIo::new(&b"\n   \r\n  Ada \n"[..], Vec::new());

        let answer = io.prompt_non_empty("Name: ").await.unwrap();
        assert_eq!(answer.as_deref(), Some("  Ada "));

        let output = String::from_utf8(io.into_writer()).unwrap();
        assert_eq!(output.matches("Name: ").count(), 3);
    }

    #[tokio::test]
    async fn test_read_line_end_of_input() {
        let mut io = ConsoleIo::new(&b"last"[..], Vec::new());
        assert_eq!(io.read_line().await.unwrap().as_deref(), Some("last"));
        assert_eq!(io.read_line().await.unwrap(), None);
        assert_eq!(io.prompt_non_empty("> ").await.unwrap(), None);
    }
}
