use std::io::{self, Write};

pub struct ShellPrompt {
    prompt: String,
}

impl ShellPrompt {
    pub fn new(prompt: &str) -> Self {
        ShellPrompt {
            prompt: prompt.to_string(),
        }
    }

    /// Shows the prompt and blocks for one line. Returns `Ok(None)` on EOF
    /// (e.g. Ctrl+D).
    pub fn read_line(&self) -> io::Result<Option<String>> {
        print!("{}", self.prompt);
        io::stdout().flush()?;

        let mut buf = String::new();
        let bytes_read = io::stdin().read_line(&mut buf)?;
        if bytes_read == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(buf.trim_end().to_string()))
    }
}
