use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use sml::Word;

use crate::error::{Error, Fault};

/// The machine's only link to the outside world.
pub trait Port {
    /// Block until one value is available.
    fn read(&mut self) -> Result<i64, Fault>;
    fn write(&mut self, word: Word) -> Result<(), Fault>;
    fn newline(&mut self) -> Result<(), Fault>;
    fn message(&mut self, text: &str) -> Result<(), Fault>;
}

// ----------------------------------------------------------------------------
// Console: stdin/stdout, mirrored into a transcript file

pub struct Console {
    read_buf: Option<VecDeque<String>>,
    write_buf: Option<Box<dyn Write>>,
}

impl Console {
    pub fn arg(read_file: Option<&Path>, write_file: Option<&Path>) -> Result<Console, Error> {
        // Pre-read scripted input, one value per whitespace separated token
        let read_buf = match read_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| Error::FileOpen(path.display().to_string(), e))?;
                Some(text.split_whitespace().map(str::to_string).collect())
            }
            None => None,
        };

        let write_buf = match write_file {
            Some(path) => {
                let file = File::create(path)
                    .map_err(|e| Error::FileCreate(path.display().to_string(), e))?;
                Some(Box::new(BufWriter::new(file)) as Box<dyn Write>)
            }
            None => None,
        };

        Ok(Console {
            read_buf,
            write_buf,
        })
    }

    fn mirror(&mut self, text: &str) -> Result<(), Fault> {
        if let Some(buf) = self.write_buf.as_mut() {
            buf.write_all(text.as_bytes())?;
        }
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<(), Fault> {
        let mut stdout = std::io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        self.mirror(text)
    }
}

impl Port for Console {
    fn read(&mut self) -> Result<i64, Fault> {
        let line = match self.read_buf.as_mut() {
            Some(buf) => {
                let token = buf.pop_front().ok_or(Fault::InputClosed)?;
                println!("{}", token);
                token
            }
            None => {
                let mut line = String::new();
                if std::io::stdin().lock().read_line(&mut line)? == 0 {
                    return Err(Fault::InputClosed);
                }
                line.trim().to_string()
            }
        };
        self.mirror(&format!("{}\n", line))?;
        line.parse().map_err(|_| Fault::InvalidInput(line))
    }

    fn write(&mut self, word: Word) -> Result<(), Fault> {
        self.print(&format!("{}\n", word))
    }

    fn newline(&mut self) -> Result<(), Fault> {
        self.print("\n")
    }

    fn message(&mut self, text: &str) -> Result<(), Fault> {
        self.print(text)
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        if let Some(buf) = self.write_buf.as_mut() {
            let _ = buf.flush();
        }
    }
}

// ----------------------------------------------------------------------------
// Script: in-memory input queue and captured output

#[derive(Debug, Default, Clone)]
pub struct Script {
    input: VecDeque<i64>,
    pub output: Vec<Word>,
    pub text: String,
}

impl Script {
    pub fn new(input: impl IntoIterator<Item = i64>) -> Self {
        Script {
            input: input.into_iter().collect(),
            output: Vec::new(),
            text: String::new(),
        }
    }
}

impl Port for Script {
    fn read(&mut self) -> Result<i64, Fault> {
        let value = self.input.pop_front().ok_or(Fault::InputClosed)?;
        self.text.push_str(&format!("{}\n", value));
        Ok(value)
    }

    fn write(&mut self, word: Word) -> Result<(), Fault> {
        self.output.push(word);
        self.text.push_str(&format!("{}\n", word));
        Ok(())
    }

    fn newline(&mut self) -> Result<(), Fault> {
        self.text.push('\n');
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<(), Fault> {
        self.text.push_str(text);
        Ok(())
    }
}
