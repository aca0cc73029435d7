use std::{
    io::Write,
    process::{Command, Stdio},
};

use pocatalog::{Converter, Error};

/// A [`Converter`] that pipes each string through an external program,
/// for example `opencc -c s2twp.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    /// Builds a converter from a command line, program first. Returns `None`
    /// for an empty command line.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(CommandConverter {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Converter for CommandConverter {
    fn convert(&self, text: &str) -> Result<String, Error> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::conversion_error(format!("cannot run `{}`", self.program), Some(Box::new(e)))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program that exits without reading is reported by its status.
            match stdin.write_all(text.as_bytes()) {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                    return Err(Error::conversion_error(
                        format!("cannot write to `{}`", self.program),
                        Some(Box::new(e)),
                    ));
                }
                _ => {}
            }
        }

        let output = child.wait_with_output().map_err(|e| {
            Error::conversion_error(format!("`{}` did not finish", self.program), Some(Box::new(e)))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::conversion_error(
                format!("`{}` failed: {}", self.program, stderr.trim()),
                None,
            ));
        }

        let mut converted = String::from_utf8(output.stdout).map_err(|e| {
            Error::conversion_error(
                format!("`{}` produced invalid UTF-8", self.program),
                Some(Box::new(e)),
            )
        })?;
        // Line-oriented tools terminate their output; keep the input's ending.
        if !text.ends_with('\n') && converted.ends_with('\n') {
            converted.pop();
            if converted.ends_with('\r') {
                converted.pop();
            }
        }
        Ok(converted)
    }
}
