use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success => write!(f, "{}", "Success:".green()),
            Status::Failed => write!(f, "{}", "Failed:".red()),
        }
    }
}

/// Terminal output. Results go to stdout, status lines to stderr so the
/// `--json` output stays machine readable.
#[derive(Debug, Clone, Default)]
pub struct Ui {
    quiet: bool,
}

impl Ui {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn status(&self, status: Status, message: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{} {}", status, message.as_ref());
        }
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.status(Status::Success, message)
    }

    pub fn failed(&self, message: impl AsRef<str>) {
        self.status(Status::Failed, message)
    }

    /// Run a command and print its output, reporting errors as a failed
    /// status line before passing them on
    pub fn run<F>(&self, command: F) -> anyhow::Result<()>
    where
        F: FnOnce() -> anyhow::Result<String>,
    {
        match command() {
            Ok(result) => {
                if !result.is_empty() {
                    println!("{}", result);
                }
                Ok(())
            }
            Err(e) => {
                self.failed(e.to_string());
                Err(e)
            }
        }
    }
}
