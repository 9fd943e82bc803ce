use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

/// The interactive channel sign-in talks through.
pub trait Ui {
    fn prompt(&mut self, label: &str) -> std::io::Result<String>;

    /// Like [`Ui::prompt`], without echoing what's typed.
    fn prompt_secret(&mut self, label: &str) -> std::io::Result<String>;

    fn info(&mut self, message: &str);

    fn error(&mut self, message: &str);
}

/// A [`Ui`] on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TermUi;

impl Ui for TermUi {
    fn prompt(&mut self, label: &str) -> std::io::Result<String> {
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .interact()
    }

    fn prompt_secret(&mut self, label: &str) -> std::io::Result<String> {
        Password::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .interact()
    }

    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
