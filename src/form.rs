//! Terminal form: credential, role picker, question, submit, result panel.

use std::time::Duration;

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use indicatif::ProgressBar;

use crate::core::{CompletionProvider, Credential};
use crate::handler::{CompletionHandler, Outcome, ValidationError};
use crate::roles::Role;

const NEXT_ACTIONS: [&str; 4] = [
    "Ask another question",
    "Change API key",
    "How to use this chatbot",
    "Quit",
];

pub struct ChatForm<P> {
    handler: CompletionHandler<P>,
    fallback_credential: Option<Credential>,
    theme: ColorfulTheme,
}

impl<P: CompletionProvider> ChatForm<P> {
    pub fn new(handler: CompletionHandler<P>) -> Self {
        Self {
            handler,
            fallback_credential: None,
            theme: ColorfulTheme::default(),
        }
    }

    /// Key used when the credential prompt is left empty.
    pub fn with_fallback_credential(mut self, credential: Option<Credential>) -> Self {
        self.fallback_credential = credential;
        self
    }

    /// Run the form until the user quits.
    ///
    /// Each submission is awaited before the next prompt is shown, so two
    /// requests are never in flight at once.
    pub async fn run(&self) -> Result<(), dialoguer::Error> {
        println!("{}", render_header());

        let mut credential = self.prompt_credential()?;
        let mut role_index = 0;

        loop {
            let names = Role::names();
            role_index = Select::with_theme(&self.theme)
                .with_prompt("Choose a role")
                .items(&names)
                .default(role_index)
                .interact()?;
            let role = Role::ALL[role_index];

            println!("{}", render_role_panel(role));

            let question = self.prompt_question(role)?;
            let submit = Confirm::with_theme(&self.theme)
                .with_prompt("Generate Response")
                .default(true)
                .interact()?;

            if submit {
                let outcome = self.submit(&credential, role, &question).await;
                println!("{}", render_outcome(&outcome));

                if needs_new_credential(&outcome) {
                    credential = self.prompt_credential()?;
                    continue;
                }
            }

            let next = Select::with_theme(&self.theme)
                .with_prompt("What next?")
                .items(&NEXT_ACTIONS)
                .default(0)
                .interact()?;

            match next {
                0 => {}
                1 => credential = self.prompt_credential()?,
                2 => println!("{}", help_panel()),
                _ => break,
            }
        }

        println!("{}", render_footer());
        Ok(())
    }

    fn prompt_credential(&self) -> Result<Credential, dialoguer::Error> {
        let prompt = if self.fallback_credential.is_some() {
            "Enter your OpenAI API Key (empty uses OPENAI_API_KEY)"
        } else {
            "Enter your OpenAI API Key"
        };

        let entered = Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;

        Ok(resolve_credential(entered, self.fallback_credential.as_ref()))
    }

    /// Read the question line by line; an empty line ends it.
    fn prompt_question(&self, role: Role) -> Result<String, dialoguer::Error> {
        println!("{}", format!("e.g., {}", role.describe().example).dimmed());
        println!("{}", "Finish with an empty line.".dimmed());

        let mut lines = Vec::new();
        loop {
            let prompt = if lines.is_empty() {
                format!("Ask the {role}")
            } else {
                "...".to_string()
            };
            let line = Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;

            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }

        Ok(join_question_lines(&lines))
    }

    async fn submit(&self, credential: &Credential, role: Role, question: &str) -> Outcome {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("Consulting with {role}..."));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let outcome = self.handler.generate(credential, role, question).await;

        spinner.finish_and_clear();
        outcome
    }
}

fn resolve_credential(entered: String, fallback: Option<&Credential>) -> Credential {
    match fallback {
        Some(credential) if entered.is_empty() => credential.clone(),
        _ => Credential::from(entered),
    }
}

/// A missing or rejected key can only be fixed by entering a new one.
fn needs_new_credential(outcome: &Outcome) -> bool {
    matches!(
        outcome,
        Outcome::Invalid(ValidationError::MissingCredential) | Outcome::AuthFailure
    )
}

fn join_question_lines(lines: &[String]) -> String {
    lines.join("\n")
}

pub fn render_header() -> String {
    format!(
        "{}\n{}\n",
        "🎭 Role-based Creative Chatbot".bold(),
        "Select a creative role and ask your question!"
    )
}

pub fn render_footer() -> String {
    "Built for Art & Advanced Big Data - Prof. Jahwan Koo (SKKU)"
        .dimmed()
        .to_string()
}

pub fn render_role_panel(role: Role) -> String {
    format!(
        "{}\n{}\n",
        "Role Description:".bold(),
        role.describe().description.cyan()
    )
}

pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success(text) => format!("\n{}\n{}\n", "Response:".bold(), text.green()),
        failure => format!("\n{}\n", failure.to_string().red()),
    }
}

/// Usage steps and the role list.
pub fn help_panel() -> String {
    let mut panel = format!(
        "{}\n\
         1. {} when the form starts\n\
         2. {} from the list\n\
         3. {} related to the chosen role\n\
         4. {} to get professional advice\n\n\
         {}\n",
        "How to use this chatbot".bold(),
        "Enter your OpenAI API key".bold(),
        "Select a creative role".bold(),
        "Ask a question".bold(),
        "Confirm 'Generate Response'".bold(),
        "Available Roles:".bold(),
    );

    for role in Role::ALL {
        panel.push_str(&format!(
            "- {} {}: {}\n",
            role.icon(),
            role.name().bold(),
            role.summary()
        ));
    }

    panel
}
