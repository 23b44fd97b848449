//! Interactive terminal chat: sign-in gate, welcome screen, transcript.

use crate::auth::SignUpOutcome;
use crate::cli::error::CliError;
use crate::cli::progress;
use crate::conversation::{ChatSession, SendOutcome};
use crate::forms::{Credentials, SignUpForm};
use crate::i18n::Texts;
use crate::models::Message;
use crate::render::MarkdownRenderer;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

/// One line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    /// Empty line: show the starter questions when nothing was asked yet.
    Empty,
    NewChat,
    Logout,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed {
        "" => Command::Empty,
        "/new" | "/clear" => Command::NewChat,
        "/logout" => Command::Logout,
        "/help" | "/?" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Send(trimmed.to_string()),
    }
}

/// Transcript entry for one message.
pub fn format_message(message: &Message, renderer: &dyn MarkdownRenderer) -> String {
    let body = match message.role {
        crate::models::Role::User => message.content.clone(),
        crate::models::Role::Assistant => renderer.render(&message.content),
    };
    format!(
        "{} [{}]\n{}",
        progress::role_icon(message.role),
        message.timestamp.format("%H:%M"),
        body
    )
}

pub fn welcome_screen(texts: &Texts) -> String {
    let mut lines = vec![
        texts.welcome_title.to_string(),
        texts.welcome_body.to_string(),
        String::new(),
    ];
    lines.extend(
        texts
            .starter_prompts
            .iter()
            .enumerate()
            .map(|(i, prompt)| format!("  {}. {}", i + 1, prompt)),
    );
    lines.push(String::new());
    lines.push(texts.help.to_string());
    lines.join("\n")
}

enum AuthFlow {
    Authenticated,
    Quit,
}

pub struct ChatApp {
    session: ChatSession,
    renderer: Box<dyn MarkdownRenderer>,
    theme: ColorfulTheme,
}

impl ChatApp {
    pub fn new(session: ChatSession, renderer: Box<dyn MarkdownRenderer>) -> Self {
        Self {
            session,
            renderer,
            theme: ColorfulTheme::default(),
        }
    }

    fn texts(&self) -> &'static Texts {
        self.session.locale().texts()
    }

    pub async fn run(&self) -> Result<(), CliError> {
        loop {
            if self.session.current_user().await.is_none() {
                match self.authenticate().await? {
                    AuthFlow::Authenticated => println!("\n{}\n", welcome_screen(self.texts())),
                    AuthFlow::Quit => return Ok(()),
                }
            }

            let line: String = Input::with_theme(&self.theme)
                .with_prompt(self.texts().input_placeholder)
                .allow_empty(true)
                .interact_text()?;

            match parse_command(&line) {
                Command::Send(text) => self.send(&text).await,
                Command::Empty => {
                    if self.session.snapshot().await.messages.is_empty() {
                        if let Some(prompt) = self.pick_starter()? {
                            self.send(prompt).await;
                        }
                    }
                }
                Command::NewChat => {
                    self.session.clear().await;
                    println!("{}\n\n{}\n", self.texts().new_chat, welcome_screen(self.texts()));
                }
                Command::Logout => {
                    self.session.sign_out().await;
                    println!("{}", self.texts().signed_out);
                }
                Command::Help => println!("{}", self.texts().help),
                Command::Quit => {
                    self.session.sign_out().await;
                    return Ok(());
                }
            }
        }
    }

    fn pick_starter(&self) -> Result<Option<&'static str>, CliError> {
        let prompts = &self.texts().starter_prompts;
        let choice = Select::with_theme(&self.theme)
            .with_prompt(self.texts().welcome_title)
            .items(&prompts[..])
            .default(0)
            .interact_opt()?;
        Ok(choice.map(|idx| prompts[idx]))
    }

    async fn send(&self, text: &str) {
        let texts = self.texts();
        let pb = progress::spinner(texts.thinking);

        match self.session.send(text).await {
            SendOutcome::Replied(message) => {
                progress::finish_clear(&pb);
                println!("\n{}\n", format_message(&message, self.renderer.as_ref()));
                println!("{}", texts.disclaimer);
            }
            SendOutcome::Failed(message) => progress::finish_error(&pb, &message),
            SendOutcome::Rejected | SendOutcome::Abandoned => progress::finish_clear(&pb),
        }
    }

    async fn authenticate(&self) -> Result<AuthFlow, CliError> {
        let texts = self.texts();
        println!("\nOPENPOLICY\n{}\n", texts.auth_required);

        loop {
            let choice = Select::with_theme(&self.theme)
                .items(&[texts.sign_in_label, texts.sign_up_label, texts.quit_label])
                .default(0)
                .interact()?;
            if choice == 2 {
                return Ok(AuthFlow::Quit);
            }

            let email: String = Input::with_theme(&self.theme)
                .with_prompt(texts.email_label)
                .allow_empty(true)
                .interact_text()?;

            match choice {
                0 => {
                    let password = Password::with_theme(&self.theme)
                        .with_prompt(texts.password_label)
                        .allow_empty_password(true)
                        .interact()?;
                    match self.session.sign_in(&Credentials::new(email, password)).await {
                        Ok(_) => return Ok(AuthFlow::Authenticated),
                        Err(err) => {
                            tracing::info!(error = %err, "Sign in failed");
                            eprintln!("{}", err.user_message(self.session.locale()));
                        }
                    }
                }
                1 => {
                    let password = Password::with_theme(&self.theme)
                        .with_prompt(texts.password_label)
                        .allow_empty_password(true)
                        .interact()?;
                    let confirm = Password::with_theme(&self.theme)
                        .with_prompt(texts.confirm_password_label)
                        .allow_empty_password(true)
                        .interact()?;
                    let form = SignUpForm::new(email, password, confirm);
                    match self.session.sign_up(&form).await {
                        Ok(SignUpOutcome::SignedIn(_)) => return Ok(AuthFlow::Authenticated),
                        Ok(SignUpOutcome::ConfirmationSent) => {
                            println!("{} ({})", texts.sign_up_sent, form.credentials.email)
                        }
                        Err(err) => {
                            tracing::info!(error = %err, "Sign up failed");
                            eprintln!("{}", err.user_message(self.session.locale()));
                        }
                    }
                }
                _ => return Ok(AuthFlow::Quit),
            }
        }
    }
}
