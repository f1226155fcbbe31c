//! Account commands.
//!
//! Confirmation codes are written to the log by the stand-in mailer.

use clap::Subcommand;

use lunnar_client::accounts::{AccountError, LogMailer};
use lunnar_client::{ClientConfig, Marketplace};

use super::emit;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum AccountAction {
    /// Start a registration; a code is sent to the email address
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Password confirmation
        #[arg(short, long)]
        confirm: String,
        /// Accept the terms of use
        #[arg(long)]
        accept_terms: bool,
    },
    /// Confirm a registration with the emailed code
    Verify {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        code: String,
        /// Also create the account on the server
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Send a new verification code
    Resend {
        #[arg(short, long)]
        email: String,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Request a password reset code
    Forgot {
        #[arg(short, long)]
        email: String,
    },
    /// Set a new password with a reset code
    Reset {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        code: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Show the signed-in profile
    Profile,
}

/// Run an account action.
///
/// # Errors
///
/// Returns `AccountError` for validation failures, wrong codes, bad
/// credentials or storage failures.
pub async fn run(config: &ClientConfig, action: AccountAction) -> Result<(), AccountError> {
    let mut app = Marketplace::open(config, LogMailer).await;

    match action {
        AccountAction::Register {
            username,
            email,
            password,
            confirm,
            accept_terms,
        } => {
            let email = app
                .accounts()
                .register(&username, &email, &password, &confirm, accept_terms)
                .await?;
            emit(&format!("Verification code sent to {email}."));
        }
        AccountAction::Verify {
            email,
            code,
            password,
        } => {
            let user = app
                .accounts()
                .verify(&email, &code, password.as_deref())
                .await?;
            emit(&format!("Account {} created. You can now sign in.", user.username));
        }
        AccountAction::Resend { email } => {
            app.accounts().resend(&email).await?;
            emit("A new code has been sent.");
        }
        AccountAction::Login { email, password } => {
            let session = app.login(&email, &password).await?;
            let mode = if session.is_local() { " (offline)" } else { "" };
            emit(&format!("Signed in as {}{mode}.", session.username));
        }
        AccountAction::Logout => {
            app.logout().await?;
            emit("Signed out.");
        }
        AccountAction::Forgot { email } => {
            app.accounts().forgot_password(&email).await?;
            emit("Password reset code sent.");
        }
        AccountAction::Reset {
            email,
            code,
            password,
            confirm,
        } => {
            app.accounts()
                .reset_password(&email, &code, &password, &confirm)
                .await?;
            emit("Password updated.");
        }
        AccountAction::Profile => {
            app.refresh().await;
            match app.profile().await {
                Some(profile) => emit(&render::profile(&profile)),
                None => emit("Not signed in."),
            }
        }
    }
    Ok(())
}
