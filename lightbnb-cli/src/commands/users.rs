//! `lightbnb users` - look up and create users

use std::io::{self, Write};

use anyhow::{anyhow, Context as _, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::models::NewUser;
use lightbnb_db::BookingStore;

use super::Context;
use crate::output::{write_user, OutputFormat};

#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// Look up a user by email (case-insensitive)
    ByEmail {
        /// Email address
        email: String,
    },
    /// Look up a user by id
    ById {
        /// User id
        id: i32,
    },
    /// Create a user
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address (stored lowercase)
        #[arg(long)]
        email: String,
        /// Password hash to store (bcrypt); never a plaintext password
        #[arg(long, env = "LIGHTBNB_PASSWORD_HASH", hide_env_values = true)]
        password: String,
    },
}

pub async fn run_users(args: UsersArgs, ctx: &Context) -> Result<()> {
    let store = ctx.connect().await?;
    execute(&store, args.command, ctx.format, &mut io::stdout()).await
}

pub async fn execute<S: BookingStore + ?Sized>(
    store: &S,
    command: UsersCommand,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        UsersCommand::ByEmail { email } => {
            let user = store
                .get_user_with_email(&email)
                .await
                .context("Failed to look up user")?
                .ok_or_else(|| anyhow!("No user with email '{}'", email))?;
            write_user(out, &user, format)
        }
        UsersCommand::ById { id } => {
            let user = store
                .get_user_with_id(id)
                .await
                .context("Failed to look up user")?
                .ok_or_else(|| anyhow!("No user with id {}", id))?;
            write_user(out, &user, format)
        }
        UsersCommand::Add {
            name,
            email,
            password,
        } => {
            let new_user = NewUser::new(name, &email, password)?;
            let user = store
                .add_user(&new_user)
                .await
                .context("Failed to create user")?;
            write_user(out, &user, format)
        }
    }
}
