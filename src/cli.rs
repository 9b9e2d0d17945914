//! Command-line surface
//!
//! One subcommand per user action. Add takes every field as a flag and
//! lets the domain validation report what is missing, the way the web form
//! did; edit only diffs the flags that were actually passed.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "worthit")]
#[command(about = "Track what your good things cost per day")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and store the session cookie
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the session and drop the stored cookie
    Logout,
    /// Check whether the stored session is still valid
    Status,
    /// List all tracked items
    List,
    /// Add a new item (name, price and entry date are required)
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        price: String,
        #[arg(long, default_value = "")]
        additional: String,
        /// Entry date, YYYY-MM-DD
        #[arg(long, default_value = "")]
        entry: String,
        /// Retirement date, YYYY-MM-DD; omit while still in service
        #[arg(long, default_value = "")]
        retirement: String,
        #[arg(long, default_value = "")]
        remark: String,
    },
    /// Edit an item; only the flags you pass are compared against the
    /// server copy, and only changed fields are sent
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        /// Pass an empty string to clear the additional value
        #[arg(long)]
        additional: Option<String>,
        #[arg(long)]
        entry: Option<String>,
        /// Pass an empty string to mark the item as back in service
        #[arg(long)]
        retirement: Option<String>,
        #[arg(long)]
        remark: Option<String>,
    },
    /// Delete an item
    Delete { id: String },
}
