//! WorthIt terminal client entry point

use clap::Parser;

use worthit::cli::{Cli, Command};
use worthit::client::{ApiClient, AuthStore};
use worthit::commands::{self, FieldEdits};
use worthit::config::Config;
use worthit::domain::{DomainResult, ItemForm};

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = Config::load();
    let client = match ApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match run(&cli.command, &client).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(command: &Command, client: &ApiClient) -> DomainResult<String> {
    match command {
        Command::Login { username, password } => {
            commands::login(client, username, password).await
        }
        Command::Logout => commands::logout(client).await,
        Command::Status => commands::status(client).await,
        Command::List => {
            let logged_in = client.session_valid().await;
            commands::list_items(client, logged_in).await
        }
        Command::Add {
            name,
            price,
            additional,
            entry,
            retirement,
            remark,
        } => {
            let form = ItemForm {
                name: name.clone(),
                purchase_price: price.clone(),
                additional_value: additional.clone(),
                entry_date: entry.clone(),
                retirement_date: retirement.clone(),
                remark: remark.clone(),
            };
            commands::add_item(client, &form).await
        }
        Command::Edit {
            id,
            name,
            price,
            additional,
            entry,
            retirement,
            remark,
        } => {
            let edits = FieldEdits {
                name: name.clone(),
                purchase_price: price.clone(),
                additional_value: additional.clone(),
                entry_date: entry.clone(),
                retirement_date: retirement.clone(),
                remark: remark.clone(),
            };
            commands::edit_item(client, id, &edits).await
        }
        Command::Delete { id } => commands::delete_item(client, id).await,
    }
}
