//! `tamween` - CLI for the ration card record keeper
//!
//! This binary provides the command-line interface for recording, editing,
//! listing and backing up ration card withdrawals.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;

use tamween::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ExportCommand,
    ImportCommand, ListCommand, OutputFormat, ShowCommand, TerminalPrompt,
};
use tamween::transfer::{self, AssumeYes, Confirm, ImportOutcome};
use tamween::{
    compute_stats, init_logging, max_withdrawal, view, CardDraft, CardStore, Config, Error,
    RationCard, SqliteStore,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> CliResult {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config_path = cli.config;
    match cli.command {
        Command::List(cmd) => with_store(config_path, |store, config| {
            handle_list(store, config, &cmd)
        }),
        Command::Show(cmd) => with_store(config_path, |store, config| {
            handle_show(store, config, &cmd)
        }),
        Command::Add(cmd) => with_store(config_path, |store, _| handle_add(store, &cmd)),
        Command::Edit(cmd) => with_store(config_path, |store, _| handle_edit(store, &cmd)),
        Command::Delete(cmd) => with_store(config_path, |store, _| handle_delete(store, &cmd)),
        Command::Stats(cmd) => with_store(config_path, |store, config| {
            handle_stats(store, config, cmd.json)
        }),
        Command::Export(cmd) => with_store(config_path, |store, config| {
            handle_export(store, config, &cmd)
        }),
        Command::Import(cmd) => with_store(config_path, |store, _| handle_import(store, &cmd)),
        // Config commands load the file themselves so they can report on it.
        Command::Config(config_cmd) => handle_config(config_path, config_cmd),
    }
}

/// Load configuration, open the card database and hand both to `f`.
fn with_store(
    config_path: Option<PathBuf>,
    f: impl FnOnce(&dyn CardStore, &Config) -> CliResult,
) -> CliResult {
    let config = Config::load_from(config_path)?;
    let store = SqliteStore::open(config.database_path())?;
    f(&store, &config)
}

fn confirm_gate(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalPrompt::stdio())
    }
}

fn find_card(store: &dyn CardStore, id: &str) -> Result<RationCard, Error> {
    store.get(id)?.ok_or_else(|| Error::card_not_found(id))
}

fn paid_label(card: &RationCard) -> &'static str {
    if card.is_paid {
        "paid"
    } else {
        "unpaid"
    }
}

fn handle_list(store: &dyn CardStore, config: &Config, cmd: &ListCommand) -> CliResult {
    let cards = store.get_all()?;
    let query = cmd.search.as_deref().unwrap_or("");
    let shown = view::visible(&cards, query);
    let limit = config.display.list_limit;

    if cmd.format == OutputFormat::Json {
        let page: Vec<&RationCard> = shown.into_iter().take(limit).collect();
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if shown.is_empty() {
        if query.is_empty() {
            println!("No cards recorded yet.");
        } else {
            println!("No cards match \"{query}\".");
        }
        return Ok(());
    }

    if cmd.format == OutputFormat::Table {
        println!(
            "{:<36}  {:<24}  {:>7}  {:>6}  {:<6}  LAST WITHDRAWAL",
            "ID", "OWNER", "MEMBERS", "LOAVES", "PAID"
        );
    }

    for card in shown.iter().take(limit) {
        let when = card.last_withdrawal_date.format("%Y-%m-%d %H:%M");
        match cmd.format {
            OutputFormat::Table => println!(
                "{:<36}  {:<24}  {:>7}  {:>6}  {:<6}  {when}",
                card.id,
                card.owner_name,
                card.members_count,
                card.withdrawn_loaves,
                paid_label(card),
            ),
            _ => println!(
                "{}\t{}\t{}\t{}\t{}\t{when}",
                card.id,
                card.owner_name,
                card.members_count,
                card.withdrawn_loaves,
                paid_label(card),
            ),
        }
    }

    if shown.len() > limit {
        println!("... {} more (showing first {limit})", shown.len() - limit);
    }
    println!("Total cards: {}", cards.len());
    Ok(())
}

fn handle_show(store: &dyn CardStore, config: &Config, cmd: &ShowCommand) -> CliResult {
    let card = find_card(store, &cmd.id)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&card)?);
        return Ok(());
    }

    let currency = &config.display.currency;
    println!("Card {}", card.id);
    println!("---------------------------------------------");
    println!("Owner:            {}", card.owner_name);
    println!("Members:          {}", card.members_count);
    println!(
        "Loaves withdrawn: {} (max {})",
        card.withdrawn_loaves,
        max_withdrawal(card.members_count)
    );
    println!("Last withdrawal:  {}", card.last_withdrawal_date.to_rfc3339());
    if card.is_paid {
        println!("Payment:          paid {:.2} {currency}", card.paid_amount);
    } else {
        println!(
            "Payment:          unpaid (est. {:.2} {currency} owed)",
            card.outstanding_debt()
        );
    }
    if !card.notes.is_empty() {
        println!("Notes:            {}", card.notes);
    }
    println!("Created:          {}", card.created_at.to_rfc3339());
    Ok(())
}

fn handle_add(store: &dyn CardStore, cmd: &AddCommand) -> CliResult {
    let card = RationCard::from_draft(cmd.to_draft(), None, Utc::now());
    store.upsert(&card)?;

    println!("Saved card {} for {}", card.id, card.owner_name);
    println!(
        "Maximum withdrawal: {} loaves ({} members x 15)",
        max_withdrawal(card.members_count),
        card.members_count
    );
    Ok(())
}

fn handle_edit(store: &dyn CardStore, cmd: &EditCommand) -> CliResult {
    let existing = find_card(store, &cmd.id)?;

    let mut draft = CardDraft::from_card(&existing);
    cmd.apply(&mut draft);

    let card = RationCard::from_draft(draft, Some(&existing), Utc::now());
    store.upsert(&card)?;

    println!("Updated card {} for {}", card.id, card.owner_name);
    Ok(())
}

fn handle_delete(store: &dyn CardStore, cmd: &DeleteCommand) -> CliResult {
    let card = find_card(store, &cmd.id)?;

    let prompt = format!("Delete the card for {} ({})?", card.owner_name, card.id);
    if !confirm_gate(cmd.yes).confirm(&prompt) {
        println!("Cancelled.");
        return Ok(());
    }

    store.remove(&card.id)?;
    println!("Deleted card {}", card.id);
    Ok(())
}

fn handle_stats(store: &dyn CardStore, config: &Config, json: bool) -> CliResult {
    let cards = store.get_all()?;
    let stats = compute_stats(&cards);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Cards:            {}", cards.len());
        println!("Total members:    {}", stats.total_members);
        println!("Total loaves:     {}", stats.total_loaves);
        println!("Unpaid cards:     {}", stats.unpaid_count);
        println!(
            "Estimated debt:   {:.2} {}",
            stats.estimated_debt, config.display.currency
        );
    }
    Ok(())
}

fn handle_export(store: &dyn CardStore, config: &Config, cmd: &ExportCommand) -> CliResult {
    if cmd.stdout {
        println!("{}", transfer::export_json(&store.get_all()?)?);
        return Ok(());
    }

    let dir = cmd.output.clone().unwrap_or_else(|| config.export_dir());
    let path = transfer::export_to_dir(store, &dir, Utc::now())?;
    println!("Exported to {}", path.display());
    Ok(())
}

fn handle_import(store: &dyn CardStore, cmd: &ImportCommand) -> CliResult {
    let mut gate = confirm_gate(cmd.yes);
    match transfer::import_file(store, &cmd.file, &mut *gate)? {
        ImportOutcome::Imported(count) => println!("Imported {count} cards."),
        ImportOutcome::Declined => println!("Cancelled; nothing was changed."),
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Export]");
                println!("  Directory:          {}", config.export_dir().display());
                println!();
                println!("[Display]");
                println!("  List limit:         {}", config.display.list_limit);
                println!("  Currency:           {}", config.display.currency);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
