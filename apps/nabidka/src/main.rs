//! # Nabídka CLI
//!
//! Command-line front end over `nabidka_app`.
//!
//! ```text
//! nabidka list [--number 00] [--client acme] [--date 2024-06-30] [--json]
//! nabidka show <id>
//! nabidka next-number
//! nabidka new-quote [--address ID] [--template ID].. [--item "Práce;2;1500"]..
//! nabidka edit-quote <id> [--clear-items] [--notes ..] [--date 2024-07-01] ..
//! nabidka delete-quote <id>
//! nabidka export <id> [--out DIR]
//! nabidka addresses [--json]
//! nabidka add-address <name> --street .. --house-number .. --city .. --postal-code ..
//! nabidka delete-address <id>
//! nabidka templates [--json]
//! nabidka add-template <description> <unit-price>
//! nabidka delete-template <id>
//! nabidka suggest-terms
//! nabidka suggest-description <text>
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr)
//! 3. Load configuration (file, then environment)
//! 4. Open the store on a current-thread runtime
//! 5. Run the command

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use nabidka_app::commands::{address, assist, export, quote, template};
use nabidka_app::state::{AppConfig, Session};
use nabidka_app::{init_tracing, App};
use nabidka_core::format::format_currency;
use nabidka_app::commands::quote::{ItemSpec, QuoteEdit};
use nabidka_core::{ClientAddress, EntityId, QuoteFilter, QuoteItemTemplate, Record, DEFAULT_COUNTRY};

#[derive(Debug, Parser)]
#[command(name = "nabidka", version, about = "Správa cenových nabídek")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "NABIDKA_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List quotes, newest first
    List {
        /// Quote number contains
        #[arg(long)]
        number: Option<String>,
        /// Client name contains (case-insensitive)
        #[arg(long)]
        client: Option<String>,
        /// Exact date, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show a quote as its printable document
    Show { id: String },
    /// Print the number the next new quote would get
    NextNumber,
    /// Create a quote from the configured defaults plus the given fields
    NewQuote(QuoteArgs),
    /// Change fields of a saved quote
    EditQuote {
        id: String,
        #[command(flatten)]
        fields: QuoteArgs,
    },
    /// Delete a saved quote
    DeleteQuote { id: String },
    /// Export a quote to PDF
    Export {
        id: String,
        /// Output directory (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List saved client addresses
    Addresses,
    /// Save a client address
    AddAddress {
        name: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        house_number: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        postal_code: String,
        #[arg(long, default_value = DEFAULT_COUNTRY)]
        country: String,
    },
    /// Delete a saved client address
    DeleteAddress { id: String },
    /// List saved line-item templates
    Templates,
    /// Save a line-item template
    AddTemplate { description: String, unit_price: f64 },
    /// Delete a saved line-item template
    DeleteTemplate { id: String },
    /// Ask the AI for standard business terms
    SuggestTerms,
    /// Ask the AI to expand a short service description
    SuggestDescription { text: String },
}

/// Quote fields settable from the shell.
#[derive(Debug, Args)]
struct QuoteArgs {
    /// Issue date, YYYY-MM-DD
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Saved client address to copy into the recipient
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    to_name: Option<String>,
    /// Recipient address; use \n for line breaks
    #[arg(long)]
    to_address: Option<String>,
    /// Saved template to add as a line item (repeatable)
    #[arg(long = "template")]
    templates: Vec<String>,
    /// Line item as "description;quantity;price" (repeatable)
    #[arg(long = "item")]
    items: Vec<ItemSpec>,
    /// Remove existing line items before adding new ones
    #[arg(long)]
    clear_items: bool,
    /// Tax rate in percent
    #[arg(long)]
    tax_rate: Option<f64>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long)]
    terms: Option<String>,
}

impl From<QuoteArgs> for QuoteEdit {
    fn from(args: QuoteArgs) -> Self {
        QuoteEdit {
            date: args.date,
            address: args.address.map(EntityId::from),
            to_name: args.to_name,
            to_address: args.to_address.map(|a| a.replace("\\n", "\n")),
            templates: args.templates.into_iter().map(EntityId::from).collect(),
            items: args.items,
            clear_items: args.clear_items,
            tax_rate: args.tax_rate,
            notes: args.notes,
            terms: args.terms,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::load(cli.config.clone()).context("Failed to load configuration")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(cli, config))
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let app = App::open(config).await?;
    let store = app.store();

    match cli.command {
        Command::List {
            number,
            client,
            date,
        } => {
            let filter = QuoteFilter {
                quote_number: number,
                client_name: client,
                date,
            };
            let rows = quote::list_quotes(store, &filter).await;
            if cli.json {
                print_json(&rows)?;
            } else {
                for row in rows {
                    let date = row.date.map(|d| d.to_string()).unwrap_or_default();
                    println!(
                        "{}  {}  {:<10}  {:<30}  {}",
                        row.id,
                        row.quote_number,
                        date,
                        row.to_name,
                        format_currency(row.total)
                    );
                }
            }
        }
        Command::Show { id } => {
            let mut session = Session::new();
            session.select_quote(EntityId::from(id));
            let record = quote::editor_quote(
                store,
                &session,
                &app.config().quote_defaults(),
                chrono::Local::now().date_naive(),
            )
            .await;

            let id = match record {
                Record::Persisted(p) => p.id,
                Record::Draft(_) => {
                    let missing = session.selected_quote().map(EntityId::as_str).unwrap_or_default();
                    anyhow::bail!("Quote not found: {missing}");
                }
            };

            if cli.json {
                print_json(&quote::get_quote(store, &id).await?)?;
            } else {
                println!("{}", quote::quote_document(store, &id).await?);
            }
        }
        Command::NextNumber => println!("{}", quote::next_quote_number(store).await),
        Command::NewQuote(fields) => {
            let mut session = Session::new();
            session.new_quote();
            let id = edit_and_save(&app, &mut session, fields.into()).await?;
            println!("{id}");
        }
        Command::EditQuote { id, fields } => {
            let mut session = Session::new();
            session.select_quote(EntityId::from(id));
            let id = edit_and_save(&app, &mut session, fields.into()).await?;
            println!("{id}");
        }
        Command::DeleteQuote { id } => {
            let id = EntityId::from(id);
            if !quote::delete_quote(store, &id).await? {
                anyhow::bail!("Quote not found: {id}");
            }
        }
        Command::Export { id, out } => {
            let dir = out.unwrap_or_else(|| app.config().export_dir().to_path_buf());
            let path = export::export_quote(store, app.export(), &EntityId::from(id), &dir).await?;
            println!("{}", path.display());
        }
        Command::Addresses => {
            let addresses = address::list_addresses(store).await;
            if cli.json {
                print_json(addresses.as_ref())?;
            } else {
                for entry in addresses.iter() {
                    println!("{}  {}", entry.id, entry.fields.name);
                    for line in entry.fields.formatted().lines() {
                        println!("    {line}");
                    }
                }
            }
        }
        Command::AddAddress {
            name,
            street,
            house_number,
            city,
            postal_code,
            country,
        } => {
            let entry = ClientAddress {
                name,
                street,
                house_number,
                city,
                postal_code,
                country,
            };
            println!("{}", address::save_address(store, Record::Draft(entry)).await?);
        }
        Command::DeleteAddress { id } => {
            let id = EntityId::from(id);
            if !address::delete_address(store, &id).await? {
                anyhow::bail!("Client address not found: {id}");
            }
        }
        Command::Templates => {
            let templates = template::list_templates(store).await;
            if cli.json {
                print_json(templates.as_ref())?;
            } else {
                for entry in templates.iter() {
                    println!(
                        "{}  {:<40}  {}",
                        entry.id,
                        entry.fields.description,
                        format_currency(entry.fields.unit_price)
                    );
                }
            }
        }
        Command::AddTemplate {
            description,
            unit_price,
        } => {
            let entry = QuoteItemTemplate {
                description,
                unit_price,
            };
            println!("{}", template::save_template(store, Record::Draft(entry)).await?);
        }
        Command::DeleteTemplate { id } => {
            let id = EntityId::from(id);
            if !template::delete_template(store, &id).await? {
                anyhow::bail!("Item template not found: {id}");
            }
        }
        Command::SuggestTerms => {
            let suggestion = assist::suggest_terms(app.assist()).await;
            print_suggestion(&suggestion, cli.json)?;
        }
        Command::SuggestDescription { text } => {
            let suggestion = assist::suggest_description(app.assist(), &text).await;
            print_suggestion(&suggestion, cli.json)?;
        }
    }

    Ok(())
}

/// Loads the session's editor record, applies `edit` and saves it.
///
/// A session pointing at a missing quote fails instead of creating a new one.
async fn edit_and_save(app: &App, session: &mut Session, edit: QuoteEdit) -> anyhow::Result<EntityId> {
    let store = app.store();
    let mut record = quote::editor_quote(
        store,
        session,
        &app.config().quote_defaults(),
        chrono::Local::now().date_naive(),
    )
    .await;

    if let (Some(missing), Record::Draft(_)) = (session.selected_quote(), &record) {
        anyhow::bail!("Quote not found: {missing}");
    }

    quote::apply_edit(store, &mut record, &edit).await?;
    Ok(quote::save_quote(store, session, record).await?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_suggestion(suggestion: &nabidka_assist::Suggestion, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(suggestion)
    } else {
        println!("{}", suggestion.display_text());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_new_quote_arguments_become_an_edit() {
        let command = parse(&[
            "nabidka",
            "new-quote",
            "--address",
            "id_1",
            "--template",
            "id_2",
            "--template",
            "id_3",
            "--item",
            "Práce;2;1500",
            "--to-address",
            "Dlouhá 5\\nPraha",
            "--tax-rate",
            "12",
        ]);
        let Command::NewQuote(fields) = command else {
            panic!("expected new-quote, got {command:?}");
        };

        let edit = QuoteEdit::from(fields);
        assert_eq!(edit.address, Some(EntityId::from("id_1")));
        assert_eq!(edit.templates, vec![EntityId::from("id_2"), EntityId::from("id_3")]);
        assert_eq!(edit.items[0].unit_price, 1500.0);
        assert_eq!(edit.to_address.as_deref(), Some("Dlouhá 5\nPraha"));
        assert_eq!(edit.tax_rate, Some(12.0));
        assert!(!edit.clear_items);
    }

    #[test]
    fn test_malformed_item_is_rejected_by_the_parser() {
        let result = Cli::try_parse_from(["nabidka", "edit-quote", "id_1", "--item", "Práce;2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_address_defaults_country() {
        let command = parse(&[
            "nabidka",
            "add-address",
            "ACME s.r.o.",
            "--street",
            "Dlouhá",
            "--house-number",
            "5",
            "--city",
            "Praha",
            "--postal-code",
            "110 00",
        ]);
        let Command::AddAddress { country, .. } = command else {
            panic!("expected add-address, got {command:?}");
        };
        assert_eq!(country, DEFAULT_COUNTRY);
    }
}
