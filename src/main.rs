mod api;
mod extract;
mod models;
mod store;

use std::io::{BufRead, Write as _};

use anyhow::Result;
use tracing::{error, info, warn, Level};
use tracing_subscriber;

use api::{LbcClient, ListingProvider};
use extract::FromListing;
use models::{FullRecord, Mode, SimpleRecord, RENOVATION_OPTIONS};
use store::{AppendOutcome, Store, TableRow};

const FULL_DB_FILE: &str = "suivi_immo_complet.csv";
const SIMPLE_DB_FILE: &str = "suivi_immo_simple.csv";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let (mode, file) = parse_args()?;

    info!("🏠 Immo Tracker");
    info!("================");

    let client = LbcClient::new()?;

    match mode {
        Mode::Full => {
            let store: Store<FullRecord> =
                Store::new(file.unwrap_or_else(|| FULL_DB_FILE.to_string()));
            run_session(store, &client).await
        }
        Mode::Simple => {
            let store: Store<SimpleRecord> =
                Store::new(file.unwrap_or_else(|| SIMPLE_DB_FILE.to_string()));
            run_session(store, &client).await
        }
    }
}

fn parse_args() -> Result<(Mode, Option<String>)> {
    let mut mode = Mode::Full;
    let mut file = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--simple" => mode = Mode::Simple,
            "--file" => {
                file = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--file needs a path"))?,
                );
            }
            other => anyhow::bail!("unknown argument: {other} (try --simple, --file <path>)"),
        }
    }
    Ok((mode, file))
}

/// Session-side edit capability. Only the full table has user-editable
/// columns; everything extracted stays read-only.
trait Editable {
    fn set_field(&mut self, field: &str, value: String) -> Result<()>;
}

impl Editable for FullRecord {
    fn set_field(&mut self, field: &str, value: String) -> Result<()> {
        match field {
            "charges" => self.monthly_charges = value,
            "exposition" => self.exposure = value,
            "note" => self.note = value,
            "travaux" => {
                if !RENOVATION_OPTIONS.contains(&value.as_str()) {
                    warn!(
                        "unusual value for travaux (suggested: {})",
                        RENOVATION_OPTIONS.join(", ")
                    );
                }
                self.renovation = value;
            }
            "offre" => self.offer = value,
            _ => anyhow::bail!(
                "column '{field}' is not editable (charges, exposition, note, travaux, offre)"
            ),
        }
        Ok(())
    }
}

impl Editable for SimpleRecord {
    fn set_field(&mut self, _field: &str, _value: String) -> Result<()> {
        anyhow::bail!("the simple table has no editable columns")
    }
}

async fn run_session<R>(store: Store<R>, provider: &dyn ListingProvider) -> Result<()>
where
    R: TableRow + FromListing + Editable,
{
    let mut table = store.load()?;
    info!(
        "Loaded {} tracked listing(s) from {}",
        table.len(),
        store.path().display()
    );
    println!("Commands: add <url|id>  list  edit <row> <field> <value>  del <title>  export <path>  reset  quit");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break, // EOF
        };
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(c) => c,
            None => continue,
        };
        let rest: Vec<&str> = parts.collect();

        // every command failure is reported and the loop carries on
        let outcome = match command {
            "add" => add_listing(&store, &mut table, provider, &rest).await,
            "list" => {
                render_table(&table);
                Ok(())
            }
            "edit" => edit_record(&store, &mut table, &rest),
            "del" => delete_record(&store, &mut table, &rest),
            "export" => export_table(&store, &table, &rest),
            "reset" => store.reset().map(|()| {
                table.clear();
                println!("Table cleared.");
            }),
            "help" => {
                println!("add <url|id>  list  edit <row> <field> <value>  del <title>  export <path>  reset  quit");
                Ok(())
            }
            "quit" | "exit" => break,
            other => Err(anyhow::anyhow!("unknown command: {other}")),
        };

        if let Err(e) = outcome {
            error!("Erreur : {e:#}");
        }
    }

    Ok(())
}

async fn add_listing<R>(
    store: &Store<R>,
    table: &mut Vec<R>,
    provider: &dyn ListingProvider,
    args: &[&str],
) -> Result<()>
where
    R: TableRow + FromListing,
{
    let input = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("usage: add <url|id>"))?;

    info!("Fetching listing from {}...", provider.provider_name());
    // a fetch failure propagates here, before any table mutation
    let raw = provider.fetch_listing(input).await?;
    let record = R::from_listing(&raw);

    match store.append(table, record)? {
        AppendOutcome::Added => println!("Annonce ajoutée ({} tracked).", table.len()),
        AppendOutcome::Duplicate => println!("Cette annonce est déjà dans votre liste."),
    }
    Ok(())
}

fn render_table<R: TableRow>(table: &[R]) {
    if table.is_empty() {
        println!("Aucune annonce pour le moment.");
        return;
    }
    for (i, record) in table.iter().enumerate() {
        println!("{}. {}", i + 1, record.title());
        for (header, value) in R::HEADERS.iter().zip(record.to_row()) {
            if *header != "Titre" && !value.is_empty() {
                println!("   {header}: {value}");
            }
        }
        println!();
    }
}

fn edit_record<R>(store: &Store<R>, table: &mut Vec<R>, args: &[&str]) -> Result<()>
where
    R: TableRow + Editable,
{
    if args.len() < 3 {
        anyhow::bail!("usage: edit <row> <field> <value>");
    }
    let row: usize = args[0].parse()?;
    let record = table
        .get_mut(row.wrapping_sub(1))
        .ok_or_else(|| anyhow::anyhow!("no row {row}"))?;

    record.set_field(args[1], args[2..].join(" "))?;
    store.save(table)?;
    println!("Modifications sauvegardées.");
    Ok(())
}

fn delete_record<R: TableRow>(store: &Store<R>, table: &mut Vec<R>, args: &[&str]) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("usage: del <title>");
    }
    let title = args.join(" ");
    let removed = store.delete_by_title(table, &title)?;
    if removed == 0 {
        println!("Aucune annonce avec ce titre.");
    } else {
        println!("{removed} annonce(s) supprimée(s).");
    }
    Ok(())
}

fn export_table<R: TableRow>(store: &Store<R>, table: &[R], args: &[&str]) -> Result<()> {
    let path = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("usage: export <path>"))?;
    std::fs::write(path, store.export(table))?;
    println!("Export écrit dans {path}.");
    Ok(())
}
