use clap::Parser;
use std::path::{Path, PathBuf};

use budget_builder_rs::cli::{parse_line_spec, Cli, Command};
use budget_builder_rs::config::Settings;
use budget_builder_rs::error::Result;
use budget_builder_rs::interface::{
    display_budget, display_catalog, display_load_summary, prompt_item, prompt_line_index,
    prompt_menu_action, prompt_path, prompt_quantity, prompt_yes_no, ItemChoice, MenuAction,
};
use budget_builder_rs::logging::init_tracing;
use budget_builder_rs::state::Session;

const DEFAULT_EXPORT_PATH: &str = "orcamento_co.xlsx";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load_or_default(cli.config.as_deref())?;
    let mut session = Session::new(settings);

    match cli.command {
        Command::Catalog { file, json } => cmd_catalog(&mut session, &file, json),
        Command::Build { file } => cmd_build(&mut session, &file),
        Command::Quote {
            file,
            lines,
            out,
            json,
        } => cmd_quote(&mut session, &file, &lines, out.as_deref(), json),
    }
}

/// Load a catalog and print it.
fn cmd_catalog(session: &mut Session, file: &Path, json: bool) -> Result<()> {
    let summary = session.load_catalog_path(file)?;

    let Some(catalog) = session.catalog() else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(catalog)?);
    } else {
        display_load_summary(&summary);
        display_catalog(catalog, &session.settings().currency_symbol);
    }

    Ok(())
}

/// Build a budget from `ITEM=QTY` arguments.
fn cmd_quote(
    session: &mut Session,
    file: &Path,
    specs: &[String],
    out: Option<&Path>,
    json: bool,
) -> Result<()> {
    let parsed = specs
        .iter()
        .map(|s| parse_line_spec(s))
        .collect::<Result<Vec<_>>>()?;

    session.load_catalog_path(file)?;
    session.start_budget()?;

    for (item, quantity) in &parsed {
        let index = session.add_line()?;
        session.set_line_item(index, Some(item.as_str()))?;
        session.set_line_quantity(index, *quantity)?;

        let bound = session.ledger().line(index).is_some_and(|l| l.is_bound());
        if !bound {
            eprintln!("Warning: '{}' is not in the catalog; line {} has no item", item, index + 1);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    } else {
        display_budget(&session.snapshot(), &session.settings().currency_symbol);
    }

    if let Some(path) = out {
        session.export_to(path)?;
        println!("Budget written to {}", path.display());
    }

    Ok(())
}

/// Interactive budget session.
fn cmd_build(session: &mut Session, file: &Path) -> Result<()> {
    let summary = session.load_catalog_path(file)?;
    display_load_summary(&summary);
    println!();

    loop {
        match prompt_menu_action()? {
            MenuAction::StartBudget => {
                if !session.ledger().is_empty()
                    && !prompt_yes_no("Discard the current budget lines?", false)?
                {
                    continue;
                }
                session.start_budget()?;
                println!("New budget started.");
            }
            MenuAction::AddLine => match session.add_line() {
                Ok(index) => println!("Added line {}.", index + 1),
                Err(e) => println!("{} (choose 'Start new budget' first)", e),
            },
            MenuAction::SetItem => {
                let Some(index) = prompt_line_index(session.ledger().len())? else {
                    println!("No lines yet.");
                    continue;
                };
                let Some(catalog) = session.catalog() else {
                    continue;
                };
                match prompt_item(catalog)? {
                    ItemChoice::Selected(name) => session.set_line_item(index, Some(name.as_str()))?,
                    ItemChoice::Clear => session.set_line_item(index, None)?,
                    ItemChoice::Cancel => {}
                }
                display_budget(&session.snapshot(), &session.settings().currency_symbol);
            }
            MenuAction::SetQuantity => {
                let Some(index) = prompt_line_index(session.ledger().len())? else {
                    println!("No lines yet.");
                    continue;
                };
                let current = session.ledger().line(index).map_or(0.0, |l| l.quantity());
                let quantity = prompt_quantity(current)?;
                if quantity < 0.0 {
                    println!("Negative quantities are stored as 0.");
                }
                session.set_line_quantity(index, quantity)?;
                display_budget(&session.snapshot(), &session.settings().currency_symbol);
            }
            MenuAction::ShowBudget => {
                display_budget(&session.snapshot(), &session.settings().currency_symbol);
            }
            MenuAction::ShowCatalog => {
                if let Some(catalog) = session.catalog() {
                    display_catalog(catalog, &session.settings().currency_symbol);
                }
            }
            MenuAction::ReloadCatalog => {
                let path = PathBuf::from(prompt_path("Catalog file", &file.display().to_string())?);
                match session.load_catalog_path(&path) {
                    Ok(summary) => display_load_summary(&summary),
                    Err(e) => println!("Could not load catalog ({}): {}", e.reason(), e),
                }
            }
            MenuAction::Export => {
                if !session.ledger().is_active() {
                    println!("Start a budget first.");
                    continue;
                }
                let path = prompt_path("Export to (.xlsx or .csv)", DEFAULT_EXPORT_PATH)?;
                match session.export_to(&path) {
                    Ok(()) => println!("Budget written to {}", path),
                    Err(e) => println!("Export failed: {}", e),
                }
            }
            MenuAction::Quit => break,
        }
    }

    Ok(())
}
