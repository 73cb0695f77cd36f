mod api;
mod config;
mod document;
mod error;
mod model;
mod pdf;
mod report;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use crate::api::ApiClient;
use crate::config::{config_dir, load_config, resolve_output_dir, Config, CONFIG_TEMPLATE};
use crate::document::receipt::ReceiptOutput;
use crate::document::{build_invoice, build_receipt, build_stock_report};
use crate::error::{ReportError, Result};
use crate::model::School;
use crate::report::session::Action;
use crate::report::{reconcile, ReportSession};

#[derive(Parser)]
#[command(name = "supplytrack")]
#[command(version, about = "School-supply request tracker and report generator", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.supplytrack or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template file
    Init,

    /// List schools known to the supply API
    Schools,

    /// Fetch a school's approved requests, grouped by day (newest first)
    Requests {
        /// School display name as listed by 'schools'
        #[arg(short, long)]
        school: String,
    },

    /// Generate the compact per-school receipt
    Receipt {
        /// School display name as listed by 'schools'
        #[arg(short, long)]
        school: String,

        /// Restrict to these request ids (default: everything selected)
        #[arg(short, long, value_name = "ID")]
        request: Vec<String>,

        /// Open the rendered receipt for printing (two copies)
        #[arg(long, conflicts_with = "share")]
        print: bool,

        /// Hand the receipt to the configured share command
        #[arg(long)]
        share: bool,
    },

    /// Generate the full-page invoice of selected requests
    Invoice {
        /// School display name as listed by 'schools'
        #[arg(short, long)]
        school: String,

        /// Restrict to these request ids (default: everything selected)
        #[arg(short, long, value_name = "ID")]
        request: Vec<String>,
    },

    /// Show reconciled stock figures (received / balance / disbursed)
    Stock,

    /// Generate the stock report PDF
    StockReport,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Schools => cmd_schools(&cfg_dir),
        Commands::Requests { school } => cmd_requests(&cfg_dir, &school),
        Commands::Receipt {
            school,
            request,
            print,
            share,
        } => cmd_receipt(&cfg_dir, &school, &request, print, share),
        Commands::Invoice { school, request } => cmd_invoice(&cfg_dir, &school, &request),
        Commands::Stock => cmd_stock(&cfg_dir),
        Commands::StockReport => cmd_stock_report(&cfg_dir),
    }
}

/// Initialize config directory with a template file
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized supplytrack config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit organization and API details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. List schools:                       supplytrack schools");
    println!();
    println!("Then generate your first invoice:");
    println!("  supplytrack invoice --school <name>");

    Ok(())
}

fn load(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    load_config(cfg_dir)
}

// Table row structs for tabled
#[derive(Tabled)]
struct SchoolRow {
    #[tabled(rename = "SCHOOL")]
    school: String,
    #[tabled(rename = "UDISE")]
    udise: String,
}

#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "REQUEST ID")]
    id: String,
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "QTY")]
    qty: u32,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct StockRow {
    #[tabled(rename = "PRODUCT NAME")]
    product: String,
    #[tabled(rename = "RECEIVED")]
    received: u64,
    #[tabled(rename = "BALANCE")]
    balance: u64,
    #[tabled(rename = "DISBURSED")]
    disbursed: i64,
}

/// List schools known to the supply API
fn cmd_schools(cfg_dir: &Path) -> Result<()> {
    let config = load(cfg_dir)?;
    let client = ApiClient::new(&config.api);

    let schools = client.fetch_schools()?;
    if schools.is_empty() {
        println!("No schools found.");
        return Ok(());
    }

    let rows: Vec<SchoolRow> = schools
        .iter()
        .map(|school| SchoolRow {
            school: school.school_name.clone(),
            udise: school.udise_code.clone().unwrap_or_default(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Resolve a school display name against the API, ignoring stray spaces.
fn find_school(client: &ApiClient, name: &str) -> Result<School> {
    let schools = client.fetch_schools()?;
    schools
        .into_iter()
        .find(|school| school.school_name.trim() == name.trim())
        .ok_or_else(|| ReportError::SchoolNotFound(name.to_string()))
}

/// Fetch one school's approved requests into a fresh session. Everything
/// starts selected, matching the admin review flow.
fn fetch_session(client: &ApiClient, school: School) -> Result<ReportSession> {
    let mut session = ReportSession::new();
    let token = session.begin_fetch(Some(school.clone()));
    let requests = client.fetch_approved_requests(&school.id)?;
    session.complete_fetch(token, requests, true);
    Ok(session)
}

/// Fetch a school's approved requests, grouped by day (newest first)
fn cmd_requests(cfg_dir: &Path, school_name: &str) -> Result<()> {
    let config = load(cfg_dir)?;
    let client = ApiClient::new(&config.api);

    let school = find_school(&client, school_name)?;
    let session = fetch_session(&client, school)?;

    if session.grouped().is_empty() {
        println!("No approved requests found for this school.");
        return Ok(());
    }

    for key in session.grouped().sorted_keys() {
        println!("{key}");
        let rows: Vec<RequestRow> = session
            .grouped()
            .get(key)
            .unwrap_or_default()
            .iter()
            .map(|request| RequestRow {
                id: request.request_id.clone(),
                product: request.product_name().to_string(),
                qty: request.requested_quantity,
                status: request.status.to_string(),
            })
            .collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
        println!();
    }

    println!("Total: {} requests", session.grouped().len());

    Ok(())
}

/// Generate the compact per-school receipt
fn cmd_receipt(
    cfg_dir: &Path,
    school_name: &str,
    request_ids: &[String],
    print: bool,
    share: bool,
) -> Result<()> {
    let config = load(cfg_dir)?;
    let client = ApiClient::new(&config.api);

    let school = find_school(&client, school_name)?;
    let mut session = fetch_session(&client, school)?;

    if session.grouped().is_empty() {
        println!("No approved requests found for this school.");
        return Ok(());
    }
    if !request_ids.is_empty() {
        session.restrict_selection(request_ids)?;
    }

    let output = if print {
        ReceiptOutput::Print
    } else if share {
        ReceiptOutput::Share
    } else {
        ReceiptOutput::Save
    };

    session.busy.try_begin(Action::Receipt)?;
    let result = build_receipt(
        session.selection(),
        session.grouped(),
        session.school(),
        &config.organization,
        output,
    )
    .and_then(|doc| {
        let output_dir = resolve_output_dir(&config.pdf.output_dir, cfg_dir);
        pdf::emit(&doc, &output_dir, &config.share)
    });
    session.busy.finish(Action::Receipt);

    let path = result?;
    println!("Generated receipt");
    println!("  Saved: {}", path.display());

    Ok(())
}

/// Generate the full-page invoice of selected requests
fn cmd_invoice(cfg_dir: &Path, school_name: &str, request_ids: &[String]) -> Result<()> {
    let config = load(cfg_dir)?;
    let client = ApiClient::new(&config.api);

    let school = find_school(&client, school_name)?;
    let mut session = fetch_session(&client, school)?;

    if !request_ids.is_empty() {
        session.restrict_selection(request_ids)?;
    }

    session.busy.try_begin(Action::Invoice)?;
    let result = {
        let selected = session.selected_flat();
        let school_display = session
            .school()
            .map(|s| s.school_name.clone())
            .unwrap_or_else(|| "N/A".to_string());
        build_invoice(&selected, &school_display, &config.organization).and_then(|doc| {
            let output_dir = resolve_output_dir(&config.pdf.output_dir, cfg_dir);
            pdf::emit(&doc, &output_dir, &config.share)
        })
    };
    session.busy.finish(Action::Invoice);

    let path = result?;
    println!("Generated invoice for '{}'", school_name.trim());
    println!("  Requests: {}", session.selected_flat().len());
    println!("  Saved:    {}", path.display());

    Ok(())
}

/// Show reconciled stock figures
fn cmd_stock(cfg_dir: &Path) -> Result<()> {
    let config = load(cfg_dir)?;
    let client = ApiClient::new(&config.api);

    let entries = client.fetch_stock_log()?;
    let stock = reconcile(&entries);

    if stock.is_empty() {
        println!("No stock movement recorded yet.");
        return Ok(());
    }

    let rows: Vec<StockRow> = stock
        .iter()
        .map(|item| StockRow {
            product: item.product_name.clone(),
            received: item.received,
            balance: item.balance,
            disbursed: item.disbursed,
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Generate the stock report PDF
fn cmd_stock_report(cfg_dir: &Path) -> Result<()> {
    let config = load(cfg_dir)?;
    let client = ApiClient::new(&config.api);

    let entries = client.fetch_stock_log()?;
    let stock = reconcile(&entries);

    let doc = build_stock_report(&stock, &config.organization);
    let output_dir = resolve_output_dir(&config.pdf.output_dir, cfg_dir);
    let path = pdf::emit(&doc, &output_dir, &config.share)?;

    println!("Generated stock report");
    println!("  Products: {}", stock.len());
    println!("  Saved:    {}", path.display());

    Ok(())
}
