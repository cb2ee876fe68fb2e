//! Command-line front end for the Cantina client.
//!
//! Run with: cargo run -- <command>

use std::env;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::Local;

use cantina::api::{self, reports::ReportScope, PeriodFilter};
use cantina::config::Config;
use cantina::dashboard;
use cantina::error::ApiError;
use cantina::models::FinancialRecord;
use cantina::routes::{self, Route};
use cantina::App;

const PAGE_SIZE: u32 = 10;

fn usage() -> &'static str {
    "usage: cantina <command>\n\
     \n\
     commands:\n\
     \x20 login <email>              sign in (password read from stdin)\n\
     \x20 logout                     clear the local session\n\
     \x20 status                     show session state\n\
     \x20 products [page]            list stocked products\n\
     \x20 employees [page]           list the employee roster\n\
     \x20 sales [page]               list recorded sales\n\
     \x20 entries [page]             list stock arrivals\n\
     \x20 report <month> <year>      per-employee spending for a month\n\
     \x20 dashboard <month> <year> <records.json>\n\
     \x20                            derived metrics from a records file"
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", usage());
        return Ok(());
    };

    let config = Config::load()?;
    let app = App::new(&config)?;

    match command.as_str() {
        "login" => login(&app, args.get(1)).await,
        "logout" => {
            api::auth::sign_out(&app.client);
            println!("signed out");
            Ok(())
        }
        "status" => {
            if app.session.is_authenticated() {
                let name = app.session.display_name().unwrap_or_else(|| "?".into());
                println!("signed in as {}", name);
            } else {
                println!("not signed in");
            }
            Ok(())
        }
        "products" => products(&app, page_arg(&args)).await,
        "employees" => employees(&app, page_arg(&args)).await,
        "sales" => sales(&app, page_arg(&args)).await,
        "entries" => entries(&app, page_arg(&args)).await,
        "report" => report(&app, &args).await,
        "dashboard" => dashboard_command(&args),
        _ => {
            println!("{}", usage());
            Ok(())
        }
    }
}

/// Redirects the way the route gate would, instead of issuing a request that
/// is known to fail.
fn require_route(app: &App, route: Route) -> Result<()> {
    if routes::resolve(&app.session, route) == Route::SignIn {
        bail!("not signed in; run `cantina login <email>` first");
    }
    Ok(())
}

fn page_arg(args: &[String]) -> u32 {
    args.get(1).and_then(|raw| raw.parse().ok()).unwrap_or(0)
}

fn month_year(args: &[String]) -> Result<(u32, i32)> {
    let month: u32 = args
        .get(1)
        .context("missing <month>")?
        .parse()
        .context("<month> must be a number")?;
    if !(1..=12).contains(&month) {
        bail!("<month> must be between 1 and 12");
    }
    let year: i32 = args
        .get(2)
        .context("missing <year>")?
        .parse()
        .context("<year> must be a number")?;
    Ok((month, year))
}

async fn login(app: &App, email: Option<&String>) -> Result<()> {
    let Some(email) = email else {
        bail!("usage: cantina login <email>");
    };

    print!("password: ");
    io::stdout().flush()?;
    let mut password = String::new();
    io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\n', '\r']);

    match api::auth::sign_in(&app.client, email, password).await {
        Ok(()) => {
            let name = app.session.display_name().unwrap_or_else(|| email.clone());
            println!("welcome, {}", name);
            Ok(())
        }
        Err(ApiError::InvalidCredentials) => bail!("invalid email or password"),
        Err(err) => Err(err.into()),
    }
}

async fn products(app: &App, page: u32) -> Result<()> {
    require_route(app, Route::Stock)?;
    let result = api::products::list(&app.client, page, PAGE_SIZE).await?;
    for product in &result.content {
        println!(
            "{:<30} {:?}  R$ {:>8.2}  x{}",
            product.name, product.category, product.price, product.quantity
        );
    }
    println!("page {}/{}", page + 1, result.total_pages.max(1));
    Ok(())
}

async fn employees(app: &App, page: u32) -> Result<()> {
    require_route(app, Route::Employees)?;
    let result = api::employees::list(&app.client, page, PAGE_SIZE).await?;
    for employee in &result.content {
        println!("{}  {}", employee.id, employee.name);
    }
    println!("page {}/{}", page + 1, result.total_pages.max(1));
    Ok(())
}

async fn sales(app: &App, page: u32) -> Result<()> {
    require_route(app, Route::Sales)?;
    let result = api::sales::list(&app.client, PeriodFilter::All, page, PAGE_SIZE).await?;
    for sale in &result.content {
        let items: Vec<String> = sale
            .items
            .iter()
            .map(|i| format!("{} ({}) R$ {:.2}", i.product_name, i.quantity, i.value))
            .collect();
        println!("{}  {}  {}", sale.date, sale.employee_name, items.join(", "));
    }
    println!("page {}/{}", page + 1, result.total_pages.max(1));
    Ok(())
}

async fn entries(app: &App, page: u32) -> Result<()> {
    require_route(app, Route::StockEntries)?;
    let result =
        api::stock_entries::list(&app.client, PeriodFilter::All, page, PAGE_SIZE).await?;
    for entry in &result.content {
        println!("{}  {}  x{}", entry.date, entry.product_name, entry.quantity);
    }
    println!("page {}/{}", page + 1, result.total_pages.max(1));
    Ok(())
}

async fn report(app: &App, args: &[String]) -> Result<()> {
    require_route(app, Route::Report)?;
    let (month, year) = month_year(args)?;
    let result =
        api::reports::monthly(&app.client, ReportScope::All, month, year, 0, PAGE_SIZE).await?;
    for row in &result.content {
        println!("{:<30} R$ {:>8.2}", row.employee_name, row.total_spent);
    }
    Ok(())
}

#[derive(serde::Deserialize)]
struct RecordsFile {
    gains: Vec<FinancialRecord>,
    expenses: Vec<FinancialRecord>,
}

/// Prints the derived metrics the dashboard view would show, from a local
/// JSON file holding the gain and expense records.
fn dashboard_command(args: &[String]) -> Result<()> {
    let (month, year) = month_year(args)?;
    let path = args.get(3).context("missing <records.json>")?;
    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let records: RecordsFile = serde_json::from_str(&raw).context("invalid records file")?;

    let summary = dashboard::summarize(&records.gains, &records.expenses, month, year);
    println!("{} {}", dashboard::MONTHS[(month - 1) as usize], year);
    println!("  entradas: R$ {:.2}", summary.total_gains);
    println!("  saídas:   R$ {:.2}", summary.total_expenses);
    println!("  saldo:    R$ {:.2}", summary.balance);
    println!("  {} {}", summary.status.headline(), summary.status.description());

    let relation = dashboard::gains_versus_expenses(&summary);
    println!(
        "  entradas {:.1}% vs saídas {:.1}%",
        relation.gains.percent, relation.expenses.percent
    );

    let breakdown = dashboard::frequency_breakdown(&records.expenses, month, year);
    println!(
        "  saídas recorrentes {:.1}% vs eventuais {:.1}%",
        breakdown.recurring.percent, breakdown.eventual.percent
    );

    let today = Local::now().date_naive();
    for row in dashboard::monthly_history(&records.gains, &records.expenses, year, today) {
        println!(
            "  {}  +{:>10.2}  -{:>10.2}",
            row.label, row.gains, row.expenses
        );
    }

    Ok(())
}
