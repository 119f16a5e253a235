//! Haggle CLI - dealer call operations
//!
//! Operator tool for inspecting calls and deals through the Haggle API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;

use api::{CallRecord, DealerSearchRequest, FinishCallRequest, HaggleClient};
use config::Config;

#[derive(Parser)]
#[command(name = "haggle")]
#[command(about = "Haggle CLI - dealer call operations", long_about = None)]
#[command(version)]
struct Cli {
    /// API base URL (overrides config)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is reachable
    Health,

    /// Call operations
    Calls {
        #[command(subcommand)]
        action: CallsAction,
    },

    /// Deal lookups
    Deals {
        #[command(subcommand)]
        action: DealsAction,
    },

    /// Dealer search
    Dealers {
        #[command(subcommand)]
        action: DealersAction,
    },

    /// Search CARFAX listings near a zip code
    Sellers {
        /// Zip code
        #[arg(short, long)]
        zip: String,
        /// Search radius in miles
        #[arg(short, long)]
        radius: Option<String>,
        /// Model name
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show or update configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum CallsAction {
    /// List calls, newest first
    List {
        /// Filter by status (pending, completed, failed)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show the first call recorded for a user
    Get {
        /// User ID
        user_id: String,
    },
    /// Submit a batch of calls from a JSON file
    Submit {
        /// Path to a JSON array of call requests
        #[arg(short, long)]
        file: String,
    },
    /// Record a call outcome
    Finish {
        /// Call ID returned on submission
        call_id: String,
        /// Dealer has the car available
        #[arg(short, long)]
        available: bool,
        /// Negotiated price
        #[arg(short, long, default_value = "0")]
        price: i64,
        /// Free-form notes
        #[arg(short, long, default_value = "")]
        remarks: String,
    },
}

#[derive(Subcommand)]
enum DealsAction {
    /// Lowest confirmed deal for a car
    Best {
        #[arg(short, long)]
        model: String,
        #[arg(short, long)]
        year: i32,
        #[arg(short, long)]
        zipcode: String,
    },
}

#[derive(Subcommand)]
enum DealersAction {
    /// Search dealers near a zip code
    Search {
        #[arg(long, default_value = "Toyota")]
        make: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        version: String,
        #[arg(long)]
        zip: String,
        #[arg(long, default_value = "50")]
        radius: i32,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the API base URL
    SetUrl {
        /// e.g. http://localhost:8080
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let base_url = cli.url.unwrap_or_else(|| config.base_url.clone());
    let client = HaggleClient::new(&base_url);

    match cli.command {
        Commands::Health => cmd_health(&client, &base_url).await,
        Commands::Calls { action } => cmd_calls(&client, action).await,
        Commands::Deals { action } => cmd_deals(&client, action).await,
        Commands::Dealers { action } => cmd_dealers(&client, action).await,
        Commands::Sellers { zip, radius, model } => {
            cmd_sellers(&client, &zip, radius.as_deref(), model.as_deref()).await
        }
        Commands::Config { action } => cmd_config(config, action),
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_health(client: &HaggleClient, base_url: &str) -> Result<()> {
    print!("Checking {}... ", base_url);

    match client.health().await {
        Ok(true) => {
            println!("{}", "OK".green());
            Ok(())
        }
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach Haggle API at {}", base_url);
        }
    }
}

async fn cmd_calls(client: &HaggleClient, action: CallsAction) -> Result<()> {
    match action {
        CallsAction::List { status } => {
            let resp = client.list_calls(status.as_deref()).await?;

            if resp.calls.is_empty() {
                println!("{}", "No calls found.".yellow());
                return Ok(());
            }

            println!("{} ({})\n", "Calls".bold(), resp.count);
            for call in &resp.calls {
                print_call_line(call);
            }
        }
        CallsAction::Get { user_id } => {
            let resp = client.get_call(&user_id).await?;
            print_call_detail(&resp.call);
        }
        CallsAction::Submit { file } => {
            let content =
                fs::read_to_string(&file).with_context(|| format!("Failed to read file: {}", file))?;
            let batch: serde_json::Value =
                serde_json::from_str(&content).context("File is not valid JSON")?;
            if !batch.is_array() {
                bail!("Expected a JSON array of call requests in {}", file);
            }

            let resp = client.submit_calls(&batch).await?;
            println!("{} {}", "✓".green(), resp.message);
            if let Some(data) = resp.data {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
        }
        CallsAction::Finish { call_id, available, price, remarks } => {
            let request = FinishCallRequest {
                user_id: call_id,
                is_available: available,
                deal_price: price,
                remarks,
            };
            let resp = client.finish_call(&request).await?;
            if resp.success {
                println!("{} {}", "✓".green(), resp.message);
            } else {
                println!("{} {}", "✗".red(), resp.message);
            }
        }
    }

    Ok(())
}

async fn cmd_deals(client: &HaggleClient, action: DealsAction) -> Result<()> {
    match action {
        DealsAction::Best { model, year, zipcode } => {
            let resp = client.best_deal(&model, year, &zipcode).await?;
            if resp.found {
                println!(
                    "{} {} {} in {}: {}",
                    "Best deal".bold(),
                    year,
                    model,
                    zipcode,
                    format!("${}", resp.price).green()
                );
            } else {
                println!("{}", format!("No confirmed deals for {} {} in {}", year, model, zipcode).yellow());
            }
        }
    }

    Ok(())
}

async fn cmd_dealers(client: &HaggleClient, action: DealersAction) -> Result<()> {
    match action {
        DealersAction::Search { make, model, version, zip, radius } => {
            let request = DealerSearchRequest {
                make,
                model,
                version,
                zip_code: zip,
                radius_miles: radius,
            };
            let resp = client.search_dealers(&request).await?;

            println!("{} ({})\n", "Dealers".bold(), resp.count);
            for dealer in &resp.dealers {
                println!(
                    "  {} {} {:.1} mi  {}",
                    dealer.dealer_name.cyan(),
                    format!("${:.0}", dealer.discounted_price).green(),
                    dealer.distance,
                    dealer.phone.dimmed()
                );
                println!("    {}", dealer.address.dimmed());
            }
        }
    }

    Ok(())
}

async fn cmd_sellers(
    client: &HaggleClient,
    zip: &str,
    radius: Option<&str>,
    model: Option<&str>,
) -> Result<()> {
    let listings = client.sellers(zip, radius, model).await?;
    println!("{}", serde_json::to_string_pretty(&listings)?);
    Ok(())
}

fn cmd_config(mut config: Config, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", "Configuration".bold());
            println!("  Path:     {:?}", Config::config_path()?);
            println!("  Base URL: {}", config.base_url);
        }
        ConfigAction::SetUrl { url } => {
            config.set_base_url(&url);
            config.save()?;
            println!("{} Base URL set to {}", "✓".green(), config.base_url);
        }
    }

    Ok(())
}

// ============================================
// Output helpers
// ============================================

fn status_label(status: &str) -> colored::ColoredString {
    match status {
        "completed" => status.green(),
        "failed" => status.red(),
        _ => status.yellow(),
    }
}

fn print_call_line(call: &CallRecord) {
    println!(
        "  {} {} {} {} @ {} [{}]",
        call.call_id.dimmed(),
        call.year,
        call.model,
        call.zipcode,
        call.dealer_name.cyan(),
        status_label(&call.status)
    );
}

fn print_call_detail(call: &CallRecord) {
    println!("{}", "Call".bold());
    println!("  Call ID:  {}", call.call_id);
    println!("  User ID:  {}", call.user_id);
    println!("  Car:      {} {} ({})", call.year, call.model, call.zipcode);
    println!("  Dealer:   {} {}", call.dealer_name, call.phone_number.dimmed());
    println!("  Listing:  ${}", call.listing_price);
    println!("  Status:   {}", status_label(&call.status));
    if let Some(price) = call.deal_price {
        println!("  Deal:     {}", format!("${}", price).green());
    }
    if let Some(remarks) = &call.remarks {
        if !remarks.is_empty() {
            println!("  Remarks:  {}", remarks);
        }
    }
    println!("  Created:  {}", call.created_at.dimmed());
}
