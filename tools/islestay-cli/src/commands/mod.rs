//! CLI command implementations.

pub mod config;
pub mod quote;
pub mod search;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use islestay_listing::pricing::TripWindow;

/// Trip dates shared by search and quote.
#[derive(Args, Debug, Clone, Default)]
pub struct TripArgs {
    /// Check-in date (YYYY-MM-DD).
    #[arg(long)]
    pub check_in: Option<String>,

    /// Check-out date (YYYY-MM-DD).
    #[arg(long)]
    pub check_out: Option<String>,

    /// Number of nights (derived from the dates when omitted).
    #[arg(short, long)]
    pub nights: Option<i64>,
}

impl TripArgs {
    /// Build the trip window.
    pub fn to_trip(&self) -> Result<TripWindow> {
        match (&self.check_in, &self.check_out, self.nights) {
            (Some(check_in), Some(check_out), Some(nights)) => {
                Ok(TripWindow::new(nights, check_in, check_out))
            }
            (Some(check_in), Some(check_out), None) => {
                let trip = TripWindow::from_dates(check_in, check_out);
                if trip.check_in_at().is_none() || trip.check_out_at().is_none() {
                    bail!("Could not parse trip dates: {} to {}", check_in, check_out);
                }
                Ok(trip)
            }
            (Some(_), None, _) | (None, Some(_), _) => {
                bail!("--check-in and --check-out must be given together")
            }
            (None, None, Some(nights)) => Ok(TripWindow::nights(nights)),
            (None, None, None) => Ok(TripWindow::undated()),
        }
    }
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Listings JSON file (default: [source] path).
    #[arg(short, long)]
    pub stays: Option<String>,

    /// Filter criteria file (TOML or JSON).
    #[arg(long)]
    pub criteria: Option<String>,

    #[command(flatten)]
    pub trip: TripArgs,

    /// Island to search.
    #[arg(short, long)]
    pub island: Option<String>,

    /// Stay type chip (Hotel, Villa, Airbnb).
    #[arg(long = "type")]
    pub stay_type: Option<String>,

    /// Amenity chip.
    #[arg(long)]
    pub amenity: Option<String>,

    /// Number of guests.
    #[arg(short, long)]
    pub guests: Option<u32>,

    /// Lower trip price bound (overrides the criteria file).
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Upper trip price bound (overrides the criteria file).
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Select the full price range when no bound is set.
    #[arg(long)]
    pub seed_price: bool,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Stay identifier.
    #[arg(long)]
    pub id: String,

    /// Listings JSON file (default: [source] path).
    #[arg(short, long)]
    pub stays: Option<String>,

    #[command(flatten)]
    pub trip: TripArgs,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Initialize a new config file.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration.
    Validate,
}
