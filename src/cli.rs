//! Command-line interface definitions
//!
//! # Commands
//!
//! - **list** / **search**: browse the catalog, with or without filters
//! - **featured**, **show**, **stats**: read-only views
//! - **create** / **update** / **delete**: manage listings (signed in)
//! - **favorites**, **inquiries**: the signed-in user's saved listings and messages
//! - **login** / **register** / **me**: obtain and inspect a bearer token
//!
//! Filters are given as repeated `-f key=value` pairs, e.g.
//! `estate-scout search -f city=Austin -f min_price=200000`.

use crate::filters::{FilterError, FilterSet};
use crate::models::UserRole;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "estate-scout", version, about = "Browse and search real-estate listings")]
pub struct Cli {
    /// Also write the fetched data as pretty JSON to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the whole catalog
    #[command(alias = "ls")]
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Page size (defaults to ESTATE_PAGE_SIZE)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Featured listings
    Featured {
        #[arg(short, long, default_value_t = crate::search::FEATURED_LIMIT)]
        limit: u32,
    },

    /// Search with filters
    #[command(alias = "s")]
    Search {
        /// Filter as key=value (query, property_type, status, min_price, max_price,
        /// min_bedrooms, max_bedrooms, min_bathrooms, max_bathrooms, city, state,
        /// min_area, max_area, is_featured)
        #[arg(short, long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show one listing
    Show { id: String },

    /// Create a listing from a JSON file
    Create {
        #[arg(long, value_name = "FILE")]
        json: PathBuf,
    },

    /// Update a listing from a JSON file holding the changed fields
    Update {
        id: String,
        #[arg(long, value_name = "FILE")]
        json: PathBuf,
    },

    /// Delete a listing
    Delete { id: String },

    /// Saved listings
    #[command(subcommand)]
    Favorites(FavoriteCommands),

    /// Messages about listings
    #[command(subcommand)]
    Inquiries(InquiryCommands),

    /// Catalog counters
    Stats,

    /// Sign in and print the bearer token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and print the bearer token
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, value_enum, default_value_t = RoleArg::Buyer)]
        role: RoleArg,
    },

    /// Show the signed-in account
    Me,
}

#[derive(Subcommand, Debug)]
pub enum FavoriteCommands {
    List,
    Add { id: String },
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum InquiryCommands {
    List,
    Create {
        #[arg(long = "property")]
        property_id: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    Buyer,
    Seller,
    Agent,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Buyer => UserRole::Buyer,
            RoleArg::Seller => UserRole::Seller,
            RoleArg::Agent => UserRole::Agent,
        }
    }
}

/// Turn repeated `-f key=value` arguments into a filter set
pub fn parse_filters(pairs: &[String]) -> Result<FilterSet, FilterError> {
    FilterSet::from_pairs(pairs)
}
