// Copyright (c) 2018-2022 The MobileCoin Foundation

//! A utility for inspecting the signature history of a wiki page.

use clap::Parser;
use std::path::PathBuf;
use wikisig::{logger::create_app_logger, SignatureDb};

/// Configuration for the signature history tool.
#[derive(Clone, Parser)]
#[clap(
    name = "wikisig-history",
    about = "Dump the signature history of a wiki page as JSON."
)]
pub struct Config {
    /// Path to the signature db.
    #[clap(long, env = "WIKISIG_DB")]
    pub signature_db: PathBuf,

    /// The page whose signature history to dump.
    #[clap(long, env = "WIKISIG_PAGE_ID")]
    pub page_id: u64,

    /// Only print the currently valid signature, if any.
    #[clap(long)]
    pub valid_only: bool,
}

fn main() {
    let config = Config::parse();
    let logger = create_app_logger();

    let db_path = config
        .signature_db
        .to_str()
        .expect("Signature db path is not valid UTF-8");
    let signature_db =
        SignatureDb::new_from_path(db_path, 1, logger).expect("Could not open signature db");

    let mut records = signature_db
        .signature_history(config.page_id)
        .expect("Failed reading signature history");
    if config.valid_only {
        records.retain(|record| record.is_valid());
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&records).expect("Failed serializing signature records")
    );
}
