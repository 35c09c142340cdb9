// Bookshelf
// Copyright 2026 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Command line interface to the book record store.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use bookshelf::{DbOptions, Store};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::io;
use std::net::Ipv4Addr;
use std::process::ExitCode;

/// Prefix of all environment variables that configure the program.
const ENV_PREFIX: &str = "BOOKS";

/// Stores and queries book records.
#[derive(Parser)]
#[command(name = "books", version)]
struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    command: Command,
}

/// Operations exposed by the program.
#[derive(Subcommand)]
enum Command {
    /// Inserts the sample books into the database.
    Seed,

    /// Adds a single book to the database.
    Add {
        /// Title of the book.
        title: String,

        /// Author of the book.
        author: String,
    },

    /// Prints the results of all canned queries.
    Demo {
        /// Author whose books to list.
        #[arg(long, default_value = "George Orwell")]
        author: String,

        /// Keyword to look for in book titles.
        #[arg(long, default_value = "new")]
        keyword: String,
    },

    /// Serves the REST API on localhost.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

/// Runs `command` against the configured database.
async fn run(command: Command) -> Result<(), Box<dyn Error>> {
    let store = Store::connect(DbOptions::from_env(ENV_PREFIX)?).await?;

    let result = match command {
        Command::Seed => store.seed(&mut io::stdout().lock()).await,
        Command::Add { title, author } => store.add(title, author, &mut io::stdout().lock()).await,
        Command::Demo { author, keyword } => {
            store.demo(&author, &keyword, &mut io::stdout().lock()).await
        }
        Command::Serve { port } => store.serve((Ipv4Addr::LOCALHOST, port)).await,
    };

    store.close().await;
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("books: {}", e);
            ExitCode::FAILURE
        }
    }
}
