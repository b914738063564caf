mod commands;
mod telemetry;

use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use safebites_frontend::api::ApiClient;

#[derive(Parser)]
#[command(author, version, about = "Scan food labels against the SafeBites analysis service")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a label image and print the additive report
    Scan {
        /// Path, file:// URI, data URI, or `-` for raw bytes on stdin
        image: String,
        /// Analysis endpoint (defaults to $SAFEBITES_API_URL or the local service)
        #[arg(long)]
        endpoint: Option<String>,
        /// Print the server's JSON instead of the text report
        #[arg(long)]
        json: bool,
        /// Image subtype for bytes read from stdin
        #[arg(long, default_value = "jpeg")]
        subtype: String,
    },
    /// Show the multipart payload an image would produce, without uploading
    Inspect {
        image: String,
        #[arg(long, default_value = "jpeg")]
        subtype: String,
    },
}

fn main() -> Result<()> {
    telemetry::init_tracing();

    match Args::parse().command {
        Command::Scan {
            image,
            endpoint,
            json,
            subtype,
        } => {
            let image = commands::resolve_image(&image, &subtype, io::stdin())?;
            let config = commands::client_config(endpoint.as_deref())?;
            let client = ApiClient::new(&config)?;
            print!("{}", commands::scan(&client, &image, json)?);
            if json {
                println!();
            }
        }
        Command::Inspect { image, subtype } => {
            let image = commands::resolve_image(&image, &subtype, io::stdin())?;
            print!("{}", commands::inspect(&image)?);
        }
    }
    Ok(())
}
