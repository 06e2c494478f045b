//! Command-line tool for making requests to GURT servers.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use gurt_client::{Client, ClientConfig, Response};

#[derive(Parser)]
#[command(name = "gurt", about = "Command-line client for GURT servers", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Skip TLS certificate verification (development only)
    #[arg(long, global = true)]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30.0)]
    timeout: f64,

    /// Print response headers
    #[arg(long, global = true)]
    headers: bool,

    /// Pretty-print JSON response bodies
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a GET request
    Get { url: String },

    /// Send a POST request
    Post {
        url: String,

        /// Request body data
        #[arg(short, long)]
        data: Option<String>,

        /// Request body as JSON
        #[arg(short = 'j', long)]
        json_data: Option<String>,

        /// Read the request body from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Content type of the request body
        #[arg(short = 't', long)]
        content_type: Option<String>,
    },

    /// Send a PUT request
    Put {
        url: String,

        /// Request body data
        #[arg(short, long)]
        data: Option<String>,

        /// Request body as JSON
        #[arg(short = 'j', long)]
        json_data: Option<String>,

        /// Read the request body from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Content type of the request body
        #[arg(short = 't', long)]
        content_type: Option<String>,
    },

    /// Send a DELETE request
    Delete { url: String },

    /// Send a HEAD request
    Head { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = ClientConfig {
        request_timeout: Duration::from_secs_f64(cli.timeout),
        verify_tls: !cli.insecure,
        ..ClientConfig::default()
    };
    let client = Client::with_config(config)?;

    let response = match &cli.command {
        Command::Get { url } => client.get(url).await?,

        Command::Post {
            url,
            data,
            json_data,
            file,
            content_type,
        } => {
            let (body, content_type) = request_body(data, json_data, file, content_type)?;
            client.post(url, body, &content_type).await?
        }

        Command::Put {
            url,
            data,
            json_data,
            file,
            content_type,
        } => {
            let (body, content_type) = request_body(data, json_data, file, content_type)?;
            client.put(url, body, &content_type).await?
        }

        Command::Delete { url } => client.delete(url).await?,

        Command::Head { url } => client.head(url).await?,
    };

    print_response(&response, cli.headers, cli.json);
    Ok(())
}

/// Resolves the body of a POST/PUT from the mutually preferred sources:
/// explicit JSON, inline data, then a file; empty body otherwise.
fn request_body(
    data: &Option<String>,
    json_data: &Option<String>,
    file: &Option<PathBuf>,
    content_type: &Option<String>,
) -> anyhow::Result<(Vec<u8>, String)> {
    if let Some(raw) = json_data {
        let value: serde_json::Value =
            serde_json::from_str(raw).context("invalid JSON in --json-data")?;
        return Ok((serde_json::to_vec(&value)?, "application/json".to_string()));
    }

    let content_type = content_type
        .clone()
        .unwrap_or_else(|| "text/plain".to_string());

    if let Some(data) = data {
        return Ok((data.clone().into_bytes(), content_type));
    }

    if let Some(path) = file {
        let body = std::fs::read(path)
            .with_context(|| format!("failed to read body from {}", path.display()))?;
        return Ok((body, content_type));
    }

    Ok((Vec::new(), content_type))
}

fn print_response(response: &Response, show_headers: bool, format_json: bool) {
    println!(
        "Status: {} {}",
        response.status.as_u16(),
        response.status_message
    );

    if show_headers {
        println!("\nHeaders:");
        for (key, value) in response.headers.iter() {
            println!("  {key}: {value}");
        }
    }

    if response.body.is_empty() {
        return;
    }

    println!("\nBody:");

    if format_json && response.header("content-type") == Some("application/json") {
        if let Ok(value) = response.json::<serde_json::Value>() {
            if let Ok(pretty) = serde_json::to_string_pretty(&value) {
                println!("{pretty}");
                return;
            }
        }
    }

    match response.text() {
        Ok(text) => println!("{text}"),
        Err(_) => println!("<binary data: {} bytes>", response.body.len()),
    }
}
