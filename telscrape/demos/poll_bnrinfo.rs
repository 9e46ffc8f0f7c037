//! Poll a CPE once and print its bnrinfo metrics as JSON.
//!
//! This demonstrates the caller's role around the library core:
//! open/login, fetch, inspect per-field failures, close. Scheduling,
//! retries, and the telemetry sink stay on this side of the fence.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example poll_bnrinfo -- --host 192.168.0.1 --user admin --password secret
//! ```

use std::env;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use telscrape::{SessionBuilder, atcli};

/// The CPE keeps its telnet service closed until this management page
/// is fetched once; the device serves the page and closes the socket.
async fn enable_telnet(host: &str) -> std::io::Result<()> {
    let mut stream = TcpStream::connect((host, 8000u16)).await?;
    stream
        .write_all(format!("GET /atsq.txt HTTP/1.0\r\nHost: {host}\r\n\r\n").as_bytes())
        .await?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await?;
    let status = String::from_utf8_lossy(&response)
        .lines()
        .next()
        .unwrap_or("")
        .to_string();
    println!("Telnet enable response: {status}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("Enabling telnet on {}...", args.host);
    enable_telnet(&args.host).await?;

    println!("Connecting to {}:{}...", args.host, args.port);

    let mut session = SessionBuilder::new(&args.host)
        .port(args.port)
        .username(&args.user)
        .password(&args.password)
        .read_timeout(Duration::from_secs(args.timeout))
        .open()
        .await?;

    println!("Logged in, fetching bnrinfo...");

    let report = atcli::bnrinfo::fetch(&mut session).await?;

    println!("{}", serde_json::to_string_pretty(&report.info)?);

    if !report.is_complete() {
        eprintln!("\n{} field(s) could not be extracted:", report.failures.len());
        for failure in &report.failures {
            match failure.chain {
                Some(chain) => eprintln!("  {} (chain {}): {}", failure.field, chain, failure.error),
                None => eprintln!("  {}: {}", failure.field, failure.error),
            }
        }
    }

    session.close().await?;
    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: String,
    timeout: u64,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = "192.168.0.1".to_string();
        let mut port = 23u16;
        let mut user = "admin".to_string();
        let mut password = String::new();
        let mut timeout = 30u64;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    i += 1;
                    if i < args.len() {
                        host = args[i].clone();
                    }
                }
                "--port" | "-p" => {
                    i += 1;
                    if i < args.len() {
                        port = args[i].parse().unwrap_or(23);
                    }
                }
                "--user" | "-u" => {
                    i += 1;
                    if i < args.len() {
                        user = args[i].clone();
                    }
                }
                "--password" | "-P" => {
                    i += 1;
                    if i < args.len() {
                        password = args[i].clone();
                    }
                }
                "--timeout" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        timeout = args[i].parse().unwrap_or(30);
                    }
                }
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                }
            }
            i += 1;
        }

        if password.is_empty() {
            eprintln!("Error: --password is required");
            Self::print_help();
            std::process::exit(1);
        }

        Self {
            host,
            port,
            user,
            password,
            timeout,
        }
    }

    fn print_help() {
        println!(
            r#"telscrape poll_bnrinfo example

USAGE:
    cargo run --example poll_bnrinfo -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Device address [default: 192.168.0.1]
    -p, --port <PORT>        Telnet port [default: 23]
    -u, --user <USER>        Login username [default: admin]
    -P, --password <PASS>    Login password (required)
    -t, --timeout <SECS>     Per-wait deadline [default: 30]
    --help                   Print this help message
"#
        );
    }
}
