//! Document-store CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Wire observability**: configure `tracing-subscriber` with an
//!    `EnvFilter` (`RUST_LOG`, default `info`) on stderr; JSON output when
//!    `DOCSTORE_LOG_FORMAT=json`.
//! 2. **Resolve configuration**: `--config`, else `DOCSTORE_CONFIG`, else the
//!    default endpoint.
//! 3. **Construct infrastructure**: an `HttpTransport`, or a
//!    `DryRunTransport` with `--dry-run`, injected into `docstore::Client`.
//! 4. **Run one command** and print the response body as JSON.

mod args;
mod dry_run;

use anyhow::Result;
use docstore::{Client, RequestOptions, Response, StoreResult, Transport};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{Action, Cli, Command, USAGE};
use crate::dry_run::DryRunTransport;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if std::env::var("DOCSTORE_LOG_FORMAT").is_ok_and(|v| v == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run<T: Transport>(
    client: &Client<T>,
    command: Command,
    options: RequestOptions,
) -> StoreResult<Response> {
    match command {
        Command::Info => client.manage().info().await,
        Command::Get { uri } => client.get_with(uri, options).await,
        Command::Insert { uri, document } => client.insert_with(uri, document, options).await,
        Command::Destroy { uri } => client.destroy(uri).await,
        Command::DestroyMatching { filter } => client.destroy_matching(filter).await,
        Command::Query { query } => client.query_with(&query, options).await,
        Command::Find { query } => client.find_with(query, options).await,
        Command::Nth { n, query } => client.nth(n, query).await,
        Command::First { query } => client.first(query).await,
        Command::Field { action, name } => {
            let fields = client.manage().field();
            match action {
                Action::Get => fields.get(name).await,
                Action::Create => fields.create_with(name, options).await,
                Action::Destroy => fields.destroy(name).await,
            }
        }
        Command::Range { action, name } => {
            let ranges = client.manage().range();
            match action {
                Action::Get => ranges.get(name).await,
                Action::Create => ranges.create_with(name, options).await,
                Action::Destroy => ranges.destroy(name).await,
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = match args::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };
    let Cli {
        config,
        dry_run,
        options,
        command,
    } = cli;

    let response = if dry_run {
        run(&Client::new(DryRunTransport), command, options).await?
    } else {
        let source = config.or_else(|| std::env::var("DOCSTORE_CONFIG").ok());
        let client = transport::connect(source.as_deref())?;
        debug!(proxy = client.transport().config().proxy.is_some(), "client ready");
        run(&client, command, options).await?
    };

    println!("{}", render(&response)?);
    Ok(())
}

/// Pretty JSON of the response body, as printed on stdout.
fn render(response: &Response) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&response.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dry_run_output_is_the_rendered_body() {
        let cli = args::parse(["find".to_string(), "hello".to_string()]).unwrap();
        let response = run(&Client::new(DryRunTransport), cli.command, cli.options)
            .await
            .unwrap();
        assert_eq!(render(&response).unwrap(), "{\n  \"results\": []\n}");
    }
}
