mod relay_client;
mod render;
mod repl;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use dashboard::{ChartSeries, ChatSession, Dashboard, DatasetError, SortKey, TableState, parse_records};
use relay_client::{RelayClient, RelayClientError};
use tokio::io::BufReader;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("server request failed: {0}")]
    Server(#[from] RelayClientError),
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no records for year {0}")]
    UnknownYear(i32),
}

#[derive(Parser, Debug)]
#[command(name = "salary-cli", about = "ML engineer salary dashboard and chat CLI")]
struct Cli {
    #[arg(long, env = "SALARY_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Print the per-year table.
    Table(TableArgs),
    /// Print the total-jobs chart.
    Chart(ChartArgs),
    /// Send one message to the chat relay and print the reply.
    Ask {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Interactive chat; one message per line, EOF to quit.
    Chat,
}

#[derive(Args, Debug)]
struct DataSource {
    #[arg(long, help = "Read the dataset from a local file instead of the server")]
    data: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TableArgs {
    #[command(flatten)]
    source: DataSource,

    #[arg(long = "click", help = "Header clicks to apply in order: year, totalJobs, averageSalary")]
    clicks: Vec<SortKey>,

    #[arg(long, help = "Show job title counts for this year")]
    year: Option<i32>,
}

#[derive(Args, Debug)]
struct ChartArgs {
    #[command(flatten)]
    source: DataSource,

    #[arg(long, default_value_t = 60)]
    width: usize,

    #[arg(long, default_value_t = 12)]
    height: usize,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    let client = RelayClient::new(&cli.base_url);

    match cli.command {
        Command::Ping => {
            client.healthz().await?;
            println!("ok");
            Ok(())
        }
        Command::Table(args) => run_table(&client, args).await,
        Command::Chart(args) => run_chart(&client, args).await,
        Command::Ask { message } => run_ask(&client, &message.join(" ")).await,
        Command::Chat => run_chat(client).await,
    }
}

async fn load_dashboard(client: &RelayClient, source: &DataSource) -> Result<Dashboard, CliError> {
    let text = match &source.data {
        Some(path) => read_file(path).await?,
        None => client.dataset().await?,
    };
    let parsed = parse_records(&text)?;
    for skipped in &parsed.skipped {
        warn!(index = skipped.index, reason = %skipped.reason, "dataset: skipping record");
    }
    Ok(Dashboard::mount(parsed.records))
}

async fn read_file(path: &Path) -> Result<String, CliError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DatasetError::Read(format!("{}: {e}", path.display())).into())
}

async fn run_table(client: &RelayClient, args: TableArgs) -> Result<(), CliError> {
    let dashboard = load_dashboard(client, &args.source).await?;
    let mut table = TableState::new();
    for key in args.clicks {
        table.click_header(key);
    }
    if let Some(year) = args.year {
        if dashboard.year(year).is_none() {
            return Err(CliError::UnknownYear(year));
        }
        table.select_year(&dashboard, year);
    }
    print!("{}", render::render_table(&dashboard, &table));
    Ok(())
}

async fn run_chart(client: &RelayClient, args: ChartArgs) -> Result<(), CliError> {
    let dashboard = load_dashboard(client, &args.source).await?;
    let series = ChartSeries::from_aggregates(dashboard.aggregates());
    print!("{}", render::render_chart(&series, args.width, args.height));
    Ok(())
}

async fn run_ask(client: &RelayClient, message: &str) -> Result<(), CliError> {
    let mut session = ChatSession::new();
    session.set_input(message);
    let Some(pending) = session.submit() else {
        return Ok(());
    };
    let outcome = client.chat(&pending.body()).await;
    if let Err(e) = &outcome {
        warn!(error = %e, "chat: relay call failed");
    }
    session.settle(pending.seq, outcome);
    if let Some(reply) = session.messages().last() {
        println!("{}", reply.text);
    }
    Ok(())
}

async fn run_chat(client: RelayClient) -> Result<(), CliError> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl::run(stdin, &mut stdout, move |request| {
        let client = client.clone();
        async move { client.chat(&request).await }
    })
    .await?;
    Ok(())
}
