//! calendar-chat: 자연어로 캘린더를 관리하는 명령줄 도구
//!
//! Usage:
//!   calendar-chat chat <message> [--user <id>] [--session <id>] [--config <path>]
//!   calendar-chat prompt <message> [--user <id>]
//!   calendar-chat catalog
//!   calendar-chat version

use anyhow::{bail, Context};
use calendar_chat::clock::{Clock, SystemClock};
use calendar_chat::dispatch::CalendarOperations;
use calendar_chat::{
    prompt, AssistantConfig, ChatOrchestrator, ChatRequest, CompletionClientBuilder, FunctionCatalog,
    HttpCalendarClient, InMemoryCalendar, McpNotifier, UserId,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "chat" => cmd_chat(&args[2..]).await,
        "prompt" => cmd_prompt(&args[2..]),
        "catalog" => cmd_catalog(),
        "version" | "--version" | "-V" => {
            println!("calendar-chat {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"calendar-chat: 대화형 캘린더 어시스턴트

USAGE:
    calendar-chat <COMMAND> [OPTIONS]

COMMANDS:
    chat <message>      Run one exchange and print the reply as JSON
        --user <id>         Caller id (default 1)
        --session <id>      Reuse a session id
        --config <path>     YAML configuration file
    prompt <message>    Print the prompt that would be sent
        --user <id>         Caller id (default 1)
    catalog             Print the function catalog as JSON
    version             Show version information
    help                Show this help message

ENVIRONMENT:
    GEMINI_API_KEY      Completion API key (required for chat)
    GEMINI_MODEL        Model name
    CALENDAR_API_URL    Calendar service; in-memory calendar when unset
    MCP_SERVER_URL      Management server notified after changes
    RUST_LOG            Log filter, e.g. calendar_chat=debug"#
    );
}

/// Positional message plus `--flag value` pairs.
struct Options {
    message: Option<String>,
    user: UserId,
    session: Option<String>,
    config: Option<PathBuf>,
}

fn parse_options(args: &[String]) -> anyhow::Result<Options> {
    let mut opts = Options {
        message: None,
        user: 1,
        session: None,
        config: None,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--user" => {
                let raw = iter.next().context("--user needs a value")?;
                opts.user = raw.parse().with_context(|| format!("invalid user id: {raw}"))?;
            }
            "--session" => opts.session = Some(iter.next().context("--session needs a value")?.clone()),
            "--config" => opts.config = Some(PathBuf::from(iter.next().context("--config needs a value")?)),
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            text => match opts.message.as_mut() {
                Some(message) => {
                    message.push(' ');
                    message.push_str(text);
                }
                None => opts.message = Some(text.to_string()),
            },
        }
    }
    Ok(opts)
}

async fn cmd_chat(args: &[String]) -> anyhow::Result<()> {
    let opts = parse_options(args)?;
    let message = opts.message.context("chat needs a message")?;
    let config = AssistantConfig::load(opts.config.as_deref()).context("loading configuration")?;

    let client = CompletionClientBuilder::from_config(&config)
        .build()
        .context("building completion client")?;

    let calendar: Arc<dyn CalendarOperations> = match config.calendar.base_url.as_deref() {
        Some(url) => Arc::new(HttpCalendarClient::new(url, &config.http)?),
        None => {
            tracing::info!("no calendar service configured, using in-memory calendar");
            Arc::new(InMemoryCalendar::new())
        }
    };

    let mut orchestrator = ChatOrchestrator::new(Arc::new(client), calendar);
    if let Some(url) = config.management.url.as_deref() {
        orchestrator = orchestrator.with_notifier(Arc::new(McpNotifier::new(url, &config.http)?));
    }

    let mut request = ChatRequest::new(message);
    request.session_id = opts.session;
    let reply = orchestrator.handle(request, opts.user).await;
    println!("{}", serde_json::to_string_pretty(&reply)?);

    orchestrator.wait_for_notifications().await;
    Ok(())
}

fn cmd_prompt(args: &[String]) -> anyhow::Result<()> {
    let opts = parse_options(args)?;
    let message = opts.message.context("prompt needs a message")?;
    println!("{}", prompt::build(&message, opts.user, SystemClock.now()));
    Ok(())
}

fn cmd_catalog() -> anyhow::Result<()> {
    let tools = FunctionCatalog::calendar().to_tools();
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}
