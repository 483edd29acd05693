use clap::Parser;
use facts_app::{
    view::{self, ViewOptions},
    AppConfig, BoxedError, Command, FactsApp, HELP,
};
use facts_sdk::supabase::SupabaseStore;
use std::{
    future::Future,
    io::{IsTerminal, Write},
    sync::Arc,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Browse, share and vote on facts stored in a Supabase project.
#[derive(Debug, Parser)]
#[command(name = "facts", version)]
struct Cli {
    /// Project URL
    #[arg(long, env = "SUPABASE_URL")]
    url: Option<String>,
    /// Project API key
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    key: Option<String>,
    /// Table holding the facts (default: facts)
    #[arg(long, env = "FACTS_TABLE")]
    table: Option<String>,
    /// Do not colour category names
    #[arg(long)]
    no_color: bool,
}

type Redraw = mpsc::UnboundedSender<()>;

#[tokio::main]
async fn main() -> Result<(), BoxedError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::new(cli.url, cli.key, cli.table)?;
    info!(url = %config.supabase_url, "using facts store");

    let store = Arc::new(SupabaseStore::new(config.store_options()));
    let app = Arc::new(FactsApp::new(store));
    let options = ViewOptions {
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };

    let (redraw, mut redraw_rx) = mpsc::unbounded_channel();
    spawn_call(&app, &redraw, |app| async move {
        app.refresh().await;
    });
    draw(&app, options)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => run(&app, &redraw, command),
                    Ok(None) => {}
                    Err(err) => eprintln!("{err}"),
                }
                draw(&app, options)?;
            }
            Some(()) = redraw_rx.recv() => draw(&app, options)?,
        }
    }

    Ok(())
}

/// Handle a command. Remote calls run in the background and trigger a
/// redraw when they settle, so input stays responsive.
fn run(app: &Arc<FactsApp>, redraw: &Redraw, command: Command) {
    match command {
        Command::Filter(filter) => spawn_call(app, redraw, move |app| async move {
            app.set_category(filter).await;
        }),
        Command::Refresh => spawn_call(app, redraw, |app| async move {
            app.refresh().await;
        }),
        Command::Post => spawn_call(app, redraw, |app| async move {
            app.submit().await;
        }),
        Command::Vote(id, kind) => spawn_call(app, redraw, move |app| async move {
            app.vote(id, kind).await;
        }),
        Command::ToggleForm => {
            app.toggle_form();
        }
        Command::SetText(text) => {
            app.set_text(text);
        }
        Command::SetSource(source) => {
            app.set_source(source);
        }
        Command::SetCategory(category) => {
            app.set_form_category(category);
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

fn spawn_call<F, Fut>(app: &Arc<FactsApp>, redraw: &Redraw, call: F)
where
    F: FnOnce(Arc<FactsApp>) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let call = call(Arc::clone(app));
    let redraw = redraw.clone();
    tokio::spawn(async move {
        call.await;
        let _ = redraw.send(());
    });
}

fn draw(app: &FactsApp, options: ViewOptions) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout)?;
    write!(stdout, "{}", view::render(&app.state(), options))?;
    write!(stdout, "> ")?;
    stdout.flush()
}
