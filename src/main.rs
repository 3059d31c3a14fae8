use std::{net::SocketAddr, path::PathBuf};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use sporlproxy::{config, error, info, server, spotify, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Load configuration from this .env file instead of the data directory
    #[clap(long, global = true)]
    env_file: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the proxy server
    Serve(ServeOptions),

    /// Print the Spotify authorization URL
    LoginUrl,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind to, overrides SERVER_ADDRESS
    #[clap(long)]
    pub address: Option<SocketAddr>,

    /// Open the authorization page in the default browser on startup
    #[clap(long)]
    pub open_browser: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sporlproxy=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn load_config(env_file: Option<PathBuf>) -> config::Config {
    if let Err(e) = config::load_env(env_file).await {
        error!("Cannot load environment. Err: {}", e);
    }

    match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            init_tracing();
            let mut config = load_config(cli.env_file).await;
            if let Some(address) = opt.address {
                config.server_addr = address;
            }

            let auth_url = spotify::auth::authorization_url(&config);
            info!("Authorize the proxy once by visiting /login or:\n{}", auth_url);
            if opt.open_browser && webbrowser::open(&auth_url).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    auth_url
                )
            }

            if let Err(e) = server::start_api_server(config).await {
                error!("Server stopped. Err: {}", e);
            }
        }
        Command::LoginUrl => {
            let config = load_config(cli.env_file).await;
            println!("{}", spotify::auth::authorization_url(&config));
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
