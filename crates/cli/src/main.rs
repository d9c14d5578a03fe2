use clap::{Parser, Subcommand};
use gitlink_dns_api::AppState;
use gitlink_dns_domain::{CliOverrides, Config, GitQuery, GitRefDescriptor};
use std::net::{IpAddr, SocketAddr};
use tokio::task::JoinSet;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "gitlink-dns")]
#[command(version)]
#[command(about = "Git-ref DNS server - answers TXT queries with the commit behind a branch")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Classic DNS port (UDP and TCP)
    #[arg(short = 'd', long, global = true)]
    dns_port: Option<u16>,

    /// DNS-over-HTTPS port
    #[arg(short = 'w', long, global = true)]
    doh_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long, global = true)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Run the DNS and DoH servers (default)
    Serve,
    /// Resolve one query name and print the TXT answer
    Resolve {
        /// e.g. master.go-ipfs.ipfs.-.github.com.git
        name: String,
    },
    /// Print the query name for a repository URL and branch
    EncodeName { repository: String, branch: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        doh_port: cli.doh_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Resolve { name } => resolve(&config, &name).await,
        Command::EncodeName { repository, branch } => encode_name(&config, repository, branch),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Starting gitlink-dns v{}", env!("CARGO_PKG_VERSION"));

    let services = di::ResolverServices::new(&config.resolver)?;
    let bind_ip: IpAddr = config.server.bind_address.parse()?;

    let mut servers = JoinSet::new();

    if config.server.enable_dns {
        let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);
        let handler = services.dns_handler();
        let workers = config.server.dns_workers;
        let options = server::DnsSocketOptions::from_config(&config.server);
        servers.spawn(async move {
            server::start_dns_server(dns_addr, handler, workers, options)
                .await
                .map_err(|e| e.context("DNS server"))
        });
    }

    if config.server.enable_doh {
        let doh_addr = SocketAddr::new(bind_ip, config.server.doh_port);
        let tls = config
            .server
            .tls
            .as_ref()
            .map(bootstrap::load_tls_config)
            .transpose()?;
        let state = AppState::new(services.responder.clone());
        servers.spawn(async move {
            server::start_doh_server(doh_addr, state, tls)
                .await
                .map_err(|e| e.context("DoH server"))
        });
    }

    while let Some(result) = servers.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(error = %format!("{:#}", e), "Server stopped");
                return Err(e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn resolve(config: &Config, name: &str) -> anyhow::Result<()> {
    let services = di::ResolverServices::new(&config.resolver)?;
    let answer = services.use_case.execute(&GitQuery::txt(name)).await?;

    println!("{}", answer.answer);
    Ok(())
}

fn encode_name(config: &Config, repository: String, branch: String) -> anyhow::Result<()> {
    let codec = config.resolver.codec();
    let name = codec.encode(&GitRefDescriptor::new(branch, repository))?;

    println!("{}", name);
    Ok(())
}
