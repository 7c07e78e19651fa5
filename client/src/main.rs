use clap::{Parser, Subcommand};
use log::info;
use std::time::Duration;
use vrage_client::{ClientConfig, RemoteClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Remote API address (scheme, host and port)
    #[arg(short = 'a', long, env = "VRAGE_REMOTE_ADDRESS", default_value = "http://localhost:8080")]
    address: String,

    /// Base64 shared secret configured on the server
    #[arg(short = 'k', long, env = "VRAGE_REMOTE_KEY")]
    key: String,

    /// Request timeout in seconds
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print server name, version and load
    Info,
    /// Measure signed round-trip time
    Ping,
    /// List grids in the session
    Grids,
    /// List online players
    Players,
    /// Stop every floating object in the session
    StopFloating,
    /// Print recent chat messages
    Chat,
    /// Send a chat message
    Say { message: String },
    /// Save the session, optionally under a new name
    Save {
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let mut config = ClientConfig::new(args.address, args.key);
    if let Some(seconds) = args.timeout {
        config = config.with_timeout(Duration::from_secs(seconds));
    }
    info!("Connecting to: {}", config.remote_address);

    let client = RemoteClient::new(config)?;

    match args.command {
        Command::Info => {
            let info = client.server_info().await?.data;
            println!("{} ({})", info.server_name, info.game);
            println!("  version:   {}", info.version);
            println!("  world:     {}", info.world_name);
            println!("  players:   {}", info.players);
            println!("  sim speed: {:.2}", info.sim_speed);
            println!("  PCU used:  {}", info.used_pcu);
        }
        Command::Ping => {
            let elapsed = client.ping().await?;
            println!("pong in {:.1}ms", elapsed.as_secs_f64() * 1000.0);
        }
        Command::Grids => {
            for grid in client.grids().await?.data.grids {
                println!(
                    "{:>20} {:<32} owner={:<20} blocks={:<6} powered={}",
                    grid.entity_id,
                    grid.display_name,
                    grid.owner_display_name,
                    grid.blocks_count,
                    grid.is_powered
                );
            }
        }
        Command::Players => {
            for player in client.players().await?.data.players {
                println!(
                    "{:>20} {:<24} [{}] ping={:.0}ms",
                    player.steam_id, player.display_name, player.faction_tag, player.ping
                );
            }
        }
        Command::StopFloating => {
            let objects = client.floating_objects().await?.data.floating_objects;
            info!("Stopping {} floating objects", objects.len());
            for object in &objects {
                object.stop().await?;
            }
            println!("stopped {} floating objects", objects.len());
        }
        Command::Chat => {
            for message in client.chat().await?.data.messages {
                let when = message
                    .real_timestamp()
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| message.timestamp.clone());
                println!("[{}] {}: {}", when, message.display_name, message.content);
            }
        }
        Command::Say { message } => {
            client.send_chat(&message).await?;
        }
        Command::Save { name } => match name {
            Some(name) => client.save_as(&name).await?,
            None => client.save().await?,
        },
    }

    Ok(())
}
