use clap::{Parser, Subcommand};
use oak_bot::{
    commands::{ranked::TopView, Invocation, Oak},
    config::Settings,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "oak")]
#[clap(about = "League bot commands from the terminal", long_about = None)]
struct Cli {
    /// Channel the command is sent from
    #[clap(long, global = true, default_value = "general")]
    channel: String,

    /// Run with the admin role
    #[clap(long, global = true)]
    admin: bool,

    /// Chat user id of the caller
    #[clap(long, global = true, default_value = "0")]
    author: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the bot answers
    Ping,

    /// Show a Pokémon's dex entry
    Dex { pokemon: String },

    /// Describe an item
    Item { name: String },

    /// Describe an ability
    Ability { name: String },

    /// Dex entry of a random Pokémon
    RandomPokemon,

    /// Save a quote
    Quote { words: Vec<String> },

    /// Show a random saved quote
    RandomQuote,

    /// Top of the ranked leaderboard
    Top {
        /// "list" or "table"
        view: Option<String>,
    },

    /// Ranked card of one trainer
    Trainer { nickname: Vec<String> },

    /// Ranked trainers in one elo
    Elo { tier: Vec<String> },

    /// Audit the battle submission form (admin channel only)
    Validate,

    /// Contact card of a registered player, or a random sample of players
    TrainerDb { name: Vec<String> },

    /// List leagues, or show one by id
    Leagues { id: Option<String> },

    /// Register a trainer by mention
    NewTrainer { discord_id: Option<String> },

    /// Register a league
    NewLeague { reference: Vec<String> },

    /// Register a leader: <mention> <pokemon type> <role>
    NewLeader { args: Vec<String> },

    /// Enroll a trainer or leader in a league
    LeagueRegister {
        /// Register as a competing trainer
        #[clap(short = 't', long, conflicts_with = "leader")]
        trainer: bool,

        /// Register as a defending leader
        #[clap(short = 'l', long)]
        leader: bool,

        discord_id: String,
        league: String,
    },
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Using default settings: {}", e);
            Settings::default()
        }
    };

    init_tracing(&settings.app.log_level);

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    let mut invocation = Invocation::new(cli.author, cli.channel);
    if cli.admin {
        invocation = invocation.with_role(settings.ranked.admin_role.clone());
    }

    info!("{} v{} ready", settings.app.name, settings.app.version);
    let oak = Oak::new(settings)?;

    let reply = match cli.command {
        Commands::Ping => oak.ping(),
        Commands::Dex { pokemon } => oak.dex(&pokemon).await?,
        Commands::Item { name } => oak.item(&name).await?,
        Commands::Ability { name } => oak.ability(&name).await?,
        Commands::RandomPokemon => oak.random_pokemon().await?,
        Commands::Quote { words } => oak.quote(&words).await?,
        Commands::RandomQuote => oak.random_quote().await?,
        Commands::Top { view } => oak.top_ranked(TopView::from_arg(view.as_deref())).await?,
        Commands::Trainer { nickname } => oak.ranked_trainer(&nickname.join(" ")).await?,
        Commands::Elo { tier } => oak.ranked_elo(&tier.join(" ")).await?,
        Commands::Validate => oak.ranked_validate(&invocation).await?,
        Commands::TrainerDb { name } => {
            let name = name.join(" ");
            oak.trainer_db(Some(name.as_str())).await?
        }
        Commands::Leagues { id } => oak.view_leagues(id.as_deref()).await?,
        Commands::NewTrainer { discord_id } => oak.new_trainer(&invocation, discord_id.as_deref()).await?,
        Commands::NewLeague { reference } => oak.new_league(&invocation, &reference).await?,
        Commands::NewLeader { args } => oak.new_leader(&invocation, &args).await?,
        Commands::LeagueRegister {
            trainer,
            leader,
            discord_id,
            league,
        } => {
            let flag = match (trainer, leader) {
                (true, _) => "-t",
                (_, true) => "-l",
                _ => "",
            };
            let args = vec![flag.to_string(), discord_id, league];
            oak.league_register(&invocation, &args).await?
        }
    };

    print!("{}", reply);
    Ok(())
}
