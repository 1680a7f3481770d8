mod config;
mod offline;
mod simulation;
mod ui;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tictactoe_common::config::Validate;
use tictactoe_common::tictactoe::{
    Board, BotTuning, Difficulty, GameMode, GameSession, HardSearch, Mark, ThinkDelaySettings,
};
use tictactoe_common::{SessionRng, log, logger};

use config::{Config, config_file};
use offline::run_tictactoe_game;
use simulation::{simulate_games, suggest_move};

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Tic-tac-toe against a friend or the computer")]
struct Cli {
    #[arg(long, global = true)]
    use_log_prefix: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal (the default).
    Play(PlayArgs),
    /// Print the cell a tier would choose for a position.
    Suggest {
        /// Nine cells row by row, e.g. "xx.o.....".
        #[arg(long)]
        board: Board,
        #[arg(long)]
        mark: Mark,
        #[arg(long, default_value = "hard")]
        difficulty: Difficulty,
        #[arg(long)]
        minimax: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let two computer tiers play each other.
    Simulate {
        #[arg(long, default_value = "hard")]
        x: Difficulty,
        #[arg(long, default_value = "random")]
        o: Difficulty,
        #[arg(long, default_value_t = 1000)]
        games: u32,
        #[arg(long)]
        minimax: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Default)]
struct PlayArgs {
    #[arg(long)]
    symbol: Option<Mark>,
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long)]
    mode: Option<GameMode>,
    #[arg(long)]
    seed: Option<u64>,
    /// Skip the computer's thinking pause.
    #[arg(long)]
    no_delay: bool,
    /// Write the chosen symbol, difficulty and mode back to the config file.
    #[arg(long)]
    save: bool,
}

fn session_rng(seed: Option<u64>) -> SessionRng {
    seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random)
}

fn tuning_with(config: &Config, minimax: bool) -> BotTuning {
    let mut tuning = config.game.bot;
    if minimax {
        tuning.hard_search = HardSearch::Minimax;
    }
    tuning
}

async fn play(mut config: Config, args: PlayArgs) -> Result<(), String> {
    if let Some(symbol) = args.symbol {
        config.game.human_mark = symbol;
    }
    if let Some(difficulty) = args.difficulty {
        config.game.difficulty = difficulty;
    }
    if let Some(mode) = args.mode {
        config.game.mode = mode;
    }
    config.validate()?;

    if args.save {
        let file = config_file();
        file.save(&config)?;
        log!("Saved settings to {}", file.path().display());
    }

    let mut settings = config.game.clone();
    if args.no_delay {
        settings.think_delay = ThinkDelaySettings::none();
    }

    let mut session = GameSession::new(settings, session_rng(args.seed));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();
    run_tictactoe_game(&mut session, &mut lines, &mut stdout).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config_file().load()?;

    let prefix = if cli.use_log_prefix || config.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    match cli.command.unwrap_or(Command::Play(PlayArgs::default())) {
        Command::Play(args) => play(config, args).await?,
        Command::Suggest {
            board,
            mark,
            difficulty,
            minimax,
            seed,
        } => {
            let mut rng = session_rng(seed);
            let index = suggest_move(&board, mark, difficulty, &tuning_with(&config, minimax), &mut rng)?;
            println!("{} ({} plays key {})", index, mark, index + 1);
        }
        Command::Simulate {
            x,
            o,
            games,
            minimax,
            seed,
        } => {
            let mut rng = session_rng(seed);
            log!("Simulating {} games: X {} vs O {} (seed {})", games, x, o, rng.seed());
            let tally = simulate_games(x, o, games, &tuning_with(&config, minimax), &mut rng);
            println!(
                "X ({}) wins: {}, O ({}) wins: {}, ties: {}",
                x, tally.player_wins, o, tally.opponent_wins, tally.ties
            );
        }
    }

    Ok(())
}
