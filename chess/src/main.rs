mod display;
mod game;
mod input;
mod record;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use display::print_board;
use game::{Game, PlayedMove};
use input::HumanPlayer;
use minmax_agents::{Agent, EvalContext, Evaluator, MinimaxAgent, MinimaxConfig};
use minmax_core::{
    describe_move, parse_fen, perft, perft_divide, positions, Color, History, Position,
    DEFAULT_HISTORY_CAPACITY,
};
use record::GameRecord;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minmax-chess")]
#[command(about = "Chess engine built on minimax search with alpha-beta pruning")]
struct Cli {
    /// Log decisions and game events (same as RUST_LOG=info)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game between engines and/or a human
    Play(PlayArgs),
    /// Run one engine decision on a position
    Search(SearchArgs),
    /// Score a position with every evaluator
    Eval {
        /// Position in FEN (defaults to the starting position)
        fen: Option<String>,
    },
    /// Count the leaves of the successor tree
    Perft {
        depth: u8,
        /// Position in FEN (defaults to the starting position)
        fen: Option<String>,
        /// Side to move, overriding the FEN
        #[arg(short, long)]
        side: Option<Side>,
    },
    /// List the registered evaluators
    Evaluators,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Engine,
    Human,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    #[value(name = "w", alias = "white")]
    White,
    #[value(name = "b", alias = "black")]
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Args)]
struct PlayArgs {
    #[arg(long, value_enum, default_value_t = PlayerKind::Engine)]
    white: PlayerKind,
    #[arg(long, value_enum, default_value_t = PlayerKind::Engine)]
    black: PlayerKind,
    /// Plies searched below each root candidate
    #[arg(short, long, default_value_t = 4)]
    depth: u32,
    /// Successors kept per node (unbounded when omitted or 0)
    #[arg(short, long)]
    width: Option<usize>,
    /// Evaluator id used by the White engine
    #[arg(long, default_value_t = 2)]
    white_eval: u8,
    /// Evaluator id used by the Black engine
    #[arg(long, default_value_t = 2)]
    black_eval: u8,
    /// Stop after this many moves
    #[arg(long)]
    max_moves: Option<u32>,
    /// Write every played position to this file
    #[arg(long)]
    record: Option<PathBuf>,
    /// Seed for evaluators with a random component
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Number of played boards the engines refuse to repeat
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history: usize,
    /// Start position in FEN
    #[arg(long)]
    fen: Option<String>,
}

#[derive(Args)]
struct SearchArgs {
    /// Position in FEN (defaults to the starting position)
    fen: Option<String>,
    /// Side to move, overriding the FEN
    #[arg(short, long)]
    side: Option<Side>,
    #[arg(short, long, default_value_t = 4)]
    depth: u32,
    /// Successors kept per node (unbounded when omitted or 0)
    #[arg(short, long)]
    width: Option<usize>,
    /// Evaluator id
    #[arg(short, long, default_value_t = 2)]
    eval: u8,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn evaluator(id: u8) -> Result<Evaluator> {
    Evaluator::from_id(id).ok_or_else(|| {
        anyhow!(
            "unknown evaluator {id}, expected 1..={}",
            Evaluator::ALL.len()
        )
    })
}

fn load_position(fen: Option<&str>, side: Option<Side>) -> Result<(Position, Color)> {
    let fen = fen.unwrap_or(positions::STARTING);
    let (position, fen_side) =
        parse_fen(fen).with_context(|| format!("invalid position '{fen}'"))?;
    Ok((position, side.map(Color::from).unwrap_or(fen_side)))
}

fn player(kind: PlayerKind, name: &str, config: MinimaxConfig, seed: u64) -> Box<dyn Agent> {
    match kind {
        PlayerKind::Engine => Box::new(MinimaxAgent::new(config).with_seed(seed)),
        PlayerKind::Human => Box::new(HumanPlayer::new(
            name,
            BufReader::new(io::stdin()),
            io::stdout(),
        )),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let (position, side) = load_position(args.fen.as_deref(), None)?;
    let config = |eval| -> Result<MinimaxConfig> {
        Ok(MinimaxConfig {
            depth: args.depth,
            width: args.width,
            evaluator: evaluator(eval)?,
            ..MinimaxConfig::default()
        })
    };
    let white = player(args.white, "White", config(args.white_eval)?, args.seed);
    let black = player(args.black, "Black", config(args.black_eval)?, args.seed);

    println!("{} vs {}", white.name(), black.name());
    print_board(&position)?;

    let mut game = Game::new(position, side, white, black, args.history)
        .with_max_moves(args.max_moves)
        .with_observer(Box::new(|played: &PlayedMove<'_>| {
            if let Some(description) = played.description {
                println!("{}. {description}", played.number);
            }
            if let Err(error) = print_board(played.position) {
                tracing::warn!(%error, "failed to draw board");
            }
        }));
    if let Some(path) = &args.record {
        game = game.with_record(GameRecord::create(path)?);
    }

    let end = game.run()?;
    println!("{end} after {} moves", game.move_number());
    Ok(())
}

fn search(args: SearchArgs) -> Result<()> {
    let (position, side) = load_position(args.fen.as_deref(), args.side)?;
    let agent = MinimaxAgent::new(MinimaxConfig {
        depth: args.depth,
        width: args.width,
        evaluator: evaluator(args.eval)?,
        ..MinimaxConfig::default()
    })
    .with_seed(args.seed);

    print_board(&position)?;
    println!("Position: {}", position.to_fen(side));
    println!("Searching {} to depth {}...", agent.name(), args.depth);

    let start = Instant::now();
    let decision = agent.decide(&position, side, &History::default(), 0);
    let elapsed = start.elapsed();

    match decision {
        Some(decision) => {
            let description = describe_move(&position, &decision.position)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "?".to_string());
            println!("\nBest move: {description}");
            println!("Score: {}", decision.score);
            println!("Candidates: {}", decision.candidates);
            println!("Nodes: {}", decision.stats.nodes);
            println!("Alpha cutoffs: {}", decision.stats.alpha_cutoffs);
            println!("Beta cutoffs: {}", decision.stats.beta_cutoffs);
            println!("Time: {:.2}s", elapsed.as_secs_f64());
            print_board(&decision.position)?;
        }
        None => println!("{side} has no legal move"),
    }
    Ok(())
}

fn eval(fen: Option<&str>) -> Result<()> {
    let (position, _) = load_position(fen, None)?;
    print_board(&position)?;

    let ctx = EvalContext::default();
    for evaluator in Evaluator::ALL {
        println!("{:<16} {:>4}", evaluator.to_string(), evaluator.evaluate(&position, &ctx));
    }
    println!("(+ = White, - = Black)");
    Ok(())
}

fn run_perft(depth: u8, fen: Option<&str>, side: Option<Side>) -> Result<()> {
    let (position, side) = load_position(fen, side)?;
    let history = History::default();

    println!("Running perft({depth})...");
    println!("Position: {}", position.to_fen(side));

    let start = Instant::now();
    let nodes = if (1..=3).contains(&depth) {
        let results = perft_divide(&position, side, depth, &history);
        for (next, count) in &results {
            let description = describe_move(&position, next)
                .map(|d| d.to_string())
                .unwrap_or_default();
            println!("{description}: {count}");
        }
        results.iter().map(|(_, count)| count).sum()
    } else {
        perft(&position, side, depth, &history)
    };
    let elapsed = start.elapsed();

    println!("\nNodes: {nodes}");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

fn list_evaluators() {
    for evaluator in Evaluator::ALL {
        println!(
            "{} {:<12} band ±{:<3} {}",
            evaluator.id(),
            evaluator.name(),
            evaluator.band(),
            evaluator.description()
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Search(args)) => search(args),
        Some(Commands::Eval { fen }) => eval(fen.as_deref()),
        Some(Commands::Perft { depth, fen, side }) => run_perft(depth, fen.as_deref(), side),
        Some(Commands::Evaluators) => {
            list_evaluators();
            Ok(())
        }
        None => {
            println!("minmax-chess: run with --help for commands");
            println!("\nExample positions:");
            println!("  Starting:   {}", positions::STARTING);
            println!("  Castling:   {}", positions::CASTLING);
            println!("  Bare kings: {}", positions::BARE_KINGS);
            Ok(())
        }
    }
}
