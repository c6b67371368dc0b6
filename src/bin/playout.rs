use chess_core::game::GameState;
use chess_core::moves::parse_notation;
use chess_core::piece::PieceType;
use chess_core::view::BoardView;
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play random pseudo-legal moves from the starting position.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of plies to play
    #[arg(long, default_value_t = 60)]
    plies: usize,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Moves to play before the random ones, in coordinate notation
    /// (e.g. `--opening e2e4,e7e5`)
    #[arg(long, value_delimiter = ',')]
    opening: Vec<String>,

    /// Print the final position as JSON instead of piece codes
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = GameState::new();
    let mut ply = 0;

    for text in &args.opening {
        let (from, to) =
            parse_notation(text).ok_or_else(|| format!("bad move notation: {text:?}"))?;
        if game.pending_promotion().is_some() {
            game.promote(PieceType::Queen)?;
        }
        let mv = game.try_move(from, to)?;
        info!(mv = %mv.notation(), "opening move");
        ply += 1;
    }

    while ply < args.plies {
        if game.pending_promotion().is_some() {
            game.promote(PieceType::Queen)?;
        }
        let moves = game.get_valid_moves();
        let Some(mv) = moves.choose(&mut rng) else {
            info!(ply, "no moves left");
            break;
        };
        game.apply(mv)?;
        ply += 1;
    }
    if game.pending_promotion().is_some() {
        game.promote(PieceType::Queen)?;
    }

    info!(plies = ply, side = ?game.side_to_move(), "playout finished");
    if args.json {
        println!("{}", BoardView::from_game(&game).to_json()?);
    } else {
        print!("{}", game.board());
    }
    Ok(())
}
