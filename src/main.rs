use eight_puzzle::board::{Board, CELLS};
use eight_puzzle::search;

use tracing_subscriber::prelude::*;

// Fixed demonstration instance, solvable in five moves.
const START: [u8; CELLS] = [2, 8, 3, 1, 6, 4, 7, 0, 5];
const GOAL: [u8; CELLS] = [1, 2, 3, 8, 0, 4, 7, 6, 5];

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let (start, goal) = match (Board::new(START), Board::new(GOAL)) {
        (Ok(start), Ok(goal)) => (start, goal),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("invalid demonstration board: {}", e);
            std::process::exit(1);
        }
    };

    println!("Start:\n{}", start);
    println!("Goal:\n{}", goal);

    match search::solve(&start, &goal) {
        Some(moves) => {
            println!("Found optimal solution with {} moves", moves.len());

            let mut replay = start;
            for movement in moves {
                replay.apply_move(movement);
                println!("{}\n{}", movement, replay)
            }
        }
        None => println!("No solution found"),
    }
}
