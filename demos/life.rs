use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use array_hash::life::ACORN;
use array_hash::life::Board;
use array_hash::life::Cell;
use array_hash::life::R_PENTOMINO;
use array_hash::rle;
use clap::Parser;
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Pattern {
    RPentomino,
    Acorn,
}

#[derive(Parser, Debug)]
#[command(about = "Runs Conway's Game of Life and reports generations per second")]
struct Args {
    /// Generations per timed run.
    #[arg(short, long, default_value_t = 1000)]
    generations: u64,

    /// Number of timed runs. Each run continues from the previous board.
    #[arg(short, long, default_value_t = 5)]
    runs: usize,

    /// Built-in seed pattern.
    #[arg(short, long, value_enum, default_value_t = Pattern::RPentomino)]
    pattern: Pattern,

    /// Seed from an RLE file instead of a built-in pattern.
    #[arg(long)]
    rle: Option<PathBuf>,

    /// Draw every generation at human speed.
    #[arg(long)]
    show_work: bool,
}

const HUMAN_SPEED: Duration = Duration::from_millis(1000 / 30);

fn seed(args: &Args) -> Result<Vec<Cell>, Box<dyn Error>> {
    if let Some(path) = &args.rle {
        let text = std::fs::read_to_string(path)?;
        return Ok(rle::decode(&text)?);
    }

    Ok(match args.pattern {
        Pattern::RPentomino => R_PENTOMINO.to_vec(),
        Pattern::Acorn => ACORN.to_vec(),
    })
}

fn show(board: &Board) {
    // Clear the screen and home the cursor.
    print!("\x1b[2J\x1b[;H");
    print!("{board}");
    thread::sleep(HUMAN_SPEED);
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut board = Board::new(seed(&args)?)?;

    for _ in 0..args.runs {
        let start = Instant::now();
        for _ in 0..args.generations {
            board = board.step()?;
            if args.show_work {
                show(&board);
            }
        }

        let elapsed = start.elapsed().as_secs_f64();
        println!(
            "{:.2} generations per second",
            args.generations as f64 / elapsed
        );
    }

    println!(
        "generation {}: {} live cells",
        board.generation(),
        board.population()
    );
    Ok(())
}
