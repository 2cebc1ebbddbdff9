//! CLI entry point for the puzzle solvers.
//!
//! Usage:
//!   puzzle-solver clock <HOURS> <START> <END>
//!   puzzle-solver dice <START> <END> <DIE_FILE>...
//!   puzzle-solver astro <BOARD_FILE>
//!   puzzle-solver hoppers <BOARD_FILE>
//!   puzzle-solver play astro <BOARD_FILE>
//!   puzzle-solver play hoppers <BOARD_FILE>
//!
//! The solve subcommands print the search counters and every step of a
//! shortest solution; "No solution" is a normal outcome, while a malformed
//! puzzle file exits non-zero with a message on stderr.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use puzzle_solver::{
    AstroConfig, AstroModel, ClockConfig, Configuration, Coordinates, DiceConfig, Die, Direction,
    HoppersConfig, HoppersModel, PuzzleError, Solver,
};

#[derive(Parser)]
#[command(name = "puzzle-solver")]
#[command(about = "Shortest-path BFS solver for sliding and jumping grid puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a clock puzzle
    Clock {
        /// Number of hours on the dial
        hours: u32,
        /// Starting hour
        start: u32,
        /// Target hour
        end: u32,
    },
    /// Solve a dice puzzle
    Dice {
        /// Starting roll, one face character per die
        start: String,
        /// Target roll
        end: String,
        /// Die definition files, one per die
        #[arg(required = true)]
        dice: Vec<PathBuf>,
    },
    /// Solve an Astro board
    Astro {
        /// Path to the board JSON file
        file: PathBuf,
    },
    /// Solve a Hoppers board
    Hoppers {
        /// Path to the board JSON file
        file: PathBuf,
    },
    /// Play a board puzzle interactively
    Play {
        #[command(subcommand)]
        puzzle: PlayCommands,
    },
}

#[derive(Subcommand)]
enum PlayCommands {
    /// Play Astro: select a piece, then move it in a direction
    Astro { file: PathBuf },
    /// Play Hoppers: select a frog, then select its landing pad
    Hoppers { file: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clock { hours, start, end } => run_clock(hours, start, end),
        Commands::Dice { start, end, dice } => run_dice(&start, &end, &dice),
        Commands::Astro { file } => run_astro(&file),
        Commands::Hoppers { file } => run_hoppers(&file),
        Commands::Play { puzzle } => match puzzle {
            PlayCommands::Astro { file } => play_astro(&file),
            PlayCommands::Hoppers { file } => play_hoppers(&file),
        },
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        process::exit(1);
    }
}

fn run_clock(hours: u32, start: u32, end: u32) -> Result<(), PuzzleError> {
    println!("Hours: {hours}, Start: {start}, End: {end}");
    let initial = ClockConfig::new(hours, start, end)?;
    print_solution(initial, false);
    Ok(())
}

fn run_dice(start: &str, end: &str, paths: &[PathBuf]) -> Result<(), PuzzleError> {
    let mut dice = Vec::new();
    for (index, path) in paths.iter().enumerate() {
        let die = Die::from_file(path)?;
        println!(
            "Die #{index}: File: {}, Faces: {}",
            die.file_name(),
            die.faces()
        );
        for (face, adjacent) in die.faces_and_adjacent() {
            let list = adjacent
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            println!("\t{face}=[{list}]");
        }
        dice.push(die);
    }
    println!("Start: {start}, End: {end}");
    let initial = DiceConfig::new(Arc::from(dice), start, end)?;
    print_solution(initial, false);
    Ok(())
}

fn run_astro(file: &Path) -> Result<(), PuzzleError> {
    println!("File: {}", file.display());
    let initial = AstroConfig::from_file(file)?;
    println!("{initial}");
    print_solution(initial, true);
    Ok(())
}

fn run_hoppers(file: &Path) -> Result<(), PuzzleError> {
    println!("File: {}", file.display());
    let initial = HoppersConfig::from_file(file)?;
    println!("{initial}");
    print_solution(initial, true);
    Ok(())
}

/// Solves from `initial` and prints the counters and each step. Multi-line
/// configurations (the board games) get their own block per step.
fn print_solution<C: Configuration + Display>(initial: C, multiline: bool) {
    let mut solver = Solver::new();
    let path = solver.solve(initial);
    println!("Total configs: {}", solver.total_configs());
    println!("Unique configs: {}", solver.unique_configs());
    if path.is_empty() {
        println!("No solution");
    } else {
        for (step, config) in path.iter().enumerate() {
            if multiline {
                println!("Step {step}: \n{config}\n");
            } else {
                println!("Step {step}: {config}");
            }
        }
    }
}

fn play_astro(file: &Path) -> Result<(), PuzzleError> {
    let mut model = AstroModel::from_file(file)?;
    print_astro_help();
    println!("{model}");
    for line in prompt_lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = tokens.first() else {
            continue;
        };
        if command.starts_with('q') {
            break;
        }
        let message = match command {
            _ if command.starts_with('h') => model.hint(),
            _ if command.starts_with('l') => match tokens.get(1) {
                Some(path) => model.load(Path::new(path)),
                None => {
                    print_astro_help();
                    continue;
                }
            },
            _ if command.starts_with('r') => model.reset(),
            _ if command.starts_with('s') => match parse_coordinates(&tokens) {
                Some(coord) => model.select(coord),
                None => {
                    print_astro_help();
                    continue;
                }
            },
            _ if command.starts_with('m') => {
                match tokens.get(1).and_then(|word| Direction::parse(word)) {
                    Some(direction) => model.move_selected(direction),
                    None => {
                        print_astro_help();
                        continue;
                    }
                }
            }
            _ => {
                print_astro_help();
                continue;
            }
        };
        println!("{message}");
        println!("{model}");
    }
    Ok(())
}

fn play_hoppers(file: &Path) -> Result<(), PuzzleError> {
    let mut model = HoppersModel::from_file(file)?;
    print_hoppers_help();
    println!("{model}");
    for line in prompt_lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = tokens.first() else {
            continue;
        };
        if command.starts_with('q') {
            break;
        }
        let message = match command {
            _ if command.starts_with('h') => model.hint(),
            _ if command.starts_with('l') => match tokens.get(1) {
                Some(path) => model.load(Path::new(path)),
                None => {
                    print_hoppers_help();
                    continue;
                }
            },
            _ if command.starts_with('r') => model.reset(),
            _ if command.starts_with('s') => match parse_coordinates(&tokens) {
                Some(coord) => model.select(coord),
                None => {
                    print_hoppers_help();
                    continue;
                }
            },
            _ => {
                print_hoppers_help();
                continue;
            }
        };
        println!("{message}");
        println!("{model}");
    }
    Ok(())
}

/// Reads `s(elect) r c` arguments.
fn parse_coordinates(tokens: &[&str]) -> Option<Coordinates> {
    let row = tokens.get(1)?.parse().ok()?;
    let col = tokens.get(2)?.parse().ok()?;
    Some(Coordinates::new(row, col))
}

/// Prompted line iterator over stdin; ends on EOF or a read error.
fn prompt_lines() -> impl Iterator<Item = String> {
    std::iter::from_fn(|| {
        print!("> ");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    })
}

fn print_astro_help() {
    println!("h(int)              -- hint next move");
    println!("l(oad) filename     -- load new puzzle file");
    println!("s(elect) r c        -- select piece at r, c");
    println!("m(ove) n|s|e|w      -- move selected piece");
    println!("q(uit)              -- quit the game");
    println!("r(eset)             -- reset the current game");
}

fn print_hoppers_help() {
    println!("h(int)              -- hint next move");
    println!("l(oad) filename     -- load new puzzle file");
    println!("s(elect) r c        -- select cell at r, c");
    println!("q(uit)              -- quit the game");
    println!("r(eset)             -- reset the current game");
}
