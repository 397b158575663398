// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    env, fmt,
    io::{self, BufRead, Write},
};

use clap::{App, Arg, ArgMatches};
use log::{debug, LevelFilter};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use regex::Regex;

use gridbattle::{
    board::CellView,
    combatant::ShotOutcome,
    game::{Expecting, TurnKind},
    Automated, BoardId, Command, Commander, Coordinate, Event, GridAddress, Human, Match,
    Rotation, ShipType, Side,
};

fn main() -> io::Result<()> {
    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Command line battleship against the computer or another person.")
        .arg(
            Arg::with_name("opponent")
                .short("o")
                .long("opponent")
                .value_name("OPPONENT")
                .help("who to play against")
                .takes_value(true)
                .possible_values(&["computer", "bot", "human", "friend"])
                .case_insensitive(true)
                .default_value("computer"),
        )
        .arg(
            Arg::with_name("seat")
                .short("s")
                .long("seat")
                .value_name("SEAT")
                .help("pre-specify whether you go first against the computer")
                .takes_value(true)
                .possible_values(&["first", "second", "random", "rand"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("fleet_size")
                .short("n")
                .long("fleet-size")
                .value_name("SHIPS")
                .help("pre-specify how many ships you field, 1 to 5")
                .takes_value(true)
                .validator(|value| match value.parse::<usize>() {
                    Ok(1..=5) => Ok(()),
                    _ => Err(format!("expected a number from 1 to 5, got {}", value)),
                }),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed the computer player for a reproducible game")
                .takes_value(true)
                .validator(|value| {
                    value
                        .parse::<u64>()
                        .map(|_| ())
                        .map_err(|err| err.to_string())
                }),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("log game engine decisions"),
        )
        .get_matches();

    init_logging(matches.is_present("verbose"));

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());

    let fleet_size = matches
        .value_of("fleet_size")
        .and_then(|value| value.parse().ok());
    let human = || -> Box<dyn Commander> {
        match fleet_size {
            Some(size) => Box::new(Human::with_fleet_size(size)),
            None => Box::new(Human::new()),
        }
    };

    let opponent = matches
        .value_of("opponent")
        .unwrap_or("computer")
        .to_ascii_lowercase();
    let mut game = match opponent.as_str() {
        "human" | "friend" => Match::new(human(), human()),
        _ => {
            let seat = choose_seat(&matches, &mut input)?;
            let rng = match matches.value_of("seed").and_then(|seed| seed.parse().ok()) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let computer = Box::new(Automated::new(rng));
            match seat {
                Side::P1 => Match::new(human(), computer),
                Side::P2 => Match::new(computer, human()),
            }
        }
    };

    let events = game.start();
    report(&game, &events);
    while let Some(side) = game.active() {
        let commands = match game.expecting(side) {
            Expecting::Nothing => break,
            Expecting::FleetSize => choose_fleet_size(side, &mut input)?,
            Expecting::Placement(ship) => choose_moves(&game, side, ship, &mut input)?,
            Expecting::Target => choose_target(&game, side, &mut input)?,
            Expecting::EndTurn => {
                input.read_input(&format!("{}, press enter to end your turn.", side), |_| {
                    Some(vec![Command::EndTurn])
                })?
            }
        };
        for command in commands {
            match game.submit(side, command) {
                Ok(events) => report(&game, &events),
                Err(err) => {
                    println!("{}", err);
                    break;
                }
            }
        }
    }

    if let Some(winner) = game.winner() {
        for &side in &[Side::P1, Side::P2] {
            println!();
            println!("{}'s fleet:", side);
            show_grid(&game, BoardId::placement(side));
        }
        println!();
        println!("{} wins!", winner);
    }
    Ok(())
}

/// Install the logger. `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: bool) {
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(LevelFilter::Warn);
    if verbose {
        logger.filter_module("gridbattle", LevelFilter::Debug);
    }
    if let Ok(filters) = env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();
}

/// Choose which [`Side`] the human plays based on either args or cli input.
fn choose_seat<B: BufRead>(matches: &ArgMatches, input: &mut InputReader<B>) -> io::Result<Side> {
    Ok(if let Some(clichoice) = matches.value_of("seat") {
        match clichoice.to_ascii_lowercase().as_str() {
            "first" => Side::P1,
            "second" => Side::P2,
            _ => rand::random(),
        }
    } else {
        input.read_input_lower("Do you want to go first? (Y/n)", |input| match input {
            "yes" | "y" | "first" | "1" | "1st" | "" => Some(Side::P1),
            "no" | "n" | "second" | "2" | "2nd" => Some(Side::P2),
            _ => {
                println!("Invalid selection.");
                None
            }
        })?
    })
}

fn choose_fleet_size<B: BufRead>(side: Side, input: &mut InputReader<B>) -> io::Result<Vec<Command>> {
    println!();
    input.read_input(&format!("{}, how many ships? (1-5)", side), |input| {
        match input.parse() {
            Ok(size) => Some(vec![Command::SetFleetSize(size)]),
            Err(_) => {
                println!("Enter a number from 1 to 5.");
                None
            }
        }
    })
}

/// Read a line of placement moves for the pending ship.
fn choose_moves<B: BufRead>(
    game: &Match,
    side: Side,
    ship: ShipType,
    input: &mut InputReader<B>,
) -> io::Result<Vec<Command>> {
    /// One or more single-letter moves, such as `ddds`.
    static MOVES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[wasdqe]+$").unwrap());

    println!();
    show_grid(game, BoardId::placement(side));
    println!();
    input.read_input_lower(
        &format!("{}, place your {} (length {}):", side, ship, ship.len()),
        |input| match input {
            "" | "confirm" | "c" | "done" => Some(vec![Command::Confirm]),
            "?" | "help" | "h" => {
                println!(
                    "Placement Commands:
    w a s d     move the ship up, left, down or right. Several may be given at once.
    q           rotate the ship clockwise around its first cell.
    e           rotate the ship counter-clockwise around its first cell.
    <enter>     confirm the placement. Overlapping ships cannot be confirmed.",
                );
                None
            }
            moves if MOVES.is_match(moves) => Some(
                moves
                    .chars()
                    .map(|key| match key {
                        'w' => Command::Translate { dx: 0, dy: -1 },
                        'a' => Command::Translate { dx: -1, dy: 0 },
                        's' => Command::Translate { dx: 0, dy: 1 },
                        'd' => Command::Translate { dx: 1, dy: 0 },
                        'q' => Command::Rotate(Rotation::Clockwise),
                        _ => Command::Rotate(Rotation::CounterClockwise),
                    })
                    .collect(),
            ),
            other => {
                println!("Invalid placement command \"{}\". Use '?' for help", other);
                None
            }
        },
    )
}

/// Read the cell to fire at.
fn choose_target<B: BufRead>(
    game: &Match,
    side: Side,
    input: &mut InputReader<B>,
) -> io::Result<Vec<Command>> {
    /// A row letter and column digit, optionally preceded by `fire`.
    static CELL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?x)(?:(?:fire|f)\s+(?:at\s+)?)?(?P<row>[a-j])\s*(?P<col>[0-9])$").unwrap()
    });

    let enemy = BoardId::placement(side.opponent());
    println!();
    println!("Your shots:");
    show_grid(game, BoardId::targeting(side));
    println!("Your fleet:");
    show_grid(game, BoardId::placement(side));
    println!();
    input.read_input_lower(&format!("{}, fire at:", side), |input| {
        if let Some(captures) = CELL.captures(input) {
            let row = (captures["row"].as_bytes()[0] - b'a') as usize;
            let col = (captures["col"].as_bytes()[0] - b'0') as usize;
            Some(vec![Command::FireAt(enemy.at(Coordinate::new(row, col)))])
        } else if input.len() == GridAddress::TOKEN_LEN {
            match input.parse::<GridAddress>() {
                Ok(address) => Some(vec![Command::FireAt(address)]),
                Err(err) => {
                    println!("{}", err);
                    None
                }
            }
        } else {
            println!("Invalid target \"{}\", expected a cell such as b4", input);
            None
        }
    })
}

/// Print the notices the engine produced.
fn report(game: &Match, events: &[Event]) {
    for event in events {
        debug!("{:?}", event);
        match *event {
            Event::TurnGranted {
                side,
                kind: TurnKind::Setup,
                ..
            } => {
                println!();
                println!("== {}: setup ==", side);
            }
            Event::TurnGranted { side, turn, .. } => {
                println!();
                println!("== {}: turn {} ==", side, turn);
            }
            Event::FleetSizeRequested { .. } | Event::TurnEnded { .. } => {}
            Event::FleetSizeChosen { side, size } => println!("{} fields {} ships.", side, size),
            Event::PlacementStarted { side, ship } => {
                if !game.combatant(side).automated() {
                    println!("Placing the {}.", ship);
                }
            }
            Event::MoveRejected { reason, .. } => println!("Cannot do that: {}.", reason),
            Event::PlacementConfirmed { side, ship } => println!("{} placed the {}.", side, ship),
            Event::FireResolved {
                attacker,
                address,
                outcome,
            } => match outcome {
                ShotOutcome::Miss => println!("{} fires at {}: miss.", attacker, address.coord),
                ShotOutcome::Hit(ship) => {
                    println!("{} fires at {}: hit the {}!", attacker, address.coord, ship)
                }
                ShotOutcome::Sunk(ship) => {
                    println!("{} fires at {}: sunk the {}!", attacker, address.coord, ship)
                }
            },
            Event::GameOver { winner } => {
                println!();
                println!("Game over, {} destroyed the enemy fleet.", winner);
            }
        }
    }
}

/// Display helper for a single cell.
struct CellGlyph(CellView);

impl fmt::Display for CellGlyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            CellView::Empty => f.pad("~~"),
            CellView::Ship => f.pad("[]"),
            CellView::Overlap => f.pad("!!"),
            CellView::Locked(ship) => fmt::Display::fmt(&ShipAbbreviation(ship), f),
            CellView::Hit => f.pad("X"),
            CellView::Miss => f.pad("o"),
        }
    }
}

/// Print one board of the match.
fn show_grid(game: &Match, board: BoardId) {
    show_board(
        Coordinate::rows().map(|row| row.map(|coord| CellGlyph(game.cell(board.at(coord))))),
    )
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items.
fn show_board(rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("   ");
    for i in 0..10 {
        print!("{:^4}", i);
    }
    println!();
    for (i, row) in rows.enumerate() {
        print!("{:>2} ", (b'a' + i as u8) as char);
        for cell in row {
            print!("{:^4}", cell);
        }
        println!();
    }
}

/// Display helper that prints the ship's type abbreviation
struct ShipAbbreviation(ShipType);

impl ShipAbbreviation {
    fn abbrev(&self) -> &'static str {
        match self.0 {
            ShipType::PatrolBoat => "pb",
            ShipType::Cruiser => "cl",
            ShipType::Destroyer => "dd",
            ShipType::Battleship => "bb",
            ShipType::Carrier => "cv",
        }
    }
}

impl fmt::Display for ShipAbbreviation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.abbrev())
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
