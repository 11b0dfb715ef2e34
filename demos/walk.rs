//! Walks an agent across a small level and prints the route.
//!
//! Run: RUST_LOG=debug cargo run --bin walk [seed]

use std::error::Error;
use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use gridnav_agent::{Agent, Locomotion, Motion, WalkOutcome};
use gridnav_core::{Dump, Grid, Layout};
use gridnav_paths::PathFinder;
use rand::SeedableRng;
use rand::rngs::StdRng;

const LEVEL: &str = "
w w w w w w w w w w w w
w s . . . w . . . . . w
w . w w . w . w w w . w
w . w . . . . . . w . w
w . w . w w w w . w . w
w . . . w . . . . w . w
w w w . w . w w w w . w
w . . . . . w . . . . w
w . w w w . . . w . g w
w w w w w w w w w w w w
";

const SPEED: f32 = 25.0;
const TICK: f32 = 0.1;
const WANDERS: usize = 3;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let layout = Layout::with_chars(LEVEL, ".wsg")?;
    let mut grid = layout.to_grid(|ch| ch == 'w')?;
    let start = layout.find('s').ok_or("level has no start marker")?;
    let goal = layout.find('g').ok_or("level has no goal marker")?;
    let start_id = grid.node_at(start).ok_or("start marker off the grid")?;

    let mut finder = PathFinder::new();
    let route = finder.try_find_path(&grid, start, goal)?;
    println!(
        "{start} -> {goal}: {} cells, cost {}",
        route.len(),
        route.cost()
    );
    print_dump(&grid.dump().with_path(route.nodes()))?;

    let mut agent = Agent::new("walker", start_id);
    let outcome = agent.walk_to(&grid, &mut finder, goal);
    log::info!("walk_to {goal}: {outcome:?}");
    let ticks = follow(&mut agent, &mut grid)?;
    println!("arrived at {goal} after {ticks} ticks");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..WANDERS {
        let from = grid.coord(agent.position()).unwrap_or(goal);
        match agent.wander(&grid, &mut finder, &mut rng, 16) {
            WalkOutcome::Queued(n) => {
                let trail: Vec<_> = std::iter::once(agent.position())
                    .chain(agent.pending())
                    .collect();
                println!("wander from {from}: {n} steps");
                print_dump(&grid.dump().with_path(&trail))?;
                follow(&mut agent, &mut grid)?;
            }
            other => println!("wander from {from}: {other:?}"),
        }
    }
    Ok(())
}

/// Run locomotion until the agent's queue drains. Returns the tick count.
fn follow(agent: &mut Agent, grid: &mut Grid) -> Result<usize, Box<dyn Error>> {
    let mut loco = Locomotion::for_agent(agent, grid, SPEED);
    let mut ticks = 0;
    loop {
        ticks += 1;
        match loco.update(TICK, agent, grid) {
            Motion::Moving => log::trace!("tick {ticks}: {}", loco.position()),
            Motion::Arrived => return Ok(ticks),
            Motion::Blocked => return Err("path blocked before arrival".into()),
            Motion::Idle => return Err("agent has nowhere to go".into()),
        }
    }
}

fn print_dump(dump: &Dump<'_>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut row = 0;
    for (c, ch) in dump.cells() {
        if c.row != row {
            queue!(out, Print('\n'))?;
            row = c.row;
        } else if c.col > 0 {
            queue!(out, Print(' '))?;
        }
        queue!(out, SetForegroundColor(color_of(ch)), Print(ch), ResetColor)?;
    }
    queue!(out, Print("\n\n"))?;
    out.flush()
}

fn color_of(ch: char) -> Color {
    match ch {
        'B' => Color::DarkGrey,
        'S' => Color::Green,
        'G' => Color::Red,
        '0'..='9' => Color::Yellow,
        _ => Color::Reset,
    }
}
