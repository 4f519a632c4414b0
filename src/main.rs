use std::process::ExitCode;
use std::time::SystemTime;

use bingle::game::scoring_rules::par_for;
use bingle::game::{FileStore, GameEngine, Settings, SystemClock};
use bingle::helpers::Capitalize;
use bingle::model::{
    default_catalog, read_catalog_from_json, GameEngineCommand, GameEngineEvent, GameId,
};
use log::{error, info};

const USAGE: &str = "usage: bingle [<game-id> <score|fail|reset|reroll>]";

fn init_logging() {
    env_logger::init();
}

fn parse_command(args: &[String]) -> Option<GameEngineCommand> {
    let [game_id, action] = args else {
        return None;
    };
    let game_id = game_id.parse::<GameId>().ok()?;
    let command = match action.as_str() {
        "fail" => GameEngineCommand::MarkFailed(game_id),
        "reset" => GameEngineCommand::ResetCell(game_id),
        "reroll" => GameEngineCommand::Reroll(game_id),
        score => GameEngineCommand::SetScore(game_id, score.to_string()),
    };
    Some(command)
}

fn report(events: &[GameEngineEvent]) {
    for event in events {
        match event {
            GameEngineEvent::CellUpdated {
                game_id, status, ..
            } => println!("#{} is now {}", game_id, status.label()),
            GameEngineEvent::CellRerolled(old_id, new_id) => {
                println!("Replaced #{} with #{}", old_id, new_id)
            }
            GameEngineEvent::LinesCompleted(lines) => {
                for line in lines {
                    println!("{} complete!", line.label());
                }
            }
            GameEngineEvent::StreakChanged(streak, _) => {
                println!("Streak: {} day(s)", streak.current_streak)
            }
            _ => (),
        }
    }
}

fn print_board(engine: &GameEngine) {
    let board = engine.board();
    println!("Bingle {} ({}x{})", board.seed, board.grid_size, board.grid_size);
    for (index, game) in board.grid.iter().enumerate() {
        if index % board.grid_size == 0 {
            println!();
            println!("Row {}", index / board.grid_size + 1);
        }
        let difficulty = board.difficulty(game.id);
        let spec = game.scoring_spec();
        let score = match board.score(game.id) {
            Some(score) => format!(" ({})", score),
            None => format!(" (enter {})", spec.kind.input_placeholder().to_lowercase()),
        };
        println!(
            "  {:<24} [{}] {}: {}{}",
            game.to_string(),
            difficulty.label(),
            spec.describe(par_for(&spec, difficulty)),
            board.status(game.id).label(),
            score
        );
        if !game.category.is_empty() {
            println!("  {:<24} {} {}", "", game.category.capitalize(), game.url);
        }
    }

    println!();
    println!("{}", engine.summary());

    let stats = engine.stats();
    println!(
        "Streak: {} (best {})  Games: {}  Average: {:.1}  Best: {}",
        stats.streak().current_streak,
        stats.streak().best_streak,
        stats.history().total_games_played,
        stats.history().average(),
        stats.history().highest_score
    );
    println!(
        "Rerolls left: {}  Time: {}",
        engine.rerolls_remaining(),
        engine.timer_state().format_elapsed(SystemTime::now())
    );
}

fn run() -> bingle::Result<()> {
    let data_dir = Settings::data_dir_from_env().unwrap_or_else(FileStore::default_data_dir);
    info!("Using data directory {}", data_dir.display());
    let store = FileStore::new(data_dir);
    let settings = Settings::load(&store).with_env_overrides()?;
    let catalog = match Settings::catalog_path_from_env() {
        Some(path) => read_catalog_from_json(path)?,
        None => default_catalog(),
    };

    let mut engine = GameEngine::new(catalog, settings, Box::new(store), Box::new(SystemClock))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        match parse_command(&args) {
            Some(command) => report(&engine.handle_command(command)?),
            None => eprintln!("{}", USAGE),
        }
    }

    print_board(&engine);
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("bingle: {}", e);
            ExitCode::FAILURE
        }
    }
}
