use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{Config, LevelFilter, WriteLogger};
use snake_arcade::audio::{play_events, TerminalBell};
use snake_arcade::core::constants::{FRAME_POLL_MS, LOG_FILE};
use snake_arcade::input::{handle_key, InputResult, Overlay};
use snake_arcade::leaderboard::Leaderboard;
use snake_arcade::session::GameSession;
use snake_arcade::ui;
use snake_arcade::ui::leaderboard_scene::{leaderboard_rows, HEADER};
use snake_arcade::utils::build_info;
use snake_arcade::utils::persistence::{data_dir, JsonStore, MemoryStore, Store};
use std::fs::{self, File};
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Snake Arcade - terminal snake with power-up food\n");
                println!("Usage: snake-arcade [command]\n");
                println!("Commands:");
                println!("  scores        Print the leaderboard");
                println!("  reset-scores  Clear the leaderboard");
                println!("  --version     Show version information");
                println!("  --help        Show this help message\n");
                println!("Data is kept in $SNAKE_ARCADE_HOME or ~/.snake-arcade/");
                std::process::exit(0);
            }
            "scores" => {
                print_scores(&open_store()?);
                std::process::exit(0);
            }
            "reset-scores" => {
                let mut store = open_store()?;
                Leaderboard::load(&store).clear(&mut store);
                println!("Leaderboard cleared.");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'snake-arcade --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_logging();
    info!("starting {}", build_info::version_line());

    // Play on without persistence rather than refuse to start
    let store: Box<dyn Store> = match JsonStore::open_default() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("data directory unavailable, scores will not be kept: {err}");
            Box::new(MemoryStore::new())
        }
    };
    let mut session = GameSession::new(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("exiting");

    result
}

fn run<S: Store>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut GameSession<S>,
) -> io::Result<()> {
    let clock = Instant::now();
    let elapsed_ms = || clock.elapsed().as_millis() as u64;
    let mut overlay = Overlay::None;
    let mut bell = TerminalBell::stdout();

    loop {
        let events = session.advance(elapsed_ms());
        play_events(&mut bell, &events);

        terminal.draw(|frame| ui::draw(frame, session, overlay))?;

        // Wake for the next tick or expiry, but keep redrawing at frame rate
        let now = elapsed_ms();
        let wait_ms = session
            .next_wakeup_ms()
            .map_or(FRAME_POLL_MS, |at| at.saturating_sub(now).min(FRAME_POLL_MS));

        if event::poll(Duration::from_millis(wait_ms))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let now = elapsed_ms();
                let events = session.advance(now);
                play_events(&mut bell, &events);

                match handle_key(key, session, &mut overlay, now) {
                    InputResult::Quit => return Ok(()),
                    InputResult::Continue(events) => play_events(&mut bell, &events),
                }
            }
        }
    }
}

fn open_store() -> io::Result<JsonStore> {
    JsonStore::open_default().map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}

fn init_logging() {
    let Ok(dir) = data_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    if let Ok(file) = File::create(dir.join(LOG_FILE)) {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }
}

fn print_scores(store: &JsonStore) {
    let board = Leaderboard::load(store);
    if board.is_empty() {
        println!("No scores yet.");
        return;
    }
    println!(
        "{:>3}  {:>6}  {:<10}  {:<9}  {}",
        HEADER[0], HEADER[1], HEADER[2], HEADER[3], HEADER[4]
    );
    for [rank, score, difficulty, obstacles, date] in leaderboard_rows(board.list()) {
        println!("{rank:>3}  {score:>6}  {difficulty:<10}  {obstacles:<9}  {date}");
    }
}
