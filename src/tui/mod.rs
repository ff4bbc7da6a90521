// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod form;
pub mod handlers;
pub mod network;
pub mod state;
pub mod view;

use crate::client::ApiClient;
use crate::config::{self, Config, DEFAULT_API_URL};
use crate::context::SharedContext;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Write},
    time::Duration,
};
use tokio::sync::mpsc;

/// Installs a file logger at the context's log path. Failures are not fatal.
pub fn init_logging(ctx: &SharedContext, level: log::LevelFilter) {
    let Some(path) = ctx.get_log_path() else {
        return;
    };
    match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let log_config = simplelog::ConfigBuilder::new()
                .set_time_format_rfc3339()
                .build();
            if simplelog::WriteLogger::init(level, log_config, file).is_err() {
                eprintln!("Logger already initialised");
            }
        }
        Err(e) => eprintln!("Warning: cannot open log file {}: {}", path.display(), e),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Asks for the server address and checks it answers before saving.
async fn onboard(ctx: &SharedContext) -> Result<Config> {
    println!("Welcome to MindConnect. No configuration file found.");
    println!("Let's connect to your MindConnect server.\n");

    let mut new_config = Config::default();
    loop {
        let url = prompt(&format!("API URL [{}]: ", DEFAULT_API_URL))?;
        new_config.api_url = if url.is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            url
        };

        println!("\nTesting connection...");
        let check = match ApiClient::from_config(&new_config) {
            Ok(api) => api.motivations().active().await.map(|items| items.len()),
            Err(e) => Err(e),
        };
        match check {
            Ok(count) => {
                println!("Success! The server has {} motivational items.", count);
                break;
            }
            Err(e) => {
                eprintln!("Connection failed: {}", e.user_message());
                let retry = prompt("Retry configuration? [Y/n] ")?;
                if retry.eq_ignore_ascii_case("n") {
                    println!("Saving the address anyway.");
                    break;
                }
            }
        }
    }

    if let Err(e) = new_config.save(ctx.as_ref()) {
        eprintln!("Warning: Could not save config file: {}", e);
    } else if let Ok(path) = Config::get_path_string(ctx.as_ref()) {
        println!("Configuration saved to: {}", path);
    }

    println!("Starting MindConnect...");
    std::thread::sleep(Duration::from_secs(1));
    Ok(new_config)
}

/// Loads the configuration, running onboarding when none exists yet.
pub async fn load_or_onboard(ctx: &SharedContext) -> Result<Config> {
    match config::Config::load(ctx.as_ref()) {
        Ok(c) => Ok(c),
        Err(e) => {
            // Anything other than a missing file is a broken config; report it instead of onboarding.
            if !Config::is_missing_config_error(&e) {
                return Err(e.context("Error loading configuration"));
            }
            onboard(ctx).await
        }
    }
}

pub async fn run(ctx: SharedContext) -> Result<()> {
    // Panic Hook
    let panic_path = ctx
        .get_cache_dir()
        .map(|d| d.join("mindconnect_panic.log"))
        .unwrap_or_else(|_| "mindconnect_panic.log".into());
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&panic_path)
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    let cfg = load_or_onboard(&ctx).await?;
    init_logging(&ctx, cfg.log_filter());
    log::info!("Starting MindConnect against {}", cfg.api_url);

    let api = ApiClient::from_config(&cfg)?;
    let recent_items = cfg.recent_items;

    // --- TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- STATE INIT ---
    let mut app_state = AppState::new(ctx.clone(), cfg);

    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // --- NETWORK TASK ---
    tokio::spawn(network::run_network_actor(
        api,
        recent_items,
        action_rx,
        event_tx,
    ));

    // Restored sessions go straight to their dashboard.
    let restored = app_state.session.identity().cloned();
    if let Some(identity) = &restored {
        app_state.message = format!("Welcome back, {}", identity.account.display_name());
    }
    let _ = action_tx.send(Action::SetIdentity(restored)).await;
    let initial = app_state.navigate(app_state.route);
    let _ = action_tx.send(initial).await;

    // --- UI LOOP ---
    loop {
        terminal.draw(|f| draw(f, &mut app_state))?;

        // A. Network Events
        if let Ok(event) = event_rx.try_recv() {
            for action in handlers::handle_app_event(&mut app_state, event) {
                let _ = action_tx.send(action).await;
            }
        }

        // B. Input Events
        if crossterm::event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            match event {
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) => {
                    // Filter out KeyRelease events to prevent double input on Windows
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }

                    if let Some(action) =
                        handlers::handle_key_event(key, &mut app_state, &action_tx).await
                    {
                        if matches!(action, Action::Quit) {
                            let _ = action_tx.send(Action::Quit).await;
                            break;
                        }
                        let _ = action_tx.send(action).await;
                    }
                }
                _ => {}
            }
        }
    }

    // --- CLEANUP ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    log::info!("MindConnect closed");
    Ok(())
}
