use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::repo::SqliteLedger;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &SqliteLedger) -> Result<()> {
    let mut app = App::new();
    app.refresh(db)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &SqliteLedger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab bar, status bar, command bar, table borders and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Editing => handle_editing_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, db: &SqliteLedger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, Motion::Down(1)),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, Motion::Up(1)),
        KeyCode::Char('1') => switch_screen(app, db, Screen::Overview)?,
        KeyCode::Char('2') => switch_screen(app, db, Screen::Transactions)?,
        KeyCode::Char('3') => switch_screen(app, db, Screen::Analytics)?,
        KeyCode::Char('4') => switch_screen(app, db, Screen::Categories)?,
        KeyCode::Tab => {
            let next = app.screen.cycle(true);
            switch_screen(app, db, next)?;
        }
        KeyCode::BackTab => {
            let prev = app.screen.cycle(false);
            switch_screen(app, db, prev)?;
        }
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('g') => move_cursor(app, Motion::Top),
        KeyCode::Char('G') => move_cursor(app, Motion::Bottom),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('H') => commands::handle_command("prev-month", app, db)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app, db)?,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            move_cursor(app, Motion::Down(half_page));
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            move_cursor(app, Motion::Up(half_page));
        }
        KeyCode::Char('a') => start_command(app, "add-expense "),
        KeyCode::Char('i') => start_command(app, "add-income "),
        KeyCode::Char('e') if app.screen == Screen::Transactions => {
            commands::handle_command("edit-desc", app, db)?;
        }
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            commands::handle_command("delete-txn", app, db)?;
        }
        KeyCode::Char('D') if app.screen == Screen::Categories => {
            commands::handle_command("delete-category", app, db)?;
        }
        _ => {}
    }
    Ok(())
}

/// Open the command bar with `prefix` already typed.
fn start_command(app: &mut App, prefix: &str) {
    app.input_mode = InputMode::Command;
    app.command_input = prefix.to_string();
}

fn handle_command_input(key: KeyEvent, app: &mut App, db: &SqliteLedger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: KeyEvent, app: &mut App, db: &SqliteLedger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let new_desc = app.command_input.clone();
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            if new_desc.trim().is_empty() {
                app.set_status("description must not be empty");
            } else {
                commands::handle_command(&format!("edit-desc {new_desc}"), app, db)?;
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, db: &SqliteLedger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            if let Some(action) = app.pending_action.take() {
                commands::confirm(action, app, db)?;
            }
        }
        _ => {
            // Anything but y cancels
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, db: &SqliteLedger, screen: Screen) -> Result<()> {
    app.screen = screen;
    app.refresh(db)?;
    app.set_status(format!("{screen}"));
    Ok(())
}

fn move_cursor(app: &mut App, motion: Motion) {
    let page = app.visible_rows.max(1);
    let Some((index, scroll, len)) = app.list_cursor() else {
        return;
    };
    match motion {
        Motion::Down(steps) => {
            for _ in 0..steps {
                scroll_down(index, scroll, len, page);
            }
        }
        Motion::Up(steps) => {
            for _ in 0..steps {
                scroll_up(index, scroll);
            }
        }
        Motion::Top => scroll_to_top(index, scroll),
        Motion::Bottom => scroll_to_bottom(index, scroll, len, page),
    }
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Down(usize),
    Up(usize),
    Top,
    Bottom,
}
