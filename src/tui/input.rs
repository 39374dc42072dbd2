//! Keyboard mapping and placement debouncing.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Place a letter at the cursor.
    Place {
        /// Typed letter.
        letter: char,
        /// Play it from a blank.
        is_blank: bool,
    },
    /// Move the cursor.
    MoveCursor {
        /// Row delta.
        d_row: i64,
        /// Column delta.
        d_col: i64,
    },
    /// Flip the typing direction.
    ToggleDirection,
    /// Take back the last ghost.
    Undo,
    /// Re-apply the last undone ghost.
    Redo,
    /// Drop the turn in progress.
    Cancel,
    /// Submit the composed move.
    Submit,
    /// Pass the turn.
    Pass,
    /// Exchange the composed tiles, or the whole rack.
    Exchange,
    /// Leave the game.
    Quit,
}

impl SessionCommand {
    /// Everything except placement bypasses the debouncer.
    pub fn is_immediate(&self) -> bool {
        !matches!(self, SessionCommand::Place { .. })
    }
}

/// Maps a key press to a command.
///
/// Shift with a letter plays a blank. Letter case alone never does, so
/// Caps Lock types ordinary tiles.
pub fn map_key(key: KeyEvent) -> Option<SessionCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let command = match key.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'q' | 'c' => SessionCommand::Quit,
            'z' => SessionCommand::Undo,
            'y' => SessionCommand::Redo,
            's' => SessionCommand::Submit,
            'p' => SessionCommand::Pass,
            'x' => SessionCommand::Exchange,
            _ => return None,
        },
        KeyCode::Char(c) if c.is_ascii_alphabetic() => SessionCommand::Place {
            letter: c.to_ascii_uppercase(),
            is_blank: key.modifiers.contains(KeyModifiers::SHIFT),
        },
        KeyCode::Backspace => SessionCommand::Undo,
        KeyCode::Esc => SessionCommand::Cancel,
        KeyCode::Enter => SessionCommand::ToggleDirection,
        KeyCode::Up => SessionCommand::MoveCursor { d_row: -1, d_col: 0 },
        KeyCode::Down => SessionCommand::MoveCursor { d_row: 1, d_col: 0 },
        KeyCode::Left => SessionCommand::MoveCursor { d_row: 0, d_col: -1 },
        KeyCode::Right => SessionCommand::MoveCursor { d_row: 0, d_col: 1 },
        _ => return None,
    };
    trace!(?command, "Mapped key");
    Some(command)
}

/// Coalesces bursts of placements.
///
/// Within one window only the last placement survives. Immediate commands
/// flush any pending placement first so they never overtake it.
#[derive(Debug, Clone)]
pub struct PlacementDebouncer {
    window: Duration,
    pending: Option<(SessionCommand, Instant)>,
}

impl PlacementDebouncer {
    /// Creates a debouncer. A zero window passes everything straight through.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Feeds a command, returning whatever is ready to apply, in order.
    pub fn push(&mut self, command: SessionCommand, now: Instant) -> Vec<SessionCommand> {
        if self.window.is_zero() {
            return vec![command];
        }
        let mut ready: Vec<SessionCommand> = self.poll(now).into_iter().collect();

        if command.is_immediate() {
            ready.extend(self.flush());
            ready.push(command);
        } else if let Some((dropped, _)) = self.pending.replace((command, now + self.window)) {
            debug!(?dropped, "Placement superseded within window");
        }
        ready
    }

    /// Releases the pending placement once its window has passed.
    pub fn poll(&mut self, now: Instant) -> Option<SessionCommand> {
        match self.pending {
            Some((_, deadline)) if deadline <= now => self.flush(),
            _ => None,
        }
    }

    /// Releases the pending placement unconditionally.
    pub fn flush(&mut self) -> Option<SessionCommand> {
        self.pending.take().map(|(command, _)| command)
    }

    /// When the pending placement falls due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }
}
