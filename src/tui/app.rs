//! Application state and logic.

use strictly_tiles::{
    ChannelMoveSender, GameSession, GameStatus, MoveValidationResult, SubmitError,
};
use tracing::{debug, info, warn};

use super::input::SessionCommand;

/// Main application state.
pub struct App {
    session: GameSession,
    sender: ChannelMoveSender,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(session: GameSession, sender: ChannelMoveSender) -> Self {
        Self {
            session,
            sender,
            status_message: "Arrows move, letters place, Enter turns".to_string(),
            should_quit: false,
        }
    }

    /// The hosted session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles an authoritative state published by the referee.
    pub fn on_state(&mut self, json: &str) {
        match self.session.receive_authoritative(json) {
            Ok(()) => debug!(turn = %self.turn_message(), "State applied"),
            Err(e) => {
                warn!(error = %e, "Dropping undecodable state");
                self.status_message = format!("Bad state from referee: {}", e.message);
            }
        }
    }

    /// Whose turn it is, or the result once the game is over.
    pub fn turn_message(&self) -> String {
        let game = self.session.game();
        if game.status == GameStatus::Finished {
            let leader = game.players.iter().max_by_key(|p| *p.score());
            return match leader {
                Some(p) => format!(
                    "Game over! {} wins with {}. Ctrl+Q to quit.",
                    p.name(),
                    p.score()
                ),
                None => "Game over!".to_string(),
            };
        }
        match self.session.acting_player() {
            Some(p) => format!("{} to play", p.name()),
            None => "Waiting for players".to_string(),
        }
    }

    fn report(&mut self, outcome: Result<MoveValidationResult, SubmitError>, verb: &str) {
        self.status_message = match outcome {
            Ok(result) if result.is_valid => {
                let words = result.words.unwrap_or_default();
                if words.is_empty() {
                    format!("{} accepted", verb)
                } else {
                    format!("Played {} for {}", words.join(", "), result.score.unwrap_or(0))
                }
            }
            Ok(result) => result.reason.unwrap_or_else(|| format!("{} rejected", verb)),
            Err(e) => e.message,
        };
    }

    /// Applies one command to the session.
    pub async fn handle_command(&mut self, command: SessionCommand) {
        debug!(?command, "Handling command");
        let refused = match command {
            SessionCommand::Place { letter, is_blank } => {
                self.session.place_letter(letter, is_blank).err()
            }
            SessionCommand::MoveCursor { d_row, d_col } => {
                self.session.move_cursor(d_row, d_col).err()
            }
            SessionCommand::ToggleDirection => {
                self.session.toggle_direction();
                None
            }
            SessionCommand::Undo => {
                self.session.undo();
                None
            }
            SessionCommand::Redo => {
                self.session.redo();
                None
            }
            SessionCommand::Cancel => {
                self.session.cancel();
                None
            }
            SessionCommand::Submit => {
                let outcome = self.session.submit(&self.sender).await;
                self.report(outcome, "Move");
                return;
            }
            SessionCommand::Pass => {
                let outcome = self.session.pass(&self.sender).await;
                self.report(outcome, "Pass");
                return;
            }
            SessionCommand::Exchange => {
                let tiles = self.session.exchange_tiles();
                let outcome = self.session.exchange(&self.sender, tiles).await;
                self.report(outcome, "Exchange");
                return;
            }
            SessionCommand::Quit => {
                info!("User quit");
                self.should_quit = true;
                return;
            }
        };
        self.status_message = refused.map(|e| e.to_string()).unwrap_or_default();
    }
}
