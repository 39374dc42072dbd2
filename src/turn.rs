//! Turn ownership checks.

use crate::games::wordgrid::{ComposeError, PlayerId};
use tracing::{debug, instrument, warn};

/// Who is acting, whose turn it is and who is seated.
///
/// Supplied by whatever owns identity and room membership.
pub trait Participation {
    /// Identity of the local actor.
    fn current_identity(&self) -> Option<PlayerId>;

    /// Player who owns the current turn.
    fn current_turn_owner(&self) -> Option<PlayerId>;

    /// Whether `id` is seated in the game.
    fn is_participant(&self, id: &str) -> bool;
}

/// Refuses to act when a known participant is not the known turn owner.
///
/// Unknown identities and games without a turn owner pass.
#[instrument(skip(participation))]
pub fn check_turn(participation: &impl Participation) -> Result<(), ComposeError> {
    let (Some(identity), Some(owner)) = (
        participation.current_identity(),
        participation.current_turn_owner(),
    ) else {
        debug!("Identity or turn owner unknown, allowing");
        return Ok(());
    };

    if participation.is_participant(&identity) && identity != owner {
        warn!(player_id = %identity, owner = %owner, "Out-of-turn action");
        return Err(ComposeError::NotYourTurn(owner));
    }
    Ok(())
}
