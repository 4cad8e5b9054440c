//! Session phase machine
//!
//! Single source of truth for which top-level view is active and the data
//! preconditions each transition needs. Transport failures never become a
//! phase: they land in the `connection_error` side channel while the phase
//! stays put, so the caller can offer a retry without losing session state.

use textlands_protocol::{CharacterId, WorldId};
use thiserror::Error;

use super::PlayerIdentity;

/// Top-level screen/mode the player is in. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Landing,
    CharacterSelect,
    Genres,
    Worlds,
    Campfire,
    InfiniteCampfire,
    Game,
}

/// Rejected phase transition. The phase is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhaseError {
    #[error("cannot transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: SessionPhase,
        to: SessionPhase,
    },
    #[error("cannot enter game without a bound character")]
    CharacterNotBound,
    #[error("cannot enter game without a bound world")]
    WorldNotBound,
}

/// Session state: active phase plus the identities that gate transitions.
#[derive(Debug, Clone)]
pub struct SessionState {
    phase: SessionPhase,
    identity: Option<PlayerIdentity>,
    bound_world: Option<WorldId>,
    bound_character: Option<CharacterId>,
    connection_error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// A fresh session starts in `Loading`.
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Loading,
            identity: None,
            bound_world: None,
            bound_character: None,
            connection_error: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn identity(&self) -> Option<&PlayerIdentity> {
        self.identity.as_ref()
    }

    pub fn bound_world(&self) -> Option<WorldId> {
        self.bound_world
    }

    pub fn bound_character(&self) -> Option<CharacterId> {
        self.bound_character
    }

    /// Most recent transport failure, if any. Cleared on the next
    /// successful transition.
    pub fn connection_error(&self) -> Option<&str> {
        self.connection_error.as_deref()
    }

    /// Record a transport failure without touching the phase.
    pub fn set_connection_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(error = %message, phase = ?self.phase, "connection error");
        self.connection_error = Some(message);
    }

    pub fn clear_connection_error(&mut self) {
        self.connection_error = None;
    }

    /// Initial connectivity/auth check completed: move to the landing view.
    ///
    /// `identity` is `None` for the graceful anonymous fallback; the player
    /// can still browse and gets a guest identity later.
    pub fn finish_loading(&mut self, identity: Option<PlayerIdentity>) -> Result<(), PhaseError> {
        self.transition(SessionPhase::Landing)?;
        self.identity = identity;
        Ok(())
    }

    /// Set or replace the player identity (e.g., guest assigned mid-session).
    pub fn set_identity(&mut self, identity: PlayerIdentity) {
        self.identity = Some(identity);
    }

    /// Landing → existing character roster.
    pub fn open_character_select(&mut self) -> Result<(), PhaseError> {
        self.transition(SessionPhase::CharacterSelect)
    }

    /// Landing → genre browsing.
    pub fn open_genres(&mut self) -> Result<(), PhaseError> {
        self.transition(SessionPhase::Genres)
    }

    /// Landing → world browsing.
    pub fn open_worlds(&mut self) -> Result<(), PhaseError> {
        self.transition(SessionPhase::Worlds)
    }

    /// Worlds → campfire, once a world selection resolved to its
    /// character-introduction payload. Binds the world.
    pub fn enter_campfire(&mut self, world_id: WorldId, infinite: bool) -> Result<(), PhaseError> {
        let target = if infinite {
            SessionPhase::InfiniteCampfire
        } else {
            SessionPhase::Campfire
        };
        self.transition(target)?;
        self.bound_world = Some(world_id);
        Ok(())
    }

    /// Bind the character (and its world) that the player will enter the
    /// game with. Valid while selecting a character or at a campfire.
    pub fn bind_character(
        &mut self,
        character_id: CharacterId,
        world_id: WorldId,
    ) -> Result<(), PhaseError> {
        match self.phase {
            SessionPhase::CharacterSelect
            | SessionPhase::Campfire
            | SessionPhase::InfiniteCampfire => {
                self.bound_character = Some(character_id);
                self.bound_world = Some(world_id);
                Ok(())
            }
            from => Err(PhaseError::InvalidTransition {
                from,
                to: SessionPhase::Game,
            }),
        }
    }

    /// Enter the game. Requires a bound character and world; the backend
    /// has confirmed an active play session by the time this is called.
    pub fn enter_game(&mut self) -> Result<(), PhaseError> {
        if !Self::allowed(self.phase, SessionPhase::Game) {
            return Err(PhaseError::InvalidTransition {
                from: self.phase,
                to: SessionPhase::Game,
            });
        }
        if self.bound_character.is_none() {
            return Err(PhaseError::CharacterNotBound);
        }
        if self.bound_world.is_none() {
            return Err(PhaseError::WorldNotBound);
        }
        self.apply(SessionPhase::Game);
        Ok(())
    }

    /// Explicit logout: back to landing, bindings cleared.
    pub fn logout(&mut self) -> Result<(), PhaseError> {
        self.transition(SessionPhase::Landing)?;
        self.bound_world = None;
        self.bound_character = None;
        self.identity = None;
        Ok(())
    }

    /// Fatal session loss: back to landing, but bindings and identity are
    /// kept so accumulated state is not discarded.
    pub fn session_lost(&mut self, reason: impl Into<String>) -> Result<(), PhaseError> {
        let reason = reason.into();
        self.transition(SessionPhase::Landing)?;
        self.connection_error = Some(reason);
        Ok(())
    }

    fn transition(&mut self, to: SessionPhase) -> Result<(), PhaseError> {
        if !Self::allowed(self.phase, to) {
            return Err(PhaseError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.apply(to);
        Ok(())
    }

    fn apply(&mut self, to: SessionPhase) {
        tracing::debug!(from = ?self.phase, to = ?to, "phase transition");
        self.phase = to;
        self.connection_error = None;
    }

    /// The transition table. No transition may skip an intermediate load.
    fn allowed(from: SessionPhase, to: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (from, to),
            (Loading, Landing)
                | (Landing, CharacterSelect)
                | (Landing, Genres)
                | (Landing, Worlds)
                | (Genres, Worlds)
                | (Worlds, Campfire)
                | (Worlds, InfiniteCampfire)
                | (CharacterSelect, Game)
                | (Campfire, Game)
                | (InfiniteCampfire, Game)
                | (CharacterSelect, Landing)
                | (Genres, Landing)
                | (Worlds, Landing)
                | (Campfire, Landing)
                | (InfiniteCampfire, Landing)
                | (Game, Landing)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landed() -> SessionState {
        let mut session = SessionState::new();
        session
            .finish_loading(Some(PlayerIdentity::guest(Default::default())))
            .expect("loading -> landing");
        session
    }

    #[test]
    fn starts_in_loading() {
        assert_eq!(SessionState::new().phase(), SessionPhase::Loading);
    }

    #[test]
    fn game_requires_bound_character_and_world() {
        let mut session = landed();
        session.open_character_select().expect("to roster");

        assert_eq!(session.enter_game(), Err(PhaseError::CharacterNotBound));
        assert_eq!(session.phase(), SessionPhase::CharacterSelect);

        session
            .bind_character(CharacterId::new(), WorldId::new())
            .expect("bind");
        session.enter_game().expect("gated entry satisfied");
        assert_eq!(session.phase(), SessionPhase::Game);
    }

    #[test]
    fn cannot_skip_from_landing_to_game() {
        let mut session = landed();
        assert!(matches!(
            session.enter_game(),
            Err(PhaseError::InvalidTransition { .. })
        ));
        assert_eq!(session.phase(), SessionPhase::Landing);
    }

    #[test]
    fn campfire_binds_world_but_not_character() {
        let mut session = landed();
        session.open_worlds().expect("to worlds");
        session
            .enter_campfire(WorldId::new(), false)
            .expect("to campfire");
        assert_eq!(session.phase(), SessionPhase::Campfire);
        assert!(session.bound_world().is_some());

        assert_eq!(session.enter_game(), Err(PhaseError::CharacterNotBound));
    }

    #[test]
    fn connection_error_leaves_phase_unchanged() {
        let mut session = landed();
        session.open_worlds().expect("to worlds");
        session.set_connection_error("fetch failed");

        assert_eq!(session.phase(), SessionPhase::Worlds);
        assert_eq!(session.connection_error(), Some("fetch failed"));

        // Next successful transition clears it
        session
            .enter_campfire(WorldId::new(), true)
            .expect("to infinite campfire");
        assert_eq!(session.connection_error(), None);
    }

    #[test]
    fn logout_clears_bindings_but_session_loss_keeps_them() {
        let mut session = landed();
        session.open_character_select().expect("to roster");
        session
            .bind_character(CharacterId::new(), WorldId::new())
            .expect("bind");
        session.enter_game().expect("enter game");

        session.session_lost("gateway dropped").expect("to landing");
        assert_eq!(session.phase(), SessionPhase::Landing);
        assert!(session.bound_character().is_some());
        assert!(session.identity().is_some());
        assert_eq!(session.connection_error(), Some("gateway dropped"));

        session.open_character_select().expect("back to roster");
        session.enter_game().expect("rejoin with kept bindings");
        session.logout().expect("logout");
        assert!(session.bound_character().is_none());
        assert!(session.bound_world().is_none());
        assert!(session.identity().is_none());
    }

    #[test]
    fn genres_lead_to_worlds() {
        let mut session = landed();
        session.open_genres().expect("to genres");
        session.open_worlds().expect("genres -> worlds");
        assert_eq!(session.phase(), SessionPhase::Worlds);
    }
}
