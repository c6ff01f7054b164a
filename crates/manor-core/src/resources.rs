//! The resource collaborator
//!
//! The engine never counts steps, gems or keys itself. It asks an
//! implementation of [`Resources`] whether something is affordable and tells
//! it when something was spent or a room was entered.

use crate::manor::LockLevel;
use crate::rng::GameRng;
use crate::room::PlacedRoom;

/// Bookkeeping consumed by [`crate::ManorEngine`]
pub trait Resources {
    /// Steps left; the day ends when this reaches zero.
    fn steps(&self) -> u32;

    /// Spend `n` steps, saturating at zero.
    fn use_steps(&mut self, n: u32);

    /// Spend `n` gems if that many are held.
    fn use_gems(&mut self, n: u32) -> bool;

    /// Whether a door of this level can be opened right now.
    fn can_open(&self, level: LockLevel) -> bool;

    /// Pay for opening a door. Only called after `can_open` said yes.
    fn spend_for_lock(&mut self, level: LockLevel);

    /// Spend `n` dice if that many are held.
    fn use_dice(&mut self, n: u32) -> bool;

    /// Called each time the player walks into a room, after the step is paid.
    fn enter_room(&mut self, room: &mut PlacedRoom, rng: &mut GameRng) {
        let _ = (room, rng);
    }
}
