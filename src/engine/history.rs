use std::collections::VecDeque;

use rand::Rng;

use super::selection::pick_next;

/// Indices shown so far, the cursor into them, and the redo queue.
///
/// Retreat moves each abandoned entry to the front of `future`, so `future`
/// always lists exactly the entries after `position`, in order. Advance
/// replays from `future` before it asks the selection policy for a new pick.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<usize>,
    position: Option<usize>,
    future: VecDeque<usize>,
}

impl History {
    /// Forget everything; the next advance starts a fresh history.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.position = None;
        self.future.clear();
    }

    /// Library index shown at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.position.map(|p| self.entries[p])
    }

    /// Cursor into [`Self::entries`]; `None` before anything is shown.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    #[must_use]
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    #[must_use]
    pub fn future(&self) -> &VecDeque<usize> {
        &self.future
    }

    /// Step forward and return the library index to show.
    ///
    /// Returns `None` only when the library is empty.
    pub fn advance<R: Rng + ?Sized>(&mut self, library_len: usize, rng: &mut R) -> Option<usize> {
        if library_len == 0 {
            return None;
        }
        let next = match self.future.pop_front() {
            Some(replay) => {
                // The replayed entry is the one right after the cursor.
                let keep = self.position.map_or(0, |p| p + 1);
                self.entries.truncate(keep);
                replay
            }
            None => pick_next(library_len, self.current(), rng)?,
        };
        self.entries.push(next);
        self.position = Some(self.entries.len() - 1);
        debug_assert!(self.forward_matches_future());
        Some(next)
    }

    /// Step back one entry and return the library index now current.
    ///
    /// No-op (returns `None`) at the first entry or before anything is shown.
    pub fn retreat(&mut self) -> Option<usize> {
        let position = self.position.filter(|p| *p > 0)?;
        self.future.push_front(self.entries[position]);
        self.position = Some(position - 1);
        debug_assert!(self.forward_matches_future());
        self.current()
    }

    fn forward_matches_future(&self) -> bool {
        let after = self.position.map_or(0, |p| p + 1);
        self.entries[after..].iter().eq(self.future.iter())
    }
}
