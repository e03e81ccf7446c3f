use super::collection::IdCollection;
use crate::models::Challenge;

/// All challenges plus the one currently promoted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChallengeBoard {
    all: IdCollection<Challenge>,
    current: Option<Challenge>,
}

impl ChallengeBoard {
    pub fn new(all: Vec<Challenge>, current: Option<Challenge>) -> Self {
        Self {
            all: IdCollection::new(all),
            current,
        }
    }

    pub fn all(&self) -> &[Challenge] {
        self.all.items()
    }

    pub fn current(&self) -> Option<&Challenge> {
        self.current.as_ref()
    }

    pub fn is_current(&self, id: i64) -> bool {
        self.current.as_ref().is_some_and(|c| c.id == id)
    }

    pub fn created(&mut self, challenge: Challenge) {
        self.all.insert(challenge);
    }

    pub fn updated(&mut self, challenge: Challenge) {
        if self.is_current(challenge.id) {
            self.current = Some(challenge.clone());
        }
        self.all.insert(challenge);
    }

    pub fn set_current(&mut self, challenge: Challenge) {
        self.all.insert(challenge.clone());
        self.current = Some(challenge);
    }

    /// Drop a deleted challenge.
    ///
    /// When it was the current one, the challenge that followed it in the list takes over,
    /// else the first remaining one, else there is no current challenge.
    pub fn deleted(&mut self, id: i64) {
        let position = self.all.position(id);
        self.all.remove(id);

        if !self.is_current(id) {
            return;
        }

        let successor = position
            .and_then(|idx| self.all.items().get(idx))
            .or_else(|| self.all.items().first())
            .cloned();

        tracing::debug!(
            "Current challenge {} deleted, promoting {:?}",
            id,
            successor.as_ref().map(|c| c.id)
        );
        self.current = successor;
    }
}
