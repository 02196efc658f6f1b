use crate::card::CardData;

#[derive(Clone, Debug, Default)]
pub struct DeepLink {
    pending: Option<String>,
}

impl DeepLink {
    pub fn new(initial: Option<String>) -> Self {
        let pending = initial
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        Self { pending }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    // one shot; the last matching card wins
    pub fn take_match(&mut self, cards: &[CardData]) -> Option<usize> {
        let wanted = self.pending.take()?;
        cards.iter().rposition(|card| card.matches_id(&wanted))
    }
}
