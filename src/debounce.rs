//! Coalescing of rapid input into one action per quiet period.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Tracks the latest input burst.
///
/// Every input calls [`touch`](Self::touch) and schedules a timer carrying
/// the returned ticket. When a timer fires, [`settle`](Self::settle) only
/// succeeds for the ticket of the most recent input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn touch(&mut self) -> DebounceTicket {
        self.generation += 1;
        DebounceTicket(self.generation)
    }

    pub fn settle(&self, ticket: DebounceTicket) -> bool {
        ticket.0 == self.generation
    }
}
