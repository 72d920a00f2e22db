use foundation::time::Time;

/// An event together with the simulation time it was emitted at.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<E> {
    pub at: Time,
    pub event: E,
}

/// Append-only notification buffer.
///
/// Producers emit while handling a command or a tick; the consumer drains the
/// whole batch afterwards, in emission order.
#[derive(Debug)]
pub struct EventBus<E> {
    events: Vec<Stamped<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, at: Time, event: E) {
        self.events.push(Stamped { at, event });
    }

    pub fn events(&self) -> &[Stamped<E>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Stamped<E>> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use foundation::time::Time;

    #[test]
    fn records_events_with_time() {
        let mut bus = EventBus::new();
        bus.emit(Time(2.5), "hello");
        assert_eq!(bus.len(), 1);
        assert_eq!(bus.events()[0].at, Time(2.5));
        assert_eq!(bus.events()[0].event, "hello");
    }

    #[test]
    fn drain_preserves_order_and_clears() {
        let mut bus = EventBus::new();
        bus.emit(Time(0.0), 1);
        bus.emit(Time(0.0), 2);
        let drained: Vec<_> = bus.drain().into_iter().map(|s| s.event).collect();
        assert_eq!(drained, vec![1, 2]);
        assert!(bus.is_empty());
    }
}
