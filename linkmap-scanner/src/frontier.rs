use std::collections::VecDeque;

/// FIFO work list of items awaiting processing.
///
/// The frontier does no deduplication of its own: callers decide what is
/// worth enqueuing. Items only ever leave through [`Frontier::dequeue`].
#[derive(Debug, Clone)]
pub struct Frontier<T> {
    items: VecDeque<T>,
}

impl<T> Frontier<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append an item at the tail.
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Remove and return the head item, or `None` when the frontier is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look at the head item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frontier_is_empty() {
        let frontier: Frontier<String> = Frontier::new();
        assert_eq!(frontier.len(), 0);
        assert!(frontier.is_empty());
        assert!(frontier.peek().is_none());
    }

    #[test]
    fn test_single_item() {
        let mut frontier = Frontier::new();
        frontier.enqueue("Test".to_string());

        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.peek().map(String::as_str), Some("Test"));
    }

    #[test]
    fn test_dequeue_preserves_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.enqueue(1);
        frontier.enqueue(2);
        frontier.enqueue(3);
        assert_eq!(frontier.len(), 3);

        assert_eq!(frontier.dequeue(), Some(1));
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.dequeue(), Some(2));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.dequeue(), Some(3));
        assert_eq!(frontier.len(), 0);
    }

    #[test]
    fn test_dequeue_empty_returns_none() {
        let mut frontier: Frontier<String> = Frontier::new();
        assert_eq!(frontier.dequeue(), None);
        assert_eq!(frontier.len(), 0);

        // Still well-behaved after draining
        frontier.enqueue("a".to_string());
        frontier.dequeue();
        assert_eq!(frontier.dequeue(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_interleaved_enqueue_dequeue() {
        let mut frontier = Frontier::new();
        frontier.enqueue("a");
        frontier.enqueue("b");
        assert_eq!(frontier.dequeue(), Some("a"));
        frontier.enqueue("c");
        assert_eq!(frontier.dequeue(), Some("b"));
        assert_eq!(frontier.dequeue(), Some("c"));
        assert_eq!(frontier.dequeue(), None);
    }
}
