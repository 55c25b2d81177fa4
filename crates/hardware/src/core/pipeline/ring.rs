//! Bounded circular queue with stable slot indices.
//!
//! The ring keeps one slot permanently free so that `head == tail` always means
//! empty. Slots are addressed by index for the whole lifetime of an element,
//! which lets the reorder buffer hand out the index as a renaming tag.

/// Fixed-capacity FIFO whose elements keep their slot index until popped.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    tail: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a ring with `capacity` slots, `capacity - 1` of them usable.
    ///
    /// Capacities below two are raised to two.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            tail: 0,
        }
    }

    /// Total number of slots, including the reserved one.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Maximum number of elements held at once.
    #[inline]
    pub fn usable(&self) -> usize {
        self.slots.len() - 1
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        (self.tail + self.slots.len() - self.head) % self.slots.len()
    }

    /// Returns true if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns true if another element fits.
    #[inline]
    pub fn has_space(&self) -> bool {
        (self.tail + 1) % self.slots.len() != self.head
    }

    /// Slot index of the oldest element.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Slot index the next push will use.
    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Appends at the tail.
    ///
    /// # Returns
    ///
    /// The slot index of the new element, or the element back if the ring is full.
    pub fn push(&mut self, value: T) -> Result<usize, T> {
        if !self.has_space() {
            return Err(value);
        }
        let idx = self.tail;
        self.slots[idx] = Some(value);
        self.tail = (self.tail + 1) % self.slots.len();
        Ok(idx)
    }

    /// Oldest element.
    pub fn front(&self) -> Option<&T> {
        self.slots[self.head].as_ref()
    }

    /// Removes and returns the oldest element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        value
    }

    /// Element at slot `idx`, if that slot is occupied.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Mutable element at slot `idx`, if that slot is occupied.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Occupied slot indices from head to tail.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        let cap = self.slots.len();
        (0..self.len()).map(move |k| (self.head + k) % cap)
    }

    /// Occupied elements from head to tail with their slot indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.indices()
            .filter_map(move |idx| self.slots[idx].as_ref().map(|v| (idx, v)))
    }

    /// Mutable occupied elements from head to tail with their slot indices.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        let cap = self.slots.len();
        let (head, tail) = (self.head, self.tail);
        let (first_len, second_len) = if head <= tail {
            (tail - head, 0)
        } else {
            (cap - head, tail)
        };
        let (front, back) = self.slots.split_at_mut(head);
        back[..first_len]
            .iter_mut()
            .enumerate()
            .map(move |(k, slot)| (head + k, slot))
            .chain(front[..second_len].iter_mut().enumerate())
            .filter_map(|(idx, slot)| slot.as_mut().map(|v| (idx, v)))
    }
}
