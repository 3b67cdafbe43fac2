use rand::Rng;

/// Fisher–Yates shuffle into a new vector, using the thread-local RNG.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Flashcard sequence over the dataset. `order` holds dataset indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    order: Vec<usize>,
    cursor: usize,
    flipped: bool,
}

impl Deck {
    /// A freshly shuffled deck over `len` questions, cursor at the start.
    pub fn shuffled(len: usize) -> Self {
        let indices: Vec<usize> = (0..len).collect();
        Self::from_order(shuffle(&indices))
    }

    pub fn from_order(order: Vec<usize>) -> Self {
        Self {
            order,
            cursor: 0,
            flipped: false,
        }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Dataset index of the card under the cursor.
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }

    pub fn has_prev(&self) -> bool {
        self.cursor > 0
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.order.len()
    }

    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.cursor += 1;
            self.flipped = false;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.cursor -= 1;
            self.flipped = false;
            true
        } else {
            false
        }
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }
}
