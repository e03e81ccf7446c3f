use crate::models::{Challenge, Member, Program, Trainer};

/// Records addressed by their backend id
pub trait HasId {
    fn id(&self) -> i64;
}

macro_rules! impl_has_id {
    ($($ty:ty),*) => {
        $(impl HasId for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_has_id!(Member, Program, Trainer, Challenge);

/// Ordered local copy of a backend list, reconciled after each mutation
#[derive(Debug, Clone, PartialEq)]
pub struct IdCollection<T> {
    items: Vec<T>,
}

impl<T> Default for IdCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: HasId> IdCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(HasId::id).collect()
    }

    /// Append a newly created record; an existing id is replaced in place instead
    pub fn insert(&mut self, item: T) {
        match self.position(item.id()) {
            Some(idx) => self.items[idx] = item,
            None => self.items.push(item),
        }
    }

    /// Swap in the updated record; false when the id is unknown
    pub fn replace(&mut self, item: T) -> bool {
        match self.position(item.id()) {
            Some(idx) => {
                self.items[idx] = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> Option<T> {
        self.position(id).map(|idx| self.items.remove(idx))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: HasId> From<Vec<T>> for IdCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<'a, T> IntoIterator for &'a IdCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
