use super::U;

#[derive(Clone, Debug, Default)]
pub struct ArrC {
    pub item: Box<U>,   // joined element evidence; bottom when no elements were seen
    pub samples: u64,   // arrays observed for this slot
}

impl ArrC {
    pub(super) fn join(a: &Self, b: &Self) -> Self {
        Self {
            item: Box::new(super::join(&a.item, &b.item)),
            samples: a.samples + b.samples,
        }
    }
}
