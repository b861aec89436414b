use quickcheck::{Arbitrary, Gen};

/// The things a quicktest can do to a tree (and to the model it is checked against).
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K, V> {
    /// Insert the K, V unless K is already present
    Insert(K, V),
    /// Remove the K
    Remove(K),
    /// Look up the K through a cursor
    Find(K),
    /// Compare full forward and backward iteration
    Walk,
    /// Drop everything
    Clear,
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    /// Mostly inserts and removes so trees get some depth. Clearing is rare.
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 20 {
            0..=8 => Op::Insert(K::arbitrary(g), V::arbitrary(g)),
            9..=14 => Op::Remove(K::arbitrary(g)),
            15..=16 => Op::Find(K::arbitrary(g)),
            17..=18 => Op::Walk,
            _ => Op::Clear,
        }
    }
}
