use serde::de::DeserializeOwned;

// ========== Core MapReduce traits ==========

/// Mapper turns one file's worth of parsed items into emitted values.
/// It returns how many inputs it rejected so the runtime can total them.
pub trait Mapper {
    type Input: DeserializeOwned + Send + 'static;
    type Output: Send + 'static;

    fn do_map<I, F>(&self, input: I, emit: &mut F) -> u64
    where
        I: IntoIterator<Item = Self::Input>,
        F: FnMut(Self::Output);
}

/// Reducer folds mapped values into state it owns. The runtime calls it from a
/// single thread, after every map task has finished.
pub trait Reducer {
    type ValueIn: Send + 'static;

    fn do_reduce<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = Self::ValueIn>;
}
