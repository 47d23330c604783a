use crate::data::filter::FilterCriteria;
use crate::data::model::ListingStore;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The shell's state, independent of any I/O.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current store; unloaded until a file has been read. Successive
    /// filters narrow it, so it holds the intersection of all of them.
    pub store: ListingStore,
}

impl AppState {
    /// Replace the store with a freshly loaded one, dropping earlier filters.
    pub fn set_store(&mut self, store: ListingStore) {
        self.store = store;
    }

    /// Narrow the current store. Returns `(before, after)` listing counts.
    pub fn apply_filter(&mut self, criteria: &FilterCriteria) -> Result<(usize, usize)> {
        let before = self.store.len();
        self.store = self.store.filter(criteria)?;
        Ok((before, self.store.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::NumericRange;
    use crate::data::model::Listing;

    fn store_with_prices(prices: &[f64]) -> ListingStore {
        ListingStore::new(
            prices
                .iter()
                .map(|p| Listing {
                    price: Some(*p),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn filters_accumulate() {
        let mut state = AppState::default();
        state.set_store(store_with_prices(&[10.0, 20.0, 30.0]));

        let first = FilterCriteria {
            price: Some(NumericRange::new(15.0, 40.0)),
            ..Default::default()
        };
        assert_eq!(state.apply_filter(&first).unwrap(), (3, 2));

        let second = FilterCriteria {
            price: Some(NumericRange::new(0.0, 25.0)),
            ..Default::default()
        };
        assert_eq!(state.apply_filter(&second).unwrap(), (2, 1));
        let kept: Vec<_> = state.store.listings().unwrap().iter().map(|l| l.price).collect();
        assert_eq!(kept, vec![Some(20.0)], "same-name ranges intersect");
    }

    #[test]
    fn reload_drops_earlier_filters() {
        let mut state = AppState::default();
        state.set_store(store_with_prices(&[10.0]));
        state
            .apply_filter(&FilterCriteria {
                price: Some(NumericRange::new(0.0, 1.0)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(state.store.len(), 0);

        state.set_store(store_with_prices(&[10.0, 20.0]));
        assert_eq!(state.store.len(), 2);
    }

    #[test]
    fn filter_without_store_fails() {
        let mut state = AppState::default();
        assert!(state.apply_filter(&FilterCriteria::default()).is_err());
    }
}
