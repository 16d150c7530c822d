//! View model store slices with stale-response protection.

/// Identifies one issued load of a [`Slice`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// The client-side copy of one remotely owned resource.
///
/// Every load takes a fresh [`RequestToken`]; only the response to the most
/// recently issued load may replace the value. A slow response overtaken by
/// a later load is dropped instead of overwriting newer data.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T> {
    value: T,
    loaded: bool,
    latest: RequestToken,
}

impl<T: Default> Default for Slice<T> {
    fn default() -> Self {
        Self {
            value: T::default(),
            loaded: false,
            latest: RequestToken::default(),
        }
    }
}

impl<T> Slice<T> {
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Whether any load has completed successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Issue a token for a new load. Earlier tokens become stale.
    pub fn begin_load(&mut self) -> RequestToken {
        self.latest = RequestToken(self.latest.0 + 1);
        self.latest
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token == self.latest
    }

    /// Replace the value wholesale if `token` is the latest one issued.
    pub fn apply(&mut self, token: RequestToken, value: T) -> bool {
        if !self.is_current(token) {
            log::debug!(
                "Discarding stale response {:?} (latest is {:?})",
                token,
                self.latest
            );
            return false;
        }
        self.value = value;
        self.loaded = true;
        true
    }
}
