//! Login state shared between the host and the store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether a user is signed in.
///
/// Cheap to clone; all clones observe the same flag. While logged out the
/// store never calls the inventory service.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    logged_in: Arc<AtomicBool>,
}

impl AuthState {
    pub fn new(logged_in: bool) -> Self {
        Self {
            logged_in: Arc::new(AtomicBool::new(logged_in)),
        }
    }

    pub fn logged_out() -> Self {
        Self::new(false)
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::Acquire)
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        self.logged_in.store(logged_in, Ordering::Release);
    }
}
