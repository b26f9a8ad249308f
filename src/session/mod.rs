//! The local session: who is signed in, and for how long.
//!
//! A [`Session`] is either signed out or signed in as one fabricated [`User`]. Signing
//! in or up persists that user under `mockUser` and arms a 30-minute inactivity alarm.
//! Every qualifying UI event reported through [`Session::record_activity`] pushes the
//! deadline back; when the alarm fires the session signs itself out.
//!
//! A session restored from storage at startup is signed in without an alarm. The alarm
//! is armed by the first activity event after the restore, unless
//! [`SessionOptions::arm_on_restore`] is set.

pub mod extractors;
pub mod middleware;
mod timer;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use validator::Validate;

use crate::error::AppError;
use crate::models::{ProfileInput, SignInInput, SignUpInput, User};
use crate::storage::{load_json, save_json, KeyValueStore, USER_KEY};
use timer::Alarm;

pub use extractors::CurrentUser;
pub use middleware::SessionGuard;

/// Quiet period after which a signed-in session is ended.
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    SignedIn(User),
}

/// UI events that count as the user being present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    PointerDown,
    KeyDown,
    TouchStart,
    PointerMove,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Arm the inactivity alarm right away when a persisted user is restored,
    /// instead of waiting for the first activity event.
    pub arm_on_restore: bool,
}

struct Inner {
    state: SessionState,
    alarm: Alarm,
}

struct Shared {
    storage: Arc<dyn KeyValueStore>,
    inner: Mutex<Inner>,
}

/// Handle to the session. Clones share state.
#[derive(Clone)]
pub struct Session {
    shared: Arc<Shared>,
}

impl Session {
    /// Builds the session from whatever user is persisted in `storage`.
    ///
    /// An unreadable user record is logged and ignored. With `arm_on_restore` the alarm
    /// is armed here, which needs a tokio runtime.
    pub fn restore(storage: Arc<dyn KeyValueStore>, options: SessionOptions) -> Self {
        let state = match load_json::<User>(storage.as_ref(), USER_KEY) {
            Ok(Some(user)) => {
                info!("Restored session for {}", user.email);
                SessionState::SignedIn(user)
            }
            Ok(None) => SessionState::SignedOut,
            Err(e) => {
                warn!("Ignoring unreadable persisted user: {}", e);
                SessionState::SignedOut
            }
        };

        let session = Self {
            shared: Arc::new(Shared {
                storage,
                inner: Mutex::new(Inner {
                    state,
                    alarm: Alarm::default(),
                }),
            }),
        };

        if options.arm_on_restore {
            let mut inner = session.lock();
            if matches!(inner.state, SessionState::SignedIn(_)) {
                session.arm_timeout(&mut inner);
            }
        }
        session
    }

    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    pub fn current_user(&self) -> Option<User> {
        match &self.lock().state {
            SessionState::SignedIn(user) => Some(user.clone()),
            SessionState::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.lock().state, SessionState::SignedIn(_))
    }

    /// Whether an inactivity alarm is pending.
    pub fn is_timeout_armed(&self) -> bool {
        self.lock().alarm.is_armed()
    }

    /// Signs in with a fabricated user derived from the email. The password is only
    /// checked for length.
    pub fn sign_in(&self, input: SignInInput) -> Result<User, AppError> {
        input.validate()?;
        self.enter(User::from_sign_in(&input))
    }

    pub fn sign_up(&self, input: SignUpInput) -> Result<User, AppError> {
        input.validate()?;
        self.enter(User::from_sign_up(&input))
    }

    /// Resets the inactivity countdown. Rejected while signed out.
    pub fn record_activity(&self, kind: ActivityKind) -> Result<(), AppError> {
        let mut inner = self.lock();
        if !matches!(inner.state, SessionState::SignedIn(_)) {
            return Err(AppError::Unauthorized("No active session".into()));
        }
        debug!("Activity {:?}, rearming inactivity timeout", kind);
        self.arm_timeout(&mut inner);
        Ok(())
    }

    /// Ends the session: cancels the alarm, forgets the user and removes the persisted
    /// record. Idempotent.
    ///
    /// The in-memory session ends even when removing the record fails; the storage
    /// error is still returned.
    pub fn sign_out(&self) -> Result<(), AppError> {
        let mut inner = self.lock();
        self.sign_out_locked(&mut inner)
    }

    /// Replaces the editable profile fields of the signed-in user and persists the
    /// result. The alarm is left alone.
    pub fn update_profile(&self, input: ProfileInput) -> Result<User, AppError> {
        input.validate()?;
        let mut inner = self.lock();
        let current = match &inner.state {
            SessionState::SignedIn(user) => user,
            SessionState::SignedOut => {
                return Err(AppError::Unauthorized("No active session".into()))
            }
        };

        let updated = current.with_profile(input);
        save_json(self.shared.storage.as_ref(), USER_KEY, &updated)?;
        inner.state = SessionState::SignedIn(updated.clone());
        info!("Updated profile of {}", updated.email);
        Ok(updated)
    }

    fn enter(&self, user: User) -> Result<User, AppError> {
        let mut inner = self.lock();
        save_json(self.shared.storage.as_ref(), USER_KEY, &user)?;
        if let SessionState::SignedIn(previous) = &inner.state {
            debug!("Replacing session of {}", previous.email);
        }
        inner.state = SessionState::SignedIn(user.clone());
        self.arm_timeout(&mut inner);
        info!("Signed in {} ({})", user.email, user.id);
        Ok(user)
    }

    fn sign_out_locked(&self, inner: &mut Inner) -> Result<(), AppError> {
        self.cancel_timeout(inner);
        if let SessionState::SignedIn(user) = &inner.state {
            info!("Signed out {}", user.email);
        }
        inner.state = SessionState::SignedOut;
        self.shared.storage.remove(USER_KEY)?;
        Ok(())
    }

    fn arm_timeout(&self, inner: &mut Inner) {
        let shared = Arc::downgrade(&self.shared);
        inner.alarm.arm(INACTIVITY_TIMEOUT, move |generation| {
            if let Some(shared) = shared.upgrade() {
                Session { shared }.on_timeout(generation);
            }
        });
    }

    fn cancel_timeout(&self, inner: &mut Inner) {
        if inner.alarm.cancel() {
            debug!("Cancelled inactivity timeout");
        }
    }

    fn on_timeout(&self, generation: u64) {
        let mut inner = self.lock();
        if !inner.alarm.is_current(generation) {
            return;
        }
        inner.alarm.expire();
        info!(
            "No activity for {} minutes, ending session",
            INACTIVITY_TIMEOUT.as_secs() / 60
        );
        if let Err(e) = self.sign_out_locked(&mut inner) {
            warn!("Inactivity sign-out could not clear the stored user: {}", e);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn session_over(storage: &MemoryStorage) -> Session {
        Session::restore(Arc::new(storage.clone()), SessionOptions::default())
    }

    fn sign_up_input(full_name: &str) -> SignUpInput {
        SignUpInput {
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
            full_name: full_name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_with_blank_name_stays_signed_out() {
        let storage = MemoryStorage::new();
        let session = session_over(&storage);

        match session.sign_up(sign_up_input("  ")) {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("full_name")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(session.state(), SessionState::SignedOut);
        assert!(!session.is_timeout_armed());
        assert!(storage.get(USER_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_persists_and_arms() {
        let storage = MemoryStorage::new();
        let session = session_over(&storage);

        let user = session.sign_up(sign_up_input("Ada Lovelace")).unwrap();
        assert_eq!(session.current_user(), Some(user.clone()));
        assert!(session.is_timeout_armed());

        let reloaded = session_over(&storage);
        assert_eq!(reloaded.state(), SessionState::SignedIn(user));
        assert!(!reloaded.is_timeout_armed());
    }

    #[tokio::test]
    async fn test_failed_persist_does_not_sign_in() {
        let storage = MemoryStorage::with_quota(10);
        let session = session_over(&storage);

        let result = session.sign_up(sign_up_input("Ada Lovelace"));
        assert!(matches!(result, Err(AppError::StorageError(_))));
        assert!(!session.is_signed_in());
        assert!(!session.is_timeout_armed());
    }

    #[tokio::test]
    async fn test_activity_requires_session() {
        let session = session_over(&MemoryStorage::new());
        assert!(matches!(
            session.record_activity(ActivityKind::KeyDown),
            Err(AppError::Unauthorized(_))
        ));
        assert!(!session.is_timeout_armed());
    }

    #[test]
    fn test_corrupt_user_record_restores_signed_out() {
        let storage = MemoryStorage::new();
        storage.set(USER_KEY, "{\"id\":").unwrap();
        assert_eq!(session_over(&storage).state(), SessionState::SignedOut);
    }

    #[test]
    fn test_activity_kind_wire_names() {
        let kind: ActivityKind = serde_json::from_str("\"pointer_move\"").unwrap();
        assert_eq!(kind, ActivityKind::PointerMove);
    }
}
