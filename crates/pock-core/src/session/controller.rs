use tracing::{error, info, warn};

use super::errors::SessionError;
use super::traits::PresentationHost;
use super::types::{Session, SessionId};

/// Owns the one live presentation session.
///
/// All mutation goes through `&mut self`, so no caller can observe a state
/// with zero or two current sessions in the middle of a reload, and no
/// `&Session` handed out by [`current_session`](Self::current_session) can
/// survive the next reload.
pub struct SessionController {
    host: Box<dyn PresentationHost>,
    current: Option<Session>,
    last_id: u64,
}

impl SessionController {
    pub fn new(host: Box<dyn PresentationHost>) -> Self {
        Self {
            host,
            current: None,
            last_id: 0,
        }
    }

    /// Dismiss the live session (if any), then build and publish a new one.
    ///
    /// Always performs the full cycle, even with nothing changed since the
    /// previous call. On construction failure no session is current and the
    /// previous one stays dismissed.
    pub fn reload(&mut self) -> Result<SessionId, SessionError> {
        info!(
            event = "core.session.reload_started",
            host = self.host.name(),
            previous = ?self.current.as_ref().map(Session::id),
        );

        self.dismiss_current();

        let provider = match self.host.create_root_content_provider() {
            Ok(provider) => provider,
            Err(e) => {
                error!(
                    event = "core.session.reload_failed",
                    host = self.host.name(),
                    error = %e,
                );
                return Err(e);
            }
        };

        self.last_id += 1;
        let session = Session::new(SessionId::new(self.last_id), provider);
        let id = session.id();

        info!(
            event = "core.session.reload_completed",
            session_id = %id,
            provider = %session.provider().describe(),
        );

        self.current = Some(session);
        Ok(id)
    }

    /// Teardown path: dismiss the live session, leaving none current.
    pub fn dismiss_all(&mut self) -> Option<SessionId> {
        let dismissed = self.dismiss_current();
        info!(
            event = "core.session.dismiss_all_completed",
            dismissed = ?dismissed,
        );
        dismissed
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Open customization on the live session's root provider.
    pub fn open_customization(&self) -> Result<(), SessionError> {
        let Some(session) = self.current.as_ref() else {
            warn!(
                event = "core.session.customize_skipped",
                reason = "no live session",
            );
            return Err(SessionError::NoLiveSession);
        };

        info!(
            event = "core.session.customize_started",
            session_id = %session.id(),
        );
        session.provider().open_customization()
    }

    fn dismiss_current(&mut self) -> Option<SessionId> {
        let mut previous = self.current.take()?;
        previous.dismiss();
        info!(
            event = "core.session.dismiss_completed",
            session_id = %previous.id(),
        );
        Some(previous.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::traits::ContentProvider;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Shared record of what the host and its providers did, in order.
    #[derive(Default)]
    struct HostLog {
        events: Mutex<Vec<String>>,
        live: AtomicUsize,
        max_live: AtomicUsize,
        built: AtomicUsize,
        customized: AtomicUsize,
    }

    impl HostLog {
        fn push(&self, entry: String) {
            self.events.lock().unwrap().push(entry);
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    struct RecordingProvider {
        serial: usize,
        log: Arc<HostLog>,
    }

    impl ContentProvider for RecordingProvider {
        fn describe(&self) -> String {
            format!("provider-{}", self.serial)
        }

        fn widget_ids(&self) -> Vec<String> {
            vec!["dock".to_string(), "status".to_string()]
        }

        fn dismiss(&mut self) {
            self.log.live.fetch_sub(1, Ordering::SeqCst);
            self.log.push(format!("dismiss provider-{}", self.serial));
        }

        fn open_customization(&self) -> Result<(), SessionError> {
            self.log.customized.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct RecordingHost {
        log: Arc<HostLog>,
        fail: Arc<AtomicBool>,
    }

    impl PresentationHost for RecordingHost {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn create_root_content_provider(
            &mut self,
        ) -> Result<Box<dyn ContentProvider>, SessionError> {
            if self.fail.load(Ordering::SeqCst) {
                self.log.push("create failed".to_string());
                return Err(SessionError::ProviderConstructionFailed {
                    message: "layout missing".to_string(),
                });
            }
            let serial = self.log.built.fetch_add(1, Ordering::SeqCst) + 1;
            let live = self.log.live.fetch_add(1, Ordering::SeqCst) + 1;
            self.log.max_live.fetch_max(live, Ordering::SeqCst);
            self.log.push(format!("create provider-{}", serial));
            Ok(Box::new(RecordingProvider {
                serial,
                log: self.log.clone(),
            }))
        }
    }

    fn controller() -> (SessionController, Arc<HostLog>, Arc<AtomicBool>) {
        let log = Arc::new(HostLog::default());
        let fail = Arc::new(AtomicBool::new(false));
        let host = RecordingHost {
            log: log.clone(),
            fail: fail.clone(),
        };
        (SessionController::new(Box::new(host)), log, fail)
    }

    #[test]
    fn test_no_session_before_first_reload() {
        let (controller, _, _) = controller();
        assert!(controller.current_session().is_none());
    }

    #[test]
    fn test_reload_publishes_live_session() {
        let (mut controller, _, _) = controller();
        let id = controller.reload().unwrap();

        let session = controller.current_session().unwrap();
        assert_eq!(session.id(), id);
        assert!(session.is_live());
    }

    #[test]
    fn test_ids_strictly_increase() {
        let (mut controller, _, _) = controller();
        let mut previous = None;
        for _ in 0..5 {
            let id = controller.reload().unwrap();
            assert_eq!(controller.current_session().map(Session::id), Some(id));
            if let Some(prev) = previous {
                assert!(id > prev);
            }
            previous = Some(id);
        }
    }

    #[test]
    fn test_reload_dismisses_before_creating() {
        let (mut controller, log, _) = controller();
        controller.reload().unwrap();
        controller.reload().unwrap();
        controller.reload().unwrap();

        assert_eq!(
            log.events(),
            vec![
                "create provider-1",
                "dismiss provider-1",
                "create provider-2",
                "dismiss provider-2",
                "create provider-3",
            ]
        );
        assert_eq!(log.max_live.load(Ordering::SeqCst), 1);
        assert_eq!(log.live.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_two_reloads_advance_id_by_two_with_fresh_provider() {
        let (mut controller, _, _) = controller();
        let first = controller.reload().unwrap();
        let original = controller.current_session().unwrap().provider().describe();

        controller.reload().unwrap();
        let last = controller.reload().unwrap();

        assert_eq!(last.get(), first.get() + 2);
        let current = controller.current_session().unwrap().provider().describe();
        assert_ne!(current, original);
        assert_eq!(current, "provider-3");
    }

    #[test]
    fn test_failed_reload_leaves_no_session() {
        let (mut controller, log, fail) = controller();
        controller.reload().unwrap();

        fail.store(true, Ordering::SeqCst);
        let err = controller.reload().unwrap_err();

        assert!(matches!(err, SessionError::ProviderConstructionFailed { .. }));
        assert!(controller.current_session().is_none());
        assert_eq!(log.live.load(Ordering::SeqCst), 0);
        assert_eq!(log.events(), vec!["create provider-1", "dismiss provider-1", "create failed"]);
    }

    #[test]
    fn test_failed_reload_is_not_retried_and_next_reload_recovers() {
        let (mut controller, log, fail) = controller();
        fail.store(true, Ordering::SeqCst);
        assert!(controller.reload().is_err());
        assert_eq!(log.events().len(), 1);

        fail.store(false, Ordering::SeqCst);
        let id = controller.reload().unwrap();
        assert_eq!(id, SessionId::new(1));
        assert!(controller.current_session().is_some());
    }

    #[test]
    fn test_dismiss_all_clears_current() {
        let (mut controller, log, _) = controller();
        let id = controller.reload().unwrap();

        assert_eq!(controller.dismiss_all(), Some(id));
        assert!(controller.current_session().is_none());
        assert_eq!(log.live.load(Ordering::SeqCst), 0);

        assert_eq!(controller.dismiss_all(), None);
    }

    #[test]
    fn test_reload_after_dismiss_all() {
        let (mut controller, _, _) = controller();
        controller.reload().unwrap();
        controller.dismiss_all();
        let id = controller.reload().unwrap();
        assert_eq!(id, SessionId::new(2));
    }

    #[test]
    fn test_open_customization_without_session() {
        let (controller, _, _) = controller();
        assert!(matches!(
            controller.open_customization(),
            Err(SessionError::NoLiveSession)
        ));
    }

    #[test]
    fn test_open_customization_forwards_to_provider() {
        let (mut controller, log, _) = controller();
        controller.reload().unwrap();
        controller.open_customization().unwrap();
        assert_eq!(log.customized.load(Ordering::SeqCst), 1);
    }
}
