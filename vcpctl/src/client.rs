use crate::registry::MonitorHandle;
use crate::{DisplayChannelProvider, Error, Result, VcpReply};

/// Single get/set exchanges against one acquired monitor.
///
/// No retries and no read-back after a set; callers that need confirmation
/// issue a [`get`](FeatureClient::get) themselves.
pub struct FeatureClient<'a, P: DisplayChannelProvider> {
    provider: &'a mut P,
    monitor: &'a mut MonitorHandle<P::Handle>,
}

impl<'a, P: DisplayChannelProvider> FeatureClient<'a, P> {
    pub fn new(provider: &'a mut P, monitor: &'a mut MonitorHandle<P::Handle>) -> Self {
        Self { provider, monitor }
    }

    pub fn description(&self) -> &str {
        self.monitor.description()
    }

    pub fn get(&mut self, code: u8) -> Result<VcpReply> {
        let reply = self
            .provider
            .get_feature(self.monitor.raw_mut(), code)
            .ok_or(Error::UnsupportedFeature { code })?;
        log::debug!(
            "get {:#04x} on '{}': current={} max={}",
            code,
            self.monitor.description(),
            reply.current,
            reply.maximum
        );
        if !reply.is_well_formed() {
            log::warn!(
                "'{}' reported {:#04x} current={} above max={}, treating device as unreliable",
                self.monitor.description(),
                code,
                reply.current,
                reply.maximum
            );
        }
        Ok(reply)
    }

    pub fn set(&mut self, code: u8, value: u16) -> Result<()> {
        if self
            .provider
            .set_feature(self.monitor.raw_mut(), code, value)
        {
            log::debug!(
                "set {:#04x}={} on '{}'",
                code,
                value,
                self.monitor.description()
            );
            Ok(())
        } else {
            Err(Error::SetFailed {
                code,
                value,
                reason: self.provider.last_error(),
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fake::{fake, Call, FakeMonitor};
    use crate::MonitorRegistry;

    #[test]
    fn get_unimplemented_code_is_unsupported() {
        let (provider, _, _) = fake(vec![FakeMonitor::new("a").with_feature(0x10, 30, 100)]);
        let mut registry = MonitorRegistry::new(provider);
        let result = registry.with_monitor(0, |client| client.get(0x12));
        assert_eq!(result, Err(Error::UnsupportedFeature { code: 0x12 }));
    }

    #[test]
    fn failed_set_carries_last_error() {
        let (provider, _, bus) = fake(vec![FakeMonitor::new("a")
            .with_feature(0x10, 30, 100)
            .rejecting(0x10)]);
        let mut registry = MonitorRegistry::new(provider);
        let err = registry
            .with_monitor(0, |client| client.set(0x10, 40))
            .unwrap_err();
        match err {
            Error::SetFailed {
                code,
                value,
                reason,
            } => {
                assert_eq!((code, value), (0x10, 40));
                assert!(reason.contains("refused"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        // exactly one attempt, no retry
        assert_eq!(bus.borrow().count(|c| matches!(c, Call::Set { .. })), 1);
        assert_eq!(bus.borrow().current(0, 0x10), Some(30));
    }

    #[test]
    fn malformed_reply_is_passed_through() {
        let (provider, _, _) = fake(vec![FakeMonitor::new("a").with_feature(0x10, 150, 100)]);
        let mut registry = MonitorRegistry::new(provider);
        let reply = registry.with_monitor(0, |client| client.get(0x10)).unwrap();
        assert_eq!(reply.current, 150);
        assert!(!reply.is_well_formed());
    }
}
