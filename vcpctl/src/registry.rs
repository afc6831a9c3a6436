use crate::client::FeatureClient;
use crate::{DisplayChannelProvider, Error, MonitorInfo, Result};

/// Physical monitor handle plus its description.
///
/// Not `Clone`: a handle goes back to the provider exactly once, through
/// [`MonitorRegistry::release`].
#[derive(Debug)]
pub struct MonitorHandle<H> {
    raw: H,
    description: String,
}

impl<H> MonitorHandle<H> {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn raw_mut(&mut self) -> &mut H {
        &mut self.raw
    }
}

/// Hands out monitor handles by position in a fresh enumeration.
///
/// Nothing is cached between calls; an index is only meaningful for the
/// enumeration it was resolved against.
pub struct MonitorRegistry<P> {
    provider: P,
}

impl<P: DisplayChannelProvider> MonitorRegistry<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn enumerate(&mut self) -> Vec<MonitorHandle<P::Handle>> {
        let handles: Vec<_> = self
            .provider
            .enumerate_physical_monitors()
            .into_iter()
            .map(|(raw, description)| MonitorHandle { raw, description })
            .collect();
        log::debug!("enumerated {} physical monitor(s)", handles.len());
        handles
    }

    /// Release failures are logged only; the next enumeration starts over anyway.
    pub fn release(&mut self, handle: MonitorHandle<P::Handle>) {
        let MonitorHandle { raw, description } = handle;
        if !self.provider.destroy_physical_monitor(raw) {
            log::warn!(
                "failed to release monitor '{}': {}",
                description,
                self.provider.last_error()
            );
        }
    }

    pub fn acquire(&mut self, index: usize) -> Result<MonitorHandle<P::Handle>> {
        let handles = self.enumerate();
        let count = handles.len();
        let mut selected = None;
        for (i, handle) in handles.into_iter().enumerate() {
            if i == index {
                selected = Some(handle);
            } else {
                self.release(handle);
            }
        }
        selected.ok_or(Error::MonitorNotFound { index, count })
    }

    pub fn list(&mut self) -> Vec<MonitorInfo> {
        let handles = self.enumerate();
        let mut infos = Vec::with_capacity(handles.len());
        for (index, handle) in handles.into_iter().enumerate() {
            infos.push(MonitorInfo {
                index,
                description: handle.description.clone(),
            });
            self.release(handle);
        }
        infos
    }

    /// Runs `op` against the monitor at `index` and releases the handle
    /// afterwards, whatever `op` returned.
    pub fn with_monitor<T, F>(&mut self, index: usize, op: F) -> Result<T>
    where
        F: FnOnce(&mut FeatureClient<'_, P>) -> Result<T>,
    {
        let mut handle = self.acquire(index)?;
        let result = {
            let mut client = FeatureClient::new(&mut self.provider, &mut handle);
            op(&mut client)
        };
        self.release(handle);
        result
    }
}
