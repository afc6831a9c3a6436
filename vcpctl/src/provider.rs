use crate::VcpReply;

/// Host side of the DDC/CI channel.
///
/// Every call is a single blocking exchange. Implementations must not retry;
/// a failed exchange is reported once and its diagnostic is available from
/// [`last_error`](DisplayChannelProvider::last_error) until the next call.
pub trait DisplayChannelProvider {
    /// Opaque physical monitor handle. Must be released through
    /// [`destroy_physical_monitor`](DisplayChannelProvider::destroy_physical_monitor).
    type Handle;

    /// Fresh list of physical monitors with their descriptions. May be empty.
    fn enumerate_physical_monitors(&mut self) -> Vec<(Self::Handle, String)>;

    fn destroy_physical_monitor(&mut self, handle: Self::Handle) -> bool;

    /// Returns whether the exchange succeeded.
    fn set_feature(&mut self, handle: &mut Self::Handle, code: u8, value: u16) -> bool;

    /// `None` when the exchange failed, which includes unimplemented codes.
    fn get_feature(&mut self, handle: &mut Self::Handle, code: u8) -> Option<VcpReply>;

    fn last_error(&self) -> String;
}

/// Longest description a provider hands out.
pub const MAX_DESCRIPTION_LEN: usize = 128;

pub fn truncate_description(description: &str) -> String {
    description.chars().take(MAX_DESCRIPTION_LEN).collect()
}
