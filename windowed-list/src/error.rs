/// Errors raised when a window is configured with values the engine cannot work with.
///
/// These are reported when options are constructed or updated, never from inside a scroll
/// update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The shared item extent must be greater than zero.
    #[error("item extent must be greater than zero")]
    ZeroItemExtent,
    /// The initial viewport extent must be greater than zero.
    #[error("viewport extent must be greater than zero")]
    ZeroViewportExtent,
}
