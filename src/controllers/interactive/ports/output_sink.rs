/// Consumer-side wakeup channel.
///
/// `notify` carries no payload: it only tells the consumer that
/// `get_output()` has a fresher frame. The engine debounces it - while a
/// notification is pending (not yet drained by `get_output`), further
/// publications overwrite the frame without notifying again. Implementations
/// must not call back into the engine from `notify` on the engine's own
/// worker threads beyond `get_output`, and should return quickly.
pub trait OutputSink: Send + Sync {
    fn notify(&self);
}
