/// Implemented by screens that hold unsaved edits; gates page changes,
/// domain switches and logout.
pub trait DirtyOperations {
    fn is_dirty(&self) -> bool;
}

/// Confirmation dialog asked before an action that would discard pending
/// edits. The view layer provides the real implementation.
pub trait CancelDialog: Send + Sync {
    /// Returns true when the user agrees to discard the pending edits.
    fn confirm_discard(&self) -> bool;
}
