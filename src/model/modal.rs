//! Modal stack for managing overlays
//!
//! Only the top modal receives input; modals are drawn bottom to top.

/// Represents a modal overlay that can be displayed on top of the table
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Edit dialog for one record
    EditRecord { id: String },
    /// Help dialog showing all keyboard shortcuts
    Help,
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drop every edit dialog, wherever it sits in the stack
    pub fn remove_edit(&mut self) {
        self.stack.retain(|m| !matches!(m, Modal::EditRecord { .. }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::EditRecord { id: "1".into() });
        stack.push(Modal::Help);

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::EditRecord { id: "1".into() }));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_remove_edit_keeps_other_modals() {
        let mut stack = ModalStack::new();
        stack.push(Modal::EditRecord { id: "1".into() });
        stack.push(Modal::QuitConfirm);

        stack.remove_edit();

        assert_eq!(stack.top(), Some(&Modal::QuitConfirm));
        stack.pop();
        assert!(stack.is_empty());
    }
}
