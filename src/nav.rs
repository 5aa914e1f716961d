//! Screen navigation as an explicit stack.
//!
//! Views never touch a global navigator; they ask the [`Navigator`] to
//! push or pop, and rendering dispatches on [`Navigator::current`].

/// A renderable full-page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Title bar plus the "Карточки" button.
    Home,
    /// Flashcard review screen. Not built yet, reachable as a stub.
    Cards,
}

/// Ordered history of visited screens; the top is the visible screen.
///
/// The stack is seeded with [`Screen::Home`] and is never empty:
/// `push` only grows it and `back` refuses to pop the root.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Home],
        }
    }

    /// The screen currently at the top of the stack.
    pub fn current(&self) -> Screen {
        // The stack is non-empty by construction; Home is the fallback
        // only to avoid panicking machinery here.
        self.stack.last().copied().unwrap_or(Screen::Home)
    }

    /// Push a screen, making it the visible one.
    pub fn push(&mut self, screen: Screen) {
        self.stack.push(screen);
    }

    /// Pop the visible screen. No-op when only the root remains.
    pub fn back(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The full stack, bottom first.
    pub fn screens(&self) -> &[Screen] {
        &self.stack
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
