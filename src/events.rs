//! Typed publish/subscribe for window, mouse and keyboard input.
//!
//! Each event category has its own [`EventDispatcher`]. Listeners subscribe to
//! one event *kind* and are called in registration order. A listener returns
//! `true` to mark the event handled, which stops delivery to the listeners
//! registered after it.
//!
//! The three dispatchers are grouped in an [`EventBus`] that the renderer owns
//! and lends out by `&mut` to anything that wants to subscribe. Listeners are
//! `'static` closures; components that need to react to an event share state
//! with their listener through `Rc<Cell<_>>` or `Rc<RefCell<_>>`.

use std::collections::HashMap;
use std::hash::Hash;

/// An event that can be routed by kind.
pub trait Event {
    type Kind: Copy + Eq + Hash;

    fn kind(&self) -> Self::Kind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// New client area size in pixels.
    Resize { width: i32, height: i32 },
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    Resize,
    Close,
}

impl Event for WindowEvent {
    type Kind = WindowEventKind;

    fn kind(&self) -> WindowEventKind {
        match self {
            WindowEvent::Resize { .. } => WindowEventKind::Resize,
            WindowEvent::Close => WindowEventKind::Close,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    /// Cursor position in window coordinates.
    Moved { x: i32, y: i32 },
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Moved,
    ButtonDown,
    ButtonUp,
}

impl Event for MouseEvent {
    type Kind = MouseEventKind;

    fn kind(&self) -> MouseEventKind {
        match self {
            MouseEvent::Moved { .. } => MouseEventKind::Moved,
            MouseEvent::ButtonDown(_) => MouseEventKind::ButtonDown,
            MouseEvent::ButtonUp(_) => MouseEventKind::ButtonUp,
        }
    }
}

/// Keys the renderer reacts to. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Down,
    Up,
}

impl Event for KeyEvent {
    type Kind = KeyEventKind;

    fn kind(&self) -> KeyEventKind {
        match self {
            KeyEvent::Down(_) => KeyEventKind::Down,
            KeyEvent::Up(_) => KeyEventKind::Up,
        }
    }
}

/// Any input event, as produced by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Window(WindowEvent),
    Mouse(MouseEvent),
    Key(KeyEvent),
}

impl From<WindowEvent> for InputEvent {
    fn from(e: WindowEvent) -> Self {
        InputEvent::Window(e)
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(e: MouseEvent) -> Self {
        InputEvent::Mouse(e)
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(e: KeyEvent) -> Self {
        InputEvent::Key(e)
    }
}

type Listener<E> = Box<dyn FnMut(&E) -> bool>;

/// Routes events of one category to the listeners of their kind.
pub struct EventDispatcher<E: Event> {
    listeners: HashMap<E::Kind, Vec<Listener<E>>>,
}

impl<E: Event> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }
}

impl<E: Event> EventDispatcher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `listener` to events of `kind`.
    pub fn add_listener(&mut self, kind: E::Kind, listener: impl FnMut(&E) -> bool + 'static) {
        self.listeners.entry(kind).or_default().push(Box::new(listener));
    }

    /// Delivers `event` to its listeners in registration order.
    ///
    /// Returns `true` if a listener marked the event handled.
    pub fn send(&mut self, event: &E) -> bool {
        let Some(listeners) = self.listeners.get_mut(&event.kind()) else {
            return false;
        };
        for listener in listeners.iter_mut() {
            if listener(event) {
                return true;
            }
        }
        false
    }

    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

/// The window, mouse and keyboard dispatchers.
#[derive(Default)]
pub struct EventBus {
    pub window: EventDispatcher<WindowEvent>,
    pub mouse: EventDispatcher<MouseEvent>,
    pub keyboard: EventDispatcher<KeyEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends an event through the dispatcher of its category.
    pub fn send(&mut self, event: impl Into<InputEvent>) -> bool {
        match event.into() {
            InputEvent::Window(e) => self.window.send(&e),
            InputEvent::Mouse(e) => self.mouse.send(&e),
            InputEvent::Key(e) => self.keyboard.send(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn listeners_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::<KeyEvent>::new();
        for id in 0..3 {
            let log = Rc::clone(&log);
            dispatcher.add_listener(KeyEventKind::Down, move |_| {
                log.borrow_mut().push(id);
                false
            });
        }

        assert!(!dispatcher.send(&KeyEvent::Down(Key::W)));
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn handled_event_stops_delivery() {
        let calls = Rc::new(Cell::new(0));
        let mut dispatcher = EventDispatcher::<WindowEvent>::new();
        dispatcher.add_listener(WindowEventKind::Close, |_| true);
        let seen = Rc::clone(&calls);
        dispatcher.add_listener(WindowEventKind::Close, move |_| {
            seen.set(seen.get() + 1);
            false
        });

        assert!(dispatcher.send(&WindowEvent::Close));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn events_only_reach_listeners_of_their_kind() {
        let size = Rc::new(Cell::new((0, 0)));
        let mut bus = EventBus::new();
        let slot = Rc::clone(&size);
        bus.window.add_listener(WindowEventKind::Resize, move |e| {
            if let WindowEvent::Resize { width, height } = *e {
                slot.set((width, height));
            }
            false
        });

        assert!(!bus.send(WindowEvent::Close));
        assert_eq!(size.get(), (0, 0));
        bus.send(WindowEvent::Resize {
            width: 320,
            height: 200,
        });
        assert_eq!(size.get(), (320, 200));
        assert_eq!(bus.window.listener_count(WindowEventKind::Resize), 1);
        assert_eq!(bus.mouse.listener_count(MouseEventKind::Moved), 0);
    }

    #[test]
    fn unsubscribed_kinds_are_dropped() {
        let mut bus = EventBus::new();
        assert!(!bus.send(MouseEvent::ButtonDown(MouseButton::Left)));
    }
}
