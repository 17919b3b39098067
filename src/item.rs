use std::any::Any;
use std::fmt;

use crossterm::event::KeyEvent;

use crate::error::Result;
use crate::menu::Menu;
use crate::surface::Surface;

/// Everything a key handler can reach while it runs.
pub struct KeyPress<'a> {
    /// The menu the key was pressed in. Handlers may change its selection,
    /// flags and labels; adding or removing items is unsupported.
    pub menu: &'a mut Menu,
    /// The surface the menu is showing on, for nested `show()` calls.
    pub surface: &'a mut dyn Surface,
    pub key: KeyEvent,
}

pub type KeyHandler = Box<dyn FnMut(&mut KeyPress<'_>) -> Result<()>>;

/// The text an item displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Text(String),
    /// Rendered as `"caption: value"`.
    Value { caption: String, value: i64 },
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Text(text) => f.write_str(text),
            Label::Value { caption, value } => write!(f, "{}: {}", caption, value),
        }
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::Text(text.to_string())
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Label::Text(text)
    }
}

pub struct MenuItem {
    pub label: Label,
    pub(crate) handler: Option<KeyHandler>,
    value: Option<Box<dyn Any>>,
}

impl MenuItem {
    pub fn new(label: impl Into<Label>) -> Self {
        Self {
            label: label.into(),
            handler: None,
            value: None,
        }
    }

    pub fn valued(caption: impl Into<String>, value: i64) -> Self {
        Self::new(Label::Value {
            caption: caption.into(),
            value,
        })
    }

    /// Registers the handler fired for keys navigation does not consume,
    /// replacing any previous one.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&mut KeyPress<'_>) -> Result<()> + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Attaches a host payload; the menu never looks at it.
    pub fn with_value<T: Any>(mut self, value: T) -> Self {
        self.value = Some(Box::new(value));
        self
    }

    pub fn display(&self) -> String {
        self.label.to_string()
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub fn value_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_ref()?.downcast_ref()
    }

    pub fn value_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.as_mut()?.downcast_mut()
    }

    pub fn take_value(&mut self) -> Option<Box<dyn Any>> {
        self.value.take()
    }

    /// Updates the number shown by a [`Label::Value`] item.
    pub fn set_number(&mut self, number: i64) {
        if let Label::Value { value, .. } = &mut self.label {
            *value = number;
        }
    }

    pub fn number(&self) -> Option<i64> {
        match self.label {
            Label::Value { value, .. } => Some(value),
            Label::Text(_) => None,
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("handler", &self.handler.is_some())
            .field("value", &self.value.is_some())
            .finish()
    }
}
