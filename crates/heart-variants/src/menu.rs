//! Widget records handed to the host's options menu.
//!
//! The host renders these and routes input back through `press`, `toggle`
//! and `select`. Variants keep only weak handles to the widgets they create,
//! so a reset can relabel a live menu without keeping a closed one alive.

use heart_core::AudioSink;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Numeric-entry dialog request.
pub struct NumberEntry {
    pub initial: f64,
    pub max_digits: usize,
    pub allow_decimal: bool,
    pub allow_negative: bool,
    pub on_commit: Box<dyn FnOnce(f64) + Send>,
}

/// Free-text entry dialog request.
pub struct TextEntry {
    pub initial: String,
    pub on_commit: Box<dyn FnOnce(String) + Send>,
}

/// What a pressed widget may ask of the host: sounds and entry dialogs.
pub trait MenuHost: AudioSink {
    fn number_entry(&self, entry: NumberEntry);
    fn text_entry(&self, entry: TextEntry);
}

type PressFn = Box<dyn Fn(&dyn MenuHost) + Send + Sync>;

/// A labelled button.
pub struct Button {
    label: Mutex<String>,
    on_press: Option<PressFn>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Mutex::new(label.into()),
            on_press: None,
        }
    }

    pub fn pressed(mut self, f: impl Fn(&dyn MenuHost) + Send + Sync + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    pub fn label(&self) -> String {
        self.label.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn set_label(&self, label: impl Into<String>) {
        if let Ok(mut l) = self.label.lock() {
            *l = label.into();
        }
    }

    pub fn press(&self, host: &dyn MenuHost) {
        if let Some(f) = &self.on_press {
            f(host);
        }
    }
}

type ToggleFn = Box<dyn Fn(bool) + Send + Sync>;

/// An on/off toggle. Index 0 is off, 1 is on.
pub struct OnOff {
    pub label: String,
    index: AtomicUsize,
    on_change: Option<ToggleFn>,
}

impl OnOff {
    pub fn new(label: impl Into<String>, on: bool) -> Self {
        Self {
            label: label.into(),
            index: AtomicUsize::new(on as usize),
            on_change: None,
        }
    }

    pub fn change(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn index(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    pub fn is_on(&self) -> bool {
        self.index() == 1
    }

    /// Set the displayed state without firing the change callback.
    pub fn set_index(&self, index: usize) {
        self.index.store(index.min(1), Ordering::Relaxed);
    }

    /// Flip the state as if the player clicked it.
    pub fn toggle(&self) {
        let on = !self.is_on();
        self.set_index(on as usize);
        if let Some(f) = &self.on_change {
            f(on);
        }
    }
}

type SelectFn = Box<dyn Fn(usize) + Send + Sync>;

/// A horizontal selector over a fixed list of value names.
pub struct Slider {
    pub label: String,
    values: Vec<String>,
    index: AtomicUsize,
    previous_index: AtomicUsize,
    on_change: Option<SelectFn>,
}

impl Slider {
    pub fn new(label: impl Into<String>, values: Vec<String>, index: usize) -> Self {
        Self {
            label: label.into(),
            values,
            index: AtomicUsize::new(index),
            previous_index: AtomicUsize::new(index),
            on_change: None,
        }
    }

    pub fn change(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn index(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    pub fn previous_index(&self) -> usize {
        self.previous_index.load(Ordering::Relaxed)
    }

    /// Name shown for the current index.
    pub fn value_name(&self) -> &str {
        self.values.get(self.index()).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Move the displayed index without firing the change callback.
    pub fn set_index(&self, index: usize) {
        let prev = self.index.swap(index, Ordering::Relaxed);
        self.previous_index.store(prev, Ordering::Relaxed);
    }

    /// Select an index as if the player scrolled to it. Out-of-range
    /// indices are ignored.
    pub fn select(&self, index: usize) {
        if index >= self.values.len() {
            return;
        }
        self.set_index(index);
        if let Some(f) = &self.on_change {
            f(index);
        }
    }
}

/// One row of a menu.
pub enum MenuItem {
    SubHeader(String),
    Button(Arc<Button>),
    OnOff(Arc<OnOff>),
    Slider(Arc<Slider>),
}

impl MenuItem {
    /// Text the row currently displays.
    pub fn display(&self) -> String {
        match self {
            MenuItem::SubHeader(title) => title.clone(),
            MenuItem::Button(b) => b.label(),
            MenuItem::OnOff(t) => format!("{}: {}", t.label, if t.is_on() { "ON" } else { "OFF" }),
            MenuItem::Slider(s) => format!("{}: {}", s.label, s.value_name()),
        }
    }
}

/// An ordered list of menu rows.
#[derive(Default)]
pub struct TextMenu {
    items: Vec<MenuItem>,
}

impl TextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sub_header(&mut self, title: impl Into<String>) {
        self.items.push(MenuItem::SubHeader(title.into()));
    }

    pub fn add_button(&mut self, button: Button) -> Arc<Button> {
        let button = Arc::new(button);
        self.items.push(MenuItem::Button(button.clone()));
        button
    }

    pub fn add_on_off(&mut self, toggle: OnOff) -> Arc<OnOff> {
        let toggle = Arc::new(toggle);
        self.items.push(MenuItem::OnOff(toggle.clone()));
        toggle
    }

    pub fn add_slider(&mut self, slider: Slider) -> Arc<Slider> {
        let slider = Arc::new(slider);
        self.items.push(MenuItem::Slider(slider.clone()));
        slider
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First button whose label starts with `prefix`.
    pub fn find_button(&self, prefix: &str) -> Option<Arc<Button>> {
        self.items.iter().find_map(|item| match item {
            MenuItem::Button(b) if b.label().starts_with(prefix) => Some(b.clone()),
            _ => None,
        })
    }

    pub fn find_on_off(&self, label: &str) -> Option<Arc<OnOff>> {
        self.items.iter().find_map(|item| match item {
            MenuItem::OnOff(t) if t.label == label => Some(t.clone()),
            _ => None,
        })
    }

    pub fn find_slider(&self, label: &str) -> Option<Arc<Slider>> {
        self.items.iter().find_map(|item| match item {
            MenuItem::Slider(s) if s.label == label => Some(s.clone()),
            _ => None,
        })
    }
}
