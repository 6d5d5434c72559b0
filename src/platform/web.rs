//! DOM frontend: one absolutely positioned `div` per entity
//!
//! The page provides `#game-container`; CSS gives `.player`, `.coin` and
//! `.rock` their looks.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::audio::AudioManager;
use crate::frontend::{Frontend, FrontendError, Sound};
use crate::sim::{EntityId, EntityKind};

pub struct DomFrontend {
    document: Document,
    container: HtmlElement,
    elements: HashMap<EntityId, HtmlElement>,
    audio: AudioManager,
}

impl DomFrontend {
    /// Attach to the element with id `container_id`
    pub fn new(container_id: &str) -> Result<Self, FrontendError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| FrontendError::Dom("no document".to_string()))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| FrontendError::Dom(format!("#{} not found", container_id)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| FrontendError::Dom(format!("#{} is not an HTML element", container_id)))?;

        Ok(Self {
            document,
            container,
            elements: HashMap::new(),
            audio: AudioManager::new(),
        })
    }

    fn class_for(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Character => "player",
            EntityKind::Coin => "coin",
            EntityKind::Rock => "rock",
        }
    }

    fn create(&self, id: EntityId) -> Result<HtmlElement, FrontendError> {
        let el = self
            .document
            .create_element("div")
            .map_err(|e| FrontendError::Dom(format!("{:?}", e)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| FrontendError::Dom("div is not an HTML element".to_string()))?;
        el.set_class_name(Self::class_for(id.kind));
        self.container
            .append_child(&el)
            .map_err(|e| FrontendError::Dom(format!("{:?}", e)))?;
        Ok(el)
    }

    fn element(&mut self, id: EntityId) -> Result<&HtmlElement, FrontendError> {
        if !self.elements.contains_key(&id) {
            let el = self.create(id)?;
            self.elements.insert(id, el);
        }
        self.elements
            .get(&id)
            .ok_or_else(|| FrontendError::Dom("element vanished".to_string()))
    }
}

impl Frontend for DomFrontend {
    fn render_position(&mut self, id: EntityId, pos: Vec2) {
        let el = match self.element(id) {
            Ok(el) => el,
            Err(e) => {
                log::warn!("Cannot draw {:?}: {}", id, e);
                return;
            }
        };
        let style = el.style();
        let _ = style.set_property("left", &format!("{}px", pos.x));
        let _ = style.set_property("top", &format!("{}px", pos.y));
    }

    fn remove_entity(&mut self, id: EntityId) {
        if let Some(el) = self.elements.remove(&id) {
            el.remove();
        }
    }

    fn play_sound(&mut self, sound: Sound) -> Result<(), FrontendError> {
        self.audio.play(sound)
    }

    fn notify(&mut self, message: &str) {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_err() {
                log::warn!("alert failed: {}", message);
            }
        }
    }
}
