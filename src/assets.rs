//! Image asset readiness
//!
//! Images load asynchronously; the renderer polls `AssetState` every frame
//! and draws a placeholder until an image is `Ready`.

/// The two images the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    /// Falling object face
    Drop,
    /// Catcher card
    Catcher,
}

impl AssetId {
    pub const ALL: [AssetId; 2] = [AssetId::Drop, AssetId::Catcher];

    /// Path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            AssetId::Drop => "assets/A.jpeg",
            AssetId::Catcher => "assets/B.jpeg",
        }
    }
}

/// Load state of one image
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AssetState {
    #[default]
    Loading,
    /// Natural pixel size of the decoded image
    Ready { width: f32, height: f32 },
    Failed,
}

impl AssetState {
    /// Natural size if the image can be drawn
    pub fn size(&self) -> Option<(f32, f32)> {
        match *self {
            AssetState::Ready { width, height } if width > 0.0 && height > 0.0 => Some((width, height)),
            _ => None,
        }
    }
}

/// Readiness of every asset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetSet {
    pub drop: AssetState,
    pub catcher: AssetState,
}

impl AssetSet {
    pub fn get(&self, id: AssetId) -> AssetState {
        match id {
            AssetId::Drop => self.drop,
            AssetId::Catcher => self.catcher,
        }
    }

    pub fn set(&mut self, id: AssetId, state: AssetState) {
        match id {
            AssetId::Drop => self.drop = state,
            AssetId::Catcher => self.catcher = state,
        }
    }

    /// A decoded image with zero size counts as failed
    pub fn mark_loaded(&mut self, id: AssetId, width: f32, height: f32) {
        let state = if width > 0.0 && height > 0.0 {
            AssetState::Ready { width, height }
        } else {
            AssetState::Failed
        };
        self.set(id, state);
    }

    pub fn all_ready(&self) -> bool {
        AssetId::ALL.iter().all(|id| self.get(*id).size().is_some())
    }
}

/// Browser image loading
#[cfg(target_arch = "wasm32")]
pub mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlImageElement;

    use super::AssetId;

    /// Start loading `id`; `on_done` runs once with the natural size on
    /// success or `None` on error.
    pub fn load_image<F>(id: AssetId, on_done: F) -> Result<HtmlImageElement, JsValue>
    where
        F: Fn(AssetId, Option<(f32, f32)>) + 'static,
    {
        let img = HtmlImageElement::new()?;
        let on_done = std::rc::Rc::new(on_done);

        {
            let img_clone = img.clone();
            let on_done = on_done.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let size = (
                    img_clone.natural_width() as f32,
                    img_clone.natural_height() as f32,
                );
                log::info!("Loaded {} ({}x{})", id.path(), size.0, size.1);
                (*on_done)(id, Some(size));
            });
            img.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::warn!("Failed to load {}", id.path());
                (*on_done)(id, None);
            });
            img.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        img.set_src(id.path());
        Ok(img)
    }
}
