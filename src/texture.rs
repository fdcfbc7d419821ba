/// DELVE Project
/// `File` texture.rs
/// `Description` Texture registry implementation module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::asset::{AssetLoader, DecodedImage};

/// Texture identifier
pub type TextureId = u32;

bitflags::bitflags! {
    /// Texture property flags
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct TextureProperties: u32 {
        /// Frames are sliced along X and selected by the animation clock
        const ANIMATED = 1;
        /// States are sliced along Y and selected by cell state
        const STATEFUL = 2;
    }
}

/// Texture load state
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Error,
} // enum LoadState

/// Texture representation structure
#[derive(Clone, Debug)]
pub struct Texture {
    pub id: TextureId,
    /// Image source handle
    pub source: String,
    pub image_width: usize,
    pub image_height: usize,
    /// Single frame width
    pub width: usize,
    /// Single frame height
    pub height: usize,
    pub frames: usize,
    pub states: usize,
    pub properties: TextureProperties,
    state: LoadState,
    /// Decoded image, one 0xAARRGGBB value per pixel
    pixels: Vec<u32>,
} // struct Texture

impl Texture {
    fn new(id: TextureId, source: String, image_width: usize, image_height: usize, width: usize, height: usize, properties: TextureProperties) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        Self {
            id,
            source,
            image_width,
            image_height,
            width,
            height,
            frames: (image_width / width).max(1),
            states: (image_height / height).max(1),
            properties,
            state: LoadState::Unloaded,
            pixels: Vec::new(),
        }
    } // fn new

    /// Single frame texture construction function
    /// * `id` - texture id
    /// * `source` - image source
    /// * `width`, `height` - image size
    pub fn basic(id: TextureId, source: impl Into<String>, width: usize, height: usize) -> Self {
        Self::new(id, source.into(), width, height, width, height, TextureProperties::empty())
    } // fn basic

    /// Animated texture construction function
    /// * `width`, `height` - single frame size
    /// * `frames` - frame count, frames are laid out along X
    pub fn animated(id: TextureId, source: impl Into<String>, width: usize, height: usize, frames: usize) -> Self {
        Self::new(id, source.into(), width * frames, height, width, height, TextureProperties::ANIMATED)
    } // fn animated

    /// Stateful texture construction function
    /// * `width`, `height` - single state size
    /// * `states` - state count, states are laid out along Y
    pub fn stateful(id: TextureId, source: impl Into<String>, width: usize, height: usize, states: usize) -> Self {
        Self::new(id, source.into(), width, height * states, width, height, TextureProperties::STATEFUL)
    } // fn stateful

    /// Substitution texture for anything that is not loaded
    pub fn placeholder() -> Self {
        const SIZE: usize = 16;
        let mut texture = Self::basic(0, "<placeholder>", SIZE, SIZE);

        texture.pixels = (0..SIZE * SIZE)
            .map(|index| if ((index % SIZE) / 4 + (index / SIZE) / 4) % 2 == 0 { 0xFFFF00FF } else { 0xFF000000 })
            .collect();
        texture.state = LoadState::Loaded;
        texture
    } // fn placeholder

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    pub fn is_animated(&self) -> bool {
        self.properties.contains(TextureProperties::ANIMATED)
    }

    pub fn is_stateful(&self) -> bool {
        self.properties.contains(TextureProperties::STATEFUL)
    }

    /// Animation frame X offset getting function
    /// * `frame` - animation clock frame
    /// * Returns X offset of the frame column in the image, 0 for non-animated textures
    pub fn frame_offset(&self, frame: u32) -> usize {
        if self.is_animated() {
            (frame as usize % self.frames) * self.width
        } else {
            0
        }
    } // fn frame_offset

    /// State row Y offset getting function
    /// * `state` - cell state counter
    /// * Returns Y offset of the state row in the image, 0 for non-stateful textures
    pub fn state_offset(&self, state: u32) -> usize {
        if self.is_stateful() {
            (state as usize % self.states) * self.height
        } else {
            0
        }
    } // fn state_offset

    /// Image pixel getting function, coordinates wrap around image bounds
    /// * Returns 0xAARRGGBB pixel, transparent black if there is no image data
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        if self.pixels.is_empty() {
            return 0;
        }
        self.pixels[(y % self.image_height) * self.image_width + (x % self.image_width)]
    } // fn pixel

    /// Decoded image setting function, marks texture as loaded
    pub fn set_image(&mut self, image: DecodedImage) {
        self.apply_image(image);
        self.state = LoadState::Loaded;
    } // fn set_image

    /// Decoded image applying function. Images of different size are resampled to the declared one.
    fn apply_image(&mut self, image: DecodedImage) {
        let (dst_w, dst_h) = (self.image_width.max(1), self.image_height.max(1));
        let (src_w, src_h) = (image.width.max(1), image.height.max(1));

        if image.width != dst_w || image.height != dst_h {
            tracing::debug!(id = self.id, src_w, src_h, dst_w, dst_h, "resampling texture image");
        }

        let mut pixels = Vec::with_capacity(dst_w * dst_h);
        for y in 0..dst_h {
            let sy = y * src_h / dst_h;
            for x in 0..dst_w {
                let sx = x * src_w / dst_w;
                let offset = (sy * image.width + sx) * 4;
                pixels.push(match image.rgba.get(offset..offset + 4) {
                    Some(&[r, g, b, a]) => u32::from_be_bytes([a, r, g, b]),
                    _ => 0,
                });
            }
        }

        self.image_width = dst_w;
        self.image_height = dst_h;
        self.pixels = pixels;
    } // fn apply_image
} // impl Texture

/// Registry of every texture record, shared by id for the program lifetime
pub struct TextureRegistry {
    textures: RefCell<BTreeMap<TextureId, Texture>>,
    waiters: RefCell<Vec<Waker>>,
    placeholder: Texture,
} // struct TextureRegistry

impl TextureRegistry {
    /// Empty registry construction function
    pub fn new() -> Self {
        Self {
            textures: RefCell::new(BTreeMap::new()),
            waiters: RefCell::new(Vec::new()),
            placeholder: Texture::placeholder(),
        }
    } // fn new

    /// Registry from texture list construction function
    pub fn from_textures(textures: impl IntoIterator<Item = Texture>) -> Self {
        let registry = Self::new();
        for texture in textures {
            registry.register(texture);
        }
        registry
    } // fn from_textures

    /// Texture record registering function, replaces record with same id
    pub fn register(&self, texture: Texture) {
        self.textures.borrow_mut().insert(texture.id, texture);
    } // fn register

    /// Texture load state getting function
    /// * Returns None if no texture with such id is registered
    pub fn state(&self, id: TextureId) -> Option<LoadState> {
        self.textures.borrow().get(&id).map(Texture::state)
    } // fn state

    /// Read view getting function. View must be dropped before next load completes.
    pub fn view(&self) -> TextureView<'_> {
        TextureView {
            textures: self.textures.borrow(),
            placeholder: &self.placeholder,
        }
    } // fn view

    /// Texture loading function. Idempotent: loaded and failed textures resolve immediately,
    /// requests for a texture that is already loading wait for that decode instead of starting another.
    /// * `id` - texture to load
    /// * `loader` - asset loader to decode image with
    /// * Returns future resolving into final load state
    pub fn load_texture<L: AssetLoader + 'static>(self: &Rc<Self>, id: TextureId, loader: Rc<L>) -> impl Future<Output = LoadState> + 'static {
        let registry = Rc::clone(self);

        async move { registry.load(id, loader.as_ref()).await }
    } // fn load_texture

    async fn load<L: AssetLoader>(&self, id: TextureId, loader: &L) -> LoadState {
        loop {
            let source = {
                let mut textures = self.textures.borrow_mut();
                let Some(texture) = textures.get_mut(&id) else {
                    tracing::warn!(id, "load requested for unknown texture");
                    return LoadState::Error;
                };

                match texture.state {
                    LoadState::Loaded | LoadState::Error => return texture.state,
                    LoadState::Loading => None,
                    LoadState::Unloaded => {
                        texture.state = LoadState::Loading;
                        Some(texture.source.clone())
                    }
                }
            };

            match source {
                Some(source) => return self.decode(id, source, loader).await,
                // Decode owner may be dropped, state is checked again after wake
                None => LoadWait { registry: self, id }.await,
            }
        }
    } // fn load

    /// In-flight decode driving function, texture must already be marked Loading
    async fn decode<L: AssetLoader>(&self, id: TextureId, source: String, loader: &L) -> LoadState {
        let mut marker = InFlight { registry: self, id, released: false };

        tracing::debug!(id, source = %source, "texture decode started");
        let result = loader.decode(&source).await;

        let state = {
            let mut textures = self.textures.borrow_mut();
            match textures.get_mut(&id) {
                Some(texture) => {
                    match result {
                        Ok(image) => {
                            texture.set_image(image);
                            tracing::debug!(id, "texture loaded");
                        }
                        Err(err) => {
                            texture.state = LoadState::Error;
                            tracing::warn!(id, source = %source, error = %err, "texture load failed");
                        }
                    }
                    texture.state
                }
                None => LoadState::Error,
            }
        };

        marker.released = true;
        self.wake_waiters();

        state
    } // fn decode

    fn wake_waiters(&self) {
        let waiters = std::mem::take(&mut *self.waiters.borrow_mut());
        for waker in waiters {
            waker.wake();
        }
    } // fn wake_waiters
} // impl TextureRegistry

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Loading marker of a decode in progress. Dropping an unfinished decode
/// returns its texture to Unloaded so the next request starts it again.
struct InFlight<'a> {
    registry: &'a TextureRegistry,
    id: TextureId,
    released: bool,
} // struct InFlight

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        match self.registry.textures.try_borrow_mut() {
            Ok(mut textures) => {
                if let Some(texture) = textures.get_mut(&self.id).filter(|texture| texture.state == LoadState::Loading) {
                    texture.state = LoadState::Unloaded;
                    tracing::debug!(id = self.id, "texture decode abandoned");
                }
            }
            Err(_) => tracing::warn!(id = self.id, "abandoned texture decode left loading"),
        }

        self.registry.wake_waiters();
    }
} // impl Drop for InFlight

/// Future waiting for in-flight decode of some texture to finish or be abandoned
struct LoadWait<'a> {
    registry: &'a TextureRegistry,
    id: TextureId,
} // struct LoadWait

impl Future for LoadWait<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.registry.state(self.id) == Some(LoadState::Loading) {
            self.registry.waiters.borrow_mut().push(cx.waker().clone());
            Poll::Pending
        } else {
            Poll::Ready(())
        }
    }
} // impl Future for LoadWait

/// Per-frame read access to textures
pub struct TextureView<'a> {
    textures: Ref<'a, BTreeMap<TextureId, Texture>>,
    placeholder: &'a Texture,
} // struct TextureView

impl<'a> TextureView<'a> {
    /// Texture getting function
    /// * Returns loaded texture or placeholder if texture is unknown, not loaded yet or failed
    pub fn get(&self, id: TextureId) -> &Texture {
        match self.textures.get(&id) {
            Some(texture) if texture.is_loaded() => texture,
            _ => self.placeholder,
        }
    } // fn get
} // impl TextureView

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetError;
    use crate::util::tick_waker::tick_waker;
    use std::cell::Cell;

    /// Future that is pending exactly once
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();
        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    struct CountingLoader {
        decodes: Cell<usize>,
        fail: bool,
    }

    impl AssetLoader for CountingLoader {
        async fn decode(&self, _source: &str) -> Result<DecodedImage, AssetError> {
            self.decodes.set(self.decodes.get() + 1);
            YieldOnce(false).await;
            if self.fail {
                Err(AssetError::Io(std::io::Error::from(std::io::ErrorKind::NotFound)))
            } else {
                Ok(DecodedImage::solid(4, 4, [255, 0, 0, 255]))
            }
        }
    }

    fn poll<F: Future>(future: Pin<&mut F>) -> Poll<F::Output> {
        let waker = tick_waker();
        let mut cx = Context::from_waker(&waker);
        future.poll(&mut cx)
    }

    #[test]
    fn frame_and_state_counts_are_derived() {
        let animated = Texture::animated(1, "a.png", 16, 16, 8);
        let stateful = Texture::stateful(2, "s.png", 16, 16, 2);

        assert_eq!((animated.frames, animated.states), (8, 1));
        assert_eq!((stateful.frames, stateful.states), (1, 2));
        assert_eq!(animated.frame_offset(9), 16);
        assert_eq!(stateful.state_offset(3), 16);
        assert_eq!(stateful.frame_offset(5), 0);
    }

    #[test]
    fn concurrent_loads_decode_once() {
        let registry = Rc::new(TextureRegistry::from_textures([Texture::basic(1, "wall.png", 4, 4)]));
        let loader = Rc::new(CountingLoader { decodes: Cell::new(0), fail: false });

        let mut first = std::pin::pin!(registry.load_texture(1, Rc::clone(&loader)));
        let mut second = std::pin::pin!(registry.load_texture(1, Rc::clone(&loader)));

        assert!(poll(first.as_mut()).is_pending());
        assert_eq!(registry.state(1), Some(LoadState::Loading));
        assert!(poll(second.as_mut()).is_pending());

        assert_eq!(poll(first.as_mut()), Poll::Ready(LoadState::Loaded));
        assert_eq!(poll(second.as_mut()), Poll::Ready(LoadState::Loaded));
        assert_eq!(loader.decodes.get(), 1);
        assert_eq!(registry.view().get(1).pixel(0, 0), 0xFFFF0000);
    }

    #[test]
    fn abandoned_load_is_restarted() {
        let registry = Rc::new(TextureRegistry::from_textures([Texture::basic(1, "wall.png", 4, 4)]));
        let loader = Rc::new(CountingLoader { decodes: Cell::new(0), fail: false });

        let mut waiting = Box::pin(registry.load_texture(1, Rc::clone(&loader)));
        {
            let mut abandoned = Box::pin(registry.load_texture(1, Rc::clone(&loader)));
            assert!(poll(abandoned.as_mut()).is_pending());
            assert!(poll(waiting.as_mut()).is_pending());
        }
        assert_eq!(registry.state(1), Some(LoadState::Unloaded));

        // Waiting request takes the decode over
        assert!(poll(waiting.as_mut()).is_pending());
        assert_eq!(registry.state(1), Some(LoadState::Loading));
        assert_eq!(poll(waiting.as_mut()), Poll::Ready(LoadState::Loaded));
        assert_eq!(loader.decodes.get(), 2);
    }

    #[test]
    fn loaded_texture_is_not_decoded_again() {
        let registry = Rc::new(TextureRegistry::from_textures([Texture::basic(1, "wall.png", 4, 4)]));
        let loader = Rc::new(CountingLoader { decodes: Cell::new(0), fail: false });

        for _ in 0..2 {
            let mut load = std::pin::pin!(registry.load_texture(1, Rc::clone(&loader)));
            while poll(load.as_mut()).is_pending() {}
        }

        assert_eq!(loader.decodes.get(), 1);
    }

    #[test]
    fn failure_is_terminal_and_substituted() {
        let registry = Rc::new(TextureRegistry::from_textures([Texture::basic(3, "missing.png", 4, 4)]));
        let loader = Rc::new(CountingLoader { decodes: Cell::new(0), fail: true });

        for _ in 0..2 {
            let mut load = std::pin::pin!(registry.load_texture(3, Rc::clone(&loader)));
            let state = loop {
                if let Poll::Ready(state) = poll(load.as_mut()) {
                    break state;
                }
            };
            assert_eq!(state, LoadState::Error);
        }

        assert_eq!(loader.decodes.get(), 1);
        let view = registry.view();
        assert_eq!(view.get(3).source, "<placeholder>");
    }

    #[test]
    fn unknown_texture_resolves_to_error() {
        let registry = Rc::new(TextureRegistry::new());
        let loader = Rc::new(CountingLoader { decodes: Cell::new(0), fail: false });
        let mut load = std::pin::pin!(registry.load_texture(42, loader));

        assert_eq!(poll(load.as_mut()), Poll::Ready(LoadState::Error));
    }

    #[test]
    fn mismatched_image_is_resampled() {
        let mut texture = Texture::basic(1, "x.png", 4, 2);
        texture.apply_image(DecodedImage::solid(2, 1, [1, 2, 3, 4]));

        assert_eq!(texture.pixel(3, 1), 0x04010203);
        assert_eq!(texture.pixel(7, 3), 0x04010203);
    }
}

// file texture.rs
