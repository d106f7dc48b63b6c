// Landing page hero: media, title and the scroll-expand gesture state

use agridoc_core::hero::{reduce, split_title, HeroConfig, HeroEffects, HeroEvent, HeroLayout, HeroState};
use agridoc_core::media::{MediaElement, MediaSource};

pub struct LandingHero {
    config: HeroConfig,
    state: HeroState,
    media: MediaSource,
    background: Option<String>,
    title: Option<String>,
}

impl LandingHero {
    pub fn new(config: HeroConfig, media: MediaSource, title: Option<String>) -> Self {
        Self { config, state: HeroState::new(), media, background: None, title }
    }

    pub fn with_background(mut self, src: impl Into<String>) -> Self {
        self.background = Some(src.into());
        self
    }

    pub fn state(&self) -> &HeroState {
        &self.state
    }

    /// Feed one input event; the host applies the returned effects.
    pub fn handle(&mut self, event: HeroEvent) -> HeroEffects {
        let (next, effects) = reduce(&self.config, self.state, event);
        self.state = next;
        effects
    }

    /// Swapping the media restarts the gesture.
    pub fn set_media(&mut self, media: MediaSource) {
        if media == self.media {
            return;
        }
        self.media = media;
        self.handle(HeroEvent::MediaChanged);
    }

    pub fn media(&self) -> MediaElement {
        self.media.element()
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn layout(&self) -> HeroLayout {
        self.state.layout(&self.config)
    }

    /// Title split into the span that drifts left and the span that drifts
    /// right.
    pub fn title_spans(&self) -> (String, String) {
        split_title(self.title.as_deref())
    }
}
