use web_sys::HtmlAudioElement;

use crate::error::{GameError, GameResult, describe_js};
use crate::game::SoundPlayer;

/// Single `<audio>` element rewound on every play.
pub struct HtmlSound {
    audio: HtmlAudioElement,
}

impl HtmlSound {
    pub fn new(src: &str) -> GameResult<Self> {
        let audio = HtmlAudioElement::new_with_src(src).map_err(GameError::dom)?;
        audio.set_preload("auto");
        Ok(Self { audio })
    }
}

impl SoundPlayer for HtmlSound {
    fn play(&mut self) {
        self.audio.set_current_time(0.0);
        // The returned promise rejects if autoplay is blocked; nothing to do about it.
        if let Err(err) = self.audio.play() {
            tracing::warn!(err = %describe_js(&err), "hit sound failed");
        }
    }
}
