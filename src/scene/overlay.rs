//! End-of-narrative text overlay.

use std::time::Duration;

use crate::animation::{FieldGoals, Tween, TweenTarget};
use crate::util::easing::EasingFunction;

/// Length of the fade in and of the fade out.
pub const FADE_DURATION: Duration = Duration::from_millis(1000);

/// Text card shown once at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndCard {
    /// Message, `None` until shown.
    pub message: Option<String>,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

impl EndCard {
    /// Set the message and return the fade tweens: fade in immediately,
    /// then fade out once `visible` has passed since the fade-in started.
    #[must_use]
    pub fn show(&mut self, message: &str, visible: Duration) -> [Tween; 2] {
        log::info!("end card: {}", message.replace('\n', " / "));
        self.message = Some(message.to_owned());
        self.opacity = 0.0;

        let fade_in = Tween::new(
            TweenTarget::EndCardOpacity,
            FieldGoals::scalar(1.0),
            FADE_DURATION,
        )
        .easing(EasingFunction::QuadraticInOut)
        .named("end-card-in");
        let fade_out = Tween::new(
            TweenTarget::EndCardOpacity,
            FieldGoals::scalar(0.0),
            FADE_DURATION,
        )
        .easing(EasingFunction::QuadraticInOut)
        .delay(visible.max(FADE_DURATION))
        .named("end-card-out");
        [fade_in, fade_out]
    }

    /// Whether the card is on screen at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.message.is_some() && self.opacity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TweenSet;
    use crate::scene::Stage;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fades_in_holds_and_fades_out() {
        let mut stage = Stage::default();
        let mut tweens = TweenSet::new();
        for tween in stage.end_card.show("The End", ms(2500)) {
            let _ = tweens.start(tween, &stage, ms(0));
        }
        assert!(!stage.end_card.is_visible());

        let _ = tweens.update(ms(1000), &mut stage);
        assert_eq!(stage.end_card.opacity, 1.0);
        let _ = tweens.update(ms(2400), &mut stage);
        assert_eq!(stage.end_card.opacity, 1.0);
        assert!(stage.end_card.is_visible());

        let _ = tweens.update(ms(3000), &mut stage);
        assert!(stage.end_card.opacity < 1.0);
        let done = tweens.update(ms(3500), &mut stage);
        assert_eq!(done.len(), 1);
        assert_eq!(stage.end_card.opacity, 0.0);
        assert!(tweens.is_empty());
    }
}
