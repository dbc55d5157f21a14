//! Wellness Tests
//!
//! Timed widgets on tokio's paused clock, through the real `TokioScheduler`.

use crate::brain::{Companion, MoodLabel};
use crate::chat::{ChatDriver, Sender};
use crate::config::CompanionConfig;
use crate::scheduler::{ManualScheduler, Scheduler, TokioScheduler};
use crate::wellness::meditation::format_time;
use crate::wellness::{BreathPhase, BreathingPacer, MeditationSession, Player, PRESET_MINUTES};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

fn tokio_scheduler() -> Arc<dyn Scheduler> {
    Arc::new(TokioScheduler::current().unwrap())
}

#[cfg(test)]
mod timer_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_breathing_on_tokio_timers() {
        let scheduler = tokio_scheduler();
        let pacer = BreathingPacer::start(scheduler.as_ref(), Duration::from_millis(4000));
        assert_eq!(pacer.phase(), BreathPhase::Inhale);

        sleep(Duration::from_millis(4100)).await;
        assert_eq!(pacer.phase(), BreathPhase::Hold);
        sleep(Duration::from_millis(4000)).await;
        assert_eq!(pacer.phase(), BreathPhase::Exhale);
        sleep(Duration::from_millis(4000)).await;
        assert_eq!(pacer.phase(), BreathPhase::Inhale);

        pacer.stop();
        sleep(Duration::from_millis(20_000)).await;
        assert_eq!(pacer.phase(), BreathPhase::Inhale);
        assert_eq!(pacer.transitions(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_meditation_on_tokio_timers() {
        let mut session = MeditationSession::new(tokio_scheduler(), Duration::from_millis(1000));
        session.set_duration(1).unwrap();
        session.start();

        sleep(Duration::from_millis(30_500)).await;
        let timer = session.snapshot();
        assert_eq!(timer.remaining_secs(), 30);
        assert_eq!(timer.format_remaining(), "0:30");

        sleep(Duration::from_millis(31_000)).await;
        let timer = session.snapshot();
        assert_eq!(timer.remaining_secs(), 0);
        assert!(!timer.is_active());
    }

    #[test]
    fn test_every_preset_runs_to_zero() {
        for minutes in PRESET_MINUTES {
            let clock = Arc::new(ManualScheduler::new());
            let mut session = MeditationSession::new(clock.clone(), Duration::from_millis(1000));
            session.set_duration(minutes).unwrap();
            session.start();
            assert_eq!(
                session.snapshot().format_remaining(),
                format_time(minutes * 60)
            );

            clock.advance(Duration::from_secs(u64::from(minutes) * 60));
            assert!(!session.snapshot().is_active(), "{} min still running", minutes);
            assert_eq!(clock.pending(), 0);
        }
    }

    #[test]
    fn test_configured_phase_length() {
        let config = CompanionConfig {
            breathing_phase_ms: 2000,
            ..CompanionConfig::default()
        };
        let clock = ManualScheduler::new();
        let pacer = BreathingPacer::start(&clock, config.breathing_phase());

        clock.advance(Duration::from_millis(4000));
        assert_eq!(pacer.phase(), BreathPhase::Exhale);
    }
}

#[cfg(test)]
mod chat_timing_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_driver_on_tokio_timers() {
        let driver = ChatDriver::new(Companion::with_seed(4).unwrap(), tokio_scheduler());

        driver.send("I want to end it").unwrap();
        sleep(Duration::from_millis(900)).await;
        assert!(driver.is_typing());
        sleep(Duration::from_millis(200)).await;
        assert!(!driver.is_typing());
        assert_eq!(driver.current_emotion(), Some(MoodLabel::Sad));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_follow_up_keeps_both_replies() {
        let driver = ChatDriver::new(Companion::with_seed(4).unwrap(), tokio_scheduler());

        driver.send("so sad").unwrap();
        sleep(Duration::from_millis(200)).await;
        driver.send("so happy").unwrap();

        // The first reply is shown as soon as the second message arrives
        let senders: Vec<Sender> = driver.transcript().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::Bot, Sender::User, Sender::Bot, Sender::User]);

        sleep(Duration::from_millis(1600)).await;
        let transcript = driver.transcript();
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript[4].emotion, Some(MoodLabel::Happy));
    }
}

#[cfg(test)]
mod playlist_tests {
    use super::*;

    #[test]
    fn test_full_cycle_returns_to_start() {
        for mood in ["sad", "stressed", "happy", "loved", ""] {
            let mut player = Player::for_mood(mood);
            let first = player.current().clone();
            let mut seen = 0;
            loop {
                seen += 1;
                if player.next() == &first {
                    break;
                }
                assert!(seen < 10, "playlist for '{}' never wrapped", mood);
            }
            assert_eq!(player.index(), 0);
        }
    }
}
