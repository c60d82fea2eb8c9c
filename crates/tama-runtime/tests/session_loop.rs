//! Integration tests for the session loop under paused tokio time.
//!
//! Each test runs [`run_session`] alongside a driver future on the same
//! task. With time paused, tokio jumps straight to the next timer whenever
//! both sides are idle, so hours of pet life run instantly and
//! deterministically.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use tama_runtime::{Command, EndReason, NoticeSink, SessionSnapshot, TamaConfig, run_session};
use tama_types::{ActionType, Notice, StatKind, TamaState};
use tokio::sync::{mpsc, oneshot};

#[derive(Default)]
struct Collect {
    notices: Vec<Notice>,
    batches: usize,
}

impl NoticeSink for Collect {
    fn on_notices(&mut self, notices: &[Notice], _state: &TamaState) {
        self.notices.extend_from_slice(notices);
        self.batches = self.batches.saturating_add(1);
    }
}

async fn snapshot(tx: &mpsc::Sender<Command>) -> SessionSnapshot {
    let (reply, rx) = oneshot::channel();
    tx.send(Command::Snapshot(reply)).await.unwrap();
    rx.await.unwrap()
}

#[tokio::test(start_paused = true)]
async fn spam_blocks_then_timer_releases() {
    let (tx, mut rx) = mpsc::channel(16);
    let config = TamaConfig::default();
    let mut sink = Collect::default();

    let driver = async {
        for _ in 0..4 {
            tx.send(Command::Perform(ActionType::Feed)).await.unwrap();
        }
        let blocked = snapshot(&tx).await;

        tokio::time::sleep(Duration::from_millis(15_500)).await;
        let released = snapshot(&tx).await;

        tx.send(Command::Stop).await.unwrap();
        (blocked, released)
    };

    let (summary, (blocked, released)) =
        tokio::join!(run_session(&config, &mut rx, &mut sink), driver);

    assert!(blocked.state.is_blocked(ActionType::Feed));
    assert_eq!(blocked.blocked_until.get(&ActionType::Feed), Some(&15_000));
    assert_eq!(blocked.state.stats.hunger, 70);

    assert!(!released.state.is_blocked(ActionType::Feed));
    assert!(released.blocked_until.is_empty());

    let expected = [
        Notice::ActionBlocked {
            action: ActionType::Feed,
        },
        Notice::ActionUnblocked {
            action: ActionType::Feed,
        },
    ];
    let block_notices: Vec<Notice> = sink
        .notices
        .iter()
        .copied()
        .filter(|notice| expected.contains(notice))
        .collect();
    assert_eq!(block_notices, expected);

    let summary = summary.unwrap();
    assert_eq!(summary.end_reason, EndReason::Stopped);
}

#[tokio::test(start_paused = true)]
async fn neglected_pet_falls_sick_and_ages() {
    let (tx, mut rx) = mpsc::channel(16);
    let config = TamaConfig::default();
    let mut sink = Collect::default();

    let driver = async {
        tokio::time::sleep(Duration::from_secs(650)).await;
        let snap = snapshot(&tx).await;
        drop(tx);
        snap
    };

    let (summary, snap) = tokio::join!(run_session(&config, &mut rx, &mut sink), driver);

    assert!(snap.state.health.is_sick);
    assert_eq!(snap.state.stats.hunger, 8);
    assert_eq!(snap.age, 5);
    assert!(sink.notices.contains(&Notice::BecameSick));
    assert!(sink.notices.contains(&Notice::StatLow {
        stat: StatKind::Hunger
    }));

    let summary = summary.unwrap();
    assert_eq!(summary.end_reason, EndReason::ChannelClosed);
    assert_eq!(summary.age, 5);
}

#[tokio::test(start_paused = true)]
async fn care_keeps_the_pet_healthy() {
    let (tx, mut rx) = mpsc::channel(16);
    let config = TamaConfig::default();
    let mut sink = Collect::default();

    let driver = async {
        // Every two minutes, one of each action: spaced out enough to stay
        // clear of both the cooldowns and the abuse window.
        for _ in 0..10 {
            for action in ActionType::ALL {
                tx.send(Command::Perform(action)).await.unwrap();
            }
            tokio::time::sleep(Duration::from_secs(120)).await;
        }
        let snap = snapshot(&tx).await;
        tx.send(Command::Stop).await.unwrap();
        snap
    };

    let (summary, snap) = tokio::join!(run_session(&config, &mut rx, &mut sink), driver);

    assert!(!snap.state.health.is_sick);
    assert!(snap.state.blocked().next().is_none());
    assert!(!sink.notices.contains(&Notice::BecameSick));
    assert!(summary.unwrap().events_applied >= 40);
}
