// workroom/workroom-core-integration-tests
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use anyhow::Result;
use chrono::Duration as ChronoDuration;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::Instant;

use workroom_core_client::app::event_handlers::{PresenceEventLoop, SessionEvent};
use workroom_core_client::domain::participants::models::RoomPresence;
use workroom_core_client::dtos::{
    Cue, FeedEvent, Participant, ParticipantPatch, ParticipantStatus, RowChange, UserId,
};
use workroom_core_client::test::{mock_data, MockAppDependencies};
use workroom_core_client::ClientRoomEventType;

use super::helpers::{record_cues, record_room_events, record_writes, settle};

fn presence(participants: Vec<Participant>) -> RoomPresence {
    let mut presence = RoomPresence::new(mock_data::room_id(), mock_data::user_id());
    presence.seed(participants);
    presence
}

fn viewer() -> Participant {
    Participant::new(mock_data::user_id())
        .with_room(mock_data::room_id())
        .with_last_activity(mock_data::reference_date())
}

fn change(change: RowChange) -> SessionEvent {
    SessionEvent::Feed(FeedEvent::Change(change))
}

#[tokio::test(start_paused = true)]
async fn test_join_plays_cue_and_highlights_until_expiry() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let events = record_room_events(&mut deps);
    let cues = record_cues(&mut deps);
    let deps = deps.into_deps();

    let (sender, mut receiver) = unbounded_channel();
    let (mut event_loop, snapshot) = PresenceEventLoop::new(presence(vec![viewer()]), &deps, sender);

    let started_at = Instant::now();
    event_loop.handle_event(change(RowChange::Insert {
        new: Participant::new("bob").with_room(mock_data::room_id()),
    }));

    let bob = UserId::from("bob");
    assert_eq!(cues.lock().clone(), vec![Cue::Join]);
    assert!(event_loop.is_highlighted(&bob));
    assert_eq!(snapshot.borrow().highlighted_ids, vec![bob.clone()]);
    assert_eq!(snapshot.borrow().participants.len(), 2);

    let expiry = receiver.recv().await.expect("Expected highlight expiry");
    assert!(started_at.elapsed() >= Duration::from_secs(10));
    event_loop.handle_event(expiry);

    assert!(!event_loop.is_highlighted(&bob));
    assert!(snapshot.borrow().highlighted_ids.is_empty());
    assert_eq!(
        events.lock().clone(),
        vec![
            ClientRoomEventType::ParticipantJoined { id: bob.clone() },
            ClientRoomEventType::HighlightsChanged {
                ids: vec![bob.clone()]
            },
            ClientRoomEventType::HighlightsChanged { ids: vec![] },
        ]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_memo_change_highlights_for_three_seconds() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let events = record_room_events(&mut deps);
    let cues = record_cues(&mut deps);
    let deps = deps.into_deps();

    let bob = Participant::new("bob")
        .with_room(mock_data::room_id())
        .with_memo("lunch");

    let (sender, mut receiver) = unbounded_channel();
    let (mut event_loop, _snapshot) =
        PresenceEventLoop::new(presence(vec![viewer(), bob.clone()]), &deps, sender);

    let started_at = Instant::now();
    event_loop.handle_event(change(RowChange::Update {
        new: bob.clone().with_memo("back at 2"),
        old: Some(bob.clone()),
    }));

    assert_eq!(cues.lock().clone(), vec![Cue::Memo]);
    assert!(event_loop.is_highlighted(&bob.id));

    let expiry = receiver.recv().await.expect("Expected highlight expiry");
    let elapsed = started_at.elapsed();
    assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_secs(10));
    event_loop.handle_event(expiry);
    assert!(!event_loop.is_highlighted(&bob.id));

    assert_eq!(
        events.lock().first().cloned(),
        Some(ClientRoomEventType::MemoChanged { id: bob.id.clone() })
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_repeated_highlight_restarts_expiry() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    _ = record_room_events(&mut deps);
    _ = record_cues(&mut deps);
    let deps = deps.into_deps();

    let bob = Participant::new("bob").with_room(mock_data::room_id());

    let (sender, mut receiver) = unbounded_channel();
    let (mut event_loop, _snapshot) =
        PresenceEventLoop::new(presence(vec![viewer(), bob.clone()]), &deps, sender);

    let started_at = Instant::now();
    event_loop.handle_event(change(RowChange::Update {
        new: bob.clone().with_memo("one"),
        old: Some(bob.clone()),
    }));
    tokio::time::sleep(Duration::from_secs(2)).await;
    event_loop.handle_event(change(RowChange::Update {
        new: bob.clone().with_memo("two"),
        old: Some(bob.clone().with_memo("one")),
    }));

    // The first expiry was cancelled, only the second one arrives.
    let expiry = receiver.recv().await.expect("Expected highlight expiry");
    assert!(started_at.elapsed() >= Duration::from_secs(5));
    event_loop.handle_event(expiry);
    assert!(!event_loop.is_highlighted(&bob.id));
    assert!(receiver.try_recv().is_err());

    Ok(())
}

#[tokio::test]
async fn test_sweep_marks_participants_away_after_eleven_minutes() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let writes = record_writes(&mut deps);
    let deps = deps.into_deps();

    let bob = Participant::new("bob")
        .with_room(mock_data::room_id())
        .with_status(ParticipantStatus::Distracted)
        .with_last_activity(mock_data::reference_date() - ChronoDuration::minutes(11));
    let carol = Participant::new("carol")
        .with_room(mock_data::room_id())
        .with_last_activity(mock_data::reference_date() - ChronoDuration::minutes(9));

    let (sender, _receiver) = unbounded_channel();
    let (mut event_loop, _snapshot) =
        PresenceEventLoop::new(presence(vec![viewer(), bob, carol]), &deps, sender);

    event_loop.handle_event(SessionEvent::InactivitySweep);
    settle().await;

    assert_eq!(
        writes.lock().clone(),
        vec![(
            UserId::from("bob"),
            ParticipantPatch::mark_away(ParticipantStatus::Distracted)
        )]
    );

    Ok(())
}

#[tokio::test]
async fn test_pulse_writes_activity_of_viewer() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let writes = record_writes(&mut deps);
    let deps = deps.into_deps();

    let (sender, _receiver) = unbounded_channel();
    let (mut event_loop, _snapshot) = PresenceEventLoop::new(presence(vec![viewer()]), &deps, sender);

    event_loop.handle_event(SessionEvent::ActivityPulse);
    event_loop.handle_event(SessionEvent::LocalActivity);
    settle().await;

    let expected = (
        mock_data::user_id(),
        ParticipantPatch::activity(mock_data::reference_date()),
    );
    assert_eq!(writes.lock().clone(), vec![expected.clone(), expected]);

    Ok(())
}

#[tokio::test]
async fn test_restore_is_written_once_while_pending() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let writes = record_writes(&mut deps);
    let events = record_room_events(&mut deps);
    let deps = deps.into_deps();

    let away_bob = Participant::new("bob")
        .with_room(mock_data::room_id())
        .with_status(ParticipantStatus::Away)
        .with_pre_away_status(Some(ParticipantStatus::Idle))
        .with_last_activity(mock_data::reference_date() - ChronoDuration::minutes(20));

    let (sender, _receiver) = unbounded_channel();
    let (mut event_loop, _snapshot) =
        PresenceEventLoop::new(presence(vec![viewer(), away_bob.clone()]), &deps, sender);

    let active_bob = away_bob
        .clone()
        .with_last_activity(mock_data::reference_date());
    event_loop.handle_event(change(RowChange::Update {
        new: active_bob.clone(),
        old: Some(away_bob.clone()),
    }));

    // A second pulse arrives before the restore was observed.
    event_loop.handle_event(change(RowChange::Update {
        new: active_bob
            .clone()
            .with_last_activity(mock_data::reference_date() + ChronoDuration::seconds(30)),
        old: Some(active_bob.clone()),
    }));
    settle().await;

    assert_eq!(
        writes.lock().clone(),
        vec![(
            UserId::from("bob"),
            ParticipantPatch::restore(ParticipantStatus::Idle)
        )]
    );
    assert!(event_loop.pending_restores().contains(&away_bob.id));

    let restored_bob = active_bob
        .clone()
        .with_status(ParticipantStatus::Idle)
        .with_pre_away_status(None);
    event_loop.handle_event(change(RowChange::Update {
        new: restored_bob.clone(),
        old: None,
    }));

    assert!(event_loop.pending_restores().is_empty());
    assert_eq!(
        event_loop
            .presence()
            .participants()
            .get(&away_bob.id)
            .map(|participant| participant.status),
        Some(ParticipantStatus::Idle)
    );
    assert_eq!(
        events.lock().last().cloned(),
        Some(ClientRoomEventType::ParticipantUpdated {
            id: away_bob.id.clone()
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_sweep_clears_pending_restores() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let writes = record_writes(&mut deps);
    _ = record_room_events(&mut deps);
    let deps = deps.into_deps();

    let away_bob = Participant::new("bob")
        .with_room(mock_data::room_id())
        .with_status(ParticipantStatus::Away)
        .with_pre_away_status(Some(ParticipantStatus::Working))
        .with_last_activity(mock_data::reference_date() - ChronoDuration::minutes(20));

    let (sender, _receiver) = unbounded_channel();
    let (mut event_loop, _snapshot) =
        PresenceEventLoop::new(presence(vec![viewer(), away_bob.clone()]), &deps, sender);

    event_loop.handle_event(change(RowChange::Update {
        new: away_bob
            .clone()
            .with_last_activity(mock_data::reference_date()),
        old: None,
    }));
    assert!(event_loop.pending_restores().contains(&away_bob.id));

    event_loop.handle_event(SessionEvent::InactivitySweep);
    assert!(event_loop.pending_restores().is_empty());
    settle().await;

    // Bob is still away locally, so the sweep does not write anything for him.
    assert_eq!(
        writes.lock().clone(),
        vec![(
            away_bob.id.clone(),
            ParticipantPatch::restore(ParticipantStatus::Working)
        )]
    );

    Ok(())
}

#[tokio::test]
async fn test_ignores_changes_of_unknown_participants_outside_the_room() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let events = record_room_events(&mut deps);
    let cues = record_cues(&mut deps);
    let deps = deps.into_deps();

    let (sender, _receiver) = unbounded_channel();
    let (mut event_loop, snapshot) = PresenceEventLoop::new(presence(vec![viewer()]), &deps, sender);

    event_loop.handle_event(change(RowChange::Delete {
        old: Participant::new("ghost"),
    }));
    event_loop.handle_event(change(RowChange::Insert {
        new: Participant::new("dave").with_room("ZZ99"),
    }));

    assert!(events.lock().is_empty());
    assert!(cues.lock().is_empty());
    assert_eq!(snapshot.borrow().participants, vec![viewer()]);

    Ok(())
}

#[tokio::test]
async fn test_leave_plays_cue_and_removes_participant() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let events = record_room_events(&mut deps);
    let cues = record_cues(&mut deps);
    let deps = deps.into_deps();

    let bob = Participant::new("bob").with_room(mock_data::room_id());

    let (sender, _receiver) = unbounded_channel();
    let (mut event_loop, snapshot) =
        PresenceEventLoop::new(presence(vec![viewer(), bob.clone()]), &deps, sender);

    event_loop.handle_event(change(RowChange::Update {
        new: bob.clone().without_room(),
        old: None,
    }));

    assert_eq!(cues.lock().clone(), vec![Cue::Leave]);
    assert_eq!(snapshot.borrow().participants, vec![viewer()]);
    assert_eq!(
        events.lock().first().cloned(),
        Some(ClientRoomEventType::ParticipantLeft { id: bob.id.clone() })
    );

    Ok(())
}

#[tokio::test]
async fn test_lost_feed_is_reported() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let events = record_room_events(&mut deps);
    let deps = deps.into_deps();

    let (sender, _receiver) = unbounded_channel();
    let (mut event_loop, _snapshot) = PresenceEventLoop::new(presence(vec![viewer()]), &deps, sender);

    event_loop.handle_event(SessionEvent::Feed(FeedEvent::Lost {
        reason: "connection reset".to_string(),
    }));

    assert_eq!(events.lock().clone(), vec![ClientRoomEventType::FeedLost]);

    Ok(())
}

#[tokio::test]
async fn test_sweep_spares_viewer_after_local_activity() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let writes = record_writes(&mut deps);
    let deps = deps.into_deps();

    let stale_viewer = viewer()
        .with_last_activity(mock_data::reference_date() - ChronoDuration::minutes(11));

    let (sender, _receiver) = unbounded_channel();
    let (mut event_loop, _snapshot) =
        PresenceEventLoop::new(presence(vec![stale_viewer]), &deps, sender);

    event_loop.handle_event(SessionEvent::LocalActivity);
    event_loop.handle_event(SessionEvent::InactivitySweep);
    settle().await;

    assert_eq!(
        writes.lock().clone(),
        vec![(
            mock_data::user_id(),
            ParticipantPatch::activity(mock_data::reference_date())
        )]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_pending_highlight_expiries_stop_with_the_loop() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    _ = record_room_events(&mut deps);
    _ = record_cues(&mut deps);
    let deps = deps.into_deps();

    let (sender, mut receiver) = unbounded_channel();
    let (mut event_loop, _snapshot) =
        PresenceEventLoop::new(presence(vec![viewer()]), &deps, sender);

    event_loop.handle_event(change(RowChange::Insert {
        new: Participant::new("bob").with_room(mock_data::room_id()),
    }));
    assert!(event_loop.is_highlighted(&UserId::from("bob")));

    drop(event_loop);
    tokio::time::sleep(Duration::from_secs(11)).await;

    assert!(receiver.recv().await.is_none());

    Ok(())
}
