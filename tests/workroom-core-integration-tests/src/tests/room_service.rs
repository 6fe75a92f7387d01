// workroom/workroom-core-integration-tests
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::{anyhow, Result};
use mockall::predicate;
use pretty_assertions::assert_eq;

use workroom_core_client::dtos::{
    Participant, ParticipantPatch, Room, StoreError, SubscriptionId, UserId,
};
use workroom_core_client::services::RoomService;
use workroom_core_client::test::{mock_data, MockAppDependencies};
use workroom_core_client::{ClientEvent, ClientRoomEventType};

use super::helpers::{record_writes, settle, Recorded};

fn expect_room_entry(deps: &mut MockAppDependencies) -> Recorded<(UserId, ParticipantPatch)> {
    deps.participants_service
        .expect_load_participants()
        .once()
        .with(predicate::eq(mock_data::room_id()))
        .return_once(|_| {
            Box::pin(async {
                Ok(vec![
                    Participant::new(mock_data::user_id()).with_room(mock_data::room_id()),
                    Participant::new("bob").with_room(mock_data::room_id()),
                ])
            })
        });
    deps.change_feed_service
        .expect_subscribe()
        .once()
        .return_once(|_| Box::pin(async { Ok(SubscriptionId::from("sub-1")) }));
    deps.room_attributes_service
        .expect_load_room()
        .once()
        .return_once(|_| Box::pin(async { Ok(Room::new(mock_data::room_id(), "Lounge")) }));
    record_writes(deps)
}

fn record_client_events(deps: &mut MockAppDependencies) -> Recorded<ClientEvent> {
    let events = Recorded::default();
    {
        let events = events.clone();
        deps.client_event_dispatcher
            .expect_dispatch_room_event()
            .returning(move |room_id, event| {
                events.lock().push(ClientEvent::RoomChanged {
                    room_id,
                    r#type: event,
                })
            });
    }
    {
        let events = events.clone();
        deps.client_event_dispatcher
            .expect_dispatch_event()
            .returning(move |event| events.lock().push(event));
    }
    events
}

#[tokio::test(start_paused = true)]
async fn test_enter_and_leave_room() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let writes = expect_room_entry(&mut deps);
    deps.change_feed_service
        .expect_unsubscribe()
        .once()
        .with(predicate::eq(SubscriptionId::from("sub-1")))
        .return_once(|_| Box::pin(async { Ok(()) }));
    let events = record_client_events(&mut deps);

    let service = RoomService::from(&deps.into_deps());
    service.enter_room(&mock_data::room_id()).await?;
    settle().await;

    assert_eq!(service.current_room_id(), Some(mock_data::room_id()));
    assert_eq!(
        writes.lock().clone(),
        vec![(
            mock_data::user_id(),
            ParticipantPatch::activity(mock_data::reference_date())
        )]
    );

    let participants = service.participants();
    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0].participant.id, mock_data::user_id());
    assert!(participants[0].is_self);
    assert!(!participants[1].is_self);
    assert!(!participants[1].is_inactive);

    service.leave_room().await;
    service.leave_room().await;

    assert_eq!(service.current_room_id(), None);
    assert!(service.participants().is_empty());
    assert!(service.set_room_name("Kitchen").is_err());

    assert_eq!(
        events.lock().clone(),
        vec![
            ClientEvent::RoomChanged {
                room_id: mock_data::room_id(),
                r#type: ClientRoomEventType::ParticipantsLoaded
            },
            ClientEvent::PresenceStopped {
                room_id: mock_data::room_id()
            }
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_failed_initial_read_leaves_client_outside_of_rooms() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    deps.participants_service
        .expect_load_participants()
        .once()
        .return_once(|_| Box::pin(async { Err(anyhow!("Connection refused")) }));
    let events = record_client_events(&mut deps);

    let service = RoomService::from(&deps.into_deps());
    let result = service.enter_room(&mock_data::room_id()).await;

    assert!(result.is_err());
    assert_eq!(service.current_room_id(), None);
    assert!(events.lock().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_failed_subscription_is_returned() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    deps.participants_service
        .expect_load_participants()
        .once()
        .return_once(|_| Box::pin(async { Ok(vec![]) }));
    deps.change_feed_service
        .expect_subscribe()
        .once()
        .return_once(|_| {
            Box::pin(async {
                Err(anyhow!(StoreError::SubscriptionFailure(
                    "channel rejected".to_string()
                )))
            })
        });
    _ = record_client_events(&mut deps);

    let service = RoomService::from(&deps.into_deps());
    let err = service
        .enter_room(&mock_data::room_id())
        .await
        .expect_err("Expected subscription to fail");

    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::SubscriptionFailure(_))
    ));
    assert_eq!(service.current_room_id(), None);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_missing_room_row_does_not_prevent_entering() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    deps.participants_service
        .expect_load_participants()
        .once()
        .return_once(|_| Box::pin(async { Ok(vec![]) }));
    deps.change_feed_service
        .expect_subscribe()
        .once()
        .return_once(|_| Box::pin(async { Ok(SubscriptionId::from("sub-1")) }));
    deps.room_attributes_service
        .expect_load_room()
        .once()
        .return_once(|_| {
            Box::pin(async {
                Err(anyhow!(StoreError::lookup_failure(
                    "rooms",
                    mock_data::room_id()
                )))
            })
        });
    deps.change_feed_service
        .expect_unsubscribe()
        .once()
        .return_once(|_| Box::pin(async { Ok(()) }));
    _ = record_client_events(&mut deps);
    _ = record_writes(&mut deps);

    let service = RoomService::from(&deps.into_deps());
    service.enter_room(&mock_data::room_id()).await?;
    assert_eq!(service.current_room_id(), Some(mock_data::room_id()));

    service.leave_room().await;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_entering_another_room_releases_the_previous_subscription() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    deps.participants_service
        .expect_load_participants()
        .times(2)
        .returning(|_| Box::pin(async { Ok(vec![]) }));
    {
        let mut count = 0;
        deps.change_feed_service
            .expect_subscribe()
            .times(2)
            .returning(move |_| {
                count += 1;
                let subscription_id = SubscriptionId::from(format!("sub-{count}"));
                Box::pin(async move { Ok(subscription_id) })
            });
    }
    deps.room_attributes_service
        .expect_load_room()
        .times(2)
        .returning(|room_id| {
            let room = Room::new(room_id.clone(), "");
            Box::pin(async move { Ok(room) })
        });
    let released = Recorded::<SubscriptionId>::default();
    {
        let released = released.clone();
        deps.change_feed_service
            .expect_unsubscribe()
            .times(2)
            .returning(move |subscription_id| {
                released.lock().push(subscription_id.clone());
                Box::pin(async { Ok(()) })
            });
    }
    let events = record_client_events(&mut deps);
    _ = record_writes(&mut deps);

    let service = RoomService::from(&deps.into_deps());
    service.enter_room(&mock_data::room_id()).await?;
    service.enter_room(&"ZZ99".into()).await?;

    assert_eq!(service.current_room_id(), Some("ZZ99".into()));
    assert_eq!(released.lock().clone(), vec![SubscriptionId::from("sub-1")]);
    assert!(events.lock().contains(&ClientEvent::PresenceStopped {
        room_id: mock_data::room_id()
    }));

    service.leave_room().await;
    assert_eq!(
        released.lock().clone(),
        vec![SubscriptionId::from("sub-1"), SubscriptionId::from("sub-2")]
    );

    Ok(())
}
