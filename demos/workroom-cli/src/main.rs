// workroom/workroom-cli
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::env;

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use workroom_core_client::dtos::{
    Participant, ParticipantInfo, ParticipantStatus, Room, RoomId, UserId,
};
use workroom_core_client::{Client, ClientDelegate, ClientEvent, InMemoryStore};

const USER_ENV_VAR: &str = "WORKROOM_USER";

/// Logs at `info` unless `RUST_LOG` says otherwise.
fn enable_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::Layer::new()
        .with_target(false)
        .with_filter(filter);

    Registry::default().with(fmt_layer).init();
}

/// A store with a single room and a few participants to play with when no Supabase project is
/// configured.
fn demo_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.insert_room(Room::new("LOBBY", "Lobby").with_owner("ada"));
    store.insert_participant(
        Participant::new("ada")
            .with_display_name("Ada")
            .with_room("LOBBY")
            .with_memo("Reviewing"),
    );
    store.insert_participant(
        Participant::new("grace")
            .with_display_name("Grace")
            .with_room("LOBBY")
            .with_status(ParticipantStatus::Distracted),
    );
    store
}

fn build_client(user_id: UserId) -> Result<Client> {
    let builder = Client::builder()
        .set_delegate(Some(Box::new(Delegate {})))
        .set_user_id(user_id.clone());

    #[cfg(feature = "supabase")]
    if let Ok(config) = workroom_core_client::SupabaseConfig::from_env() {
        println!("Using Supabase project at {}.", config.url);
        return Ok(builder
            .set_store(workroom_core_client::SupabaseStore::new(config))
            .build());
    }

    println!("Using in-memory store.");
    let store = demo_store();
    store.insert_participant(Participant::new(user_id).with_room("LOBBY"));
    Ok(builder.set_store(store).build())
}

fn prompt_text(prompt: &str, default: &str) -> Result<String> {
    let input = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()?;
    println!();
    Ok(input)
}

fn select_status() -> Result<Option<ParticipantStatus>> {
    let options = ParticipantStatus::iter()
        .filter(|status| !status.is_away())
        .collect::<Vec<_>>();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select status")
        .default(0)
        .items(&options[..])
        .interact_opt()?;

    Ok(selection.map(|idx| options[idx]))
}

fn select_command() -> Selection {
    let options: Vec<Selection> = Selection::iter().collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What do you want to do?")
        .default(0)
        .items(&options[..])
        .interact()
        .ok();

    let Some(selection) = selection else {
        return Selection::Noop;
    };

    println!();
    options[selection].clone()
}

fn format_participant(info: &ParticipantInfo) -> String {
    let participant = &info.participant;
    let mut flags = vec![];
    if info.is_self {
        flags.push("you");
    }
    if info.is_highlighted {
        flags.push("new");
    }
    if info.is_inactive {
        flags.push("inactive");
    }

    format!(
        "{:<20} {:<12} {:<30} {}",
        participant.name(),
        participant.status.to_string(),
        participant.memo,
        flags.join(", ")
    )
}

fn list_participants(client: &Client) {
    let Some(room_id) = client.room.current_room_id() else {
        println!("Not in a room.");
        return;
    };

    let participants = client
        .room
        .participants()
        .iter()
        .map(format_participant)
        .collect::<Vec<_>>();
    println!("Participants of {room_id}:\n{}", participants.join("\n"));
}

struct Delegate {}

impl ClientDelegate for Delegate {
    fn handle_event(&self, _client: Client, event: ClientEvent) {
        match event {
            ClientEvent::RoomChanged { room_id, r#type } => {
                println!("\n[{room_id}] {:?}", r#type)
            }
            ClientEvent::PresenceStopped { room_id } => println!("\nLeft {room_id}."),
        }
    }
}

#[derive(EnumIter, Display, Clone)]
enum Selection {
    #[strum(serialize = "Enter room")]
    EnterRoom,
    #[strum(serialize = "List participants")]
    ListParticipants,
    #[strum(serialize = "Record activity")]
    RecordActivity,
    #[strum(serialize = "Set room name")]
    SetRoomName,
    #[strum(serialize = "Set memo")]
    SetMemo,
    #[strum(serialize = "Set status")]
    SetStatus,
    #[strum(serialize = "Set display name")]
    SetDisplayName,
    #[strum(serialize = "Load profile")]
    LoadProfile,
    #[strum(serialize = "Leave room")]
    LeaveRoom,
    Noop,
    Exit,
}

#[tokio::main]
async fn main() -> Result<()> {
    _ = dotenvy::dotenv();
    enable_logging();

    let user_id = match env::var(USER_ENV_VAR) {
        Ok(user_id) => user_id,
        Err(_) => prompt_text("Enter your user id", "me")?,
    };
    let client = build_client(UserId::from(user_id))?;

    loop {
        println!();

        let result = match select_command() {
            Selection::EnterRoom => {
                let room_id = prompt_text("Enter room code", "LOBBY")?;
                client.room.enter_room(&RoomId::from(room_id)).await
            }
            Selection::ListParticipants => {
                list_participants(&client);
                Ok(())
            }
            Selection::RecordActivity => {
                client.room.record_activity();
                Ok(())
            }
            Selection::SetRoomName => {
                let name = prompt_text("Enter room name", "")?;
                client.room.set_room_name(name)
            }
            Selection::SetMemo => {
                let memo = prompt_text("Enter memo", "")?;
                client.profile.set_memo(&memo).await
            }
            Selection::SetStatus => match select_status()? {
                Some(status) => client.profile.set_status(status).await,
                None => Ok(()),
            },
            Selection::SetDisplayName => {
                let name = prompt_text("Enter display name", "")?;
                let name = (!name.trim().is_empty()).then_some(name);
                client.profile.set_display_name(name).await
            }
            Selection::LoadProfile => client.profile.load_profile().await.map(|profile| {
                println!("{profile:#?}");
            }),
            Selection::LeaveRoom => {
                client.room.leave_room().await;
                Ok(())
            }
            Selection::Noop => Ok(()),
            Selection::Exit => {
                client.sign_out().await;
                break;
            }
        };

        if let Err(err) = result {
            println!("Failed: {err}");
        }
    }

    Ok(())
}
