// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::domain::participants::models::{
    Appearance, Participant, ParticipantPatch, ParticipantStatus, RowChange,
};
use crate::domain::rooms::models::Room;
use crate::domain::shared::models::StoreError;

/// A row of the `users` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub current_room: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_before_away: Option<String>,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}

/// A row of the `rooms` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct RoomRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

/// The labels the statuses are stored as.
const STATUS_LABELS: [(ParticipantStatus, &str); 4] = [
    (ParticipantStatus::Working, "작업중"),
    (ParticipantStatus::Distracted, "딴짓중"),
    (ParticipantStatus::Idle, "멍때리는중"),
    (ParticipantStatus::Away, "자리비움"),
];

pub(super) fn status_label(status: ParticipantStatus) -> &'static str {
    match status {
        ParticipantStatus::Working => STATUS_LABELS[0].1,
        ParticipantStatus::Distracted => STATUS_LABELS[1].1,
        ParticipantStatus::Idle => STATUS_LABELS[2].1,
        ParticipantStatus::Away => STATUS_LABELS[3].1,
    }
}

pub(super) fn parse_status(label: &str) -> Option<ParticipantStatus> {
    STATUS_LABELS
        .iter()
        .find_map(|(status, candidate)| (*candidate == label).then_some(*status))
}

impl From<UserRecord> for Participant {
    fn from(record: UserRecord) -> Self {
        let status = match record.status.as_deref() {
            None => ParticipantStatus::default(),
            Some(label) => parse_status(label).unwrap_or_else(|| {
                warn!("Unknown status '{label}' of user {}.", record.id);
                ParticipantStatus::default()
            }),
        };

        Participant {
            id: record.id.into(),
            display_name: record.nickname,
            room_id: record.current_room.map(Into::into),
            status,
            pre_away_status: record.status_before_away.as_deref().and_then(parse_status),
            last_activity: record.last_seen,
            memo: record.memo.unwrap_or_default(),
            appearance: Appearance {
                character: record.character,
                background: record.background,
            },
        }
    }
}

impl From<RoomRecord> for Room {
    fn from(record: RoomRecord) -> Self {
        Room {
            id: record.id.into(),
            name: record.name.unwrap_or_default(),
            owner_id: record.owner.map(Into::into),
        }
    }
}

/// The body of a PATCH request writing `patch`.
pub(super) fn patch_body(patch: &ParticipantPatch) -> Value {
    let mut body = Map::new();

    if let Some(display_name) = &patch.display_name {
        body.insert("nickname".into(), json!(display_name));
    }
    if let Some(status) = patch.status {
        body.insert("status".into(), json!(status_label(status)));
    }
    if let Some(pre_away_status) = patch.pre_away_status {
        body.insert(
            "status_before_away".into(),
            json!(pre_away_status.map(status_label)),
        );
    }
    if let Some(last_activity) = patch.last_activity {
        body.insert("last_seen".into(), json!(last_activity.to_rfc3339()));
    }
    if let Some(memo) = &patch.memo {
        body.insert("memo".into(), json!(memo));
    }
    if let Some(appearance) = &patch.appearance {
        body.insert("character".into(), json!(appearance.character));
        body.insert("background".into(), json!(appearance.background));
    }

    Value::Object(body)
}

/// The `data` object of a `postgres_changes` message.
#[derive(Debug, Deserialize)]
pub(super) struct ChangeData {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub record: Option<Value>,
    #[serde(default)]
    pub old_record: Option<Value>,
}

impl TryFrom<ChangeData> for RowChange {
    type Error = StoreError;

    fn try_from(data: ChangeData) -> Result<Self, Self::Error> {
        let new = data
            .record
            .filter(|record| !is_empty_record(record))
            .map(serde_json::from_value::<UserRecord>)
            .transpose()?
            .map(Participant::from);
        let old_is_complete = data.old_record.as_ref().is_some_and(is_complete_record);
        let old = data
            .old_record
            .filter(|record| !is_empty_record(record))
            .map(serde_json::from_value::<UserRecord>)
            .transpose()?
            .map(Participant::from);

        let missing = |row: &str| {
            StoreError::SubscriptionFailure(format!("{} event without {row} row", data.kind))
        };

        match data.kind.as_str() {
            "INSERT" => Ok(RowChange::Insert {
                new: new.ok_or_else(|| missing("new"))?,
            }),
            "UPDATE" => Ok(RowChange::Update {
                new: new.ok_or_else(|| missing("new"))?,
                old: old.filter(|_| old_is_complete),
            }),
            "DELETE" => Ok(RowChange::Delete {
                old: old.ok_or_else(|| missing("old"))?,
            }),
            other => Err(StoreError::SubscriptionFailure(format!(
                "Unknown change type '{other}'"
            ))),
        }
    }
}

fn is_empty_record(record: &Value) -> bool {
    record.as_object().map_or(true, Map::is_empty)
}

/// Old rows of tables without full replica identity only contain the primary key.
fn is_complete_record(record: &Value) -> bool {
    record
        .as_object()
        .is_some_and(|record| record.keys().any(|key| key != "id"))
}
