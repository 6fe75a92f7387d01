// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use workroom_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

pub trait TimeProvider: SendUnlessWasm + SyncUnlessWasm {
    fn now(&self) -> DateTime<Utc>;
}

impl<T: TimeProvider + ?Sized> TimeProvider for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        self.deref().now()
    }
}
