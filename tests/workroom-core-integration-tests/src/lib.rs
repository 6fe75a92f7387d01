// workroom/workroom-core-integration-tests
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::Level;

#[cfg(not(target_arch = "wasm32"))]
#[ctor::ctor]
fn init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::INFO)
        .try_init();
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;
