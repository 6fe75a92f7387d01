// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use workroom_utils::id_string;

id_string!(
    /// Globally unique id of a participant row. Equals the id of the signed-in account.
    UserId
);
