//! Entity identifiers.
//!
//! Every table uses a `BIGSERIAL` primary key; each entity gets its own
//! newtype so a class id can never be passed where a user id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database identifier.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Raw database identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Identifier of a row in `users`.
    UserId
}

define_id! {
    /// Identifier of a row in `class`.
    ClassId
}

define_id! {
    /// Identifier of a row in `lecture`.
    LectureId
}

define_id! {
    /// Identifier of a row in `room`.
    RoomId
}

define_id! {
    /// Identifier of a row in `matakuliah`.
    CourseId
}
