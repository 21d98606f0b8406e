//! Internal Diesel row structs.
//!
//! These never leave the persistence layer. Conversions into domain types
//! re-validate stored text so a hand-edited row surfaces as a query error
//! rather than an invalid aggregate.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    Class, ClassId, ClassName, Course, CourseId, EmailAddress, JoinCode, Lecture, LectureId,
    LectureName, Npm, PersonName, Role, Room, RoomId, RoomSchedule, User, UserId,
};

use super::schema::{class, lecture, matakuliah, room, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub npm: Option<String>,
    pub class_id: Option<i64>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub npm: Option<&'a str>,
    pub class_id: Option<i64>,
}

/// Profile columns; `None` clears `npm` and `class_id`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserProfileUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub npm: Option<&'a str>,
    pub class_id: Option<i64>,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let npm = row
            .npm
            .map(Npm::new)
            .transpose()
            .map_err(|err| format!("user {}: {err}", row.id))?;
        Ok(Self {
            id: UserId::new(row.id),
            name: PersonName::new(&row.name).map_err(|err| format!("user {}: {err}", row.id))?,
            email: EmailAddress::new(&row.email)
                .map_err(|err| format!("user {}: {err}", row.id))?,
            role: Role::from_str(&row.role).map_err(|err| format!("user {}: {err}", row.id))?,
            npm,
            class_id: row.class_id.map(ClassId::new),
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = class)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClassRow {
    pub id: i64,
    pub name: String,
    pub join_code: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = class)]
pub(crate) struct NewClassRow<'a> {
    pub name: &'a str,
    pub join_code: &'a str,
}

impl TryFrom<ClassRow> for Class {
    type Error = String;

    fn try_from(row: ClassRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClassId::new(row.id),
            name: ClassName::new(&row.name).map_err(|err| format!("class {}: {err}", row.id))?,
            join_code: JoinCode::from_stored(row.join_code),
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lecture)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LectureRow {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
}

/// Used for both inserts and full updates.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = lecture)]
pub(crate) struct LectureValues<'a> {
    pub name: &'a str,
    pub user_id: i64,
}

impl TryFrom<LectureRow> for Lecture {
    type Error = String;

    fn try_from(row: LectureRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LectureId::new(row.id),
            name: LectureName::new(&row.name)
                .map_err(|err| format!("lecture {}: {err}", row.id))?,
            user_id: UserId::new(row.user_id),
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = room)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoomRow {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub lecture_id: i64,
    pub start_room: NaiveDateTime,
    pub end_room: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = room)]
pub(crate) struct RoomValues<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub lecture_id: i64,
    pub start_room: NaiveDateTime,
    pub end_room: NaiveDateTime,
}

impl TryFrom<RoomRow> for Room {
    type Error = String;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let schedule = RoomSchedule::new(row.start_room, row.end_room)
            .map_err(|err| format!("room {}: {err}", row.id))?;
        Ok(Self {
            id: RoomId::new(row.id),
            name: row.name,
            url: row.url,
            lecture_id: LectureId::new(row.lecture_id),
            schedule,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = matakuliah)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i64,
    pub name: String,
    pub kode_matkul: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = matakuliah)]
pub(crate) struct CourseValues<'a> {
    pub name: &'a str,
    pub kode_matkul: &'a str,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            id: CourseId::new(row.id),
            name: row.name,
            code: row.kode_matkul,
        }
    }
}
