//! Shared sample values for domain service tests.

use crate::domain::{
    Class, ClassId, ClassName, EmailAddress, JoinCode, Lecture, LectureDraft, LectureId,
    LectureName, Npm, Password, PersonName, Role, User, UserId, UserProfile,
};

pub(crate) fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

pub(crate) fn password(raw: &str) -> Password {
    Password::new(raw).expect("valid password")
}

pub(crate) fn student_profile(email_raw: &str, npm: &str, class_id: i64) -> UserProfile {
    UserProfile::try_new(
        PersonName::new("Student One").expect("name"),
        email(email_raw),
        Role::Student,
        Some(Npm::new(npm).expect("npm")),
        Some(ClassId::new(class_id)),
    )
    .expect("student profile")
}

pub(crate) fn lecturer_profile(email_raw: &str) -> UserProfile {
    UserProfile::try_new(
        PersonName::new("Lecturer One").expect("name"),
        email(email_raw),
        Role::Lecturer,
        None,
        None,
    )
    .expect("lecturer profile")
}

pub(crate) fn student(id: i64, email_raw: &str, npm: &str) -> User {
    User::from_profile(UserId::new(id), student_profile(email_raw, npm, 1))
}

pub(crate) fn class(id: i64, name: &str) -> Class {
    Class {
        id: ClassId::new(id),
        name: ClassName::new(name).expect("class name"),
        join_code: JoinCode::from_stored("ABCDEFGHJK"),
    }
}

pub(crate) fn lecture(id: i64, user_id: i64) -> Lecture {
    Lecture::from_draft(
        LectureId::new(id),
        LectureDraft {
            name: LectureName::new("Lecturer One").expect("lecture name"),
            user_id: UserId::new(user_id),
        },
    )
}
