//! In-memory driven ports for end-to-end HTTP tests.
//!
//! One mutex guards every table so multi-row writes (registration with a
//! companion lecture, user deletion) stay atomic, mirroring the Diesel
//! adapters' transactions. Unique and foreign-key rules match the schema.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use campus_backend::domain::ports::{
    AccountRepository, AccountRepositoryError, ClassRepository, ClassRepositoryError,
    CourseRepository, CourseRepositoryError, LectureRepository, LectureRepositoryError,
    RoomRepository, RoomRepositoryError, UserRepository, UserRepositoryError,
};
use campus_backend::domain::{
    AuthService, Class, ClassId, ClassName, ClassService, Course, CourseDraft, CourseId,
    CourseService, EmailAddress, Lecture, LectureDraft, LectureId, LectureName, LectureService,
    NewAccount, NewClass, Npm, PasswordHash, Room, RoomDraft, RoomId, RoomService,
    StoredCredentials, User, UserId, UserProfile, UserService,
};
use campus_backend::inbound::http::state::{HttpState, HttpStatePorts};
use campus_backend::outbound::credentials::{Argon2PasswordHasher, JwtTokenIssuer};
use zeroize::Zeroizing;

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<(User, PasswordHash)>,
    classes: Vec<Class>,
    lectures: Vec<Lecture>,
    rooms: Vec<Room>,
    courses: Vec<Course>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn email_taken(&self, email: &EmailAddress, except: Option<UserId>) -> bool {
        self.users
            .iter()
            .any(|(user, _)| &user.email == email && Some(user.id) != except)
    }

    fn npm_taken(&self, npm: Option<&Npm>, except: Option<UserId>) -> bool {
        npm.is_some_and(|npm| {
            self.users
                .iter()
                .any(|(user, _)| user.npm.as_ref() == Some(npm) && Some(user.id) != except)
        })
    }

    fn class_exists(&self, id: Option<ClassId>) -> bool {
        id.is_none_or(|id| self.classes.iter().any(|class| class.id == id))
    }
}

/// Shared in-memory database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stored digest for `email`, if the account exists.
    pub fn password_hash_of(&self, email: &str) -> Option<String> {
        self.lock()
            .users
            .iter()
            .find(|(user, _)| user.email.as_str() == email)
            .map(|(_, hash)| hash.as_str().to_owned())
    }

    /// Insert a class directly, bypassing the service.
    pub fn seed_class(&self, name: &str) -> ClassId {
        let mut tables = self.lock();
        let id = ClassId::new(tables.next_id());
        tables.classes.push(Class {
            id,
            name: ClassName::new(name).expect("class name"),
            join_code: campus_backend::domain::JoinCode::from_stored("SEEDED0001"),
        });
        id
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn create(&self, account: &NewAccount) -> Result<User, AccountRepositoryError> {
        let mut tables = self.lock();
        let profile = &account.profile;
        if tables.email_taken(&profile.email, None) {
            return Err(AccountRepositoryError::duplicate("users_email_key"));
        }
        if tables.npm_taken(profile.npm.as_ref(), None) {
            return Err(AccountRepositoryError::duplicate("users_npm_key"));
        }
        if !tables.class_exists(profile.class_id) {
            return Err(AccountRepositoryError::referenced("users_class_id_fkey"));
        }
        let user = User::from_profile(UserId::new(tables.next_id()), profile.clone());
        if user.role.owns_lecture() {
            let id = LectureId::new(tables.next_id());
            let name = LectureName::new(user.name.as_str())
                .map_err(|err| AccountRepositoryError::query(err.to_string()))?;
            tables.lectures.push(Lecture {
                id,
                name,
                user_id: user.id,
            });
        }
        tables
            .users
            .push((user.clone(), account.password_hash.clone()));
        Ok(user)
    }

    async fn find_credentials(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| &user.email == email)
            .map(|(user, hash)| StoredCredentials {
                user: user.clone(),
                password_hash: hash.clone(),
            }))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(user, _)| user.clone()))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| &user.email == email)
            .map(|(user, _)| user.clone()))
    }

    async fn find_by_npm(&self, npm: &Npm) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| user.npm.as_ref() == Some(npm))
            .map(|(user, _)| user.clone()))
    }

    async fn count_by_class(&self, class_id: ClassId) -> Result<u64, UserRepositoryError> {
        let count = self
            .lock()
            .users
            .iter()
            .filter(|(user, _)| user.class_id == Some(class_id))
            .count();
        Ok(count as u64)
    }

    async fn password_hash(
        &self,
        id: UserId,
    ) -> Result<Option<PasswordHash>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(_, hash)| hash.clone()))
    }

    async fn update_profile(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut tables = self.lock();
        if tables.email_taken(&profile.email, Some(id)) {
            return Err(UserRepositoryError::duplicate("users_email_key"));
        }
        if tables.npm_taken(profile.npm.as_ref(), Some(id)) {
            return Err(UserRepositoryError::duplicate("users_npm_key"));
        }
        if !tables.class_exists(profile.class_id) {
            return Err(UserRepositoryError::referenced("users_class_id_fkey"));
        }
        if !tables.users.iter().any(|(user, _)| user.id == id) {
            return Ok(None);
        }
        let owned = tables.lectures.iter().find(|l| l.user_id == id).map(|l| l.id);
        let owns_lecture = profile.role.owns_lecture();
        if !owns_lecture
            && owned.is_some_and(|lecture| tables.rooms.iter().any(|r| r.lecture_id == lecture))
        {
            return Err(UserRepositoryError::referenced("room_lecture_id_fkey"));
        }
        let name = LectureName::new(profile.name.as_str())
            .map_err(|err| UserRepositoryError::query(err.to_string()))?;
        match (owns_lecture, owned) {
            (true, Some(lecture)) => {
                if let Some(row) = tables.lectures.iter_mut().find(|l| l.id == lecture) {
                    row.name = name;
                }
            }
            (true, None) => {
                let lecture = LectureId::new(tables.next_id());
                tables.lectures.push(Lecture {
                    id: lecture,
                    name,
                    user_id: id,
                });
            }
            (false, _) => tables.lectures.retain(|l| l.user_id != id),
        }
        let updated = User::from_profile(id, profile.clone());
        if let Some(slot) = tables.users.iter_mut().find(|(user, _)| user.id == id) {
            slot.0 = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn update_email(
        &self,
        id: UserId,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut tables = self.lock();
        if tables.email_taken(email, Some(id)) {
            return Err(UserRepositoryError::duplicate("users_email_key"));
        }
        Ok(tables
            .users
            .iter_mut()
            .find(|(user, _)| user.id == id)
            .map(|(user, _)| {
                user.email = email.clone();
                user.clone()
            }))
    }

    async fn update_password(
        &self,
        id: UserId,
        hash: &PasswordHash,
    ) -> Result<bool, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter_mut()
            .find(|(user, _)| user.id == id)
            .map(|(_, stored)| *stored = hash.clone())
            .is_some())
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        let mut tables = self.lock();
        let owned: Vec<LectureId> = tables
            .lectures
            .iter()
            .filter(|lecture| lecture.user_id == id)
            .map(|lecture| lecture.id)
            .collect();
        if tables
            .rooms
            .iter()
            .any(|room| owned.contains(&room.lecture_id))
        {
            return Err(UserRepositoryError::referenced("room_lecture_id_fkey"));
        }
        tables.lectures.retain(|lecture| lecture.user_id != id);
        let before = tables.users.len();
        tables.users.retain(|(user, _)| user.id != id);
        Ok(tables.users.len() != before)
    }
}

#[async_trait]
impl ClassRepository for MemoryStore {
    async fn insert(&self, class: &NewClass) -> Result<Class, ClassRepositoryError> {
        let mut tables = self.lock();
        if tables.classes.iter().any(|c| c.name == class.name) {
            return Err(ClassRepositoryError::duplicate("class_name_key"));
        }
        if tables.classes.iter().any(|c| c.join_code == class.join_code) {
            return Err(ClassRepositoryError::duplicate("class_join_code_key"));
        }
        let stored = Class {
            id: ClassId::new(tables.next_id()),
            name: class.name.clone(),
            join_code: class.join_code.clone(),
        };
        tables.classes.push(stored.clone());
        Ok(stored)
    }

    async fn rename(
        &self,
        id: ClassId,
        name: &ClassName,
    ) -> Result<Option<Class>, ClassRepositoryError> {
        let mut tables = self.lock();
        if tables.classes.iter().any(|c| &c.name == name && c.id != id) {
            return Err(ClassRepositoryError::duplicate("class_name_key"));
        }
        Ok(tables.classes.iter_mut().find(|c| c.id == id).map(|c| {
            c.name = name.clone();
            c.clone()
        }))
    }

    async fn delete(&self, id: ClassId) -> Result<bool, ClassRepositoryError> {
        let mut tables = self.lock();
        if tables.users.iter().any(|(user, _)| user.class_id == Some(id)) {
            return Err(ClassRepositoryError::referenced("users_class_id_fkey"));
        }
        let before = tables.classes.len();
        tables.classes.retain(|c| c.id != id);
        Ok(tables.classes.len() != before)
    }

    async fn find_by_id(&self, id: ClassId) -> Result<Option<Class>, ClassRepositoryError> {
        Ok(self.lock().classes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &ClassName,
    ) -> Result<Option<Class>, ClassRepositoryError> {
        Ok(self.lock().classes.iter().find(|c| &c.name == name).cloned())
    }
}

#[async_trait]
impl LectureRepository for MemoryStore {
    async fn insert(&self, lecture: &LectureDraft) -> Result<Lecture, LectureRepositoryError> {
        let mut tables = self.lock();
        if tables.lectures.iter().any(|l| l.user_id == lecture.user_id) {
            return Err(LectureRepositoryError::duplicate("lecture_user_id_key"));
        }
        let stored = Lecture {
            id: LectureId::new(tables.next_id()),
            name: lecture.name.clone(),
            user_id: lecture.user_id,
        };
        tables.lectures.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: LectureId,
        lecture: &LectureDraft,
    ) -> Result<Option<Lecture>, LectureRepositoryError> {
        let mut tables = self.lock();
        if tables
            .lectures
            .iter()
            .any(|l| l.user_id == lecture.user_id && l.id != id)
        {
            return Err(LectureRepositoryError::duplicate("lecture_user_id_key"));
        }
        Ok(tables.lectures.iter_mut().find(|l| l.id == id).map(|l| {
            l.name = lecture.name.clone();
            l.user_id = lecture.user_id;
            l.clone()
        }))
    }

    async fn delete(&self, id: LectureId) -> Result<bool, LectureRepositoryError> {
        let mut tables = self.lock();
        if tables.rooms.iter().any(|room| room.lecture_id == id) {
            return Err(LectureRepositoryError::referenced("room_lecture_id_fkey"));
        }
        let before = tables.lectures.len();
        tables.lectures.retain(|l| l.id != id);
        Ok(tables.lectures.len() != before)
    }

    async fn find_by_id(
        &self,
        id: LectureId,
    ) -> Result<Option<Lecture>, LectureRepositoryError> {
        Ok(self.lock().lectures.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Lecture>, LectureRepositoryError> {
        let needle = name.to_lowercase();
        Ok(self
            .lock()
            .lectures
            .iter()
            .filter(|l| l.name.as_str().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Lecture>, LectureRepositoryError> {
        Ok(self
            .lock()
            .lectures
            .iter()
            .find(|l| l.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn insert(&self, room: &RoomDraft) -> Result<Room, RoomRepositoryError> {
        let mut tables = self.lock();
        if !tables.lectures.iter().any(|l| l.id == room.lecture_id) {
            return Err(RoomRepositoryError::referenced("room_lecture_id_fkey"));
        }
        let stored = Room::from_draft(RoomId::new(tables.next_id()), room.clone());
        tables.rooms.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: RoomId,
        room: &RoomDraft,
    ) -> Result<Option<Room>, RoomRepositoryError> {
        let mut tables = self.lock();
        Ok(tables.rooms.iter_mut().find(|r| r.id == id).map(|slot| {
            *slot = Room::from_draft(id, room.clone());
            slot.clone()
        }))
    }

    async fn delete(&self, id: RoomId) -> Result<bool, RoomRepositoryError> {
        let mut tables = self.lock();
        let before = tables.rooms.len();
        tables.rooms.retain(|r| r.id != id);
        Ok(tables.rooms.len() != before)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, RoomRepositoryError> {
        Ok(self.lock().rooms.iter().find(|r| r.id == id).cloned())
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn insert(&self, course: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let mut tables = self.lock();
        if tables.courses.iter().any(|c| c.code == course.code) {
            return Err(CourseRepositoryError::duplicate("matkul_kode_matkul_key"));
        }
        let stored = Course::from_draft(CourseId::new(tables.next_id()), course.clone());
        tables.courses.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: CourseId,
        course: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut tables = self.lock();
        if tables
            .courses
            .iter()
            .any(|c| c.code == course.code && c.id != id)
        {
            return Err(CourseRepositoryError::duplicate("matkul_kode_matkul_key"));
        }
        Ok(tables.courses.iter_mut().find(|c| c.id == id).map(|slot| {
            *slot = Course::from_draft(id, course.clone());
            slot.clone()
        }))
    }

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let mut tables = self.lock();
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);
        Ok(tables.courses.len() != before)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.lock().courses.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.lock().courses.iter().find(|c| c.code == code).cloned())
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Course>, CourseRepositoryError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .lock()
            .courses
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

/// Issuer sharing the signing key wired into [`http_state`].
pub fn token_issuer() -> JwtTokenIssuer {
    let secret = Zeroizing::new(b"integration-test-secret-of-32-bytes!".to_vec());
    JwtTokenIssuer::new(&secret, "campus-backend")
}

/// HTTP state wired exactly like the server, over `store`.
pub fn http_state(store: &MemoryStore) -> HttpState {
    let store = Arc::new(store.clone());
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let issuer = Arc::new(token_issuer());

    let auth = Arc::new(AuthService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        hasher.clone(),
        issuer.clone(),
    ));
    let users = Arc::new(UserService::new(store.clone(), store.clone(), hasher));
    let classes = Arc::new(ClassService::new(store.clone(), store.clone()));
    let lectures = Arc::new(LectureService::new(store.clone(), store.clone()));
    let rooms = Arc::new(RoomService::new(store.clone(), store.clone()));
    let courses = Arc::new(CourseService::new(store));

    HttpState::new(HttpStatePorts {
        auth,
        users: users.clone(),
        users_query: users,
        classes: classes.clone(),
        classes_query: classes,
        lectures: lectures.clone(),
        lectures_query: lectures,
        rooms: rooms.clone(),
        rooms_query: rooms,
        courses: courses.clone(),
        courses_query: courses,
        tokens: issuer,
    })
    .with_cookie_secure(false)
}
